use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use wasm_bindgen::JsValue;
use web_sys as web;

/// Page `<audio>` element routed through an analyser to the speakers.
///
/// The element is the transport (play/pause/seek, current time); the
/// analyser is the realtime signal source.
pub struct AudioInput {
    ctx: web::AudioContext,
    element: web::HtmlMediaElement,
    analyser: web::AnalyserNode,
    bins: Vec<u8>,
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

impl AudioInput {
    /// element -> analyser -> destination
    pub fn attach(element: web::HtmlMediaElement) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(js_err)?;
        let source = ctx.create_media_element_source(&element).map_err(js_err)?;
        let analyser = ctx.create_analyser().map_err(js_err)?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);
        analyser.set_smoothing_time_constant(ANALYSER_SMOOTHING);
        source
            .connect_with_audio_node(&analyser)
            .map_err(js_err)?;
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(js_err)?;

        let bins = vec![0u8; analyser.frequency_bin_count() as usize];
        log::info!(
            "[audio] analyser fft={} bins={} rate={}",
            ANALYSER_FFT_SIZE,
            bins.len(),
            ctx.sample_rate()
        );
        Ok(Self {
            ctx,
            element,
            analyser,
            bins,
        })
    }

    #[inline]
    pub fn playback_sec(&self) -> f32 {
        self.element.current_time() as f32
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        !self.element.paused() && !self.element.ended()
    }

    /// Latest byte spectrum, or `None` while nothing is playing.
    pub fn spectrum(&mut self) -> Option<&[u8]> {
        if !self.is_playing() {
            return None;
        }
        self.analyser.get_byte_frequency_data(&mut self.bins);
        Some(&self.bins)
    }

    /// Toggle the element; the context is resumed first since browsers keep
    /// it suspended until a user gesture.
    pub fn toggle_playback(&self) {
        if self.is_playing() {
            _ = self.element.pause();
            log::info!("[audio] paused at {:.2}s", self.playback_sec());
        } else {
            self.play();
        }
    }

    pub fn play(&self) {
        _ = self.ctx.resume();
        if let Err(e) = self.element.play() {
            log::warn!("[audio] play rejected: {:?}", e);
        } else {
            log::info!("[audio] playing from {:.2}s", self.playback_sec());
        }
    }
}
