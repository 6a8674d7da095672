use crate::app::App;
use crate::audio::AudioInput;
use crate::canvas::CanvasPainter;
use crate::constants::FPS_LOG_INTERVAL_SEC;
use crate::dom;
use instant::Instant;
use starburst_core::FrameInput;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: Rc<RefCell<App>>,
    pub audio: Option<Rc<RefCell<AudioInput>>>,
    pub canvas: web::HtmlCanvasElement,
    pub painter: CanvasPainter,

    pub last_instant: Instant,
    pub fps_window_sec: f32,
    pub fps_frames: u32,
}

impl FrameContext {
    pub fn new(
        app: Rc<RefCell<App>>,
        audio: Option<Rc<RefCell<AudioInput>>>,
        canvas: web::HtmlCanvasElement,
        painter: CanvasPainter,
    ) -> Self {
        Self {
            app,
            audio,
            canvas,
            painter,
            last_instant: Instant::now(),
            fps_window_sec: 0.0,
            fps_frames: 0,
        }
    }

    /// One display refresh: resize if needed, one engine update, one draw.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.track_fps(dt_sec);

        let (w, h) = dom::css_size(&self.canvas);
        let mut app = self.app.borrow_mut();
        app.resize(w, h);

        match &self.audio {
            Some(audio) => {
                let mut audio = audio.borrow_mut();
                let playback_sec = audio.playback_sec();
                let playing = audio.is_playing();
                let input = FrameInput {
                    playback_sec,
                    playing,
                    spectrum: audio.spectrum(),
                };
                app.update(&input);
            }
            None => app.update(&FrameInput::default()),
        }

        self.painter.begin_frame(dom::pixel_ratio());
        app.scene.draw(&mut self.painter);
    }

    fn track_fps(&mut self, dt_sec: f32) {
        self.fps_window_sec += dt_sec;
        self.fps_frames += 1;
        if self.fps_window_sec >= FPS_LOG_INTERVAL_SEC {
            log::debug!(
                "[frame] {:.1} fps, {} particles",
                self.fps_frames as f32 / self.fps_window_sec,
                self.app.borrow().scene.particle_count()
            );
            self.fps_window_sec = 0.0;
            self.fps_frames = 0;
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
