#![cfg(target_arch = "wasm32")]
use starburst_core::features::FeatureTrack;
use starburst_core::signal::PreAnalyzedSignal;
use starburst_core::{EngineConfig, VisualMode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod app;
mod audio;
mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod keys;
mod overlay;

use app::App;
use audio::AudioInput;
use constants::*;

thread_local! {
    // Shared with the JS-exported loaders below.
    static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
}

fn with_app<T>(f: impl FnOnce(&mut App) -> T) -> Result<T, JsValue> {
    APP.with(|slot| {
        let slot = slot.borrow();
        let app = slot
            .as_ref()
            .ok_or_else(|| JsValue::from_str("starburst is not initialized yet"))?;
        let mut app = app.borrow_mut();
        Ok(f(&mut app))
    })
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_overlay_buttons(document: &web::Document, audio: Option<Rc<RefCell<AudioInput>>>) {
    for id in [OVERLAY_OK_ID, OVERLAY_CLOSE_ID] {
        let audio = audio.clone();
        dom::add_click_listener(document, id, move || {
            if let Some(a) = &audio {
                a.borrow().play();
            }
            if let Some(d) = dom::window_document() {
                overlay::hide(&d);
            }
        });
    }
}

/// Optional `<audio id="app-audio">`; without it the scene idles.
fn attach_audio(document: &web::Document) -> Option<Rc<RefCell<AudioInput>>> {
    let element = document
        .get_element_by_id(AUDIO_ID)?
        .dyn_into::<web::HtmlMediaElement>()
        .ok()?;
    match AudioInput::attach(element) {
        Ok(a) => Some(Rc::new(RefCell::new(a))),
        Err(e) => {
            log::error!("[audio] analyser setup failed: {:?}", e);
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("starburst starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_canvas_resize(&canvas);
    let painter = canvas::CanvasPainter::from_canvas(&canvas)?;

    let (w, h) = dom::css_size(&canvas);
    let app = Rc::new(RefCell::new(App::new(
        EngineConfig::default(),
        VisualMode::Universe,
        w,
        h,
        rand::random(),
    )));
    APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

    let audio = attach_audio(&document);
    if audio.is_none() {
        log::warn!("[audio] no #{} element; running without a signal", AUDIO_ID);
    }

    wire_overlay_buttons(&document, audio.clone());
    events::wire_global_keydown(app.clone(), audio.clone());
    overlay::update_hint(&document, app.borrow().mode().as_str(), app.borrow().drive_label());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        app, audio, canvas, painter,
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}

/// Load offline band frames: a flat `[sub, kick, vocal, high, ...]` array
/// sampled at 30 Hz. An empty array returns to the live analyser.
#[wasm_bindgen]
pub fn load_analysis_frames(values: js_sys::Float32Array) -> Result<(), JsValue> {
    let signal = PreAnalyzedSignal::from_flat(&values.to_vec())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    with_app(|app| app.load_frames(signal))
}

/// Load an offline feature track document for the piano-floor overlay.
#[wasm_bindgen]
pub fn load_feature_track(json: &str) -> Result<(), JsValue> {
    let track = FeatureTrack::from_json(json).map_err(|e| {
        log::warn!("[features] rejected track: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    with_app(|app| app.load_feature_track(track))
}

#[wasm_bindgen]
pub fn set_visual_mode(mode: &str) -> Result<(), JsValue> {
    let mode: VisualMode = mode
        .parse()
        .map_err(|e: starburst_core::StarburstError| JsValue::from_str(&e.to_string()))?;
    with_app(|app| app.switch_mode(mode, rand::random()))?;
    if let Some(document) = dom::window_document() {
        _ = with_app(|app| overlay::update_hint(&document, app.mode().as_str(), app.drive_label()));
    }
    Ok(())
}
