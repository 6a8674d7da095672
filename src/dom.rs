use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window()?.document()
}

pub fn add_click_listener(document: &web::Document, id: &str, mut on_click: impl FnMut() + 'static) {
    if let Some(el) = document.get_element_by_id(id) {
        let closure = Closure::wrap(Box::new(move || on_click()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Device pixel ratio, capped.
#[inline]
pub fn pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
}

/// CSS size of the canvas in pixels; the engine's coordinate space.
pub fn css_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    let rect = canvas.get_bounding_client_rect();
    (rect.width().max(1.0) as f32, rect.height().max(1.0) as f32)
}

/// Keep the canvas backing store at CSS size times the pixel ratio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let (w, h) = css_size(canvas);
    let dpr = pixel_ratio();
    let bw = (w as f64 * dpr).round() as u32;
    let bh = (h as f64 * dpr).round() as u32;
    if canvas.width() != bw || canvas.height() != bh {
        canvas.set_width(bw);
        canvas.set_height(bh);
        log::debug!("[dom] canvas backing {}x{} (css {}x{}, dpr {:.2})", bw, bh, w, h, dpr);
    }
}
