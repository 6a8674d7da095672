use crate::constants::{HINT_ID, OVERLAY_ID};
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    let Some(el) = document.get_element_by_id(OVERLAY_ID) else {
        return false;
    };
    el.class_list().contains("hidden")
        || el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Show the current visual mode and drive in the hint strip.
pub fn update_hint(document: &web::Document, mode: &str, drive: &str) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let html = format!(
            "<div style='color: #cfe7ff; font: 13px system-ui; background: rgba(10, 14, 24, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(80, 110, 150, 0.35);'>Mode: {} • Signal: {}</div>",
            mode, drive
        );
        el.set_inner_html(&html);
        _ = el.set_attribute("style", "");
    }
}
