use crate::app::App;
use crate::audio::AudioInput;
use crate::keys::{self, KeyAction};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn fresh_seed() -> u64 {
    rand::random()
}

fn refresh_hint(app: &App) {
    if let Some(document) = crate::dom::window_document() {
        overlay::update_hint(&document, app.mode().as_str(), app.drive_label());
    }
}

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    app: &Rc<RefCell<App>>,
    audio: Option<&Rc<RefCell<AudioInput>>>,
) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = keys::action_for_key(&ev.key()) else {
        return;
    };
    if keys::suppresses_default(action) {
        ev.prevent_default();
    }
    match action {
        KeyAction::TogglePlayback => match audio {
            Some(a) => a.borrow().toggle_playback(),
            None => log::warn!("[keys] no audio element attached"),
        },
        KeyAction::CycleMode => {
            let mut a = app.borrow_mut();
            a.cycle_mode(fresh_seed());
            refresh_hint(&a);
        }
        KeyAction::SelectMode(mode) => {
            let mut a = app.borrow_mut();
            a.switch_mode(mode, fresh_seed());
            refresh_hint(&a);
        }
        KeyAction::RandomizeOrbits => app.borrow_mut().randomize_orbits(),
        KeyAction::ShiftStars => {
            let started = app.borrow_mut().shift_stars(js_sys::Math::random());
            log::info!("[keys] star shift started={}", started);
        }
        KeyAction::ToggleOverlay => {
            if let Some(document) = crate::dom::window_document() {
                overlay::toggle(&document);
            }
        }
    }
}

pub fn wire_global_keydown(app: Rc<RefCell<App>>, audio: Option<Rc<RefCell<AudioInput>>>) {
    if let Some(window) = web::window() {
        let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
            handle_global_keydown(&ev, &app, audio.as_ref());
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
