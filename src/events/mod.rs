pub mod keyboard;

use crate::app::App;
use crate::constants::*;
use crate::dom;
use crate::intent::Intent;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

fn on_click(app: &App, id: &str, intent: Intent) {
    let target = app.clone();
    dom::add_click_listener(&app.document, id, move || target.handle(intent));
}

/// Every on-page control maps to exactly one intent.
pub fn wire_buttons(app: &App) {
    for d in '0'..='9' {
        on_click(app, &format!("{PAD_KEY_PREFIX}{d}"), Intent::Digit(d));
    }
    on_click(app, PAD_DELETE, Intent::DeleteDigit);
    on_click(app, BACK_BUTTON, Intent::Back);
    on_click(app, MUSIC_BUTTON, Intent::ToggleMusic);
    on_click(app, LIGHT_BUTTON, Intent::LightCandles);
    on_click(app, HINT_BUTTON, Intent::ToggleHint);
    on_click(app, SECRET_BUTTON, Intent::ToggleSecret);
}

pub fn wire_keyboard(app: &App) {
    let Some(window) = web::window() else {
        return;
    };
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        let phase = app.controller.borrow().phase();
        if let Some(intent) = keyboard::intent_for_key(&ev.key(), phase) {
            ev.prevent_default();
            app.handle(intent);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Release the microphone and stop the music when the page goes away.
pub fn wire_pagehide(app: &App) {
    let Some(window) = web::window() else {
        return;
    };
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move || app.teardown()) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keep canvas backing stores matched to CSS size * devicePixelRatio.
pub fn wire_canvas_resize(canvases: &[web::HtmlCanvasElement]) {
    for canvas in canvases {
        dom::sync_canvas_backing_size(canvas);
    }
    let Some(window) = web::window() else {
        return;
    };
    let canvases = canvases.to_vec();
    let closure = Closure::wrap(Box::new(move || {
        for canvas in &canvases {
            dom::sync_canvas_backing_size(canvas);
        }
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
