#![cfg(target_arch = "wasm32")]
use greeting_core::{GreetingConfig, Phase};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod app;
mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod intent;
mod meter;
mod render;
mod screens;

const OVERRIDE_KEYS: [&str; 2] = ["sensitivity", "name"];

/// Defaults, adjusted by `?sensitivity=..&name=..` when present. A bad
/// override is logged and the defaults are used instead.
fn load_config(window: &web::Window) -> GreetingConfig {
    let search = window.location().search().unwrap_or_default();
    let params = match web::UrlSearchParams::new_with_str(&search) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[config] unreadable query: {:?}", e);
            return GreetingConfig::default();
        }
    };
    let pairs: Vec<(&str, String)> = OVERRIDE_KEYS
        .iter()
        .filter_map(|&k| params.get(k).map(|v| (k, v)))
        .collect();
    GreetingConfig::default()
        .with_overrides(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .unwrap_or_else(|e| {
            log::warn!("[config] {e}; using defaults");
            GreetingConfig::default()
        })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("greeting-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = Rc::new(load_config(&window));
    log::info!(
        "[config] threshold={:.0} fft={} name={}",
        config.blow_threshold,
        config.fft_size,
        config.recipient_name
    );

    let app = app::App::new(document.clone(), config.clone())?;
    let cake_canvas = dom::canvas_by_id(&document, constants::CAKE_CANVAS)?;

    dom::set_text(&document, constants::RECIPIENT_NAME, &config.recipient_name);
    screens::show_phase(&document, Phase::Locked);

    events::wire_buttons(&app);
    events::wire_keyboard(&app);
    events::wire_pagehide(&app);
    events::wire_canvas_resize(&[app.confetti_canvas.clone(), cake_canvas.clone()]);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(app, cake_canvas)?));
    frame::start_loop(frame_ctx);
    Ok(())
}
