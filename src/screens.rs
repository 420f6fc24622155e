use crate::app::App;
use crate::constants::*;
use crate::dom;
use crate::meter;
use greeting_core::constants::PIN_LENGTH;
use greeting_core::{CandleState, Phase};
use web_sys as web;

const SCREENS: [(Phase, &str); 4] = [
    (Phase::Locked, SCREEN_LOCKED),
    (Phase::Reveal, SCREEN_REVEAL),
    (Phase::Candle, SCREEN_CANDLE),
    (Phase::Message, SCREEN_MESSAGE),
];

/// Show exactly the screen for `phase`.
pub fn show_phase(document: &web::Document, phase: Phase) {
    for (p, id) in SCREENS {
        dom::set_hidden(document, id, p != phase);
    }
}

/// Everything the DOM reflects, captured once per frame so the page is only
/// touched when something actually changed.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    pub pin_len: usize,
    pub pin_error: bool,
    pub back_visible: bool,
    pub music_playing: bool,
    pub candles: CandleState,
    pub meter_style: String,
    pub mic_active: bool,
    pub hint: bool,
    pub secret: bool,
}

impl ViewState {
    pub fn capture(app: &App) -> Self {
        let (phase, pin_len, pin_error, back_visible, candles) = {
            let c = app.controller.borrow();
            (
                c.phase(),
                c.pad().len(),
                c.pad().is_error(),
                c.is_back_visible(),
                c.candles(),
            )
        };
        let volume = app.detector.borrow().wind_volume();
        let ui = *app.ui.borrow();
        Self {
            phase,
            pin_len,
            pin_error,
            back_visible,
            music_playing: app.track.borrow().is_playing(),
            candles,
            meter_style: meter::meter_style(volume),
            mic_active: meter::mic_active(volume),
            hint: ui.hint,
            secret: ui.secret,
        }
    }
}

pub fn apply(document: &web::Document, prev: Option<&ViewState>, next: &ViewState) {
    if prev.map(|p| p.phase) != Some(next.phase) {
        show_phase(document, next.phase);
    }
    dom::set_hidden(document, BACK_BUTTON, !next.back_visible);
    dom::set_text(
        document,
        MUSIC_BUTTON,
        if next.music_playing { "🔊" } else { "🔇" },
    );

    // lock pad
    for i in 0..PIN_LENGTH {
        dom::set_class(
            document,
            &format!("{PIN_DOT_PREFIX}{i}"),
            CLASS_FILLED,
            i < next.pin_len,
        );
    }
    dom::set_class(document, PIN_DOTS, CLASS_ERROR, next.pin_error);
    dom::set_class(document, LOCK_ICON, CLASS_ERROR, next.pin_error);

    // cake controls
    let lit = next.candles.is_lit();
    let blown = next.candles.is_blown();
    dom::set_hidden(document, LIGHT_BUTTON, lit || blown);
    dom::set_hidden(document, BLOW_PANEL, !lit || blown);
    dom::set_hidden(document, WISH_TEXT, !blown);
    dom::set_style(document, VOLUME_BAR, &next.meter_style);
    dom::set_class(document, MIC_ICON, CLASS_PULSE, next.mic_active);
    dom::set_hidden(document, HINT_TEXT, !next.hint);

    dom::set_hidden(document, SECRET_NOTE, !next.secret);
}
