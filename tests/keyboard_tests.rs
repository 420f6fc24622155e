// Host-side tests for the pure keyboard mapping.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod intent {
    include!("../src/intent.rs");
}
mod keyboard {
    include!("../src/events/keyboard.rs");
}

use greeting_core::Phase;
use intent::Intent;
use keyboard::intent_for_key;

#[test]
fn digits_only_on_the_lock_screen() {
    for d in '0'..='9' {
        let key = d.to_string();
        assert_eq!(intent_for_key(&key, Phase::Locked), Some(Intent::Digit(d)));
        assert_eq!(intent_for_key(&key, Phase::Candle), None);
    }
    assert_eq!(intent_for_key("Backspace", Phase::Locked), Some(Intent::DeleteDigit));
    assert_eq!(intent_for_key("Backspace", Phase::Message), None);
}

#[test]
fn named_keys_are_not_digits() {
    assert_eq!(intent_for_key("F1", Phase::Locked), None);
    assert_eq!(intent_for_key("12", Phase::Locked), None);
    assert_eq!(intent_for_key("", Phase::Locked), None);
    assert_eq!(intent_for_key("٣", Phase::Locked), None);
}

#[test]
fn back_and_music_work_everywhere() {
    for phase in [Phase::Locked, Phase::Reveal, Phase::Candle, Phase::Message] {
        assert_eq!(intent_for_key("Escape", phase), Some(Intent::Back));
        assert_eq!(intent_for_key("m", phase), Some(Intent::ToggleMusic));
        assert_eq!(intent_for_key("M", phase), Some(Intent::ToggleMusic));
    }
}

#[test]
fn screen_specific_keys() {
    assert_eq!(intent_for_key(" ", Phase::Candle), Some(Intent::LightCandles));
    assert_eq!(intent_for_key("Enter", Phase::Candle), Some(Intent::LightCandles));
    assert_eq!(intent_for_key("h", Phase::Candle), Some(Intent::ToggleHint));
    assert_eq!(intent_for_key("s", Phase::Message), Some(Intent::ToggleSecret));
    assert_eq!(intent_for_key(" ", Phase::Reveal), None);
    assert_eq!(intent_for_key("s", Phase::Candle), None);
}
