// Sanity checks on the shipped defaults.

use greeting_core::constants::*;
use greeting_core::GreetingConfig;

#[test]
fn analyser_has_128_bins_and_threshold_fits() {
    assert_eq!(ANALYSER_FFT_SIZE / 2, 128);
    assert!(DEFAULT_BLOW_THRESHOLD > 0.0 && DEFAULT_BLOW_THRESHOLD < MAX_BIN_MAGNITUDE);
}

#[test]
fn unlock_code_is_four_digits() {
    assert_eq!(PIN_CODE.len(), PIN_LENGTH);
    assert!(PIN_CODE.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn timings_match_the_experience() {
    assert_eq!(CONFETTI_DURATION.as_millis(), 3000);
    assert_eq!(CONFETTI_SETTLE.as_millis(), 500);
    assert_eq!(PIN_ERROR_DISPLAY.as_millis(), 500);
    assert_eq!(CANDLE_ADVANCE_DELAY.as_millis(), 3500);
}

#[test]
fn music_defaults() {
    assert_eq!(MUSIC_VOLUME, 0.4);
    assert!(MUSIC_URL.starts_with("https://"));
}

#[test]
fn defaults_validate() {
    let cfg = GreetingConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.recipient_name, RECIPIENT_NAME);
}
