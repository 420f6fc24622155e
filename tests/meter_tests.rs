// Host-side tests for the blow panel's volume meter.

#![allow(dead_code)]
mod meter {
    include!("../src/meter.rs");
}

use meter::*;

#[test]
fn meter_scales_and_clamps() {
    assert_eq!(meter_percent(0.0), 0.0);
    assert_eq!(meter_percent(20.0), 50.0);
    assert_eq!(meter_percent(40.0), 100.0);
    assert_eq!(meter_percent(255.0), 100.0);
}

#[test]
fn style_is_rounded_to_whole_percent() {
    assert_eq!(meter_style(0.0), "width: 0%");
    assert_eq!(meter_style(10.1), "width: 25%");
    assert_eq!(meter_style(255.0), "width: 100%");
}

#[test]
fn mic_pulses_above_ten() {
    assert!(!mic_active(10.0));
    assert!(mic_active(10.5));
}
