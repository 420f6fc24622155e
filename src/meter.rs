// Volume meter mapping for the blow panel.
use greeting_core::constants::{METER_GAIN, MIC_ACTIVE_VOLUME};

/// Bar width in percent for a low-band volume on the 0..=255 scale.
#[inline]
pub fn meter_percent(volume: f32) -> f32 {
    (volume * METER_GAIN).clamp(0.0, 100.0)
}

/// Whether the mic icon should pulse.
#[inline]
pub fn mic_active(volume: f32) -> bool {
    volume > MIC_ACTIVE_VOLUME
}

/// Inline style for the bar, rounded so unchanged frames produce equal strings.
pub fn meter_style(volume: f32) -> String {
    format!("width: {:.0}%", meter_percent(volume))
}
