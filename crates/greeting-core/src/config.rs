//! Process-wide configuration, built once at startup and shared read-only.

use crate::constants::*;
use crate::error::ConfigError;
use std::time::Duration;

/// Timing and shape of the reveal confetti.
#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationConfig {
    pub duration: Duration,
    pub settle: Duration,
    pub particles_per_burst: u32,
    pub spread_deg: f32,
    pub origin_y: f32,
    pub palette: &'static [&'static str],
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            duration: CONFETTI_DURATION,
            settle: CONFETTI_SETTLE,
            particles_per_burst: BURST_PARTICLES,
            spread_deg: BURST_SPREAD_DEG,
            origin_y: BURST_ORIGIN_Y,
            palette: CONFETTI_PALETTE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GreetingConfig {
    pub pin_code: String,
    pub pin_error_display: Duration,
    pub celebration: CelebrationConfig,
    pub candle_advance_delay: Duration,
    /// Low-band average (0..=255) that counts as a blow.
    pub blow_threshold: f32,
    pub fft_size: u32,
    pub music_url: String,
    pub music_volume: f64,
    pub recipient_name: String,
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            pin_code: PIN_CODE.to_string(),
            pin_error_display: PIN_ERROR_DISPLAY,
            celebration: CelebrationConfig::default(),
            candle_advance_delay: CANDLE_ADVANCE_DELAY,
            blow_threshold: DEFAULT_BLOW_THRESHOLD,
            fft_size: ANALYSER_FFT_SIZE,
            music_url: MUSIC_URL.to_string(),
            music_volume: MUSIC_VOLUME,
            recipient_name: RECIPIENT_NAME.to_string(),
        }
    }
}

impl GreetingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let digits_ok = self.pin_code.len() == PIN_LENGTH
            && self.pin_code.chars().all(|c| c.is_ascii_digit());
        if !digits_ok {
            return Err(ConfigError::BadPinCode {
                expected: PIN_LENGTH,
                got: self.pin_code.clone(),
            });
        }
        if !(0.0..=MAX_BIN_MAGNITUDE).contains(&self.blow_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.blow_threshold));
        }
        if !(0.0..=1.0).contains(&self.music_volume) {
            return Err(ConfigError::VolumeOutOfRange(self.music_volume));
        }
        if self.recipient_name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        Ok(())
    }

    /// Apply page-level overrides (already URL-decoded key/value pairs).
    ///
    /// Recognised keys: `sensitivity` (blow threshold, 0..=255) and `name`.
    /// Unknown keys are skipped. The result is validated before it is returned.
    pub fn with_overrides<'a>(
        mut self,
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, ConfigError> {
        for (key, value) in pairs {
            match key {
                "sensitivity" => {
                    self.blow_threshold =
                        value
                            .trim()
                            .parse::<f32>()
                            .map_err(|_| ConfigError::InvalidValue {
                                key: key.to_string(),
                                value: value.to_string(),
                            })?;
                }
                "name" => self.recipient_name = value.trim().to_string(),
                other => log::debug!("[config] ignoring override {other}"),
            }
        }
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GreetingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn sensitivity_override_sets_threshold() {
        let cfg = GreetingConfig::default()
            .with_overrides([("sensitivity", "35"), ("utm_source", "x")])
            .unwrap();
        assert_eq!(cfg.blow_threshold, 35.0);
    }

    #[test]
    fn out_of_range_sensitivity_is_rejected() {
        let err = GreetingConfig::default()
            .with_overrides([("sensitivity", "300")])
            .unwrap_err();
        assert_eq!(err, ConfigError::ThresholdOutOfRange(300.0));
    }

    #[test]
    fn garbage_sensitivity_is_rejected() {
        let err = GreetingConfig::default()
            .with_overrides([("sensitivity", "loud")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn pin_code_must_be_four_digits() {
        let cfg = GreetingConfig {
            pin_code: "29a1".into(),
            ..GreetingConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::BadPinCode { .. })));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = GreetingConfig::default()
            .with_overrides([("name", "   ")])
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyName);
    }
}
