//! Error types for the greeting core.
//!
//! None of these are fatal. Each one maps to "feature unavailable" and the rest
//! of the experience carries on.

use thiserror::Error;

/// Rejected configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unlock code must be {expected} ascii digits, got {got:?}")]
    BadPinCode { expected: usize, got: String },

    #[error("blow threshold {0} is outside 0..=255")]
    ThresholdOutOfRange(f32),

    #[error("music volume {0} is outside 0..=1")]
    VolumeOutOfRange(f64),

    #[error("recipient name must not be empty")]
    EmptyName,

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// Microphone capture failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no usable microphone: {0}")]
    DeviceUnavailable(String),

    #[error("microphone capture unsupported: {0}")]
    Unsupported(String),

    #[error("audio analysis setup failed: {0}")]
    Analysis(String),
}

impl CaptureError {
    /// Classify a `getUserMedia` rejection by its DOMException name.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
                CaptureError::PermissionDenied
            }
            "NotFoundError" | "NotReadableError" | "OverconstrainedError" | "AbortError" => {
                CaptureError::DeviceUnavailable(message.to_string())
            }
            _ => CaptureError::Unsupported(format!("{name}: {message}")),
        }
    }
}

/// Background music playback failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playback blocked by autoplay policy: {0}")]
    Blocked(String),

    #[error("playback failed: {0}")]
    Failed(String),
}

impl PlaybackError {
    /// Classify a rejected `HTMLMediaElement.play()` promise.
    pub fn from_dom_exception(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => PlaybackError::Blocked(message.to_string()),
            _ => PlaybackError::Failed(format!("{name}: {message}")),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, PlaybackError::Blocked(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_exception_names_classify_capture_errors() {
        assert_eq!(
            CaptureError::from_dom_exception("NotAllowedError", "denied"),
            CaptureError::PermissionDenied
        );
        assert_eq!(
            CaptureError::from_dom_exception("NotFoundError", "no device"),
            CaptureError::DeviceUnavailable("no device".into())
        );
        assert!(matches!(
            CaptureError::from_dom_exception("TypeError", "bad constraints"),
            CaptureError::Unsupported(_)
        ));
    }

    #[test]
    fn autoplay_rejection_is_blocked() {
        assert!(PlaybackError::from_dom_exception("NotAllowedError", "gesture").is_blocked());
        assert!(!PlaybackError::from_dom_exception("NotSupportedError", "codec").is_blocked());
    }
}
