use crate::intent::Intent;
use greeting_core::Phase;

/// Map a `KeyboardEvent.key` to an intent for the current screen.
///
/// Back and music work everywhere; digits only on the lock screen, the
/// light key only on the cake screen.
#[inline]
pub fn intent_for_key(key: &str, phase: Phase) -> Option<Intent> {
    match key {
        "Escape" => return Some(Intent::Back),
        "m" | "M" => return Some(Intent::ToggleMusic),
        _ => {}
    }
    match phase {
        Phase::Locked => match key {
            "Backspace" | "Delete" => Some(Intent::DeleteDigit),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Some(Intent::Digit(c)),
                    _ => None,
                }
            }
        },
        Phase::Candle => match key {
            " " | "Enter" => Some(Intent::LightCandles),
            "h" | "H" => Some(Intent::ToggleHint),
            _ => None,
        },
        Phase::Message => match key {
            "s" | "S" => Some(Intent::ToggleSecret),
            _ => None,
        },
        Phase::Reveal => None,
    }
}
