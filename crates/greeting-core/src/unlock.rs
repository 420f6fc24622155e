use crate::constants::PIN_LENGTH;
use smallvec::SmallVec;
use std::time::Duration;

/// Result of a key press on the pad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadOutcome {
    /// Not a digit, or the pad is showing the error state.
    Ignored,
    Accepted,
    Unlocked,
    Rejected,
}

/// The digits typed so far on the lock screen.
///
/// A full attempt is checked once. A correct one clears the buffer right away;
/// a wrong one raises the error flag and the buffer is cleared by [`tick`](Self::tick)
/// once the error display time has passed. There is no retry limit.
#[derive(Clone, Debug)]
pub struct UnlockPad {
    code: String,
    digits: SmallVec<[char; PIN_LENGTH]>,
    error_until: Option<Duration>,
    error_display: Duration,
}

impl UnlockPad {
    pub fn new(code: impl Into<String>, error_display: Duration) -> Self {
        Self {
            code: code.into(),
            digits: SmallVec::new(),
            error_until: None,
            error_display,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.error_until.is_some()
    }

    pub fn press(&mut self, key: char, now: Duration) -> PadOutcome {
        if !key.is_ascii_digit() || self.is_error() || self.digits.len() >= PIN_LENGTH {
            return PadOutcome::Ignored;
        }
        self.digits.push(key);
        if self.digits.len() < PIN_LENGTH {
            return PadOutcome::Accepted;
        }
        if self.digits.iter().copied().eq(self.code.chars()) {
            self.digits.clear();
            PadOutcome::Unlocked
        } else {
            self.error_until = Some(now + self.error_display);
            PadOutcome::Rejected
        }
    }

    /// Remove the last digit. Ignored while the error is showing.
    pub fn delete(&mut self) -> bool {
        if self.is_error() {
            return false;
        }
        self.digits.pop().is_some()
    }

    /// Clear a rejected attempt once its error display has elapsed.
    /// Returns true when the buffer was cleared.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.error_until {
            Some(until) if now >= until => {
                self.error_until = None;
                self.digits.clear();
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.digits.clear();
        self.error_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn non_digits_are_ignored() {
        let mut pad = UnlockPad::new("2901", ms(500));
        assert_eq!(pad.press('x', ms(0)), PadOutcome::Ignored);
        assert!(pad.is_empty());
    }

    #[test]
    fn presses_during_error_are_ignored() {
        let mut pad = UnlockPad::new("2901", ms(500));
        for k in "123".chars() {
            pad.press(k, ms(0));
        }
        assert_eq!(pad.press('4', ms(10)), PadOutcome::Rejected);
        assert_eq!(pad.press('2', ms(20)), PadOutcome::Ignored);
        assert!(!pad.delete());
        assert_eq!(pad.len(), 4);
    }

    #[test]
    fn delete_removes_last_digit() {
        let mut pad = UnlockPad::new("2901", ms(500));
        pad.press('2', ms(0));
        pad.press('8', ms(0));
        assert!(pad.delete());
        pad.press('9', ms(0));
        pad.press('0', ms(0));
        assert_eq!(pad.press('1', ms(0)), PadOutcome::Unlocked);
    }
}
