/// Per-session candle flags shared by all candles on the cake.
///
/// `blown` only ever goes from false to true, and only after the candles were lit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CandleState {
    lit: bool,
    blown: bool,
}

impl CandleState {
    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    #[inline]
    pub fn is_blown(&self) -> bool {
        self.blown
    }

    /// Returns true if the candles were unlit before.
    pub fn light(&mut self) -> bool {
        if self.lit || self.blown {
            return false;
        }
        self.lit = true;
        true
    }

    /// Returns true on the first blow of lit candles.
    pub fn blow(&mut self) -> bool {
        if !self.lit || self.blown {
            return false;
        }
        self.blown = true;
        true
    }

    /// Put unblown candles back to the "tap to light" state. Blown candles stay blown.
    pub fn rearm(&mut self) {
        if !self.blown {
            self.lit = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cannot_blow_unlit_candles() {
        let mut c = CandleState::default();
        assert!(!c.blow());
        assert!(c.light());
        assert!(c.blow());
        assert!(!c.blow());
    }

    #[test]
    fn rearm_keeps_blown_state() {
        let mut c = CandleState::default();
        c.light();
        c.rearm();
        assert!(!c.is_lit());
        c.light();
        c.blow();
        c.rearm();
        assert!(c.is_lit() && c.is_blown());
    }
}
