use crate::celebration::ConfettiBurst;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Which screen is active. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Locked,
    Reveal,
    Candle,
    Message,
}

impl Phase {
    /// Where the back control leads, or `None` when it is hidden.
    pub fn back_target(self) -> Option<Phase> {
        match self {
            Phase::Locked => None,
            Phase::Reveal | Phase::Candle => Some(Phase::Locked),
            Phase::Message => Some(Phase::Candle),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Locked => "locked",
            Phase::Reveal => "reveal",
            Phase::Candle => "candle",
            Phase::Message => "message",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shared, synchronously updated view of the current phase.
///
/// Delayed and per-frame work holds a clone and re-reads it before every step,
/// so a transition is visible to them the moment it happens rather than after
/// the next render pass. Only [`PhaseController`](crate::PhaseController) writes it.
#[derive(Clone, Debug, Default)]
pub struct PhaseRef(Rc<Cell<Phase>>);

impl PhaseRef {
    pub fn new(phase: Phase) -> Self {
        Self(Rc::new(Cell::new(phase)))
    }

    #[inline]
    pub fn get(&self) -> Phase {
        self.0.get()
    }

    #[inline]
    pub fn is(&self, phase: Phase) -> bool {
        self.0.get() == phase
    }

    pub(crate) fn set(&self, phase: Phase) {
        self.0.set(phase);
    }
}

/// Side effects requested by the controller. The front-end drains these after
/// every intent and every frame tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    PhaseChanged { from: Phase, to: Phase },
    Burst(ConfettiBurst),
    StartListening,
    StopListening,
    AutoplayMusic,
    PinRejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_targets_follow_the_table() {
        assert_eq!(Phase::Locked.back_target(), None);
        assert_eq!(Phase::Reveal.back_target(), Some(Phase::Locked));
        assert_eq!(Phase::Candle.back_target(), Some(Phase::Locked));
        assert_eq!(Phase::Message.back_target(), Some(Phase::Candle));
    }

    #[test]
    fn clones_observe_writes_immediately() {
        let phase = PhaseRef::default();
        let observer = phase.clone();
        phase.set(Phase::Reveal);
        assert!(observer.is(Phase::Reveal));
    }
}
