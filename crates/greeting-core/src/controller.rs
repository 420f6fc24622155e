use crate::candle::CandleState;
use crate::celebration::{CelebrationEffect, EffectStatus};
use crate::config::GreetingConfig;
use crate::phase::{Phase, PhaseRef, Signal};
use crate::unlock::{PadOutcome, UnlockPad};
use std::rc::Rc;
use std::time::Duration;

/// The screen state machine: Locked → Reveal → Candle → Message, with back
/// navigation. All `now` arguments are monotonic time since page start.
pub struct PhaseController {
    config: Rc<GreetingConfig>,
    phase: PhaseRef,
    pad: UnlockPad,
    candles: CandleState,
    celebration: Option<CelebrationEffect>,
    message_at: Option<Duration>,
}

impl PhaseController {
    pub fn new(config: Rc<GreetingConfig>) -> Self {
        let pad = UnlockPad::new(config.pin_code.clone(), config.pin_error_display);
        Self {
            config,
            phase: PhaseRef::new(Phase::Locked),
            pad,
            candles: CandleState::default(),
            celebration: None,
            message_at: None,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn phase_ref(&self) -> PhaseRef {
        self.phase.clone()
    }

    pub fn candles(&self) -> CandleState {
        self.candles
    }

    pub fn pad(&self) -> &UnlockPad {
        &self.pad
    }

    pub fn is_back_visible(&self) -> bool {
        self.phase().back_target().is_some()
    }

    /// A confetti burst is still running or settling.
    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_some()
    }

    pub fn enter_digit(&mut self, key: char, now: Duration, out: &mut Vec<Signal>) -> PadOutcome {
        if !self.phase.is(Phase::Locked) {
            return PadOutcome::Ignored;
        }
        let outcome = self.pad.press(key, now);
        match outcome {
            PadOutcome::Unlocked => {
                log::info!("[phase] unlocked");
                self.transition(Phase::Reveal, out);
                self.celebration = Some(CelebrationEffect::start(
                    self.phase.clone(),
                    Phase::Reveal,
                    &self.config.celebration,
                    now,
                ));
                out.push(Signal::AutoplayMusic);
            }
            PadOutcome::Rejected => {
                log::info!("[phase] wrong code");
                out.push(Signal::PinRejected);
            }
            PadOutcome::Accepted | PadOutcome::Ignored => {}
        }
        outcome
    }

    pub fn delete_digit(&mut self) -> bool {
        self.phase.is(Phase::Locked) && self.pad.delete()
    }

    pub fn back(&mut self, out: &mut Vec<Signal>) {
        let Some(target) = self.phase().back_target() else {
            return;
        };
        if let Some(mut effect) = self.celebration.take() {
            effect.cancel();
        }
        self.transition(target, out);
    }

    /// "Tap to light" on the cake. Also the retry path after a microphone
    /// failure. Returns false when there is nothing to light.
    pub fn light_candles(&mut self, out: &mut Vec<Signal>) -> bool {
        if !self.phase.is(Phase::Candle) || self.candles.is_blown() {
            return false;
        }
        if !self.candles.light() {
            return false;
        }
        out.push(Signal::StartListening);
        true
    }

    /// The microphone could not be opened; offer the light button again.
    pub fn capture_failed(&mut self) {
        if self.phase.is(Phase::Candle) {
            self.candles.rearm();
        }
    }

    /// Blow detected. Marks the candles blown for the rest of the session and
    /// schedules the message screen.
    pub fn candles_blown(&mut self, now: Duration) {
        if !self.phase.is(Phase::Candle) {
            log::debug!("[phase] late blow ignored in {}", self.phase());
            return;
        }
        if self.candles.blow() {
            self.message_at = Some(now + self.config.candle_advance_delay);
        }
    }

    /// Per-frame work: pad error timeout, confetti, delayed transitions.
    pub fn tick(&mut self, now: Duration, out: &mut Vec<Signal>) {
        if self.pad.tick(now) {
            log::debug!("[phase] pad cleared");
        }

        if let Some(effect) = self.celebration.as_mut() {
            let mut bursts = Vec::with_capacity(2);
            let status = effect.step(now, &mut bursts);
            out.extend(bursts.into_iter().map(Signal::Burst));
            match status {
                EffectStatus::ReadyToAdvance => {
                    self.celebration = None;
                    if self.phase.is(Phase::Reveal) {
                        self.transition(Phase::Candle, out);
                    }
                }
                EffectStatus::Finished | EffectStatus::Cancelled => self.celebration = None,
                EffectStatus::Bursting | EffectStatus::Settling => {}
            }
        }

        if let Some(at) = self.message_at {
            if now >= at {
                self.message_at = None;
                if self.phase.is(Phase::Candle) {
                    self.transition(Phase::Message, out);
                }
            }
        }
    }

    fn transition(&mut self, to: Phase, out: &mut Vec<Signal>) {
        let from = self.phase.get();
        if from == to {
            return;
        }
        self.phase.set(to);
        log::info!("[phase] {from} -> {to}");

        match from {
            Phase::Candle => {
                self.message_at = None;
                out.push(Signal::StopListening);
            }
            Phase::Reveal => {
                if let Some(effect) = self.celebration.as_mut() {
                    effect.cancel();
                }
            }
            Phase::Locked | Phase::Message => {}
        }
        match to {
            Phase::Locked => self.pad.reset(),
            Phase::Candle => self.candles.rearm(),
            Phase::Reveal | Phase::Message => {}
        }
        out.push(Signal::PhaseChanged { from, to });
    }
}
