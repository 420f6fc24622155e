// Host-side tests for the confetti effect's liveness guard.

use greeting_core::{CelebrationConfig, CelebrationEffect, EffectStatus, Phase, PhaseController};
use greeting_core::{GreetingConfig, PhaseRef};
use std::rc::Rc;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn leaving_the_phase_stops_bursts_on_the_next_step() {
    // a controller owns the only writer for the phase, so drive it there
    let mut c = PhaseController::new(Rc::new(GreetingConfig::default()));
    let mut out = Vec::new();
    for k in "2901".chars() {
        c.enter_digit(k, ms(0), &mut out);
    }
    let phase: PhaseRef = c.phase_ref();
    let mut fx = CelebrationEffect::start(phase, Phase::Reveal, &CelebrationConfig::default(), ms(0));
    let mut bursts = Vec::new();
    assert_eq!(fx.step(ms(16), &mut bursts), EffectStatus::Bursting);
    assert_eq!(bursts.len(), 2);

    c.back(&mut out);
    assert!(!fx.is_relevant());
    bursts.clear();
    assert_eq!(fx.step(ms(32), &mut bursts), EffectStatus::Cancelled);
    assert!(bursts.is_empty());
    assert!(fx.is_cancelled());
    // cancelled is terminal
    assert_eq!(fx.step(ms(4000), &mut bursts), EffectStatus::Cancelled);
    assert!(bursts.is_empty());
}

#[test]
fn leaving_during_settle_never_signals_ready() {
    let mut c = PhaseController::new(Rc::new(GreetingConfig::default()));
    let mut out = Vec::new();
    for k in "2901".chars() {
        c.enter_digit(k, ms(0), &mut out);
    }
    let mut fx = CelebrationEffect::start(
        c.phase_ref(),
        Phase::Reveal,
        &CelebrationConfig::default(),
        ms(0),
    );
    let mut bursts = Vec::new();
    assert_eq!(fx.step(ms(3000), &mut bursts), EffectStatus::Settling);
    c.back(&mut out);
    assert_eq!(fx.step(ms(3600), &mut bursts), EffectStatus::Cancelled);
}

#[test]
fn explicit_cancel_stops_immediately() {
    let phase = PhaseRef::new(Phase::Reveal);
    let mut fx = CelebrationEffect::start(phase, Phase::Reveal, &CelebrationConfig::default(), ms(0));
    fx.cancel();
    let mut bursts = Vec::new();
    assert_eq!(fx.step(ms(16), &mut bursts), EffectStatus::Cancelled);
    assert!(bursts.is_empty());
}

#[test]
fn shorter_duration_is_honoured() {
    let cfg = CelebrationConfig {
        duration: ms(100),
        settle: ms(50),
        ..CelebrationConfig::default()
    };
    let mut fx = CelebrationEffect::start(PhaseRef::new(Phase::Reveal), Phase::Reveal, &cfg, ms(0));
    let mut bursts = Vec::new();
    assert_eq!(fx.step(ms(50), &mut bursts), EffectStatus::Bursting);
    assert_eq!(fx.step(ms(100), &mut bursts), EffectStatus::Settling);
    assert_eq!(fx.step(ms(150), &mut bursts), EffectStatus::ReadyToAdvance);
    assert_eq!(bursts.len(), 4);
}
