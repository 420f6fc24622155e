// Host-side tests for background music state.

use greeting_core::{
    AudioTrackController, GreetingConfig, PhaseController, PlaybackError, Signal, TrackAction,
};
use std::rc::Rc;
use std::time::Duration;

fn blocked() -> PlaybackError {
    PlaybackError::from_dom_exception("NotAllowedError", "user gesture required")
}

#[test]
fn playing_only_after_confirmation() {
    let mut t = AudioTrackController::new(0.4);
    assert_eq!(t.volume(), 0.4);
    let TrackAction::Play(req) = t.toggle() else {
        panic!("expected a play request");
    };
    assert!(!t.is_playing());
    assert!(t.is_pending());
    assert!(t.resolve(req, Ok(())));
    assert!(t.is_playing());
    assert_eq!(t.toggle(), TrackAction::Pause);
    assert!(!t.is_playing());
}

#[test]
fn rejected_play_leaves_music_off() {
    let mut t = AudioTrackController::new(0.4);
    let TrackAction::Play(req) = t.toggle() else {
        panic!("expected a play request");
    };
    assert!(blocked().is_blocked());
    assert!(!t.resolve(req, Err(blocked())));
    assert!(!t.is_playing());
    assert!(!t.is_pending());
}

#[test]
fn result_after_a_second_toggle_is_ignored() {
    let mut t = AudioTrackController::new(0.4);
    let TrackAction::Play(req) = t.toggle() else {
        panic!("expected a play request");
    };
    // user changes their mind before play() settles
    assert_eq!(t.toggle(), TrackAction::Pause);
    assert!(!t.resolve(req, Ok(())));
    assert!(!t.is_playing());
}

#[test]
fn autostart_does_not_override_playing_music() {
    let mut t = AudioTrackController::new(0.4);
    let TrackAction::Play(req) = t.toggle() else {
        panic!("expected a play request");
    };
    t.resolve(req, Ok(()));
    assert!(t.autostart().is_none());
    assert!(t.is_playing());
}

#[test]
fn every_unlock_retries_blocked_autoplay() {
    let mut c = PhaseController::new(Rc::new(GreetingConfig::default()));
    let mut t = AudioTrackController::new(0.4);
    let mut attempts = 0;
    let mut unlock = |c: &mut PhaseController, t: &mut AudioTrackController, at: u64| {
        let mut out = Vec::new();
        for k in "2901".chars() {
            c.enter_digit(k, Duration::from_millis(at), &mut out);
        }
        for signal in &out {
            if *signal == Signal::AutoplayMusic {
                if let Some(req) = t.autostart() {
                    attempts += 1;
                    t.resolve(req, Err(blocked()));
                }
            }
        }
        c.back(&mut out);
    };
    unlock(&mut c, &mut t, 0);
    unlock(&mut c, &mut t, 1000);
    assert_eq!(attempts, 2);
    assert!(!t.is_playing());
}

#[test]
fn external_pause_resets_state() {
    let mut t = AudioTrackController::new(0.4);
    let req = t.autostart().unwrap();
    t.resolve(req, Ok(()));
    t.paused_externally();
    assert!(!t.is_playing());
    assert!(matches!(t.toggle(), TrackAction::Play(_)));
}
