use crate::error::PlaybackError;

/// A play attempt whose promise has not settled yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayRequest(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackAction {
    Pause,
    Play(PlayRequest),
}

/// Background music state. `playing` tracks what the element actually does:
/// it only turns true once a play request is confirmed.
#[derive(Clone, Debug)]
pub struct AudioTrackController {
    volume: f64,
    playing: bool,
    pending: Option<u64>,
    next_request: u64,
}

impl AudioTrackController {
    pub fn new(volume: f64) -> Self {
        Self {
            volume,
            playing: false,
            pending: None,
            next_request: 0,
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn request(&mut self) -> PlayRequest {
        self.next_request += 1;
        self.pending = Some(self.next_request);
        PlayRequest(self.next_request)
    }

    /// User pressed the music button.
    pub fn toggle(&mut self) -> TrackAction {
        if self.playing || self.pending.is_some() {
            self.playing = false;
            self.pending = None;
            TrackAction::Pause
        } else {
            TrackAction::Play(self.request())
        }
    }

    /// One best-effort attempt per unlock. `None` if music is playing or
    /// about to.
    pub fn autostart(&mut self) -> Option<PlayRequest> {
        if self.playing || self.pending.is_some() {
            return None;
        }
        Some(self.request())
    }

    /// Settle a play request. Results for superseded requests are dropped.
    /// Returns true if the state changed.
    pub fn resolve(&mut self, request: PlayRequest, result: Result<(), PlaybackError>) -> bool {
        if self.pending != Some(request.0) {
            return false;
        }
        self.pending = None;
        match result {
            Ok(()) => {
                self.playing = true;
                log::info!("[music] playing");
                true
            }
            Err(e) => {
                log::debug!("[music] play rejected: {e}");
                false
            }
        }
    }

    /// The element stopped on its own (for example the page was hidden).
    pub fn paused_externally(&mut self) {
        self.playing = false;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_autostart_can_be_retried() {
        let mut t = AudioTrackController::new(0.4);
        let req = t.autostart().unwrap();
        // a second unlock while the first attempt is in flight does nothing
        assert!(t.autostart().is_none());
        t.resolve(req, Err(PlaybackError::Blocked("gesture".into())));
        assert!(!t.is_playing());
        assert!(t.autostart().is_some());
    }
}
