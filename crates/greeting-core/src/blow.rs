//! Microphone blow detection.
//!
//! The detector never talks to the platform directly. The front-end acquires the
//! microphone asynchronously and hands over a [`SpectrumCapture`]; the detector
//! owns it inside a [`ListeningSession`] and samples it once per display frame.
//! Blowing puts most of its energy in the low bins, so only the lower half of
//! the spectrum is averaged; speech and room noise mostly land above that.

use crate::error::CaptureError;

/// Platform side of a listening session: a live spectrum plus whatever handles
/// (stream tracks, analysis context, pending frame callback) must be freed.
pub trait SpectrumCapture {
    fn bin_count(&self) -> usize;

    /// Fill `bins` with byte magnitudes (0..=255) for the current frame.
    fn read_frequency_data(&mut self, bins: &mut [u8]);

    /// Stop the sampling callback, stop every stream track and close the
    /// analysis context. Called at most once per capture by the session.
    fn release(&mut self);
}

/// Average magnitude of the lower half of `bins`.
pub fn low_band_average(bins: &[u8]) -> f32 {
    let low = bins.len() / 2;
    if low == 0 {
        return 0.0;
    }
    let sum: u32 = bins[..low].iter().map(|&b| u32::from(b)).sum();
    sum as f32 / low as f32
}

/// One microphone session: the capture, its sample buffer and the pending
/// detection callback.
pub struct ListeningSession<C: SpectrumCapture> {
    capture: C,
    bins: Vec<u8>,
    on_detected: Option<Box<dyn FnOnce()>>,
    released: bool,
}

impl<C: SpectrumCapture> ListeningSession<C> {
    fn new(capture: C, on_detected: Box<dyn FnOnce()>) -> Self {
        let bins = vec![0; capture.bin_count()];
        Self {
            capture,
            bins,
            on_detected: Some(on_detected),
            released: false,
        }
    }

    fn sample(&mut self) -> f32 {
        let n = self.capture.bin_count();
        if self.bins.len() != n {
            self.bins.resize(n, 0);
        }
        self.capture.read_frequency_data(&mut self.bins);
        low_band_average(&self.bins)
    }

    /// Free every platform handle. Safe to call any number of times.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.on_detected = None;
        self.capture.release();
    }
}

impl<C: SpectrumCapture> Drop for ListeningSession<C> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Identifies one outstanding microphone request. A request is only honoured
/// if no stop or newer request happened in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcquireTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleOutcome {
    Idle,
    Listening(f32),
    Detected(f32),
}

pub struct BlowDetector<C: SpectrumCapture> {
    threshold: f32,
    volume: f32,
    generation: u64,
    pending: Option<u64>,
    session: Option<ListeningSession<C>>,
}

impl<C: SpectrumCapture> BlowDetector<C> {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            volume: 0.0,
            generation: 0,
            pending: None,
            session: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    #[inline]
    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    /// A microphone request is in flight.
    #[inline]
    pub fn is_acquiring(&self) -> bool {
        self.pending.is_some()
    }

    /// Last published low-band average.
    #[inline]
    pub fn current_volume(&self) -> f32 {
        self.volume
    }

    /// Volume as the cake scene sees it: zero unless a session is live.
    #[inline]
    pub fn wind_volume(&self) -> f32 {
        if self.is_listening() {
            self.volume
        } else {
            0.0
        }
    }

    /// Stop whatever is running and open a new microphone request.
    pub fn begin_acquire(&mut self) -> AcquireTicket {
        self.stop();
        self.generation += 1;
        self.pending = Some(self.generation);
        AcquireTicket(self.generation)
    }

    /// Hand over the capture for `ticket`. Returns false (and releases the
    /// capture) when the request went stale in the meantime.
    pub fn attach(
        &mut self,
        ticket: AcquireTicket,
        capture: C,
        on_detected: impl FnOnce() + 'static,
    ) -> bool {
        if self.pending != Some(ticket.0) {
            log::debug!("[blow] discarding stale microphone grant #{}", ticket.0);
            drop(ListeningSession::new(capture, Box::new(|| {})));
            return false;
        }
        self.pending = None;
        self.volume = 0.0;
        self.session = Some(ListeningSession::new(capture, Box::new(on_detected)));
        log::info!("[blow] listening (threshold {:.0})", self.threshold);
        true
    }

    /// Begin listening on an already-acquired capture.
    pub fn start(&mut self, capture: C, on_detected: impl FnOnce() + 'static) -> bool {
        let ticket = self.begin_acquire();
        self.attach(ticket, capture, on_detected)
    }

    /// Record a failed microphone request. Returns the error when the request
    /// was still current and the user should be told; `None` when stale.
    pub fn fail(&mut self, ticket: AcquireTicket, error: CaptureError) -> Option<CaptureError> {
        if self.pending != Some(ticket.0) {
            return None;
        }
        self.pending = None;
        log::warn!("[blow] microphone unavailable: {error}");
        Some(error)
    }

    /// One frame of analysis. On the first sample above the threshold the
    /// callback fires and the session is torn down before this returns.
    pub fn sample(&mut self) -> SampleOutcome {
        let Some(session) = self.session.as_mut() else {
            return SampleOutcome::Idle;
        };
        let volume = session.sample();
        self.volume = volume;
        if volume <= self.threshold {
            return SampleOutcome::Listening(volume);
        }
        log::info!("[blow] detected at {volume:.1}");
        if let Some(mut session) = self.session.take() {
            if let Some(on_detected) = session.on_detected.take() {
                on_detected();
            }
            session.release();
        }
        SampleOutcome::Detected(volume)
    }

    /// Release the session and drop any pending request. No-op when idle.
    pub fn stop(&mut self) {
        self.pending = None;
        if let Some(mut session) = self.session.take() {
            session.release();
            log::debug!("[blow] stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_band_ignores_upper_half() {
        let mut bins = vec![0u8; 8];
        bins[4..].fill(255);
        assert_eq!(low_band_average(&bins), 0.0);
        bins[..4].copy_from_slice(&[10, 20, 30, 40]);
        assert_eq!(low_band_average(&bins), 25.0);
    }

    #[test]
    fn low_band_of_tiny_spectrum_is_zero() {
        assert_eq!(low_band_average(&[]), 0.0);
        assert_eq!(low_band_average(&[200]), 0.0);
    }
}
