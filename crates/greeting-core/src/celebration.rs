use crate::config::CelebrationConfig;
use crate::constants::{BURST_LEFT_ANGLE_DEG, BURST_RIGHT_ANGLE_DEG};
use crate::phase::{Phase, PhaseRef};
use glam::Vec2;
use std::time::Duration;

/// One emission of confetti. `origin` is in viewport fractions (0..1).
#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiBurst {
    pub particle_count: u32,
    pub angle_deg: f32,
    pub spread_deg: f32,
    pub origin: Vec2,
    pub palette: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectStatus {
    Bursting,
    Settling,
    /// Reported once, after the settle delay, if the effect is still relevant.
    ReadyToAdvance,
    Finished,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Stage {
    Bursting,
    Settling { until: Duration },
    Finished,
    Cancelled,
}

/// Time-boxed confetti burst tied to one phase.
///
/// Every step first checks that the phase is still the one the effect was
/// started for. Once it is not, the effect is cancelled on the spot: no more
/// bursts, and no advance signal.
#[derive(Clone, Debug)]
pub struct CelebrationEffect {
    phase: PhaseRef,
    relevant_in: Phase,
    started_at: Duration,
    config: CelebrationConfig,
    stage: Stage,
}

impl CelebrationEffect {
    pub fn start(
        phase: PhaseRef,
        relevant_in: Phase,
        config: &CelebrationConfig,
        now: Duration,
    ) -> Self {
        Self {
            phase,
            relevant_in,
            started_at: now,
            config: config.clone(),
            stage: Stage::Bursting,
        }
    }

    #[inline]
    pub fn is_relevant(&self) -> bool {
        self.phase.is(self.relevant_in)
    }

    pub fn is_cancelled(&self) -> bool {
        self.stage == Stage::Cancelled
    }

    pub fn cancel(&mut self) {
        if self.stage != Stage::Finished {
            self.stage = Stage::Cancelled;
        }
    }

    /// Advance by one animation frame, pushing this frame's bursts into `out`.
    pub fn step(&mut self, now: Duration, out: &mut Vec<ConfettiBurst>) -> EffectStatus {
        match self.stage {
            Stage::Finished => return EffectStatus::Finished,
            Stage::Cancelled => return EffectStatus::Cancelled,
            _ => {}
        }
        if !self.is_relevant() {
            log::debug!("[confetti] phase left {}, cancelling", self.relevant_in);
            self.stage = Stage::Cancelled;
            return EffectStatus::Cancelled;
        }
        match self.stage {
            Stage::Bursting => {
                out.extend(self.burst_pair());
                if now.saturating_sub(self.started_at) >= self.config.duration {
                    self.stage = Stage::Settling {
                        until: now + self.config.settle,
                    };
                    EffectStatus::Settling
                } else {
                    EffectStatus::Bursting
                }
            }
            Stage::Settling { until } if now >= until => {
                self.stage = Stage::Finished;
                EffectStatus::ReadyToAdvance
            }
            Stage::Settling { .. } => EffectStatus::Settling,
            Stage::Finished => EffectStatus::Finished,
            Stage::Cancelled => EffectStatus::Cancelled,
        }
    }

    /// Mirrored bursts from the left and right edges.
    pub fn burst_pair(&self) -> [ConfettiBurst; 2] {
        let c = &self.config;
        let burst = |angle_deg: f32, x: f32| ConfettiBurst {
            particle_count: c.particles_per_burst,
            angle_deg,
            spread_deg: c.spread_deg,
            origin: Vec2::new(x, c.origin_y),
            palette: c.palette,
        };
        [
            burst(BURST_LEFT_ANGLE_DEG, 0.0),
            burst(BURST_RIGHT_ANGLE_DEG, 1.0),
        ]
    }
}
