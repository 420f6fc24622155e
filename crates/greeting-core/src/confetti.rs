use crate::celebration::ConfettiBurst;
use crate::constants::{CONFETTI_DECAY, CONFETTI_GRAVITY, CONFETTI_START_VELOCITY, CONFETTI_TICKS};
use glam::Vec2;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct Particle {
    /// Position in viewport pixels.
    pub pos: Vec2,
    pub color: &'static str,
    /// Radians; drives the paper-flutter when drawn.
    pub wobble: f32,
    pub tilt: f32,
    velocity: f32,
    heading: f32,
    wobble_speed: f32,
    tick: u32,
}

impl Particle {
    /// 1.0 when spawned, fading linearly to 0.0 at the end of its life.
    #[inline]
    pub fn opacity(&self) -> f32 {
        1.0 - (self.tick as f32 / CONFETTI_TICKS as f32).min(1.0)
    }

    #[inline]
    fn alive(&self) -> bool {
        self.tick < CONFETTI_TICKS
    }
}

/// Particle simulation for confetti bursts, one physics tick per animation frame.
pub struct ConfettiField {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ConfettiField {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn the particles of `burst` inside a viewport of `viewport` pixels.
    pub fn spawn(&mut self, burst: &ConfettiBurst, viewport: Vec2) {
        let origin = burst.origin * viewport;
        let angle = burst.angle_deg.to_radians();
        let spread = burst.spread_deg.to_radians();
        for _ in 0..burst.particle_count {
            let color = burst
                .palette
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("#FFFFFF");
            let velocity =
                CONFETTI_START_VELOCITY * 0.5 + self.rng.gen::<f32>() * CONFETTI_START_VELOCITY;
            // canvas y grows downward, so the heading is mirrored
            let heading = -angle + (0.5 * spread - self.rng.gen::<f32>() * spread);
            self.particles.push(Particle {
                pos: origin,
                color,
                wobble: self.rng.gen::<f32>() * 10.0,
                tilt: (self.rng.gen::<f32>() * 0.5 + 0.25) * std::f32::consts::PI,
                velocity,
                heading,
                wobble_speed: (self.rng.gen::<f32>() * 0.1 + 0.05).min(0.11),
                tick: 0,
            });
        }
    }

    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.pos.x += p.heading.cos() * p.velocity;
            p.pos.y += p.heading.sin() * p.velocity + CONFETTI_GRAVITY * 3.0;
            p.velocity *= CONFETTI_DECAY;
            p.wobble += p.wobble_speed;
            p.tilt += 0.1;
            p.tick += 1;
        }
        self.particles.retain(Particle::alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CelebrationConfig;
    use crate::phase::{Phase, PhaseRef};
    use crate::CelebrationEffect;
    use std::time::Duration;

    fn left_burst() -> ConfettiBurst {
        let fx = CelebrationEffect::start(
            PhaseRef::new(Phase::Reveal),
            Phase::Reveal,
            &CelebrationConfig::default(),
            Duration::ZERO,
        );
        fx.burst_pair()[0].clone()
    }

    #[test]
    fn spawns_burst_count_at_origin() {
        let mut field = ConfettiField::new(7);
        field.spawn(&left_burst(), Vec2::new(800.0, 600.0));
        assert_eq!(field.len(), 2);
        for p in field.particles() {
            assert_eq!(p.pos, Vec2::new(0.0, 360.0));
            assert!(crate::constants::CONFETTI_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn left_burst_flies_right_and_up() {
        let mut field = ConfettiField::new(7);
        field.spawn(&left_burst(), Vec2::new(800.0, 600.0));
        field.step();
        for p in field.particles() {
            assert!(p.pos.x > 0.0);
            assert!(p.pos.y < 360.0);
        }
    }

    #[test]
    fn particles_expire_after_their_lifetime() {
        let mut field = ConfettiField::new(1);
        field.spawn(&left_burst(), Vec2::new(100.0, 100.0));
        for _ in 0..CONFETTI_TICKS - 1 {
            field.step();
        }
        assert_eq!(field.len(), 2);
        field.step();
        assert!(field.is_empty());
    }
}
