//! Scene-side state for the cake screen.
//!
//! Nothing here touches a platform API. The web front-end feeds it the
//! controller/detector state each frame and draws what it returns.

use crate::constants::{CANDLE_COLORS, CANDLE_COUNT, CANDLE_RING_RADIUS};
use glam::{Mat4, Vec2, Vec3};

/// What the cake scene consumes each frame. Purely reactive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneInputs {
    pub is_blown: bool,
    pub is_lit: bool,
    pub wind_volume: f32,
}

/// Right-handed perspective camera.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Fixed view of the cake: slightly above, looking down at the top tier.
    pub fn cake_view(aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 3.0, 6.0),
            target: Vec3::new(0.0, 0.3, 0.0),
            up: Vec3::Y,
            aspect,
            fovy_radians: 45f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// World point to viewport pixels (y down). `None` behind the camera.
    pub fn project(&self, world: Vec3, viewport: Vec2) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix() * world.extend(1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.x,
            (0.5 - ndc.y * 0.5) * viewport.y,
        ))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CandleSpot {
    /// Base of the candle on the top tier, relative to the candle ring centre.
    pub position: Vec3,
    pub color: &'static str,
}

/// Candles evenly spaced on a ring, colours cycling through the palette.
pub fn candle_layout(count: usize, radius: f32) -> Vec<CandleSpot> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            CandleSpot {
                position: Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius),
                color: CANDLE_COLORS[i % CANDLE_COLORS.len()],
            }
        })
        .collect()
}

pub fn default_candle_layout() -> Vec<CandleSpot> {
    candle_layout(CANDLE_COUNT, CANDLE_RING_RADIUS)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Animated flame of one candle. `time_offset` desynchronises the flicker
/// between candles.
#[derive(Clone, Debug)]
pub struct Flame {
    pub time_offset: f32,
    pub scale: Vec3,
    /// Extra rise above the resting flame position; grows as it snuffs out.
    pub lift: f32,
    /// Sideways lean in radians.
    pub lean: f32,
    pub light: f32,
}

impl Flame {
    pub fn new(time_offset: f32) -> Self {
        Self {
            time_offset,
            scale: Vec3::ONE,
            lift: 0.0,
            lean: 0.0,
            light: 1.5,
        }
    }

    pub fn is_out(&self) -> bool {
        self.scale.y < 0.02
    }

    /// Advance to scene time `time` (seconds) with frame delta `dt`.
    pub fn update(&mut self, time: f32, dt: f32, inputs: SceneInputs) {
        if inputs.is_blown {
            // snuff out
            self.lift = lerp(self.lift, 0.5, dt * 2.0);
            self.scale.y = lerp(self.scale.y, 0.0, dt * 3.0);
            self.scale.x = lerp(self.scale.x, 0.0, dt * 5.0);
            self.scale.z = lerp(self.scale.z, 0.0, dt * 5.0);
            self.light = lerp(self.light, 0.0, dt * 8.0);
            return;
        }
        let t = time + self.time_offset;
        let wind = inputs.wind_volume;
        let base = 1.0 + (t * 15.0).sin() * 0.1 + (t * 5.0).cos() * 0.1;
        let shake = (wind / 50.0) * (t * 50.0).sin();
        let shrink = (1.0 - wind / 100.0).max(0.0);
        self.scale = Vec3::new(base * shrink, (base + shake.abs()) * shrink, base * shrink);
        self.lean = shake * 0.5;
        self.light = 1.5 + (t * 20.0).sin() * 0.5 - wind / 100.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_a_ring_with_cycling_colors() {
        let spots = default_candle_layout();
        assert_eq!(spots.len(), 8);
        for s in &spots {
            let r = (s.position.x.powi(2) + s.position.z.powi(2)).sqrt();
            assert!((r - 0.6).abs() < 1e-5);
        }
        assert_eq!(spots[0].color, spots[4].color);
        assert_ne!(spots[0].color, spots[1].color);
    }

    #[test]
    fn strong_wind_shrinks_the_flame_to_nothing() {
        let mut f = Flame::new(0.0);
        f.update(
            1.0,
            0.016,
            SceneInputs {
                is_blown: false,
                is_lit: true,
                wind_volume: 100.0,
            },
        );
        assert_eq!(f.scale.x, 0.0);
    }

    #[test]
    fn blown_flame_goes_out() {
        let mut f = Flame::new(0.0);
        let inputs = SceneInputs {
            is_blown: true,
            is_lit: true,
            wind_volume: 0.0,
        };
        for i in 0..240 {
            f.update(i as f32 / 60.0, 1.0 / 60.0, inputs);
        }
        assert!(f.is_out());
        assert!(f.light < 0.01);
    }

    #[test]
    fn camera_projects_target_to_viewport_centre() {
        let cam = Camera::cake_view(4.0 / 3.0);
        let p = cam.project(cam.target, Vec2::new(800.0, 600.0)).unwrap();
        assert!((p.x - 400.0).abs() < 0.5);
        assert!((p.y - 300.0).abs() < 0.5);
    }
}
