use crate::constants::*;
use glam::{Vec2, Vec3};
use greeting_core::{Camera, CandleSpot, ConfettiField, Flame};
use std::f64::consts::{PI, TAU};
use web_sys as web;

const SMOKE_SECS: f32 = 2.0;

#[inline]
fn viewport(canvas: &web::HtmlCanvasElement) -> Vec2 {
    Vec2::new(canvas.width() as f32, canvas.height() as f32)
}

pub fn clear(ctx: &web::CanvasRenderingContext2d, canvas: &web::HtmlCanvasElement) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
}

/// Paper confetti: each particle is a small rotated rectangle whose height
/// flutters with its wobble phase.
pub fn draw_confetti(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    field: &ConfettiField,
) {
    clear(ctx, canvas);
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let size = 8.0 * dpr;
    for p in field.particles() {
        ctx.save();
        ctx.set_global_alpha(p.opacity() as f64);
        ctx.set_fill_style_str(p.color);
        _ = ctx.translate(p.pos.x as f64, p.pos.y as f64);
        _ = ctx.rotate(p.tilt as f64);
        let h = size * (p.wobble as f64).cos().abs().max(0.2);
        ctx.fill_rect(-size * 0.5, -h * 0.5, size, h);
        ctx.restore();
    }
}

/// Pixel-space cylinder outline derived from two projected rings.
struct Disc {
    center: Vec2,
    rx: f64,
    ry: f64,
}

fn project_disc(cam: &Camera, vp: Vec2, center: Vec3, radius: f32) -> Option<Disc> {
    let c = cam.project(center, vp)?;
    let side = cam.project(center + Vec3::X * radius, vp)?;
    let front = cam.project(center + Vec3::Z * radius, vp)?;
    Some(Disc {
        center: c,
        rx: (side.x - c.x).abs() as f64,
        ry: (front.y - c.y).abs().max(1.0) as f64,
    })
}

fn fill_ellipse(ctx: &web::CanvasRenderingContext2d, d: &Disc, rotation: f64, color: &str) {
    ctx.begin_path();
    _ = ctx.ellipse(
        d.center.x as f64,
        d.center.y as f64,
        d.rx.max(0.0),
        d.ry.max(0.0),
        rotation,
        0.0,
        TAU,
    );
    ctx.set_fill_style_str(color);
    ctx.fill();
}

/// A tier: shaded side wall, then the frosted top.
fn draw_tier(ctx: &web::CanvasRenderingContext2d, cam: &Camera, vp: Vec2, tier: (f32, f32, f32)) {
    let (radius, bottom, height) = tier;
    let y0 = CAKE_BASE_Y + bottom;
    let (Some(base), Some(top)) = (
        project_disc(cam, vp, Vec3::new(0.0, y0, 0.0), radius),
        project_disc(cam, vp, Vec3::new(0.0, y0 + height, 0.0), radius),
    ) else {
        return;
    };
    fill_ellipse(ctx, &base, 0.0, TIER_SHADE);
    ctx.set_fill_style_str(TIER_COLOR);
    ctx.fill_rect(
        top.center.x as f64 - top.rx,
        top.center.y as f64,
        top.rx * 2.0,
        (base.center.y - top.center.y) as f64,
    );
    fill_ellipse(ctx, &top, 0.0, FROSTING_COLOR);
}

#[derive(Clone, Copy)]
pub struct CakeFrame {
    pub scene_time: f32,
    /// Scene time the candles went out, for the smoke trail.
    pub blown_at: Option<f32>,
}

pub fn draw_cake(
    ctx: &web::CanvasRenderingContext2d,
    canvas: &web::HtmlCanvasElement,
    candles: &[CandleSpot],
    flames: &[Flame],
    frame: CakeFrame,
) {
    clear(ctx, canvas);
    let vp = viewport(canvas);
    if vp.x < 2.0 || vp.y < 2.0 {
        return;
    }
    let cam = Camera::cake_view(vp.x / vp.y);

    if let Some(plate) = project_disc(&cam, vp, Vec3::new(0.0, CAKE_BASE_Y, 0.0), PLATE_RADIUS) {
        fill_ellipse(ctx, &plate, 0.0, PLATE_COLOR);
    }
    draw_tier(ctx, &cam, vp, BOTTOM_TIER);
    draw_tier(ctx, &cam, vp, TOP_TIER);

    // back to front
    let mut order: Vec<usize> = (0..candles.len()).collect();
    order.sort_by(|&a, &b| candles[a].position.z.total_cmp(&candles[b].position.z));

    let ring_y = CAKE_BASE_Y + CANDLE_RING_Y;
    for i in order {
        let spot = &candles[i];
        let base = spot.position + Vec3::Y * ring_y;
        let tip = base + Vec3::Y * CANDLE_HEIGHT;
        let (Some(b), Some(t)) = (cam.project(base, vp), cam.project(tip, vp)) else {
            continue;
        };
        let Some(unit) = cam.project(base + Vec3::X, vp).map(|p| (p.x - b.x).abs() as f64) else {
            continue;
        };

        ctx.set_stroke_style_str(spot.color);
        ctx.set_line_width(unit * 0.08);
        ctx.set_line_cap("round");
        ctx.begin_path();
        ctx.move_to(b.x as f64, b.y as f64);
        ctx.line_to(t.x as f64, t.y as f64);
        ctx.stroke();

        ctx.set_stroke_style_str(WICK_COLOR);
        ctx.set_line_width(unit * 0.015);
        ctx.begin_path();
        ctx.move_to(t.x as f64, t.y as f64);
        ctx.line_to(t.x as f64, t.y as f64 - unit * 0.05);
        ctx.stroke();

        if let Some(flame) = flames.get(i) {
            draw_flame(ctx, &cam, vp, tip, unit, flame);
        }
        if let Some(at) = frame.blown_at {
            draw_smoke(ctx, t, unit, frame.scene_time - at, i);
        }
    }
}

fn draw_flame(
    ctx: &web::CanvasRenderingContext2d,
    cam: &Camera,
    vp: Vec2,
    tip: Vec3,
    unit: f64,
    flame: &Flame,
) {
    if flame.is_out() {
        return;
    }
    let centre = tip + Vec3::Y * (0.05 + flame.lift);
    let Some(c) = cam.project(centre, vp) else {
        return;
    };
    let r = FLAME_RADIUS as f64 * unit;
    if flame.light > 0.05 {
        ctx.begin_path();
        _ = ctx.arc(c.x as f64, c.y as f64, r * 2.5 * flame.light as f64, 0.0, TAU);
        ctx.set_fill_style_str(FLAME_GLOW);
        ctx.fill();
    }
    let core = Disc {
        center: c,
        rx: r * flame.scale.x as f64,
        ry: r * 2.0 * flame.scale.y as f64,
    };
    fill_ellipse(ctx, &core, flame.lean as f64, FLAME_CORE);
}

/// A few grey puffs drifting up from the wick after the candles go out.
fn draw_smoke(ctx: &web::CanvasRenderingContext2d, wick: Vec2, unit: f64, age: f32, seed: usize) {
    if !(0.0..SMOKE_SECS).contains(&age) {
        return;
    }
    let fade = 1.0 - (age / SMOKE_SECS) as f64;
    ctx.save();
    ctx.set_fill_style_str(SMOKE_COLOR);
    for k in 0..3 {
        let t = age as f64 + k as f64 * 0.3;
        let drift = (t * 3.0 + seed as f64).sin() * unit * 0.04;
        let rise = t * unit * 0.25;
        ctx.set_global_alpha(fade * (1.0 - k as f64 * 0.25));
        ctx.begin_path();
        _ = ctx.arc(
            wick.x as f64 + drift,
            wick.y as f64 - rise,
            unit * (0.03 + t * 0.03),
            0.0,
            PI * 2.0,
        );
        ctx.fill();
    }
    ctx.restore();
}
