use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::config::model::{ShapeRanges, TrailConfig};
use crate::foundation::rng::RandomSource;
use crate::trail::particle::InkParticle;

/// Spawn points strictly after `last` up to and including `next`.
///
/// Empty when the move is shorter than `min_move_px`. Otherwise
/// `max(1, min(max_trail_steps, floor(distance / spacing)))` evenly spaced points.
pub fn trail_points(last: Point, next: Point, cfg: &TrailConfig) -> SmallVec<[Point; 8]> {
    let delta = next - last;
    let distance = delta.hypot();
    let mut out = SmallVec::new();
    if !distance.is_finite() || distance < cfg.min_move_px {
        return out;
    }

    let steps = ((distance / cfg.trail_spacing_px).floor() as usize)
        .min(cfg.max_trail_steps)
        .max(1);
    for step in 1..=steps {
        let progress = step as f64 / steps as f64;
        out.push(last + delta * progress);
    }
    out
}

fn shaped(
    rng: &mut dyn RandomSource,
    shape: &ShapeRanges,
    position: Point,
    velocity: Vec2,
) -> InkParticle {
    InkParticle {
        seq: 0,
        position,
        velocity,
        radius: rng.between(shape.radius.min, shape.radius.max),
        alpha: rng.between(shape.alpha.min, shape.alpha.max),
        decay: rng.between(shape.decay.min, shape.decay.max),
        growth: rng.between(shape.growth.min, shape.growth.max),
        stretch_x: rng.between(shape.stretch_x.min, shape.stretch_x.max),
        stretch_y: rng.between(shape.stretch_y.min, shape.stretch_y.max),
        rotation: rng.between(shape.rotation.min, shape.rotation.max),
    }
}

/// One faint trail blob near `at`. `seq` is assigned by the pool on insertion.
pub fn trail_blob(at: Point, cfg: &TrailConfig, rng: &mut dyn RandomSource) -> InkParticle {
    let b = &cfg.blob;
    let position = Point::new(
        at.x + rng.between(b.jitter.min, b.jitter.max),
        at.y + rng.between(b.jitter.min, b.jitter.max),
    );
    let velocity = Vec2::new(
        rng.between(b.velocity.min, b.velocity.max),
        rng.between(b.velocity.min, b.velocity.max),
    );
    shaped(rng, &b.shape, position, velocity)
}

/// Press splatter: the core droplet first, then its satellites.
pub fn splatter(
    at: Point,
    cfg: &TrailConfig,
    rng: &mut dyn RandomSource,
) -> SmallVec<[InkParticle; 16]> {
    let s = &cfg.splatter;
    let mut out = SmallVec::new();

    let core_velocity = Vec2::new(
        rng.between(s.core_velocity.min, s.core_velocity.max),
        rng.between(s.core_velocity.min, s.core_velocity.max),
    );
    out.push(shaped(rng, &s.core, at, core_velocity));

    let count = rng
        .between(s.satellite_count.min, s.satellite_count.max)
        .floor()
        .max(0.0) as usize;
    for _ in 0..count {
        let angle = rng.between(s.satellite_angle.min, s.satellite_angle.max);
        let distance = rng.between(s.satellite_distance.min, s.satellite_distance.max);
        let drift = rng.between(s.satellite_drift.min, s.satellite_drift.max);
        let dir = Vec2::from_angle(angle);
        out.push(shaped(rng, &s.satellite, at + dir * distance, dir * drift));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/trail/spawn.rs"]
mod tests;
