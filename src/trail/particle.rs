use kurbo::{Ellipse, Point, Vec2};

/// A single decaying elliptical ink mark.
///
/// Coordinates are viewport CSS pixels. Rates are per reference frame and get scaled by the
/// frame ratio in [`InkParticle::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InkParticle {
    /// Monotonic spawn order within one engine.
    pub seq: u64,
    pub position: Point,
    pub velocity: Vec2,
    pub radius: f64,
    pub alpha: f64,
    pub decay: f64,
    pub growth: f64,
    pub stretch_x: f64,
    pub stretch_y: f64,
    pub rotation: f64,
}

impl InkParticle {
    /// Step one frame scaled by `ratio` (elapsed / reference frame duration).
    pub fn advance(&mut self, ratio: f64) {
        self.position += self.velocity * ratio;
        self.radius += self.growth * ratio;
        self.alpha -= self.decay * ratio;
    }

    pub fn is_retired(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Rotated ellipse covering this particle.
    pub fn ellipse(&self) -> Ellipse {
        Ellipse::new(
            self.position,
            (self.radius * self.stretch_x, self.radius * self.stretch_y),
            self.rotation,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/particle.rs"]
mod tests;
