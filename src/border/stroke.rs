use kurbo::{BezPath, Point, Vec2};

use crate::border::shape::{OutlineSample, sample_outline};
use crate::config::model::{LineCap, PassSpec, StrokeGroupConfig};
use crate::foundation::core::{Rgba8, clamp};
use crate::foundation::rng::{hash01, hash_signed};

const OPACITY_DRIFT: f64 = 0.04;
const JITTER: f64 = 0.35;
/// Relative weight of the fine noise octave.
const DETAIL_WEIGHT: f64 = 0.35;

// hash sub-index layout per (seed, pass)
const SUB_OPACITY: u64 = 0;
const SUB_JITTER_X: u64 = 1;
const SUB_JITTER_Y: u64 = 2;
const SUB_DASH_PHASE: u64 = 3;
const SUB_NOISE_PHASE: u64 = 4;
const SUB_DETAIL_PHASE: u64 = 5;
const SUB_LATTICE_COARSE: u64 = 1 << 16;
const SUB_LATTICE_DETAIL: u64 = 2 << 16;

/// One finished ink pass over an outline. Immutable once synthesized.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePath {
    pub path: BezPath,
    pub color: Rgba8,
    pub width: f64,
    /// Final opacity, micro-variation included.
    pub opacity: f64,
    pub dash: Option<Vec<f64>>,
    pub dash_offset: f64,
    pub cap: LineCap,
    /// Per-pass translation applied when painting.
    pub jitter: Vec2,
}

/// Periodic 1-D value noise over a closed perimeter, in `[-1, 1]`.
struct PerimeterNoise {
    seed: u64,
    pass: u64,
    cells: u64,
    phase: f64,
    lattice: u64,
}

impl PerimeterNoise {
    fn new(seed: u64, pass: u64, cells: f64, phase_sub: u64, lattice: u64) -> Self {
        let cells = if cells.is_finite() {
            cells.round().max(1.0) as u64
        } else {
            1
        };
        Self {
            seed,
            pass,
            cells,
            phase: hash01(seed, pass, phase_sub) * cells as f64,
            lattice,
        }
    }

    fn node(&self, i: u64) -> f64 {
        hash_signed(self.seed, self.pass, self.lattice + i % self.cells)
    }

    /// Noise at perimeter fraction `u` in `[0, 1)`. Wraps so `u = 0` and `u = 1` agree.
    fn sample(&self, u: f64) -> f64 {
        let x = u * self.cells as f64 + self.phase;
        let base = x.floor();
        let f = x - base;
        let i = base as u64;
        let t = f * f * (3.0 - 2.0 * f);
        let a = self.node(i);
        let b = self.node(i + 1);
        a + (b - a) * t
    }
}

/// Displacement field of one pass: a coarse octave set by `frequency` plus a finer one.
fn displacement(
    seed: u64,
    pass: u64,
    spec: &PassSpec,
    perimeter: f64,
) -> impl Fn(f64) -> f64 + use<> {
    let cells = perimeter * spec.frequency;
    let coarse = PerimeterNoise::new(seed, pass, cells, SUB_NOISE_PHASE, SUB_LATTICE_COARSE);
    let detail = PerimeterNoise::new(
        seed,
        pass,
        cells * 3.0,
        SUB_DETAIL_PHASE,
        SUB_LATTICE_DETAIL,
    );
    let amplitude = spec.amplitude;
    move |u| {
        let n = coarse.sample(u) + detail.sample(u) * DETAIL_WEIGHT;
        amplitude * n / (1.0 + DETAIL_WEIGHT)
    }
}

/// Closed Catmull-Rom spline through `points`, as cubic segments.
fn smooth_closed(points: &[Point]) -> BezPath {
    let n = points.len();
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    for i in 0..n {
        let p0 = points[(i + n - 1) % n];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];
        let c1 = p1 + (p2 - p0) / 6.0;
        let c2 = p2 - (p3 - p1) / 6.0;
        path.curve_to(c1, c2, p2);
    }
    path.close_path();
    path
}

/// Displace `samples` along their normals and rebuild a closed path.
pub fn displaced_outline(
    samples: &[OutlineSample],
    perimeter: f64,
    seed: u64,
    pass: u64,
    spec: &PassSpec,
) -> BezPath {
    if samples.is_empty() || perimeter <= 0.0 {
        return BezPath::new();
    }
    let field = displacement(seed, pass, spec, perimeter);
    let points: Vec<Point> = samples
        .iter()
        .map(|s| s.point + s.normal * field(s.s / perimeter))
        .collect();
    smooth_closed(&points)
}

/// Synthesize one stroke pass. Pure in `(outline, seed, pass, spec)`.
pub fn ink_pass(
    outline: &BezPath,
    sample_spacing: f64,
    seed: u64,
    pass: u64,
    spec: &PassSpec,
    color: Rgba8,
) -> StrokePath {
    let (samples, perimeter) = sample_outline(outline, sample_spacing);
    let path = displaced_outline(&samples, perimeter, seed, pass, spec);

    let opacity = clamp(
        spec.opacity * (1.0 + OPACITY_DRIFT * hash_signed(seed, pass, SUB_OPACITY)),
        0.0,
        1.0,
    );
    let jitter = Vec2::new(
        JITTER * hash_signed(seed, pass, SUB_JITTER_X),
        JITTER * hash_signed(seed, pass, SUB_JITTER_Y),
    );
    let dash_offset = spec
        .dash
        .as_deref()
        .map(|d| d.iter().sum::<f64>() * hash01(seed, pass, SUB_DASH_PHASE))
        .unwrap_or(0.0);

    StrokePath {
        path,
        color,
        width: spec.width,
        opacity,
        dash: spec.dash.clone(),
        dash_offset,
        cap: spec.cap,
        jitter,
    }
}

/// All passes of one stroke group over `outline`, in paint order.
pub fn ink_group(
    outline: &BezPath,
    sample_spacing: f64,
    group: &StrokeGroupConfig,
) -> Vec<StrokePath> {
    group
        .passes
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            ink_pass(
                outline,
                sample_spacing,
                group.seed,
                i as u64,
                spec,
                group.color,
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/border/stroke.rs"]
mod tests;
