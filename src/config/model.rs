use std::f64::consts::{PI, TAU};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{InklineError, InklineResult};

/// Top-level configuration for both decorations.
///
/// Every field has a default reproducing the hand-tuned constants, so an empty JSON object is a
/// valid configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InkConfig {
    pub trail: TrailConfig,
    pub border: BorderConfig,
}

impl InkConfig {
    /// Parse a configuration from a JSON reader and validate it.
    pub fn from_reader<R: std::io::Read>(r: R) -> InklineResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| InklineError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration from a JSON file on disk and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> InklineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            InklineError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json_pretty(&self) -> InklineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| InklineError::serde(e.to_string()))
    }

    pub fn validate(&self) -> InklineResult<()> {
        self.trail.validate()?;
        self.border.validate()
    }
}

/// Half-open sampling interval `[min, max)` for one randomized spawn attribute.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpawnRange {
    pub min: f64,
    pub max: f64,
}

impl SpawnRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(self, v: f64) -> bool {
        if self.min == self.max {
            return v == self.min;
        }
        self.min <= v && v < self.max
    }

    fn validate(self, what: &str) -> InklineResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(InklineError::validation(format!(
                "{what}: range bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(InklineError::validation(format!(
                "{what}: range min must be <= max"
            )));
        }
        Ok(())
    }
}

/// Size, opacity and lifetime ranges shared by every particle kind.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeRanges {
    pub radius: SpawnRange,
    pub alpha: SpawnRange,
    pub decay: SpawnRange,
    pub growth: SpawnRange,
    pub stretch_x: SpawnRange,
    pub stretch_y: SpawnRange,
    pub rotation: SpawnRange,
}

impl ShapeRanges {
    fn validate(&self, what: &str) -> InklineResult<()> {
        self.radius.validate(&format!("{what}.radius"))?;
        self.alpha.validate(&format!("{what}.alpha"))?;
        self.decay.validate(&format!("{what}.decay"))?;
        self.growth.validate(&format!("{what}.growth"))?;
        self.stretch_x.validate(&format!("{what}.stretch_x"))?;
        self.stretch_y.validate(&format!("{what}.stretch_y"))?;
        self.rotation.validate(&format!("{what}.rotation"))?;
        if self.radius.min < 0.0 {
            return Err(InklineError::validation(format!(
                "{what}.radius must be >= 0"
            )));
        }
        if self.alpha.min <= 0.0 {
            return Err(InklineError::validation(format!(
                "{what}.alpha must start > 0"
            )));
        }
        if self.decay.min < 0.0 {
            return Err(InklineError::validation(format!(
                "{what}.decay must be >= 0"
            )));
        }
        Ok(())
    }
}

/// Low-opacity blobs laid along pointer movement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlobRanges {
    /// Position jitter applied independently on both axes.
    pub jitter: SpawnRange,
    /// Velocity range applied independently on both axes.
    pub velocity: SpawnRange,
    pub shape: ShapeRanges,
}

impl Default for BlobRanges {
    fn default() -> Self {
        Self {
            jitter: SpawnRange::new(-0.8, 0.8),
            velocity: SpawnRange::new(-0.03, 0.03),
            shape: ShapeRanges {
                radius: SpawnRange::new(1.2, 2.4),
                alpha: SpawnRange::new(0.045, 0.095),
                decay: SpawnRange::new(0.008, 0.014),
                growth: SpawnRange::new(0.005, 0.02),
                stretch_x: SpawnRange::new(0.8, 1.2),
                stretch_y: SpawnRange::new(0.75, 1.3),
                rotation: SpawnRange::new(0.0, PI),
            },
        }
    }
}

/// Pointer-press burst: one core droplet plus scattered satellites.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SplatterRanges {
    pub core_velocity: SpawnRange,
    pub core: ShapeRanges,
    /// Satellite count is `floor(sample)` of this range.
    pub satellite_count: SpawnRange,
    pub satellite_angle: SpawnRange,
    pub satellite_distance: SpawnRange,
    /// Outward speed along the satellite's offset direction.
    pub satellite_drift: SpawnRange,
    pub satellite: ShapeRanges,
}

impl Default for SplatterRanges {
    fn default() -> Self {
        Self {
            core_velocity: SpawnRange::new(-0.03, 0.03),
            core: ShapeRanges {
                radius: SpawnRange::new(2.4, 3.6),
                alpha: SpawnRange::new(0.19, 0.27),
                decay: SpawnRange::new(0.002, 0.003),
                growth: SpawnRange::new(0.015, 0.04),
                stretch_x: SpawnRange::new(0.8, 1.2),
                stretch_y: SpawnRange::new(0.8, 1.3),
                rotation: SpawnRange::new(0.0, PI),
            },
            satellite_count: SpawnRange::new(8.0, 13.0),
            satellite_angle: SpawnRange::new(0.0, TAU),
            satellite_distance: SpawnRange::new(3.0, 16.0),
            satellite_drift: SpawnRange::new(0.015, 0.08),
            satellite: ShapeRanges {
                radius: SpawnRange::new(1.3, 3.5),
                alpha: SpawnRange::new(0.11, 0.2),
                decay: SpawnRange::new(0.0015, 0.0025),
                growth: SpawnRange::new(0.01, 0.03),
                stretch_x: SpawnRange::new(0.65, 1.35),
                stretch_y: SpawnRange::new(0.65, 1.45),
                rotation: SpawnRange::new(0.0, PI),
            },
        }
    }
}

/// Ink trail engine tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Pool capacity; the oldest particles are evicted beyond it.
    pub max_particles: usize,
    pub trail_spacing_px: f64,
    /// Moves shorter than this are ignored.
    pub min_move_px: f64,
    /// Cap on interpolated spawn points per pointer-move event.
    pub max_trail_steps: usize,
    pub reference_frame_ms: f64,
    /// Upper bound for the per-frame update ratio.
    pub max_frame_ratio: f64,
    pub max_device_pixel_ratio: f64,
    pub ink_color: Rgba8,
    pub blob: BlobRanges,
    pub splatter: SplatterRanges,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_particles: 260,
            trail_spacing_px: 6.0,
            min_move_px: 0.75,
            max_trail_steps: 8,
            reference_frame_ms: 16.67,
            max_frame_ratio: 2.0,
            max_device_pixel_ratio: 2.0,
            ink_color: Rgba8::opaque(18, 18, 18),
            blob: BlobRanges::default(),
            splatter: SplatterRanges::default(),
        }
    }
}

impl TrailConfig {
    pub fn validate(&self) -> InklineResult<()> {
        if self.max_particles == 0 {
            return Err(InklineError::validation("trail.max_particles must be > 0"));
        }
        if self.max_trail_steps == 0 {
            return Err(InklineError::validation("trail.max_trail_steps must be > 0"));
        }
        for (name, v) in [
            ("trail.trail_spacing_px", self.trail_spacing_px),
            ("trail.reference_frame_ms", self.reference_frame_ms),
            ("trail.max_frame_ratio", self.max_frame_ratio),
            ("trail.max_device_pixel_ratio", self.max_device_pixel_ratio),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(InklineError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.min_move_px.is_finite() || self.min_move_px < 0.0 {
            return Err(InklineError::validation(
                "trail.min_move_px must be finite and >= 0",
            ));
        }

        self.blob.jitter.validate("trail.blob.jitter")?;
        self.blob.velocity.validate("trail.blob.velocity")?;
        self.blob.shape.validate("trail.blob.shape")?;

        let s = &self.splatter;
        s.core_velocity.validate("trail.splatter.core_velocity")?;
        s.core.validate("trail.splatter.core")?;
        s.satellite_count.validate("trail.splatter.satellite_count")?;
        if s.satellite_count.min < 0.0 {
            return Err(InklineError::validation(
                "trail.splatter.satellite_count must be >= 0",
            ));
        }
        s.satellite_angle.validate("trail.splatter.satellite_angle")?;
        s.satellite_distance
            .validate("trail.splatter.satellite_distance")?;
        s.satellite_drift.validate("trail.splatter.satellite_drift")?;
        s.satellite.validate("trail.splatter.satellite")
    }
}

/// Stroke end style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

impl LineCap {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// One layered ink stroke over an outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PassSpec {
    pub width: f64,
    pub opacity: f64,
    /// Peak displacement along the outline normal.
    pub amplitude: f64,
    /// Noise lattice frequency in cycles per unit of perimeter.
    pub frequency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
    #[serde(default)]
    pub cap: LineCap,
}

impl PassSpec {
    fn validate(&self, what: &str) -> InklineResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(InklineError::validation(format!(
                "{what}.width must be finite and > 0"
            )));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(InklineError::validation(format!(
                "{what}.opacity must be in [0, 1]"
            )));
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(InklineError::validation(format!(
                "{what}.amplitude must be finite and >= 0"
            )));
        }
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(InklineError::validation(format!(
                "{what}.frequency must be finite and > 0"
            )));
        }
        if let Some(dash) = &self.dash
            && (dash.is_empty() || dash.iter().any(|d| !d.is_finite() || *d <= 0.0))
        {
            return Err(InklineError::validation(format!(
                "{what}.dash must be a non-empty list of positive lengths"
            )));
        }
        Ok(())
    }
}

/// A seeded group of passes drawn over one outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeGroupConfig {
    pub seed: u64,
    pub color: Rgba8,
    pub passes: Vec<PassSpec>,
}

impl StrokeGroupConfig {
    pub fn main_default() -> Self {
        Self {
            seed: 1103,
            color: Rgba8::opaque(0x1f, 0x1f, 0x1f),
            passes: vec![
                PassSpec {
                    width: 2.2,
                    opacity: 0.92,
                    amplitude: 0.58,
                    frequency: 0.021,
                    dash: None,
                    cap: LineCap::Round,
                },
                PassSpec {
                    width: 1.21,
                    opacity: 0.414,
                    amplitude: 0.8,
                    frequency: 0.015,
                    dash: None,
                    cap: LineCap::Round,
                },
            ],
        }
    }

    pub fn offset_default() -> Self {
        Self {
            seed: 3307,
            color: Rgba8::opaque(0x25, 0x25, 0x25),
            passes: vec![
                PassSpec {
                    width: 1.85,
                    opacity: 0.38,
                    amplitude: 0.9,
                    frequency: 0.026,
                    dash: None,
                    cap: LineCap::Round,
                },
                PassSpec {
                    width: 1.0175,
                    opacity: 0.171,
                    amplitude: 1.25,
                    frequency: 0.019,
                    dash: Some(vec![9.0, 4.0]),
                    cap: LineCap::Round,
                },
            ],
        }
    }

    fn validate(&self, what: &str) -> InklineResult<()> {
        for (i, pass) in self.passes.iter().enumerate() {
            pass.validate(&format!("{what}.passes[{i}]"))?;
        }
        Ok(())
    }
}

/// Hand-drawn border tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BorderConfig {
    /// Regions smaller than this on either axis render nothing.
    pub min_size: f64,
    /// Measured sizes are rounded to a multiple of this.
    pub quantum: f64,
    pub inset: f64,
    pub radius_fraction: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub min_main_extent: f64,
    pub min_offset_extent: f64,
    pub offset_shift_x: f64,
    pub offset_shift_y: f64,
    pub offset_shrink: f64,
    pub offset_radius_bump: f64,
    /// Drawable margin past every edge so displaced strokes are not clipped.
    pub bleed: f64,
    /// Target distance between perimeter samples before displacement.
    pub sample_spacing: f64,
    pub main: StrokeGroupConfig,
    pub offset: StrokeGroupConfig,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            min_size: 48.0,
            quantum: 0.5,
            inset: 11.2,
            radius_fraction: 0.14,
            radius_min: 19.0,
            radius_max: 30.0,
            min_main_extent: 16.0,
            min_offset_extent: 14.0,
            offset_shift_x: 5.2,
            offset_shift_y: 5.6,
            offset_shrink: 0.8,
            offset_radius_bump: 1.1,
            bleed: 24.0,
            sample_spacing: 4.0,
            main: StrokeGroupConfig::main_default(),
            offset: StrokeGroupConfig::offset_default(),
        }
    }
}

impl BorderConfig {
    pub fn validate(&self) -> InklineResult<()> {
        for (name, v) in [
            ("border.min_size", self.min_size),
            ("border.quantum", self.quantum),
            ("border.sample_spacing", self.sample_spacing),
            ("border.min_main_extent", self.min_main_extent),
            ("border.min_offset_extent", self.min_offset_extent),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(InklineError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        for (name, v) in [
            ("border.inset", self.inset),
            ("border.radius_fraction", self.radius_fraction),
            ("border.radius_min", self.radius_min),
            ("border.offset_shrink", self.offset_shrink),
            ("border.bleed", self.bleed),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(InklineError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        for (name, v) in [
            ("border.offset_shift_x", self.offset_shift_x),
            ("border.offset_shift_y", self.offset_shift_y),
            ("border.offset_radius_bump", self.offset_radius_bump),
        ] {
            if !v.is_finite() {
                return Err(InklineError::validation(format!("{name} must be finite")));
            }
        }
        if !self.radius_max.is_finite() || self.radius_max < self.radius_min {
            return Err(InklineError::validation(
                "border.radius_max must be finite and >= radius_min",
            ));
        }
        self.main.validate("border.main")?;
        self.offset.validate("border.offset")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
