//! Inkline draws two hand-inked decorations headlessly:
//!
//! - an ink cursor trail: a bounded pool of decaying particles spawned by pointer motion and
//!   presses, advanced and redrawn once per frame ([`TrailEngine`]);
//! - a sketched border: deterministic, noise-perturbed rounded-rectangle strokes synthesized
//!   from a region's size and recomputed when that size changes ([`BorderRenderer`]).
//!
//! The page a decoration lives on is reached only through the [`TrailHost`], [`InkSurface`]
//! and [`BorderHost`] traits, so both run synchronously in tests and in the CLI.
#![forbid(unsafe_code)]

mod border;
mod config;
mod foundation;
mod render;
mod trail;

pub use crate::foundation::core::{
    Affine, BezPath, FrameToken, Point, Rect, Rgba8, Size, Vec2, Viewport,
};
pub use crate::foundation::error::{InklineError, InklineResult};
pub use crate::foundation::fingerprint::Fingerprint;
pub use crate::foundation::rng::{RandomSource, Rng64, SequenceRandom, hash_signed, hash01};

pub use crate::config::model::{
    BlobRanges, BorderConfig, InkConfig, LineCap, PassSpec, ShapeRanges, SpawnRange,
    SplatterRanges, StrokeGroupConfig, TrailConfig,
};

pub use crate::trail::activation::{EnvSignal, EnvironmentSignals, PointerKind};
pub use crate::trail::engine::{FrameStats, InkSurface, PointerEvent, TrailEngine, TrailHost};
pub use crate::trail::particle::InkParticle;
pub use crate::trail::pool::ParticlePool;
pub use crate::trail::script::{ReplayOutcome, ScriptEvent, ScriptHost, TrailScript, replay};
pub use crate::trail::spawn::{splatter, trail_blob, trail_points};

pub use crate::border::observer::{SizeTracker, quantize, quantize_size};
pub use crate::border::renderer::{BorderHost, BorderRenderer};
pub use crate::border::scene::{BorderScene, OutlineRole, StrokeGroup};
pub use crate::border::shape::{
    OutlineGeometry, OutlineLayout, OutlineSample, layout_outlines, rounded_rect_path,
    sample_outline,
};
pub use crate::border::stroke::{StrokePath, displaced_outline, ink_group, ink_pass};

pub use crate::render::raster::{FrameRGBA, PixmapSurface, rasterize_border};
