use kurbo::{BezPath, PathEl, Point, Rect, Size};

use crate::border::shape::{OutlineGeometry, layout_outlines};
use crate::border::stroke::{StrokePath, ink_group};
use crate::config::model::BorderConfig;
use crate::foundation::fingerprint::{Fingerprint, StableHasher};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutlineRole {
    Main,
    /// Shifted duplicate painted underneath the main outline.
    Offset,
}

/// All stroke passes drawn over one outline.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeGroup {
    pub role: OutlineRole,
    pub outline: OutlineGeometry,
    pub passes: Vec<StrokePath>,
}

/// The complete decoration for one measured region.
///
/// Built in one go by [`BorderScene::synthesize`] and never mutated afterwards; a resize
/// produces a new scene. Groups are stored in paint order (offset first).
#[derive(Clone, Debug, PartialEq)]
pub struct BorderScene {
    size: Size,
    bleed: f64,
    groups: Vec<StrokeGroup>,
}

impl BorderScene {
    /// Scene with no strokes, used for regions below the minimum size.
    pub fn empty(size: Size, bleed: f64) -> Self {
        Self {
            size,
            bleed,
            groups: Vec::new(),
        }
    }

    /// Synthesize both outlines and all their passes for a region of `size`.
    ///
    /// Pure in `(size, cfg)`.
    #[tracing::instrument(level = "debug", skip(cfg))]
    pub fn synthesize(size: Size, cfg: &BorderConfig) -> Self {
        let Some(layout) = layout_outlines(size, cfg) else {
            tracing::trace!("region below minimum size, no strokes");
            return Self::empty(size, cfg.bleed);
        };

        let group = |role, outline: OutlineGeometry, strokes| StrokeGroup {
            role,
            outline,
            passes: ink_group(&outline.path(), cfg.sample_spacing, strokes),
        };
        let groups = vec![
            group(OutlineRole::Offset, layout.offset, &cfg.offset),
            group(OutlineRole::Main, layout.main, &cfg.main),
        ];

        Self {
            size,
            bleed: cfg.bleed,
            groups,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bleed(&self) -> f64 {
        self.bleed
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[StrokeGroup] {
        &self.groups
    }

    pub fn group(&self, role: OutlineRole) -> Option<&StrokeGroup> {
        self.groups.iter().find(|g| g.role == role)
    }

    pub fn paths_in_paint_order(&self) -> impl Iterator<Item = &StrokePath> {
        self.groups.iter().flat_map(|g| g.passes.iter())
    }

    /// Region the strokes may paint into: the measured size grown by the bleed on every side.
    pub fn bleed_region(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size).inflate(self.bleed, self.bleed)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut h = StableHasher::new();
        h.write_f64(self.size.width);
        h.write_f64(self.size.height);
        h.write_u32(self.groups.len() as u32);
        for g in &self.groups {
            h.write_u8(g.role as u8);
            h.write_u32(g.passes.len() as u32);
            for p in &g.passes {
                h.write_path(&p.path);
                h.write_bytes(&[p.color.r, p.color.g, p.color.b, p.color.a]);
                h.write_f64(p.width);
                h.write_f64(p.opacity);
                h.write_f64(p.dash_offset);
                h.write_f64(p.jitter.x);
                h.write_f64(p.jitter.y);
                h.write_u8(p.cap as u8);
                for d in p.dash.iter().flatten() {
                    h.write_f64(*d);
                }
            }
        }
        h.finish()
    }

    /// Standalone SVG document: one `<path>` per pass, offset group first.
    pub fn to_svg(&self) -> String {
        let w = num(self.size.width);
        let h = num(self.size.height);
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\" preserveAspectRatio=\"none\" overflow=\"visible\" \
             fill=\"none\" aria-hidden=\"true\">\n"
        );
        for p in self.paths_in_paint_order() {
            out.push_str(&svg_path_element(p));
        }
        out.push_str("</svg>\n");
        out
    }
}

fn svg_path_element(p: &StrokePath) -> String {
    let mut el = format!(
        "  <path d=\"{}\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\" \
         stroke-linecap=\"{}\" stroke-linejoin=\"round\" vector-effect=\"non-scaling-stroke\" \
         transform=\"translate({} {})\"",
        path_data(&p.path),
        p.color.to_hex(),
        num(p.opacity),
        num(p.width),
        p.cap.as_svg(),
        num(p.jitter.x),
        num(p.jitter.y),
    );
    if let Some(dash) = p.dash.as_deref().filter(|d| !d.is_empty()) {
        let pattern: Vec<String> = dash.iter().map(|d| num(*d)).collect();
        el.push_str(&format!(
            " stroke-dasharray=\"{}\" stroke-dashoffset=\"{}\"",
            pattern.join(" "),
            num(p.dash_offset)
        ));
    }
    el.push_str("/>\n");
    el
}

fn path_data(path: &BezPath) -> String {
    let pt = |p: Point| format!("{},{}", num(p.x), num(p.y));
    let parts: Vec<String> = path
        .elements()
        .iter()
        .map(|el| match *el {
            PathEl::MoveTo(p) => format!("M{}", pt(p)),
            PathEl::LineTo(p) => format!("L{}", pt(p)),
            PathEl::QuadTo(p1, p2) => format!("Q{} {}", pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => format!("C{} {} {}", pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => "Z".to_owned(),
        })
        .collect();
    parts.join(" ")
}

/// Fixed three-decimal formatting with trailing zeros trimmed.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_owned(),
        s => s.to_owned(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/border/scene.rs"]
mod tests;
