use kurbo::{BezPath, ParamCurve, ParamCurveArclen, Point, Rect, Size, Vec2};

use crate::config::model::BorderConfig;
use crate::foundation::core::clamp;

const ARCLEN_ACCURACY: f64 = 1e-6;

/// One rounded-rectangle outline before any ink perturbation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineGeometry {
    pub rect: Rect,
    pub radius: f64,
}

impl OutlineGeometry {
    pub fn path(&self) -> BezPath {
        rounded_rect_path(self.rect, self.radius)
    }
}

/// The main outline and its shifted second-pass duplicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineLayout {
    pub main: OutlineGeometry,
    pub offset: OutlineGeometry,
}

/// Lay out both outlines inside a region of `size`.
///
/// `None` when either dimension is below `min_size`.
pub fn layout_outlines(size: Size, cfg: &BorderConfig) -> Option<OutlineLayout> {
    if !(size.width >= cfg.min_size && size.height >= cfg.min_size) {
        return None;
    }

    let inset = cfg.inset;
    let main_w = (size.width - inset * 2.0).max(cfg.min_main_extent);
    let main_h = (size.height - inset * 2.0).max(cfg.min_main_extent);
    let main_radius = clamp(
        main_w.min(main_h) * cfg.radius_fraction,
        cfg.radius_min,
        cfg.radius_max,
    );

    let offset_w = (main_w - cfg.offset_shrink).max(cfg.min_offset_extent);
    let offset_h = (main_h - cfg.offset_shrink).max(cfg.min_offset_extent);
    let offset_origin = Point::new(inset + cfg.offset_shift_x, inset + cfg.offset_shift_y);

    Some(OutlineLayout {
        main: OutlineGeometry {
            rect: Rect::new(inset, inset, inset + main_w, inset + main_h),
            radius: main_radius,
        },
        offset: OutlineGeometry {
            rect: Rect::from_origin_size(offset_origin, Size::new(offset_w, offset_h)),
            radius: main_radius + cfg.offset_radius_bump,
        },
    })
}

/// Closed rounded rectangle with quadratic corners, starting at the top edge and running
/// clockwise (in y-down coordinates). The radius is clamped to half the shorter side.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let (x, y) = (rect.x0, rect.y0);
    let (w, h) = (rect.width(), rect.height());
    let r = clamp(radius, 0.0, w.min(h) / 2.0);
    let right = x + w;
    let bottom = y + h;

    let mut p = BezPath::new();
    p.move_to((x + r, y));
    p.line_to((right - r, y));
    p.quad_to((right, y), (right, y + r));
    p.line_to((right, bottom - r));
    p.quad_to((right, bottom), (right - r, bottom));
    p.line_to((x + r, bottom));
    p.quad_to((x, bottom), (x, bottom - r));
    p.line_to((x, y + r));
    p.quad_to((x, y), (x + r, y));
    p.close_path();
    p
}

/// A point on an outline with its arclength position and unit normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineSample {
    pub point: Point,
    /// Unit normal pointing out of a clockwise outline.
    pub normal: Vec2,
    /// Distance along the perimeter from the path start.
    pub s: f64,
}

/// Evenly spaced samples around a closed path plus its perimeter.
///
/// At least eight samples are produced for any non-degenerate path; an empty vector comes
/// back for zero-length paths.
pub fn sample_outline(path: &BezPath, spacing: f64) -> (Vec<OutlineSample>, f64) {
    let segments: Vec<_> = path.segments().collect();
    let lengths: Vec<f64> = segments
        .iter()
        .map(|seg| {
            // Collapsed corners (radius 0) can make the closed-form quad length NaN.
            let len = seg.arclen(ARCLEN_ACCURACY);
            if len.is_finite() { len } else { 0.0 }
        })
        .collect();
    let perimeter: f64 = lengths.iter().sum();
    if !(perimeter.is_finite() && perimeter > 0.0) {
        return (Vec::new(), 0.0);
    }

    let n = ((perimeter / spacing.max(f64::EPSILON)).ceil() as usize).max(8);
    let step = perimeter / n as f64;

    let mut points = Vec::with_capacity(n);
    let mut seg_i = 0;
    let mut seg_start = 0.0;
    for i in 0..n {
        let s = i as f64 * step;
        while seg_i + 1 < segments.len() && s >= seg_start + lengths[seg_i] {
            seg_start += lengths[seg_i];
            seg_i += 1;
        }
        let seg = &segments[seg_i];
        let local = (s - seg_start).clamp(0.0, lengths[seg_i]);
        let t = if lengths[seg_i] > 0.0 {
            seg.inv_arclen(local, ARCLEN_ACCURACY)
        } else {
            0.0
        };
        points.push((seg.eval(t), s));
    }

    let samples = (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n].0;
            let next = points[(i + 1) % n].0;
            let tangent = next - prev;
            let len = tangent.hypot();
            let normal = if len > 0.0 {
                Vec2::new(tangent.y / len, -tangent.x / len)
            } else {
                Vec2::ZERO
            };
            OutlineSample {
                point: points[i].0,
                normal,
                s: points[i].1,
            }
        })
        .collect();
    (samples, perimeter)
}

#[cfg(test)]
#[path = "../../tests/unit/border/shape.rs"]
mod tests;
