use std::path::Path;

use kurbo::{Affine, BezPath, Ellipse, PathEl, Point, Shape, Size};

use crate::border::scene::BorderScene;
use crate::config::model::LineCap;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{InklineError, InklineResult};
use crate::trail::engine::InkSurface;

const ELLIPSE_TOLERANCE: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
            premultiplied: true,
        }
    }

    /// RGBA bytes of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn coverage(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    /// Convert premultiplied data to straight alpha in place.
    pub fn unpremultiply(&mut self) {
        if !self.premultiplied {
            return;
        }
        for px in self.data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        self.premultiplied = false;
    }

    pub fn write_png(&self, path: &Path) -> InklineResult<()> {
        let mut straight = self.clone();
        straight.unpremultiply();
        image::save_buffer_with_format(
            path,
            &straight.data,
            straight.width,
            straight.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| InklineError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// CPU overlay surface for the ink trail, backed by a vello_cpu pixmap.
///
/// Ellipses accumulate in the render context until [`PixmapSurface::frame`] rasterizes them.
pub struct PixmapSurface {
    ctx: Option<vello_cpu::RenderContext>,
    pixmap: Option<vello_cpu::Pixmap>,
    dpr: f64,
    css_size: Size,
}

impl Default for PixmapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PixmapSurface {
    pub fn new() -> Self {
        Self {
            ctx: None,
            pixmap: None,
            dpr: 1.0,
            css_size: Size::ZERO,
        }
    }

    pub fn backing_size(&self) -> Option<(u32, u32)> {
        self.pixmap
            .as_ref()
            .map(|p| (u32::from(p.width()), u32::from(p.height())))
    }

    pub fn css_size(&self) -> Size {
        self.css_size
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    /// Rasterize everything drawn since the last clear. Transparent 1x1 before the first
    /// successful `configure`.
    pub fn frame(&mut self) -> FrameRGBA {
        let (Some(ctx), Some(pixmap)) = (self.ctx.as_mut(), self.pixmap.as_mut()) else {
            return FrameRGBA::transparent(1, 1);
        };
        clear_pixmap(pixmap);
        ctx.flush();
        ctx.render_to_pixmap(pixmap);
        FrameRGBA {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl InkSurface for PixmapSurface {
    fn configure(&mut self, css_size: Size, backing: (u32, u32), dpr: f64) -> bool {
        let (Ok(w), Ok(h)) = (u16::try_from(backing.0), u16::try_from(backing.1)) else {
            self.ctx = None;
            self.pixmap = None;
            return false;
        };
        if w == 0 || h == 0 {
            self.ctx = None;
            self.pixmap = None;
            return false;
        }

        let resized = self
            .pixmap
            .as_ref()
            .is_none_or(|p| p.width() != w || p.height() != h);
        if resized {
            self.ctx = Some(vello_cpu::RenderContext::new(w, h));
            self.pixmap = Some(vello_cpu::Pixmap::new(w, h));
        }
        self.dpr = dpr;
        self.css_size = css_size;
        true
    }

    fn clear(&mut self) {
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.reset();
        }
        if let Some(pixmap) = self.pixmap.as_mut() {
            clear_pixmap(pixmap);
        }
    }

    fn fill_ellipse(&mut self, ellipse: &Ellipse, color: Rgba8, alpha: f64) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        let c = color.with_opacity(alpha);
        if c.a == 0 {
            return;
        }
        ctx.set_transform(affine_to_cpu(Affine::scale(self.dpr)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        ctx.fill_path(&bezpath_to_cpu(&ellipse.to_path(ELLIPSE_TOLERANCE)));
    }
}

/// Rasterize a border scene, bleed region included, at `dpr` device pixels per unit.
#[tracing::instrument(level = "debug", skip(scene), fields(size = ?scene.size()))]
pub fn rasterize_border(scene: &BorderScene, dpr: f64) -> InklineResult<FrameRGBA> {
    if !(dpr.is_finite() && dpr > 0.0) {
        return Err(InklineError::render(format!(
            "device pixel ratio must be positive, got {dpr}"
        )));
    }
    let region = scene.bleed_region();
    let axis = |units: f64, name: &str| -> InklineResult<u16> {
        let px = (units * dpr).ceil();
        if !(px.is_finite() && px >= 1.0 && px <= f64::from(u16::MAX)) {
            return Err(InklineError::render(format!(
                "border raster {name} {px} is outside 1..={}",
                u16::MAX
            )));
        }
        Ok(px as u16)
    };
    let w = axis(region.width(), "width")?;
    let h = axis(region.height(), "height")?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    let origin = Affine::scale(dpr) * Affine::translate((-region.x0, -region.y0));

    for stroke in scene.paths_in_paint_order() {
        let c = stroke.color.with_opacity(stroke.opacity);
        if c.a == 0 || stroke.path.elements().is_empty() {
            continue;
        }
        ctx.set_transform(affine_to_cpu(origin * Affine::translate(stroke.jitter)));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        ctx.set_stroke(stroke_to_cpu(
            stroke.width,
            stroke.cap,
            stroke.dash.as_deref(),
            stroke.dash_offset,
        ));
        ctx.stroke_path(&bezpath_to_cpu(&stroke.path));
    }
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRGBA {
        width: u32::from(w),
        height: u32::from(h),
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

fn stroke_to_cpu(
    width: f64,
    cap: LineCap,
    dash: Option<&[f64]>,
    dash_offset: f64,
) -> vello_cpu::kurbo::Stroke {
    let cap = match cap {
        LineCap::Butt => vello_cpu::kurbo::Cap::Butt,
        LineCap::Round => vello_cpu::kurbo::Cap::Round,
        LineCap::Square => vello_cpu::kurbo::Cap::Square,
    };
    let stroke = vello_cpu::kurbo::Stroke::new(width)
        .with_caps(cap)
        .with_join(vello_cpu::kurbo::Join::Round);
    match dash {
        Some(pattern) if !pattern.is_empty() => {
            stroke.with_dashes(dash_offset, pattern.iter().copied())
        }
        _ => stroke,
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
