use crate::foundation::error::{InklineError, InklineResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Handle for one scheduled animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

/// Host viewport in CSS pixels, plus the reported device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// `None` when the host does not report one; treated as 1.
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: None,
        }
    }

    pub fn with_device_pixel_ratio(mut self, dpr: f64) -> Self {
        self.device_pixel_ratio = Some(dpr);
        self
    }

    /// Pixel density used for the backing store, capped at `cap`.
    pub fn effective_dpr(self, cap: f64) -> f64 {
        let reported = self
            .device_pixel_ratio
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(1.0);
        reported.min(cap)
    }

    /// Backing-store size in device pixels, never smaller than 1x1.
    pub fn backing_size(self, cap: f64) -> (u32, u32) {
        let dpr = self.effective_dpr(cap);
        fn axis(css: f64, dpr: f64) -> u32 {
            let px = (css.max(0.0) * dpr).floor();
            if px.is_finite() {
                (px as u32).max(1)
            } else {
                1
            }
        }
        (axis(self.width, dpr), axis(self.height, dpr))
    }
}

/// Straight-alpha RGBA8 color.
///
/// Serialized as `#RRGGBB` / `#RRGGBBAA` hex strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn from_hex(s: &str) -> InklineResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> InklineResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| InklineError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(InklineError::validation("hex color must be ASCII"));
        }
        match s.len() {
            6 => Ok(Self::opaque(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self {
                r: hex_byte(&s[0..2])?,
                g: hex_byte(&s[2..4])?,
                b: hex_byte(&s[4..6])?,
                a: hex_byte(&s[6..8])?,
            }),
            _ => Err(InklineError::validation(
                "hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)",
            )),
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Scale alpha by `opacity` (clamped to 0..1).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let o = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            a: (f64::from(self.a) * o).round() as u8,
            ..self
        }
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// `min(max(value, min), max)`. Unlike `f64::clamp` this never panics; if `min > max` the
/// upper bound wins.
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
