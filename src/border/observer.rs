use kurbo::Size;

use crate::foundation::core::FrameToken;

/// Round `value` to the nearest multiple of `quantum`. Negative and non-finite sizes read as 0.
pub fn quantize(value: f64, quantum: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    if !(quantum.is_finite() && quantum > 0.0) {
        return value;
    }
    (value / quantum).round() * quantum
}

pub fn quantize_size(size: Size, quantum: f64) -> Size {
    Size::new(quantize(size.width, quantum), quantize(size.height, quantum))
}

/// Tracks the last quantized size of an observed region and the single outstanding
/// recompute frame. At most one frame is pending at a time; a newer request replaces it.
#[derive(Clone, Debug)]
pub struct SizeTracker {
    quantum: f64,
    current: Option<Size>,
    pending: Option<FrameToken>,
}

impl SizeTracker {
    pub fn new(quantum: f64) -> Self {
        Self {
            quantum,
            current: None,
            pending: None,
        }
    }

    pub fn current(&self) -> Option<Size> {
        self.current
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Record a raw measurement. Returns the new quantized size only when it differs from
    /// the stored one.
    pub fn update(&mut self, raw: Size) -> Option<Size> {
        let next = quantize_size(raw, self.quantum);
        if self.current == Some(next) {
            return None;
        }
        self.current = Some(next);
        Some(next)
    }

    /// Store a newly requested frame, handing back the one it supersedes.
    pub fn replace_pending(&mut self, token: FrameToken) -> Option<FrameToken> {
        self.pending.replace(token)
    }

    /// Consume the pending frame if `token` is it.
    pub fn fire(&mut self, token: FrameToken) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn take_pending(&mut self) -> Option<FrameToken> {
        self.pending.take()
    }

    pub fn reset(&mut self) {
        self.current = None;
        self.pending = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/border/observer.rs"]
mod tests;
