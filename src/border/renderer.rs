use kurbo::Size;

use crate::border::observer::SizeTracker;
use crate::border::scene::BorderScene;
use crate::config::model::BorderConfig;
use crate::foundation::core::FrameToken;

/// What the renderer needs from the element it decorates.
pub trait BorderHost {
    /// Current layout size of the observed element.
    fn measure(&self) -> Size;
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
    /// Connect (`true`) or disconnect (`false`) the size observer.
    fn observe(&mut self, observing: bool);
}

/// Hand-drawn border decoration bound to one observed element.
///
/// Size notifications are coalesced to one recompute per frame; each recompute replaces the
/// whole [`BorderScene`], so readers only ever see a complete scene or none.
pub struct BorderRenderer<H> {
    config: BorderConfig,
    host: H,
    tracker: SizeTracker,
    scene: Option<BorderScene>,
    observing: bool,
    recomputes: u64,
}

impl<H: BorderHost> BorderRenderer<H> {
    pub fn new(config: BorderConfig, host: H) -> Self {
        let tracker = SizeTracker::new(config.quantum);
        Self {
            config,
            host,
            tracker,
            scene: None,
            observing: false,
            recomputes: 0,
        }
    }

    /// Measure right away, then start observing.
    pub fn mount(&mut self) {
        if self.observing {
            return;
        }
        self.measure_and_recompute();
        self.host.observe(true);
        self.observing = true;
    }

    /// Size observer callback: (re)schedule one recompute for the next frame.
    pub fn on_resize_notification(&mut self) {
        if !self.observing {
            return;
        }
        let token = self.host.request_frame();
        if let Some(stale) = self.tracker.replace_pending(token) {
            self.host.cancel_frame(stale);
        }
    }

    /// Frame callback. Returns `true` when the scene was replaced.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        if !self.tracker.fire(token) {
            return false;
        }
        self.measure_and_recompute()
    }

    /// Disconnect the observer and drop any pending recompute and the current scene.
    pub fn teardown(&mut self) {
        if let Some(pending) = self.tracker.take_pending() {
            self.host.cancel_frame(pending);
        }
        if self.observing {
            self.host.observe(false);
            self.observing = false;
        }
        self.tracker.reset();
        self.scene = None;
    }

    fn measure_and_recompute(&mut self) -> bool {
        let Some(size) = self.tracker.update(self.host.measure()) else {
            return false;
        };
        self.scene = if size.width > 0.0 && size.height > 0.0 {
            Some(BorderScene::synthesize(size, &self.config))
        } else {
            None
        };
        self.recomputes += 1;
        tracing::trace!(
            width = size.width,
            height = size.height,
            strokes = self.scene.as_ref().map_or(0, |s| s.paths_in_paint_order().count()),
            "border recomputed"
        );
        true
    }

    /// `None` until the element has a non-zero size.
    pub fn scene(&self) -> Option<&BorderScene> {
        self.scene.as_ref()
    }

    pub fn size(&self) -> Option<Size> {
        self.tracker.current()
    }

    pub fn is_laid_out(&self) -> bool {
        self.scene.is_some()
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.tracker.pending()
    }

    /// Number of scene replacements since construction.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    pub fn render_svg(&self) -> Option<String> {
        self.scene.as_ref().map(BorderScene::to_svg)
    }

    pub fn config(&self) -> &BorderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
#[path = "../../tests/unit/border/renderer.rs"]
mod tests;
