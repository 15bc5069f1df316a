use kurbo::{Ellipse, Point, Size};

use crate::config::model::TrailConfig;
use crate::foundation::core::{FrameToken, Rgba8, Viewport};
use crate::foundation::rng::RandomSource;
use crate::trail::activation::{EnvSignal, EnvironmentSignals, PointerKind};
use crate::trail::particle::InkParticle;
use crate::trail::pool::ParticlePool;
use crate::trail::spawn::{splatter, trail_blob, trail_points};

/// Everything the engine needs from the page it decorates.
pub trait TrailHost {
    fn viewport(&self) -> Viewport;
    /// Schedule one animation-frame callback.
    fn request_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
    /// Register (`true`) or remove (`false`) the resize, pointer-move and pointer-down listeners.
    fn set_listening(&mut self, listening: bool);
    /// Overlay visibility plus the page-level "ink cursor enabled" marker.
    fn set_enabled_marker(&mut self, enabled: bool);
}

/// Overlay drawing surface owned by the engine.
pub trait InkSurface {
    /// Resize the backing store. Returns `false` when no drawing context is available.
    fn configure(&mut self, css_size: Size, backing: (u32, u32), dpr: f64) -> bool;
    fn clear(&mut self);
    /// Fill a rotated ellipse (CSS pixel coordinates) at `alpha` opacity.
    fn fill_ellipse(&mut self, ellipse: &Ellipse, color: Rgba8, alpha: f64);
}

/// Pointer event as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    pub position: Point,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            kind: PointerKind::Mouse,
        }
    }

    pub fn touch(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            kind: PointerKind::Touch,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum RunState {
    Stopped,
    Running {
        pending: FrameToken,
        last_frame_ms: f64,
    },
}

/// Result of one [`TrailEngine::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Update ratio actually applied (after clamping).
    pub ratio: f64,
    pub live: usize,
    pub retired: usize,
    /// `false` when the surface had no context and nothing was advanced.
    pub drawn: bool,
}

/// Pointer-driven ink trail: a bounded pool of decaying particles redrawn every frame.
///
/// The engine is a two-state machine (stopped / running). Scheduling belongs to the host; the
/// engine only requests and cancels frame callbacks, and [`TrailEngine::tick`] holds all of the
/// per-frame math so it can be driven synchronously.
pub struct TrailEngine<H, S, R> {
    config: TrailConfig,
    host: H,
    surface: S,
    rng: R,
    env: EnvironmentSignals,
    mounted: bool,
    state: RunState,
    pool: ParticlePool,
    last_pointer: Option<Point>,
    has_context: bool,
    viewport: Viewport,
}

impl<H, S, R> TrailEngine<H, S, R>
where
    H: TrailHost,
    S: InkSurface,
    R: RandomSource,
{
    pub fn new(config: TrailConfig, host: H, surface: S, rng: R) -> Self {
        let viewport = host.viewport();
        let pool = ParticlePool::new(config.max_particles);
        Self {
            config,
            host,
            surface,
            rng,
            env: EnvironmentSignals::default(),
            mounted: false,
            state: RunState::Stopped,
            pool,
            last_pointer: None,
            has_context: false,
            viewport,
        }
    }

    /// Attach to the page with the current environment signals and start if they allow it.
    pub fn mount(&mut self, env: EnvironmentSignals, now_ms: f64) {
        self.mounted = true;
        self.env = env;
        self.sync_enabled_state(now_ms);
    }

    /// Detach from the page: stop and drop the enabled marker.
    pub fn unmount(&mut self) {
        self.stop();
        self.mounted = false;
    }

    /// One environment signal changed. Every notification re-evaluates the predicate.
    pub fn on_env_change(&mut self, signal: EnvSignal, value: bool, now_ms: f64) {
        self.env.set(signal, value);
        if self.mounted {
            self.sync_enabled_state(now_ms);
        }
    }

    fn sync_enabled_state(&mut self, now_ms: f64) {
        let env = self.env;
        let enable = env.should_enable();
        tracing::debug!(?env, enable, "ink trail environment sync");
        self.set_active(enable, now_ms);
    }

    /// Explicit start/stop transition.
    pub fn set_active(&mut self, active: bool, now_ms: f64) {
        if active {
            self.start(now_ms);
        } else {
            self.stop();
        }
    }

    fn start(&mut self, now_ms: f64) {
        if self.is_running() {
            return;
        }
        self.resize_surface();
        self.host.set_listening(true);
        self.host.set_enabled_marker(true);
        let pending = self.host.request_frame();
        self.state = RunState::Running {
            pending,
            last_frame_ms: now_ms,
        };
        tracing::debug!(has_context = self.has_context, "ink trail started");
    }

    /// Stop the loop and wipe the overlay. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let RunState::Running { pending, .. } = self.state {
            self.host.cancel_frame(pending);
            self.host.set_listening(false);
            self.state = RunState::Stopped;
            tracing::debug!(dropped = self.pool.len(), "ink trail stopped");
        }

        self.pool.clear();
        self.last_pointer = None;
        if self.has_context {
            self.surface.clear();
        }
        self.host.set_enabled_marker(false);
    }

    /// Viewport resize listener.
    pub fn on_resize(&mut self) {
        if self.is_running() {
            self.resize_surface();
        }
    }

    fn resize_surface(&mut self) {
        self.viewport = self.host.viewport();
        let cap = self.config.max_device_pixel_ratio;
        let dpr = self.viewport.effective_dpr(cap);
        let backing = self.viewport.backing_size(cap);
        let css = Size::new(self.viewport.width.max(0.0), self.viewport.height.max(0.0));
        self.has_context = self.surface.configure(css, backing, dpr);
        if self.has_context {
            self.surface.clear();
        }
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        if !self.is_running() || !event.kind.is_fine() {
            return;
        }

        let pointer = event.position;
        let Some(last) = self.last_pointer else {
            self.last_pointer = Some(pointer);
            let blob = trail_blob(pointer, &self.config, &mut self.rng);
            self.pool.push(blob);
            return;
        };

        let points = trail_points(last, pointer, &self.config);
        if points.is_empty() {
            return;
        }
        for p in points {
            let blob = trail_blob(p, &self.config, &mut self.rng);
            self.pool.push(blob);
        }
        self.last_pointer = Some(pointer);
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent) {
        if !self.is_running() || !event.kind.is_fine() {
            return;
        }
        let burst = splatter(event.position, &self.config, &mut self.rng);
        self.pool.extend(burst);
    }

    /// Host animation-frame callback.
    ///
    /// Stale tokens (a frame cancelled by a stop that the host delivered anyway) are ignored.
    pub fn on_frame(&mut self, token: FrameToken, now_ms: f64) -> Option<FrameStats> {
        let RunState::Running {
            pending,
            last_frame_ms,
        } = self.state
        else {
            return None;
        };
        if pending != token {
            return None;
        }

        let stats = if self.has_context {
            let stats = self.tick(now_ms - last_frame_ms);
            self.state = RunState::Running {
                pending,
                last_frame_ms: now_ms,
            };
            stats
        } else {
            FrameStats {
                live: self.pool.len(),
                ..FrameStats::default()
            }
        };

        let next = self.host.request_frame();
        if let RunState::Running { pending, .. } = &mut self.state {
            *pending = next;
        }
        Some(stats)
    }

    /// Update ratio for `elapsed_ms`, clamped to `[0, max_frame_ratio]`.
    pub fn frame_ratio(&self, elapsed_ms: f64) -> f64 {
        let ratio = elapsed_ms / self.config.reference_frame_ms;
        if ratio.is_nan() {
            return 0.0;
        }
        ratio.clamp(0.0, self.config.max_frame_ratio)
    }

    /// Advance every particle by the clamped ratio for `elapsed_ms`, drop retired ones and
    /// redraw the survivors.
    pub fn tick(&mut self, elapsed_ms: f64) -> FrameStats {
        let ratio = self.frame_ratio(elapsed_ms);
        if !self.has_context {
            return FrameStats {
                ratio,
                live: self.pool.len(),
                retired: 0,
                drawn: false,
            };
        }

        let retired = self.pool.advance(ratio);
        self.surface.clear();
        let color = self.config.ink_color;
        for p in self.pool.iter() {
            self.surface.fill_ellipse(&p.ellipse(), color, p.alpha);
        }

        FrameStats {
            ratio,
            live: self.pool.len(),
            retired,
            drawn: true,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running { .. })
    }

    pub fn has_context(&self) -> bool {
        self.has_context
    }

    pub fn pending_frame(&self) -> Option<FrameToken> {
        match self.state {
            RunState::Running { pending, .. } => Some(pending),
            RunState::Stopped => None,
        }
    }

    pub fn environment(&self) -> EnvironmentSignals {
        self.env
    }

    pub fn particles(&self) -> impl ExactSizeIterator<Item = &InkParticle> {
        self.pool.iter()
    }

    pub fn particle_count(&self) -> usize {
        self.pool.len()
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_parts(self) -> (H, S, R) {
        (self.host, self.surface, self.rng)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/engine.rs"]
mod tests;
