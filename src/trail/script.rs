use std::path::Path;

use kurbo::Point;

use crate::config::model::TrailConfig;
use crate::foundation::core::{FrameToken, Viewport};
use crate::foundation::error::{InklineError, InklineResult};
use crate::foundation::rng::RandomSource;
use crate::render::raster::{FrameRGBA, PixmapSurface};
use crate::trail::activation::{EnvSignal, EnvironmentSignals, PointerKind};
use crate::trail::engine::{PointerEvent, TrailEngine, TrailHost};

/// One recorded host event.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Move {
        x: f64,
        y: f64,
        #[serde(default = "mouse")]
        pointer: PointerKind,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default = "mouse")]
        pointer: PointerKind,
    },
    /// Deliver the pending animation frame at `at_ms`.
    Frame { at_ms: f64 },
    Env {
        signal: EnvSignal,
        value: bool,
        #[serde(default)]
        at_ms: f64,
    },
    Resize { width: f64, height: f64 },
}

fn mouse() -> PointerKind {
    PointerKind::Mouse
}

/// A pointer session to replay through the trail engine.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrailScript {
    #[serde(default = "EnvironmentSignals::desktop")]
    pub env: EnvironmentSignals,
    pub events: Vec<ScriptEvent>,
}

impl TrailScript {
    pub fn from_reader<R: std::io::Read>(r: R) -> InklineResult<Self> {
        serde_json::from_reader(r).map_err(|e| InklineError::serde(format!("trail script: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> InklineResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            InklineError::validation(format!("open trail script '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }
}

/// Headless host: fixed viewport and a monotonically increasing frame token.
#[derive(Clone, Debug)]
pub struct ScriptHost {
    viewport: Viewport,
    next_token: u64,
    listening: bool,
    enabled: bool,
}

impl ScriptHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            next_token: 0,
            listening: false,
            enabled: false,
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl TrailHost for ScriptHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameToken {
        self.next_token += 1;
        FrameToken(self.next_token)
    }

    fn cancel_frame(&mut self, _token: FrameToken) {}

    fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }

    fn set_enabled_marker(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[derive(Clone, Debug)]
pub struct ReplayOutcome {
    /// Overlay contents after the last event.
    pub frame: FrameRGBA,
    /// Frames that advanced particles.
    pub frames_drawn: usize,
    pub live_particles: usize,
    pub running: bool,
}

/// Mount an engine on a [`ScriptHost`] + [`PixmapSurface`], feed it every event in order and
/// snapshot the overlay.
#[tracing::instrument(level = "debug", skip_all, fields(events = script.events.len()))]
pub fn replay<R: RandomSource>(
    script: &TrailScript,
    viewport: Viewport,
    config: TrailConfig,
    rng: R,
) -> ReplayOutcome {
    let host = ScriptHost::new(viewport);
    let mut engine = TrailEngine::new(config, host, PixmapSurface::new(), rng);
    engine.mount(script.env, 0.0);

    let mut frames_drawn = 0;
    for event in &script.events {
        match *event {
            ScriptEvent::Move { x, y, pointer } => engine.on_pointer_move(PointerEvent {
                position: Point::new(x, y),
                kind: pointer,
            }),
            ScriptEvent::Down { x, y, pointer } => engine.on_pointer_down(PointerEvent {
                position: Point::new(x, y),
                kind: pointer,
            }),
            ScriptEvent::Frame { at_ms } => {
                if let Some(token) = engine.pending_frame()
                    && engine.on_frame(token, at_ms).is_some_and(|s| s.drawn)
                {
                    frames_drawn += 1;
                }
            }
            ScriptEvent::Env {
                signal,
                value,
                at_ms,
            } => engine.on_env_change(signal, value, at_ms),
            ScriptEvent::Resize { width, height } => {
                let next = Viewport {
                    width,
                    height,
                    ..engine.host().viewport()
                };
                engine.host_mut().set_viewport(next);
                engine.on_resize();
            }
        }
    }

    let live_particles = engine.particle_count();
    let running = engine.is_running();
    let (_, mut surface, _) = engine.into_parts();
    ReplayOutcome {
        frame: surface.frame(),
        frames_drawn,
        live_particles,
        running,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/script.rs"]
mod tests;
