/// One of the environment capability/preference signals the engine watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvSignal {
    /// Primary pointer is mouse/pen precision.
    FinePointer,
    /// Primary input can hover.
    Hover,
    /// User asked for reduced motion.
    ReducedMotion,
}

/// Snapshot of the three environment signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EnvironmentSignals {
    pub fine_pointer: bool,
    pub hover: bool,
    pub reduced_motion: bool,
}

impl EnvironmentSignals {
    /// Desktop-like environment with no motion preference.
    pub fn desktop() -> Self {
        Self {
            fine_pointer: true,
            hover: true,
            reduced_motion: false,
        }
    }

    /// The trail runs iff fine pointer AND hover AND NOT reduced motion.
    pub fn should_enable(self) -> bool {
        self.fine_pointer && self.hover && !self.reduced_motion
    }

    pub fn get(self, signal: EnvSignal) -> bool {
        match signal {
            EnvSignal::FinePointer => self.fine_pointer,
            EnvSignal::Hover => self.hover,
            EnvSignal::ReducedMotion => self.reduced_motion,
        }
    }

    /// Update one signal; returns whether it changed.
    pub fn set(&mut self, signal: EnvSignal, value: bool) -> bool {
        let slot = match signal {
            EnvSignal::FinePointer => &mut self.fine_pointer,
            EnvSignal::Hover => &mut self.hover,
            EnvSignal::ReducedMotion => &mut self.reduced_motion,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }
}

/// Device class reported with a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
    /// The host reported an empty device class.
    Unspecified,
    Other,
}

impl PointerKind {
    pub fn from_pointer_type(s: &str) -> Self {
        match s {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            "touch" => Self::Touch,
            "" => Self::Unspecified,
            _ => Self::Other,
        }
    }

    /// Mouse, pen and unspecified devices drive the trail; everything else is ignored.
    pub fn is_fine(self) -> bool {
        matches!(self, Self::Mouse | Self::Pen | Self::Unspecified)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trail/activation.rs"]
mod tests;
