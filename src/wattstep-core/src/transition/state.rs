//! Value types shared by the transition controller and its hosts.

use std::time::Instant;

/// Identifier of a step in the onboarding flow.
///
/// The controller never interprets keys; it only compares them for equality.
pub type StepKey = i64;

/// What a host should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visual {
    /// Whether the displayed step is shown (fully faded in or fading in).
    pub visible: bool,
    /// The step whose content is currently rendered.
    pub key: StepKey,
}

impl Visual {
    pub fn hidden(key: StepKey) -> Self {
        Self {
            visible: false,
            key,
        }
    }

    pub fn shown(key: StepKey) -> Self {
        Self { visible: true, key }
    }
}

/// Deferred mutation carried by the single pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    /// Mount-in: reveal the initial step.
    Reveal,
    /// Fade completion: swap in the target step and reveal it.
    Commit(StepKey),
}

/// The single outstanding deferred callback of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingTimer {
    pub due: Instant,
    pub action: TimerAction,
}

impl PendingTimer {
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}

/// Coarse phase of a controller, for hosts and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Initial step is hidden, waiting for the mount-in reveal.
    Mounting,
    /// Displayed step is visible and nothing is scheduled.
    Idle,
    /// Old step is hidden; `target` will be committed when the fade timer fires.
    FadingOut { target: StepKey },
    /// Controller was disposed; all input is ignored.
    Disposed,
}

impl TransitionPhase {
    /// Returns `true` while a timer is outstanding.
    pub fn is_animating(&self) -> bool {
        matches!(self, Self::Mounting | Self::FadingOut { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Mounting => "mounting",
            Self::Idle => "idle",
            Self::FadingOut { .. } => "fading-out",
            Self::Disposed => "disposed",
        }
    }
}
