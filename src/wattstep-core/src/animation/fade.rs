//! Fade animation for step transitions.

use std::time::{Duration, Instant};

use super::easing::ease_in_out;

/// Direction of a fade animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Fade in: opacity goes from 0 to 1
    In,
    /// Fade out: opacity goes from 1 to 0
    Out,
}

impl FadeDirection {
    /// Direction that ends at the given visibility.
    pub fn towards(visible: bool) -> Self {
        if visible { Self::In } else { Self::Out }
    }
}

/// One-shot eased fade anchored at an explicit start instant.
///
/// A rendering host starts a new fade every time the transition controller
/// flips its visibility flag and samples [`Fade::opacity_at`] once per frame.
/// Passing the frame time in keeps the fade in lockstep with the controller,
/// which is driven by the same clock.
#[derive(Debug, Clone)]
pub struct Fade {
    start: Instant,
    duration: Duration,
    direction: FadeDirection,
}

impl Fade {
    /// Creates a fade starting at `start`.
    pub fn new(direction: FadeDirection, duration: Duration, start: Instant) -> Self {
        Self {
            start,
            duration,
            direction,
        }
    }

    /// Linear progress from 0.0 to 1.0 at `now`.
    pub fn progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased opacity at `now`.
    ///
    /// For `FadeDirection::In`: starts at 0.0, ends at 1.0
    /// For `FadeDirection::Out`: starts at 1.0, ends at 0.0
    pub fn opacity_at(&self, now: Instant) -> f32 {
        let eased = ease_in_out(self.progress_at(now));
        match self.direction {
            FadeDirection::In => eased,
            FadeDirection::Out => 1.0 - eased,
        }
    }

    /// Returns `true` once the fade has run its full duration at `now`.
    pub fn is_complete_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Returns the fade direction.
    pub fn direction(&self) -> FadeDirection {
        self.direction
    }
}
