//! Mapping from the controller's `{visible, key}` to render hints.
//!
//! The controller only flips a boolean. [`FadeTracker`] notices each flip and
//! starts an eased [`Fade`] toward the new visibility, so the host can draw a
//! gradual opacity change and a short slide instead of a hard swap.

use std::time::{Duration, Instant};

use ratatui::style::Color;
use wattstep_core::{Fade, FadeDirection, Visual, interpolate_color};

/// Rows the content is pushed down while fully hidden.
pub const MAX_SLIDE_ROWS: u16 = 2;

/// Per-frame rendering hints derived from the current fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualHints {
    /// 0.0 (hidden) to 1.0 (fully shown).
    pub opacity: f32,
    /// Extra top padding, shrinking to zero as the step fades in.
    pub slide_rows: u16,
}

impl VisualHints {
    pub fn from_opacity(opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        let slide_rows = ((1.0 - opacity) * MAX_SLIDE_ROWS as f32).round() as u16;
        Self {
            opacity,
            slide_rows,
        }
    }

    /// Blends `foreground` over `background` by the current opacity.
    pub fn blend(&self, background: Color, foreground: Color) -> Color {
        interpolate_color(background, foreground, self.opacity)
    }
}

/// Tracks visibility flips and the fade each one started.
#[derive(Debug, Clone)]
pub struct FadeTracker {
    last: Visual,
    fade: Fade,
    /// Opacity when `fade` started.
    from: f32,
    /// Length of a full 0 to 1 fade.
    duration: Duration,
}

impl FadeTracker {
    /// Starts settled at `initial`: no fade is in progress.
    pub fn new(initial: Visual, duration: Duration, now: Instant) -> Self {
        let settled = if initial.visible { 1.0 } else { 0.0 };
        Self {
            last: initial,
            fade: Fade::new(FadeDirection::towards(initial.visible), Duration::ZERO, now),
            from: settled,
            duration,
        }
    }

    /// Records the controller's visual; starts a fade if visibility flipped.
    ///
    /// Returns `true` if a new fade started.
    pub fn observe(&mut self, visual: Visual, now: Instant) -> bool {
        let flipped = visual.visible != self.last.visible;
        self.last = visual;
        if !flipped {
            return false;
        }

        // A flip mid-fade continues from the opacity already reached.
        let from = self.opacity_at(now);
        let target = if visual.visible { 1.0 } else { 0.0 };
        let duration = self.duration.mul_f32((target - from).abs());

        self.fade = Fade::new(FadeDirection::towards(visual.visible), duration, now);
        self.from = from;
        tracing::trace!(
            key = visual.key,
            visible = visual.visible,
            duration_ms = duration.as_millis() as u64,
            "fade started"
        );
        true
    }

    pub fn opacity_at(&self, now: Instant) -> f32 {
        let target = match self.fade.direction() {
            FadeDirection::In => 1.0,
            FadeDirection::Out => 0.0,
        };
        let eased = match self.fade.direction() {
            FadeDirection::In => self.fade.opacity_at(now),
            FadeDirection::Out => 1.0 - self.fade.opacity_at(now),
        };
        self.from + (target - self.from) * eased
    }

    pub fn hints(&self, now: Instant) -> VisualHints {
        VisualHints::from_opacity(self.opacity_at(now))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        !self.fade.is_complete_at(now)
    }
}
