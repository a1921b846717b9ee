//! Frame-ticked step transition controller.
//!
//! This module provides the [`StepTransition`] struct that sequences the
//! hide/show phases of a step change.

use std::time::Instant;

use super::state::{PendingTimer, StepKey, TimerAction, TransitionPhase, Visual};
use super::timing::TransitionTiming;

/// Controller for the fade transition between onboarding steps.
///
/// Handles the lifecycle of a step change:
/// - Mount-in: the initial step starts hidden and is revealed after
///   `mount_delay`
/// - Fade-out: a new key hides the old step immediately; the old key stays
///   displayed until the fade timer fires
/// - Commit: the fade timer swaps in the newest requested key and reveals it
///
/// # Timers
///
/// At most one timer is pending. Scheduling a timer replaces the previous one,
/// so a superseded timer can never fire: rapid navigation `1 -> 2 -> 3`
/// settles directly on `3` without ever showing `2`.
///
/// Timers are plain deadlines. The host calls [`StepTransition::tick`] from its
/// event loop (typically once per frame); a due timer fires there. Dropping the
/// controller drops its timer with it.
#[derive(Debug, Clone)]
pub struct StepTransition {
    timing: TransitionTiming,

    /// What the host should currently render.
    visual: Visual,

    /// Most recent key passed to `update` (or the initial key).
    requested: StepKey,

    pending: Option<PendingTimer>,

    disposed: bool,
}

impl StepTransition {
    /// Creates a controller bound to `initial`, mounting at `now`.
    ///
    /// The step starts hidden; the reveal is scheduled `mount_delay` later.
    pub fn new_at(initial: StepKey, timing: TransitionTiming, now: Instant) -> Self {
        tracing::debug!(
            key = initial,
            mount_delay_ms = timing.mount_delay_ms,
            "step transition mounted"
        );
        Self {
            timing,
            visual: Visual::hidden(initial),
            requested: initial,
            pending: Some(PendingTimer {
                due: now + timing.mount_delay(),
                action: TimerAction::Reveal,
            }),
            disposed: false,
        }
    }

    /// Creates a controller bound to `initial`, mounting now.
    pub fn new(initial: StepKey, timing: TransitionTiming) -> Self {
        Self::new_at(initial, timing, Instant::now())
    }

    // --------------------------------------------------------
    // Host → controller
    // --------------------------------------------------------

    /// Requests that `key` be displayed, as of `now`.
    ///
    /// Repeating the most recently requested key is a no-op. Any other key
    /// cancels the pending timer, hides the displayed step, and schedules the
    /// commit of `key` after `fade_delay`. Ignored after [`dispose`](Self::dispose).
    pub fn update_at(&mut self, key: StepKey, now: Instant) {
        if self.disposed {
            tracing::trace!(key, "update ignored: transition disposed");
            return;
        }
        if key == self.requested {
            tracing::trace!(key, "update ignored: key unchanged");
            return;
        }

        if let Some(superseded) = self.pending.take() {
            tracing::debug!(action = ?superseded.action, "cancelled pending transition timer");
        }

        self.requested = key;
        self.visual.visible = false;
        self.pending = Some(PendingTimer {
            due: now + self.timing.fade_delay(),
            action: TimerAction::Commit(key),
        });

        tracing::debug!(
            from = self.visual.key,
            to = key,
            fade_delay_ms = self.timing.fade_delay_ms,
            phase = self.phase().name(),
            "step fade-out started"
        );
    }

    /// Requests that `key` be displayed, as of now.
    pub fn update(&mut self, key: StepKey) {
        self.update_at(key, Instant::now());
    }

    /// Fires the pending timer if it is due at `now`.
    ///
    /// Returns `true` if the visual changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }
        let Some(timer) = self.pending else {
            return false;
        };
        if !timer.is_due(now) {
            return false;
        }
        self.pending = None;
        let fired_in = Self::phase_for(timer.action).name();

        let before = self.visual;
        match timer.action {
            TimerAction::Reveal => {
                self.visual.visible = true;
                tracing::debug!(key = self.visual.key, phase = fired_in, "step revealed");
            }
            TimerAction::Commit(key) => {
                self.visual = Visual::shown(key);
                tracing::debug!(key, phase = fired_in, "step committed");
            }
        }
        self.visual != before
    }

    /// Cancels any pending timer and stops accepting input.
    ///
    /// Calling this more than once is harmless. The last visual stays readable.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let from = self.phase().name();
        if let Some(timer) = self.pending.take() {
            tracing::debug!(action = ?timer.action, "cancelled pending transition timer on dispose");
        }
        self.disposed = true;
        tracing::debug!(key = self.visual.key, from, "step transition disposed");
    }

    // --------------------------------------------------------
    // Controller → host
    // --------------------------------------------------------

    /// The `{visible, key}` pair the host should render.
    pub fn current_visual(&self) -> Visual {
        self.visual
    }

    /// The key most recently requested by the host.
    pub fn requested_key(&self) -> StepKey {
        self.requested
    }

    /// Deadline of the pending timer, if any.
    ///
    /// Hosts that do not tick every frame can sleep until this instant.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|t| t.due)
    }

    pub fn phase(&self) -> TransitionPhase {
        if self.disposed {
            return TransitionPhase::Disposed;
        }
        match self.pending {
            Some(timer) => Self::phase_for(timer.action),
            None => TransitionPhase::Idle,
        }
    }

    /// Phase the controller is in while `action` is pending.
    fn phase_for(action: TimerAction) -> TransitionPhase {
        match action {
            TimerAction::Reveal => TransitionPhase::Mounting,
            TimerAction::Commit(target) => TransitionPhase::FadingOut { target },
        }
    }

    /// Returns `true` when the requested step is displayed, visible, and
    /// nothing is scheduled.
    pub fn is_settled(&self) -> bool {
        self.pending.is_none() && self.visual.visible && self.visual.key == self.requested
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }
}
