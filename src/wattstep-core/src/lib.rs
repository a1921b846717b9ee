//! # Wattstep Core
//!
//! Timing state machine behind the fade transitions of the wattstep
//! onboarding wizard.
//!
//! ## Core Components
//!
//! - **Transition**: [`StepTransition`], a frame-ticked controller that turns
//!   a stream of requested step keys into a two-phase (hide, then show)
//!   visibility sequence, plus [`TransitionHandle`], which owns one on a tokio
//!   task and publishes every change through a watch channel.
//! - **Animation**: eased fade and colour interpolation helpers a rendering
//!   host uses to turn the boolean visibility flag into opacity.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Rendering Host                        │
//! │   update(key) ──────┐            ┌────── current_visual()│
//! └─────────────────────┼────────────┼───────────────────────┘
//!                       │            │
//! ┌─────────────────────▼────────────┴───────────────────────┐
//! │                   StepTransition                         │
//! │   Visual { visible, key }    Option<PendingTimer>        │
//! │          ▲                          │                    │
//! │          └──────── tick(now) ◄──────┘                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use wattstep_core::{StepTransition, TransitionTiming};
//!
//! let start = Instant::now();
//! let mut transition = StepTransition::new_at(1, TransitionTiming::default(), start);
//! assert!(!transition.current_visual().visible);
//!
//! // Host frame loop
//! if transition.tick(Instant::now()) {
//!     let visual = transition.current_visual();
//!     // re-render step `visual.key` with `visual.visible`
//! }
//! ```

pub mod animation;
pub mod transition;

pub use animation::{Fade, FadeDirection, ease_in_out, interpolate_color};
pub use transition::{
    DEFAULT_FADE_DELAY_MS, DEFAULT_MOUNT_DELAY_MS, StepKey, StepTransition, TimerAction,
    TransitionHandle, TransitionPhase, TransitionTiming, Visual,
};

/// Wattstep core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
