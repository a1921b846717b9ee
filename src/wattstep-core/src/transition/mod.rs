//! Step transition state machine for the onboarding wizard.
//!
//! A host supplies the step it wants to show; the controller answers with
//! which step to render and whether it is visible, sequencing a fade-out of
//! the old step before the new one appears.
//!
//! # Overview
//!
//! ```text
//!   new_at(K0) ──► Mounting {hidden K0} ──(mount_delay)──► Idle {shown K0}
//!                                                            │
//!                       update(K1 != requested)              │
//!                                                            ▼
//!   Idle {shown K1} ◄──(fade_delay)── FadingOut {hidden K0, target K1}
//!                                          │      ▲
//!                                          └──────┘ update(K2): timer restarts,
//!                                                   target becomes K2
//! ```
//!
//! - [`StepTransition`] is the deterministic core, ticked by the host.
//! - [`TransitionHandle`] runs one on a tokio task with real timers and
//!   publishes changes through a watch channel.

mod controller;
mod handle;
mod state;
mod timing;


pub use controller::StepTransition;
pub use handle::TransitionHandle;
pub use state::{StepKey, TimerAction, TransitionPhase, Visual};
pub use timing::{DEFAULT_FADE_DELAY_MS, DEFAULT_MOUNT_DELAY_MS, TransitionTiming};
