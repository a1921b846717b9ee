//! # Wattstep TUI
//!
//! Terminal rendering host for the wattstep step transition controller.
//!
//! The host owns the onboarding content and navigation. It tells the
//! controller which step it wants and draws whatever the controller says is
//! displayed, fading it with the [`visual`] hints.
//!
//! ## Modules
//!
//! - [`app`] - wizard state, key handling, controller ownership
//! - [`ui`] - ratatui rendering of the current frame
//! - [`runner`] - `tokio::select!` frame loop over ticks and terminal input
//! - [`timeline`] - scripted run of a [`TransitionHandle`](wattstep_core::TransitionHandle)
//! - [`config`] - TOML host configuration
//! - [`cli`] - clap command line and dispatch

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod runner;
pub mod steps;
pub mod terminal;
pub mod timeline;
pub mod ui;
pub mod visual;

pub use app::{App, NavAction};
pub use config::{ConfigError, HostConfig};
pub use steps::{StepContent, Wizard};
pub use visual::{FadeTracker, VisualHints};
