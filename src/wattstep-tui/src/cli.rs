//! Command-line interface for the `wattstep` binary.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use wattstep_core::StepKey;

use crate::config::HostConfig;
use crate::logging;
use crate::runner;
use crate::terminal::TerminalOptions;
use crate::timeline::{self, TimelineStep};

/// Default log file for the interactive wizard when `--debug` is set.
pub const DEBUG_LOG_FILE: &str = "wattstep-debug.log";

/// Onboarding wizard with fade transitions between steps.
#[derive(Debug, Parser)]
#[command(name = "wattstep", version, about)]
pub struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable trace-level logging (to a file in interactive mode).
    #[arg(long, global = true)]
    pub debug: bool,

    /// Write interactive-mode logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Draw inline instead of switching to the alternate screen.
    #[arg(long)]
    pub no_alt_screen: bool,

    /// Step to open first (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub start_step: u16,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Terminal setup for the interactive wizard.
    pub fn terminal_options(&self) -> TerminalOptions {
        TerminalOptions::default().alternate_screen(!self.no_alt_screen)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drive the transition controller through scripted updates and print
    /// every visual change.
    Timeline(TimelineArgs),
}

#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Key the controller mounts on.
    #[arg(long, default_value_t = 1, allow_hyphen_values = true)]
    pub initial: StepKey,

    /// Update to apply, as KEY@DELAY_MS after the previous one. Repeatable.
    #[arg(long = "step", value_name = "KEY@DELAY_MS", allow_hyphen_values = true)]
    pub steps: Vec<TimelineStep>,
}

/// Runs the parsed command line.
pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = HostConfig::load_or_default(cli.config.as_deref())?;
    let terminal_options = cli.terminal_options();

    match cli.command {
        Some(Commands::Timeline(args)) => {
            logging::init_stderr_logging(cli.debug);
            let mut stdout = std::io::stdout().lock();
            timeline::run_timeline(args.initial, &args.steps, config.transition, &mut stdout)
                .await?;
            Ok(())
        }
        None => {
            let log_path = match (&cli.log_file, cli.debug) {
                (Some(path), _) => Some(path.clone()),
                (None, true) => Some(std::env::current_dir()?.join(DEBUG_LOG_FILE)),
                (None, false) => None,
            };
            let _log_guard = match log_path {
                Some(path) => Some(logging::init_file_logging(&path, cli.debug)?),
                None => None,
            };
            runner::run(config, usize::from(cli.start_step) - 1, terminal_options).await
        }
    }
}
