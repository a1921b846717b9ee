//! wattstep - onboarding wizard entry point.
//!
//! - Interactive wizard (default)
//! - `timeline` - scripted, non-interactive transition run

use anyhow::Result;
use clap::Parser;

use wattstep_tui::cli::{Cli, dispatch};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dispatch(cli).await
}
