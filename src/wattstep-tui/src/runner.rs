//! Interactive event loop for the onboarding wizard.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │              tokio::select!                │
//! │   ticker.tick()        events.next()       │
//! │        │                     │             │
//! │   App::tick(now)     App::handle_key(now)  │
//! │        └──────────┬──────────┘             │
//! │              terminal.draw                 │
//! └────────────────────────────────────────────┘
//! ```
//!
//! Due transition timers fire on the first frame at or after their deadline,
//! so the observable delay is rounded up to the tick rate. Frames are only
//! drawn after input, or while a transition or fade is in progress.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use tokio::time::MissedTickBehavior;

use crate::app::App;
use crate::config::HostConfig;
use crate::terminal::{TerminalOptions, WattstepTerminal};
use crate::ui;

/// Runs the wizard until the user quits or the input stream ends.
pub async fn run(config: HostConfig, start_index: usize, options: TerminalOptions) -> Result<()> {
    let mut terminal = WattstepTerminal::with_options(options)?;
    let mut app = App::new(&config, start_index, Instant::now());
    let result = run_loop(&mut terminal, &mut app, config.tick_rate_ms).await;
    app.shutdown();
    result
}

async fn run_loop(terminal: &mut WattstepTerminal, app: &mut App, tick_rate_ms: u64) -> Result<()> {
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(tick_rate_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(tick_rate_ms, "onboarding wizard started");

    let mut redraw = true;
    let mut was_animating = true;

    loop {
        if redraw {
            terminal.draw(|frame| ui::render(&*app, frame, Instant::now()))?;
        }
        if app.should_quit() {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let changed = app.tick(now);
                let animating = app.is_animating(now);
                // One more frame after an animation ends so it lands on its final value.
                redraw = changed || animating || was_animating;
                was_animating = animating;
            }
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                    redraw = true;
                }
                Some(Ok(Event::Resize(..))) => redraw = true,
                Some(Ok(_)) => redraw = false,
                Some(Err(e)) => {
                    tracing::error!("Error reading terminal events: {}", e);
                    return Err(e.into());
                }
                None => break,
            },
        }
    }

    tracing::info!(step = app.wizard().index() + 1, "onboarding wizard closed");
    Ok(())
}
