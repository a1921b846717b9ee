//! Terminal setup, teardown, and management.
//!
//! Provides RAII-based cleanup so the terminal is always restored to a sane
//! state, including when the wizard panics or returns early with an error.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut terminal = WattstepTerminal::with_options(TerminalOptions::default())?;
//! terminal.draw(|frame| {
//!     // ... render widgets
//! })?;
//! // Terminal is automatically restored on drop
//! ```

use std::io::{Stdout, stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Track whether the panic hook has been installed to avoid installing it multiple times.
static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

/// RAII guard that restores the terminal on drop.
struct TerminalGuard {
    alternate_screen: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal(self.alternate_screen);
    }
}

/// Configuration options for terminal initialization.
#[derive(Debug, Clone)]
pub struct TerminalOptions {
    /// Use alternate screen buffer (preserves scrollback)
    pub alternate_screen: bool,
    /// Terminal title
    pub title: Option<String>,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            title: Some("wattstep".to_string()),
        }
    }
}

impl TerminalOptions {
    pub fn alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }
}

/// Wrapper around ratatui Terminal that owns the raw-mode session.
pub struct WattstepTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl WattstepTerminal {
    /// Raw-mode terminal with a hidden cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout is not a terminal or raw mode cannot be
    /// enabled.
    pub fn with_options(options: TerminalOptions) -> Result<Self> {
        // Build the guard first so a failure halfway through init still restores.
        let guard = TerminalGuard {
            alternate_screen: options.alternate_screen,
        };
        init_terminal(&options)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(Self {
            terminal,
            _guard: guard,
        })
    }

    /// Draw a frame to the terminal.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

fn init_terminal(options: &TerminalOptions) -> Result<()> {
    install_panic_hook();

    enable_raw_mode()?;
    let mut stdout = stdout();

    if options.alternate_screen {
        execute!(stdout, EnterAlternateScreen)?;
    }
    execute!(stdout, Clear(ClearType::All), cursor::Hide)?;

    if let Some(ref title) = options.title {
        execute!(stdout, SetTitle(title))?;
    }

    Ok(())
}

fn restore_terminal(alternate_screen: bool) -> Result<()> {
    let mut stdout = stdout();

    execute!(stdout, cursor::Show)?;
    if alternate_screen {
        execute!(stdout, LeaveAlternateScreen)?;
    }
    disable_raw_mode()?;

    Ok(())
}

/// Install a panic hook that restores the terminal before the panic message
/// is printed. Installed once per process.
fn install_panic_hook() {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::SeqCst) {
        return;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(true);
        original_hook(panic_info);

        if std::env::var("RUST_BACKTRACE").is_err() {
            eprintln!();
            eprintln!("\x1b[1;33mTip:\x1b[0m For a full backtrace, run with RUST_BACKTRACE=1");
        }
    }));
}
