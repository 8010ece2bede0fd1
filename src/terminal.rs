//! Raw mode and alternate screen lifecycle.
//!
//! [`TerminalGuard`] puts the terminal back on every exit path: an explicit
//! [`TerminalGuard::restore`] on the normal path, `Drop` when setup or the
//! event loop bails out early.

use std::io;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

pub struct TerminalGuard {
    restored: bool,
}

impl TerminalGuard {
    /// Enable raw mode and switch to the alternate screen
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // raw mode is on; from here Drop undoes whatever got applied
        let guard = Self { restored: false };
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }

    pub fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = restore_terminal() {
            warn!(%e, "failed to restore terminal");
        }
    }
}

/// Run every teardown step, then report the first failure
pub fn restore_terminal() -> io::Result<()> {
    first_error([
        execute!(io::stdout(), LeaveAlternateScreen, Show),
        disable_raw_mode(),
    ])
}

fn first_error<I>(results: I) -> io::Result<()>
where
    I: IntoIterator<Item = io::Result<()>>,
{
    results.into_iter().fold(Ok(()), |acc, r| acc.and(r))
}
