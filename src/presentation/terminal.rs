//! Raw mode and alternate screen handling.

use crossterm::{
    QueueableCommand, cursor,
    style::ResetColor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Puts the terminal into raw mode on the alternate screen and puts it back
/// when dropped, including while unwinding from a panic.
pub struct TerminalGuard<W: Write> {
    out: W,
    active: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self { out, active: true };
        guard.out.queue(EnterAlternateScreen)?;
        guard.out.flush()?;
        Ok(guard)
    }

    /// Leaves the alternate screen and raw mode. Later calls do nothing.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        self.out.queue(ResetColor)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(LeaveAlternateScreen)?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::warn!(error = %e, "failed to restore terminal");
        }
    }
}
