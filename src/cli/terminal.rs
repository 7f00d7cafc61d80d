//! Terminal setup for the interactive UI.
//!
//! The UI owns the terminal while it runs: raw mode and the alternate
//! screen are entered on construction and always restored on drop, even
//! when the event loop returns early with an error.

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

use crate::error::DockNavError;
use crate::Result;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Restores the terminal when dropped
pub struct TerminalGuard {
    terminal: Tui,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        enable_raw_mode().map_err(terminal_error("enable raw mode"))?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(terminal_error("enter alternate screen")(e));
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(terminal_error("create terminal"))?;

        tracing::debug!("Terminal initialized");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            tracing::warn!("Failed to leave alternate screen: {}", e);
        }
        let _ = self.terminal.show_cursor();
        tracing::debug!("Terminal restored");
    }
}

fn terminal_error(action: &str) -> impl FnOnce(io::Error) -> DockNavError + '_ {
    move |e| DockNavError::Terminal(format!("Failed to {}: {}", action, e))
}
