use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

pub type Canvas = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode + alternate screen for the lifetime of the guard.
///
/// The terminal is restored on drop, so early returns and errors leave the
/// shell usable; a panic hook restores it before the panic message prints.
pub struct TerminalGuard {
    pub canvas: Canvas,
}

impl TerminalGuard {
    pub fn new() -> Result<Self> {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = restore_terminal();
            return Err(e).context("entering alternate screen");
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(canvas) => Ok(Self { canvas }),
            Err(e) => {
                let _ = restore_terminal();
                Err(e).context("creating terminal canvas")
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;
    Ok(())
}
