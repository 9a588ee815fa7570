use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CycleSizeMode, // m: proportional ↔ fill
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press { return Action::None; }
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('m'), _) => Action::CycleSizeMode,

        _ => Action::None,
    }
}

/// Map any terminal event to an action. Resizes are not acted on here: the
/// session notices them by comparing dimensions on its next cycle.
pub fn handle_event(ev: Event) -> Action {
    match ev {
        Event::Key(key) => handle_key(key),
        _               => Action::None,
    }
}

/// Blocking source of user actions.
pub trait Input {
    fn next_action(&mut self) -> Result<Action>;
}

/// Reads crossterm events from the controlling terminal.
pub struct TerminalInput;

impl Input for TerminalInput {
    fn next_action(&mut self) -> Result<Action> {
        Ok(handle_event(event::read()?))
    }
}
