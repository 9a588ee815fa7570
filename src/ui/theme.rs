use crate::ui::bar::Health;
use crate::ui::compose::Role;
use ratatui::style::{Color, Modifier, Style};

// ── Theme struct ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct Theme {
    pub text:      Style,
    pub header:    Style,
    pub border:    Style,
    pub used_ok:   Style,
    pub used_crit: Style,
    pub free:      Style,
    pub timestamp: Style,
    pub status:    Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text:      Style::default().fg(Color::White),
            header:    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border:    Style::default().fg(Color::DarkGray),
            used_ok:   Style::default().fg(Color::Green),
            used_crit: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            free:      Style::default().fg(Color::DarkGray),
            timestamp: Style::default().fg(Color::Gray),
            status:    Style::default().fg(Color::Black).bg(Color::White),
        }
    }
}

impl Theme {
    /// Style for a segment role. Only used segments carry health color.
    pub fn style(&self, role: Role) -> Style {
        match role {
            Role::Text      => self.text,
            Role::Header    => self.header,
            Role::Border    => self.border,
            Role::Used(Health::Normal)   => self.used_ok,
            Role::Used(Health::Critical) => self.used_crit,
            Role::Free      => self.free,
            Role::Pad       => Style::default(),
            Role::Timestamp => self.timestamp,
            Role::Status    => self.status,
        }
    }
}
