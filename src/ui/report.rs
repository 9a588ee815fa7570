use crate::ui::bar::Health;
use crate::ui::compose::{Role, StyledLine};
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};

/// Write composed lines to `out`, with ANSI colors when `color` is set.
///
/// The uncolored output is exactly `StyledLine::plain` per line, so column
/// alignment does not depend on the terminal.
pub fn write_lines<W: Write>(out: &mut W, lines: &[StyledLine], color: bool) -> io::Result<()> {
    for line in lines {
        if color {
            for seg in &line.segments {
                match ansi_color(seg.role) {
                    Some(c) if seg.role == Role::Used(Health::Critical) => {
                        write!(out, "{}", seg.text.as_str().with(c).bold())?
                    }
                    Some(c) => write!(out, "{}", seg.text.as_str().with(c))?,
                    None    => write!(out, "{}", seg.text)?,
                }
            }
        } else {
            write!(out, "{}", line.plain())?;
        }
        writeln!(out)?;
    }
    out.flush()
}

fn ansi_color(role: Role) -> Option<Color> {
    match role {
        Role::Used(Health::Normal)   => Some(Color::Green),
        Role::Used(Health::Critical) => Some(Color::Red),
        Role::Header                 => Some(Color::Cyan),
        Role::Border | Role::Free    => Some(Color::DarkGrey),
        _                            => None,
    }
}
