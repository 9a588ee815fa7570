use crate::ui::compose::{Placed, StyledLine};
use crate::ui::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Write each placed line at its row. Lines below the frame are skipped and
/// anything wider than the frame is clipped by ratatui.
pub fn render(f: &mut Frame, placed: &[Placed], theme: &Theme) {
    let area = f.area();
    for p in placed {
        if p.y >= area.height { continue; }
        let row = Rect { x: area.x, y: area.y + p.y, width: area.width, height: 1 };
        f.render_widget(Paragraph::new(to_line(&p.line, theme)), row);
    }
}

fn to_line<'a>(line: &'a StyledLine, theme: &Theme) -> Line<'a> {
    Line::from(
        line.segments
            .iter()
            .map(|s| Span::styled(s.text.as_str(), theme.style(s.role)))
            .collect::<Vec<_>>(),
    )
}
