use crate::config::HealthThresholds;
use crate::error::{RenderError, Span};
use crate::models::disk::{DiskRecord, SizeMode};
use crate::ui::bar::{render_bar, BarSegments, Health};
use crate::ui::layout::{self, Align, Column, Layout};
use crate::util::human::{fit_tail, fmt_pct, fmt_size};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

pub const USED_GLYPH: char = '█';
pub const FREE_GLYPH: char = '░';

// ── Styled text ───────────────────────────────────────────────────────

/// What a piece of text is; the theme turns roles into colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Text,
    Header,
    Border,
    Used(Health),
    Free,
    Pad,
    Timestamp,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub role: Role,
}

/// One output line as a run of role-tagged segments. Concatenating the
/// segment texts gives the uncolored line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub segments: Vec<Segment>,
}

impl StyledLine {
    fn push(&mut self, text: impl Into<String>, role: Role) {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment { text, role });
        }
    }

    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Width in terminal columns. CJK and other wide characters count two.
    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| s.text.width()).sum()
    }
}

/// A line written at a fixed screen row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placed {
    pub y:    u16,
    pub line: StyledLine,
}

// ── Rows ──────────────────────────────────────────────────────────────

/// Per-draw pairing of a record with its bar geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRow<'a> {
    pub record: &'a DiskRecord,
    pub bar:    BarSegments,
}

/// Records ordered ascending by capacity. Equal sizes keep source order.
pub fn sorted(records: &[DiskRecord]) -> Vec<&DiskRecord> {
    let mut v: Vec<&DiskRecord> = records.iter().collect();
    v.sort_by_key(|r| r.size);
    v
}

pub fn build_rows<'a>(
    records: &'a [DiskRecord],
    layout:  &Layout,
    mode:    SizeMode,
    thr:     &HealthThresholds,
) -> Vec<RenderRow<'a>> {
    sorted(records)
        .into_iter()
        .map(|record| {
            let bar = render_bar(record, mode, layout.bar_budget, layout.max_size, thr)
                .unwrap_or_else(|e| {
                    debug!(mount = %record.root_mount, error = %e, "blank bar substituted");
                    BarSegments::blank(layout.bar_budget)
                });
            RenderRow { record, bar }
        })
        .collect()
}

/// `text` cut and padded to exactly `col.width` terminal columns.
fn cell(text: &str, col: Column) -> String {
    let text = fit_tail(text, col.width);
    let fill = " ".repeat(col.width.saturating_sub(text.width()));
    match col.align {
        Align::Left  => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

pub fn header_line(layout: &Layout, mode: SizeMode) -> StyledLine {
    let mut line = StyledLine::default();
    let titles: String = layout::FIXED_COLUMNS.iter().map(|c| cell(c.title, *c)).collect();
    let label: String = mode.label().chars().take(layout.bar_budget).collect();
    line.push(titles, Role::Header);
    line.push(format!(" {:<w$} ", label, w = layout.bar_budget), Role::Header);
    line
}

pub fn row_line(row: &RenderRow, layout: &Layout) -> StyledLine {
    let r   = row.record;
    let pct = r.use_ratio().map(fmt_pct).unwrap_or_else(|| "-".to_string());

    let mut text = String::with_capacity(layout.row_width());
    text.push_str(&cell(&r.root_mount, layout::MOUNT));
    text.push_str(&cell(&r.device_path, layout::DEVICE));
    text.push_str(&cell(&fmt_size(r.size), layout::SIZE));
    text.push_str(&cell(&fmt_size(r.avail), layout::FREE));
    text.push_str(&cell(&pct, layout::USE));

    let bar = &row.bar;
    let mut line = StyledLine::default();
    line.push(text, Role::Text);
    line.push("|", Role::Border);
    line.push(USED_GLYPH.to_string().repeat(bar.used), Role::Used(bar.health));
    line.push(FREE_GLYPH.to_string().repeat(bar.free), Role::Free);
    line.push("|", Role::Border);
    line.push(" ".repeat(bar.pad), Role::Pad);
    debug_assert_eq!(line.width(), layout.row_width());
    line
}

/// Single line shown instead of the table when the bar does not fit.
pub fn summary_line(records: &[DiskRecord], err: &RenderError, thr: &HealthThresholds) -> StyledLine {
    let critical = records
        .iter()
        .filter(|r| {
            r.use_ratio()
                .map_or(false, |u| Health::classify(r.avail, u, thr) == Health::Critical)
        })
        .count();
    let need = match err {
        RenderError::LayoutTooNarrow { span: Span::Terminal, required, .. } => {
            format!(", need {} cols", required)
        }
        _ => String::new(),
    };

    let mut line = StyledLine::default();
    line.push(format!("{} fs", records.len()), Role::Text);
    let crit_role = if critical > 0 { Role::Used(Health::Critical) } else { Role::Text };
    line.push(format!(", {} critical", critical), crit_role);
    line.push(need, Role::Text);
    line
}

// ── Frames ────────────────────────────────────────────────────────────

/// One-shot report: header plus one line per record, smallest first.
/// Falls back to a summary line when the terminal is too narrow.
pub fn compose_report(
    records: &[DiskRecord],
    columns: u16,
    mode:    SizeMode,
    thr:     &HealthThresholds,
) -> Vec<StyledLine> {
    let layout = match Layout::compute(columns, records) {
        Ok(l)  => l,
        Err(e) => return vec![summary_line(records, &e, thr)],
    };

    let mut lines = vec![header_line(&layout, mode)];
    lines.extend(build_rows(records, &layout, mode, thr).iter().map(|r| row_line(r, &layout)));
    lines
}

/// Full-screen canvas: timestamp on row 0, header on row 1, records from
/// row 2, status on the last row. Records that do not fit above the status
/// row are left out.
pub fn compose_canvas(
    records:   &[DiskRecord],
    columns:   u16,
    rows:      u16,
    mode:      SizeMode,
    thr:       &HealthThresholds,
    timestamp: &str,
    status:    &str,
) -> Vec<Placed> {
    let mut out = Vec::new();
    if rows == 0 || columns == 0 { return out; }

    let mut ts = StyledLine::default();
    ts.push(timestamp, Role::Timestamp);
    out.push(Placed { y: 0, line: ts });

    let status_y = rows - 1;
    match Layout::compute(columns, records) {
        Ok(layout) => {
            out.push(Placed { y: 1, line: header_line(&layout, mode) });
            for (i, row) in build_rows(records, &layout, mode, thr).iter().enumerate() {
                let y = 2 + i as u16;
                if y >= status_y { break; }
                out.push(Placed { y, line: row_line(row, &layout) });
            }
        }
        Err(e) => out.push(Placed { y: 1, line: summary_line(records, &e, thr) }),
    }

    out.retain(|p| p.y < status_y);
    out.push(Placed { y: status_y, line: status_line(status, columns) });
    out
}

/// Status text padded (or cut) to exactly `columns` terminal columns.
pub fn status_line(status: &str, columns: u16) -> StyledLine {
    let w = columns as usize;
    let mut text = String::new();
    let mut used = 0;
    for c in status.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + cw > w { break; }
        used += cw;
        text.push(c);
    }
    text.push_str(&" ".repeat(w - used));
    let mut line = StyledLine::default();
    line.push(text, Role::Status);
    line
}
