use crate::config::HealthThresholds;
use crate::error::{RenderError, Span};
use crate::models::disk::{DiskRecord, SizeMode};
use crate::ui::layout::MIN_BAR_WIDTH;

/// Health of a filesystem, shown as the color of its used segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Health {
    Normal,
    Critical,
}

impl Health {
    /// Critical when little space is left in absolute terms or the
    /// filesystem is nearly full.
    pub fn classify(avail: u64, use_ratio: f64, thr: &HealthThresholds) -> Self {
        if avail < thr.critical_avail_bytes || use_ratio > thr.critical_use_ratio {
            Health::Critical
        } else {
            Health::Normal
        }
    }
}

/// Column counts for one bar. `used + free + pad` always equals the budget
/// the bar was rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSegments {
    pub used:   usize,
    pub free:   usize,
    pub pad:    usize,
    pub health: Health,
}

impl BarSegments {
    /// Zero-width bar that still occupies `budget` columns of padding.
    pub fn blank(budget: usize) -> Self {
        Self { used: 0, free: 0, pad: budget, health: Health::Normal }
    }

    pub fn width(&self) -> usize {
        self.used + self.free + self.pad
    }
}

/// Split `budget` columns into used / free / pad for one record.
///
/// In proportional mode one column stands for `max_size / budget` bytes on
/// every row; in fill mode each bar is scaled to its own capacity.
pub fn render_bar(
    rec:      &DiskRecord,
    mode:     SizeMode,
    budget:   usize,
    max_size: u64,
    thr:      &HealthThresholds,
) -> Result<BarSegments, RenderError> {
    if budget < MIN_BAR_WIDTH {
        return Err(RenderError::LayoutTooNarrow {
            span:      Span::Bar,
            available: budget,
            required:  MIN_BAR_WIDTH,
        });
    }
    let use_ratio = rec.use_ratio().ok_or_else(|| undefined(rec))?;
    let health    = Health::classify(rec.avail, use_ratio, thr);

    let (used, free) = match mode {
        SizeMode::Fill => {
            let used = scale(rec.used, budget, rec.size).min(budget);
            (used, budget - used)
        }
        SizeMode::Proportional => {
            if max_size == 0 { return Err(undefined(rec)); }
            let used = scale(rec.used, budget, max_size).min(budget);
            let free = scale(rec.avail, budget, max_size).min(budget - used);
            (used, free)
        }
    };

    let bar = BarSegments { used, free, pad: budget - used - free, health };
    debug_assert_eq!(bar.width(), budget);
    Ok(bar)
}

/// floor(bytes * budget / total) without overflow or float rounding.
fn scale(bytes: u64, budget: usize, total: u64) -> usize {
    let cols = bytes as u128 * budget as u128 / total as u128;
    usize::try_from(cols).unwrap_or(usize::MAX)
}

fn undefined(rec: &DiskRecord) -> RenderError {
    RenderError::DivisionUndefined { device: rec.device_path.clone() }
}
