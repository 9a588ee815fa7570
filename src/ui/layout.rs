use crate::error::{RenderError, Span};
use crate::models::disk::DiskRecord;

/// Narrowest bar region still worth drawing.
pub const MIN_BAR_WIDTH: usize = 1;

/// The two `|` characters around every bar.
pub const BORDER_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One fixed-width text column left of the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub width: usize,
    pub align: Align,
}

pub const MOUNT:  Column = Column { title: "mount",  width: 20, align: Align::Left  };
pub const DEVICE: Column = Column { title: "device", width: 14, align: Align::Right };
pub const SIZE:   Column = Column { title: "size",   width: 10, align: Align::Right };
pub const FREE:   Column = Column { title: "free",   width: 10, align: Align::Right };
pub const USE:    Column = Column { title: "use%",   width: 7,  align: Align::Right };

pub const FIXED_COLUMNS: [Column; 5] = [MOUNT, DEVICE, SIZE, FREE, USE];

/// Total width of the fixed columns.
pub fn fixed_width() -> usize {
    FIXED_COLUMNS.iter().map(|c| c.width).sum()
}

/// Geometry shared by every row of one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Width of the elastic bar region, borders excluded.
    pub bar_budget: usize,
    /// Largest capacity among the records; one proportional bar spans it.
    pub max_size:   u64,
}

impl Layout {
    /// Fit the columns into a terminal `columns` wide.
    ///
    /// Fails with `LayoutTooNarrow` when fewer than `MIN_BAR_WIDTH` columns
    /// remain for the bar.
    pub fn compute(columns: u16, records: &[DiskRecord]) -> Result<Self, RenderError> {
        let required = fixed_width() + BORDER_CHARS + MIN_BAR_WIDTH;
        let bar_budget = (columns as usize)
            .checked_sub(fixed_width() + BORDER_CHARS)
            .filter(|b| *b >= MIN_BAR_WIDTH)
            .ok_or(RenderError::LayoutTooNarrow {
                span:      Span::Terminal,
                available: columns as usize,
                required,
            })?;

        let max_size = records.iter().map(|r| r.size).max().unwrap_or(0);
        Ok(Self { bar_budget, max_size })
    }

    /// Full row width: fixed columns, borders and bar.
    pub fn row_width(&self) -> usize {
        fixed_width() + BORDER_CHARS + self.bar_budget
    }
}
