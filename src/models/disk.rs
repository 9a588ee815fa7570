/// Capacity and usage of one mounted filesystem, as reported by `df`.
///
/// All byte fields are in bytes. Records are rebuilt on every poll and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskRecord {
    pub device_path: String,
    pub fstype:      String,
    pub size:        u64,
    pub used:        u64,
    pub avail:       u64,
    /// Use% column as reported by the source (0–100).
    pub used_pct:    u8,
    pub root_mount:  String,
}

impl DiskRecord {
    /// used / size, or `None` for a zero-capacity record.
    pub fn use_ratio(&self) -> Option<f64> {
        if self.size == 0 { return None; }
        Some(self.used as f64 / self.size as f64)
    }
}

/// How bars are scaled against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// One scale for every row, bounded by the largest filesystem.
    #[default]
    Proportional,
    /// Each bar spans the full width; only relative fullness is compared.
    Fill,
}

impl SizeMode {
    pub fn next(&self) -> Self {
        match self {
            SizeMode::Proportional => SizeMode::Fill,
            SizeMode::Fill         => SizeMode::Proportional,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeMode::Proportional => "proportional",
            SizeMode::Fill         => "fill",
        }
    }
}
