/// Compiled-in settings. There is no config file: every run uses
/// `Config::default()`.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub source:     SourceConfig,
    pub thresholds: HealthThresholds,
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Filesystem types passed to `df -x` (pseudo / virtual filesystems)
    pub exclude_types: Vec<String>,
    /// Mount points dropped after parsing
    pub ignore_mounts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthThresholds {
    /// A filesystem with less than this many bytes available is critical.
    pub critical_avail_bytes: u64,
    /// A filesystem whose used/size ratio exceeds this is critical.
    pub critical_use_ratio:   f64,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            exclude_types: vec!["squashfs".into(), "tmpfs".into(), "devtmpfs".into()],
            ignore_mounts: vec!["/boot/efi".into(), "/sys/firmware/efi/efivars".into()],
        }
    }
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self { critical_avail_bytes: 10_000_000, critical_use_ratio: 0.95 }
    }
}

impl SourceConfig {
    pub fn is_ignored_mount(&self, mount: &str) -> bool {
        self.ignore_mounts.iter().any(|m| m == mount)
    }
}
