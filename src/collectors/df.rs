use crate::collectors::RecordSource;
use crate::config::SourceConfig;
use crate::error::RecordSourceError;
use crate::models::disk::DiskRecord;
use std::process::Command;
use tracing::debug;

/// Column count of `df -T` output; the mount point may span several
/// whitespace-separated fields after these.
const DF_FIELDS: usize = 7;

/// Reads capacity figures by running `df -T -k`.
pub struct DfSource {
    config: SourceConfig,
}

impl DfSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// The `df` invocation. The C locale keeps the header and number
    /// formats independent of the user's language.
    fn command(&self) -> Command {
        let mut cmd = Command::new("df");
        cmd.args(self.args()).env("LC_ALL", "C");
        cmd
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec!["-T".to_string(), "-k".to_string()];
        for t in &self.config.exclude_types {
            args.push("-x".into());
            args.push(t.clone());
        }
        args
    }
}

impl RecordSource for DfSource {
    fn query(&mut self) -> Result<Vec<DiskRecord>, RecordSourceError> {
        let args    = self.args();
        let command = format!("df {}", args.join(" "));

        let out = self
            .command()
            .output()
            .map_err(|source| RecordSourceError::Spawn { command: command.clone(), source })?;

        if !out.status.success() {
            return Err(RecordSourceError::Failed {
                command,
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(out.stdout)
            .map_err(|_| RecordSourceError::Encoding { command })?;
        let records = parse_df(&text, &self.config)?;
        debug!(count = records.len(), "df poll complete");
        Ok(records)
    }
}

/// Parse `df -T -k` output into records, in source order.
///
/// The first non-empty line is the header and is skipped whatever its
/// wording. Ignored mounts and zero-capacity filesystems
/// are dropped, and block counts are converted from KiB to bytes. Any row
/// that does not parse fails the whole table.
pub fn parse_df(text: &str, config: &SourceConfig) -> Result<Vec<DiskRecord>, RecordSourceError> {
    let mut out = Vec::new();
    let mut header_seen = false;

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() { continue; }
        if !header_seen {
            header_seen = true;
            continue;
        }
        if fields.len() < DF_FIELDS {
            return Err(RecordSourceError::Malformed {
                line:   lineno,
                reason: format!("expected {} columns, found {}", DF_FIELDS, fields.len()),
            });
        }

        let root_mount = fields[DF_FIELDS - 1..].join(" ");
        if config.is_ignored_mount(&root_mount) { continue; }

        let size  = kib_field(fields[2], "1K-blocks", lineno)?;
        let used  = kib_field(fields[3], "Used", lineno)?;
        let avail = kib_field(fields[4], "Available", lineno)?;
        let used_pct = parse_pct(fields[5]).ok_or_else(|| RecordSourceError::Malformed {
            line:   lineno,
            reason: format!("bad Use% value {:?}", fields[5]),
        })?;

        if size == 0 {
            debug!(mount = %root_mount, "skipping zero-capacity filesystem");
            continue;
        }

        let rec = DiskRecord {
            device_path: fields[0].to_string(),
            fstype:      fields[1].to_string(),
            size,
            used:        used.min(size),
            avail,
            used_pct,
            root_mount,
        };
        debug!(mount = %rec.root_mount, fstype = %rec.fstype, used_pct = rec.used_pct, "filesystem");
        out.push(rec);
    }
    Ok(out)
}

fn kib_field(s: &str, column: &str, line: usize) -> Result<u64, RecordSourceError> {
    s.parse::<u64>()
        .ok()
        .and_then(|k| k.checked_mul(1024))
        .ok_or_else(|| RecordSourceError::Malformed {
            line,
            reason: format!("bad {} value {:?}", column, s),
        })
}

/// "42%" → 42. df prints "-" for filesystems without a meaningful ratio.
fn parse_pct(s: &str) -> Option<u8> {
    if s == "-" { return Some(0); }
    let v: u8 = s.strip_suffix('%')?.parse().ok()?;
    (v <= 100).then_some(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Filesystem     Type  1K-blocks      Used Available Use% Mounted on
/dev/nvme0n1p2 ext4  490617784 301234560 164363992  65% /
/dev/nvme0n1p1 vfat     523248      6220    517028   2% /boot/efi
/dev/sdb1      exfat 976744448 976000000    744448 100% /media/me/My Passport
server:/export nfs4  104857600  10485760  94371840  10% /mnt/nfs
";

    #[test]
    fn parses_rows_and_skips_header() {
        let recs = parse_df(SAMPLE, &SourceConfig::default()).unwrap();
        assert_eq!(recs.len(), 3);

        let root = &recs[0];
        assert_eq!(root.device_path, "/dev/nvme0n1p2");
        assert_eq!(root.fstype, "ext4");
        assert_eq!(root.size, 490_617_784 * 1024);
        assert_eq!(root.used, 301_234_560 * 1024);
        assert_eq!(root.avail, 164_363_992 * 1024);
        assert_eq!(root.used_pct, 65);
        assert_eq!(root.root_mount, "/");
    }

    #[test]
    fn keeps_spaces_in_mount_points() {
        let recs = parse_df(SAMPLE, &SourceConfig::default()).unwrap();
        assert_eq!(recs[1].root_mount, "/media/me/My Passport");
        assert_eq!(recs[1].used_pct, 100);
    }

    #[test]
    fn drops_ignored_mounts() {
        let recs = parse_df(SAMPLE, &SourceConfig::default()).unwrap();
        assert!(recs.iter().all(|r| r.root_mount != "/boot/efi"));

        let cfg = SourceConfig { exclude_types: Vec::new(), ignore_mounts: Vec::new() };
        assert_eq!(parse_df(SAMPLE, &cfg).unwrap().len(), 4);
    }

    #[test]
    fn drops_zero_capacity_rows() {
        let text = "Filesystem Type 1K-blocks Used Available Use% Mounted on\n\
                    proc       proc         0    0         0    - /proc\n";
        assert!(parse_df(text, &SourceConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_numbers() {
        let text = "Filesystem Type 1K-blocks Used Available Use% Mounted on\n\
                    /dev/sda1 ext4 lots 10 10 5% /data\n";
        match parse_df(text, &SourceConfig::default()) {
            Err(RecordSourceError::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn rejects_short_rows() {
        let text = "Filesystem Type 1K-blocks Used Available Use% Mounted on\n\
                    /dev/sda1 ext4 100 10\n";
        assert!(matches!(
            parse_df(text, &SourceConfig::default()),
            Err(RecordSourceError::Malformed { .. })
        ));
    }

    #[test]
    fn header_skipped_in_any_language() {
        let german = "Dateisystem    Typ  1K-Blöcke   Benutzt Verfügbar Verw% Eingehängt auf\n\
                      /dev/sda1      ext4  10485760   5242880   5242880   50% /\n";
        let french = "\nSys. de fichiers Type blocs de 1K Utilisé Disponible Uti% Monté sur\n\
                      /dev/sda1      ext4  10485760   5242880   5242880   50% /\n";
        for text in [german, french] {
            let recs = parse_df(text, &SourceConfig::default()).unwrap();
            assert_eq!(recs.len(), 1);
            assert_eq!(recs[0].root_mount, "/");
            assert_eq!(recs[0].size, 10_485_760 * 1024);
        }
    }

    #[test]
    fn df_runs_in_c_locale() {
        let cmd = DfSource::new(SourceConfig::default()).command();
        assert_eq!(cmd.get_program().to_str(), Some("df"));
        let lc_all = cmd
            .get_envs()
            .find(|(k, _)| k.to_str() == Some("LC_ALL"))
            .and_then(|(_, v)| v)
            .and_then(|v| v.to_str());
        assert_eq!(lc_all, Some("C"));
    }

    #[test]
    fn pct_parsing() {
        assert_eq!(parse_pct("0%"), Some(0));
        assert_eq!(parse_pct("-"), Some(0));
        assert_eq!(parse_pct("101%"), None);
        assert_eq!(parse_pct("12"), None);
    }

    #[test]
    fn df_args_exclude_pseudo_filesystems() {
        let src = DfSource::new(SourceConfig::default());
        let args = src.args();
        assert_eq!(&args[..2], &["-T", "-k"]);
        assert!(args.windows(2).any(|w| w[0] == "-x" && w[1] == "tmpfs"));
    }
}
