use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a byte count as a short size string ("4.7G", "512K").
///
/// Buckets follow df's 1K-block scale: the thresholds apply to the KiB
/// count and the result never exceeds 6 characters below 100000T.
pub fn fmt_size(bytes: u64) -> String {
    const K: f64 = 1_024.0;
    let kib = bytes / 1024;
    let k   = kib as f64;
    if kib < 1_000                { format!("{}K", kib) }
    else if kib < 1_000_000       { format!("{:.1}M", k / K) }
    else if kib < 1_000_000_000   { format!("{:.1}G", k / (K * K)) }
    else {
        let t = k / (K * K * K);
        if t < 999.95 { format!("{:.1}T", t) } else { format!("{:.0}T", t) }
    }
}

/// Format a 0–1 ratio as a percentage with one decimal: "25.0%"
pub fn fmt_pct(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Shorten `s` to at most `width` terminal columns, keeping the tail and
/// marking the cut with a leading ellipsis ("…/very/long/mount").
///
/// A double-width character that would straddle the limit is dropped, so
/// the result can be one column short; callers pad it.
pub fn fit_tail(s: &str, width: usize) -> String {
    if s.width() <= width { return s.to_string(); }
    if width == 0         { return String::new(); }

    let mut used = 1; // the ellipsis
    let mut keep = Vec::new();
    for c in s.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width { break; }
        used += w;
        keep.push(c);
    }
    std::iter::once('…').chain(keep.into_iter().rev()).collect()
}
