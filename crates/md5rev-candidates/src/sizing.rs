//! Keyspace sizing and time estimates for planning output

/// Total number of candidates for every length in `min_length..=max_length`.
///
/// Returned as `f64` so that ranges far beyond `u128` still print sensibly.
pub fn range_size(alphabet_len: usize, prefix_len: usize, min_length: usize, max_length: usize) -> f64 {
    (min_length..=max_length)
        .filter(|&length| length > prefix_len)
        .map(|length| (alphabet_len as f64).powi((length - prefix_len) as i32))
        .sum()
}

/// Estimated seconds to scan `count` candidates at `per_second`
pub fn estimate_seconds(count: f64, per_second: f64) -> f64 {
    if per_second > 0.0 {
        count / per_second
    } else {
        f64::INFINITY
    }
}

/// Format a candidate count as human-readable string
pub fn format_count(count: f64) -> String {
    if count >= 1e15 {
        format!("{:.2}P", count / 1e15)
    } else if count >= 1e12 {
        format!("{:.2}T", count / 1e12)
    } else if count >= 1e9 {
        format!("{:.2}G", count / 1e9)
    } else if count >= 1e6 {
        format!("{:.2}M", count / 1e6)
    } else if count >= 1e3 {
        format!("{:.2}K", count / 1e3)
    } else {
        format!("{:.0}", count)
    }
}

/// Format duration in human-readable format
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() {
        "never".to_string()
    } else if seconds <= 0.0 {
        "now".to_string()
    } else if seconds < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else if seconds < 3600.0 {
        format!("{:.1}m", seconds / 60.0)
    } else if seconds < 86400.0 {
        format!("{:.1}h", seconds / 3600.0)
    } else if seconds < 86400.0 * 365.0 {
        format!("{:.1}d", seconds / 86400.0)
    } else {
        format!("{:.1}y", seconds / (86400.0 * 365.0))
    }
}
