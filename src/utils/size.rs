//! Human-readable file sizes
//!
//! The host reports sizes in megabytes; values of 1000 MB and above are
//! shown in gigabytes using decimal units.

/// Format a size given in MB as `"xxx.xx MB"` or `"x.xx GB"`
pub fn human_readable_size(size_mb: f64) -> String {
    if size_mb >= 1000.0 {
        format!("{:.2} GB", size_mb / 1000.0)
    } else {
        format!("{:.2} MB", size_mb)
    }
}

/// New size as a percentage of the original size
pub fn size_ratio(new_size: f64, original_size: f64) -> f64 {
    new_size / original_size * 100.0
}
