//! Utility functions for human-readable sizes and durations

/// Unit names for [`format_file_size`], in powers of 1024
const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count with binary units
///
/// The value is divided by 1024 until it fits the unit, rounded to two
/// decimals, and printed without trailing zeros. Zero is `"0 Byte"`.
///
/// # Examples
///
/// ```
/// use clipgrab_api::utils::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Byte");
/// assert_eq!(format_file_size(512), "512 Bytes");
/// assert_eq!(format_file_size(1_048_576), "1 MB");
/// assert_eq!(format_file_size(1_572_864), "1.5 MB");
/// ```
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Byte".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Format a duration in seconds as `H:MM:SS` or `M:SS`
///
/// The hour component is omitted entirely below one hour. Zero means the
/// duration is not known.
///
/// # Examples
///
/// ```
/// use clipgrab_api::utils::format_duration;
///
/// assert_eq!(format_duration(0), "Unknown");
/// assert_eq!(format_duration(65), "1:05");
/// assert_eq!(format_duration(3661), "1:01:01");
/// ```
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return "Unknown".to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
