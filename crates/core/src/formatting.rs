//! Small text helpers shared by the preview builder and the submission parser.

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// Format a byte count for humans: `512 B`, `1.5 KB`, `2 MB`.
///
/// One decimal place is kept above the byte range, and a trailing `.0` is
/// dropped so round sizes read naturally.
pub fn format_file_size(bytes: u64) -> String {
    let size = bytes as f64;
    if size < KIB {
        return format!("{bytes} B");
    }
    let (value, unit) = if size < MIB {
        (size / KIB, "KB")
    } else {
        (size / MIB, "MB")
    };
    let rounded = format!("{value:.1}");
    let trimmed = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{trimmed} {unit}")
}

/// Split a comma-joined field into an ordered list.
///
/// Absent or blank input yields an empty list. Entries are trimmed and empty
/// entries (e.g. from `"a,,b"`) are dropped.
pub fn maybe_string_to_array(value: Option<&str>) -> Vec<String> {
    match value {
        Some(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
