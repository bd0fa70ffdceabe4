//! Shared rendering utilities.

/// Width of the rendered layout in columns.
pub const LAYOUT_COLS: usize = 64;

/// Pads `text` on both sides so it sits centered in `cols` columns.
///
/// Text wider than `cols` is returned unchanged. Odd leftovers go to the
/// right side.
#[must_use]
pub fn center(text: &str, cols: usize) -> String {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;
    format!("{}{text}", " ".repeat(padding))
}

/// Formats a byte count for humans, e.g. `"1.5 KiB"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn human_size(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}

/// Splits a bar of `total` cells into filled and empty strings.
#[must_use]
pub fn indicator_bar(filled: usize, total: usize) -> (String, String) {
    let filled = filled.min(total);
    ("█".repeat(filled), "░".repeat(total - filled))
}

/// A horizontal rule spanning `cols` columns.
#[must_use]
pub fn rule(cols: usize) -> String {
    "─".repeat(cols)
}
