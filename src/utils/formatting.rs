//! Formatting utilities used for CLI and export outputs.

use unicode_width::UnicodeWidthStr;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Left-aligns `s` in a column of `width` terminal cells.
pub fn pad_right(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{s}{}", " ".repeat(width - w))
}

pub fn pad_left(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        return s.to_string();
    }
    format!("{}{s}", " ".repeat(width - w))
}

/// Worked seconds as `HH:MM` (short) or `HHh MMm`.
/// Hours are not wrapped at 24, so yearly totals stay readable.
pub fn secs2readable(secs: i64, short: bool) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let total_minutes = secs.abs() / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if short {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    } else {
        format!("{}{:02}h {:02}m", sign, hours, minutes)
    }
}
