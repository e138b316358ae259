use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Number of slots in a percentage bar. Each slot is five percentage points.
pub const BAR_SLOTS: usize = 20;

const SIZE_UNITS: [&str; 6] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// `[##########----------] 50.0%`. NaN and anything at or below zero render
/// as an empty bar.
pub fn percentage_bar(fraction: f64) -> String {
    let percent = fraction * 100.0;
    let (filled, percent) = if percent.is_nan() || percent <= 0.0 {
        (0, 0.0)
    } else if percent >= 100.0 {
        (BAR_SLOTS, 100.0)
    } else {
        let slots = (percent / 5.0).round() as usize;
        (slots.min(BAR_SLOTS), percent)
    };

    format!(
        "[{}{}] {percent:.1}%",
        "#".repeat(filled),
        "-".repeat(BAR_SLOTS - filled)
    )
}

/// Formats a byte count in binary units, starting at KiB.
pub fn human_readable_size(bytes: u64, decimals: usize) -> String {
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.decimals$} {}", SIZE_UNITS[unit])
}

/// `HH:MM:SS`, prefixed with `1 day, ` or `N days, ` once past a day.
pub fn format_uptime(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let days = total / 86_400;
    let hours = (total / 3_600) % 24;
    let minutes = (total / 60) % 60;
    let secs = total % 60;

    match days {
        0 => format!("{hours:02}:{minutes:02}:{secs:02}"),
        1 => format!("1 day, {hours:02}:{minutes:02}:{secs:02}"),
        n => format!("{n} days, {hours:02}:{minutes:02}:{secs:02}"),
    }
}
