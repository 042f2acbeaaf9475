//! Time formatting for display.

/// Format seconds as MM:SS. Minutes are not capped at 59.
#[must_use]
pub fn format_mmss(secs: u32) -> String {
    let minutes = secs / 60;
    let seconds = secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format minutes as a human-readable string.
#[must_use]
pub fn format_minutes(total_minutes: u32) -> String {
    let plural = |n: u32| if n == 1 { "" } else { "s" };
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, m) => format!("{m} minute{}", plural(m)),
        (h, 0) => format!("{h} hour{}", plural(h)),
        (h, m) => format!("{h} hour{}, {m} minute{}", plural(h), plural(m)),
    }
}

/// Render a progress bar `width` cells wide, `fraction` of them filled.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
