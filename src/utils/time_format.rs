//! Conversion between second counts and `HH:MM:SS` strings

/// Format a whole-second count as zero-padded `HH:MM:SS`.
///
/// Hours are not wrapped, so values past 99 hours grow to three or more digits.
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Parse an `HH:MM:SS` time limit into seconds.
///
/// Parsing is lenient: every field that is missing or not a number counts as 0,
/// so a malformed limit degrades to a shorter (possibly zero) countdown.
pub fn parse_time_limit(value: &str) -> u64 {
    let mut fields = value.split(':').map(parse_field);

    let hours = fields.next().unwrap_or(0);
    let minutes = fields.next().unwrap_or(0);
    let seconds = fields.next().unwrap_or(0);

    hours
        .saturating_mul(3600)
        .saturating_add(minutes.saturating_mul(60))
        .saturating_add(seconds)
}

fn parse_field(field: &str) -> u64 {
    field.trim().parse().unwrap_or(0)
}
