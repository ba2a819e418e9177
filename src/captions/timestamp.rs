//! Caption timestamp parsing and formatting.

/// Split seconds into (hours, minutes, seconds, milliseconds), rounding to
/// the nearest millisecond. Negative input clamps to zero.
fn time_parts(seconds: f64) -> (u64, u64, u64, u64) {
    let total_ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1000.0).round() as u64
    } else {
        0
    };

    (
        total_ms / 3_600_000,
        (total_ms % 3_600_000) / 60_000,
        (total_ms % 60_000) / 1_000,
        total_ms % 1_000,
    )
}

/// Parse `HH:MM:SS,mmm`, `HH:MM:SS.mmm` or `MM:SS.mmm` into seconds
pub fn parse_timestamp(timestamp: &str) -> Option<f64> {
    let timestamp = timestamp.trim();
    let split_at = timestamp.rfind([',', '.'])?;
    let (major, minor) = (&timestamp[..split_at], &timestamp[split_at + 1..]);

    if minor.is_empty() || !minor.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let millis: u64 = minor.parse().ok()?;

    let fields: Vec<u64> = major
        .split(':')
        .map(|part| part.trim().parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => (0, *m, *s),
        _ => return None,
    };

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;

    Some(total as f64 + millis as f64 / 1000.0)
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`)
pub fn seconds_to_srt_time(seconds: f64) -> String {
    let (h, m, s, ms) = time_parts(seconds);
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}

/// Format seconds as a display timestamp (`HH:MM:SS.mmm`)
pub fn seconds_to_timestamp(seconds: f64) -> String {
    let (h, m, s, ms) = time_parts(seconds);
    format!("{:02}:{:02}:{:02}.{:03}", h, m, s, ms)
}

/// Display timestamp safe for use in file names (`HH.MM.SS.mmm`)
pub fn seconds_to_filename(seconds: f64) -> String {
    seconds_to_timestamp(seconds).replace(':', ".")
}
