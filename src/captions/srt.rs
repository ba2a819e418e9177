//! SubRip (`.srt`) reading and writing.

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

use super::normalize::normalize_lines;
use super::timestamp::{parse_timestamp, seconds_to_srt_time};
use super::Caption;
use crate::errors::SubtitleError;

// @const: Start of a record: index line followed by its timing line
static RECORD_START_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\d+\n\d+:\d+:\d+,\d+\s+-->\s+\d+:\d+:\d+,\d+\s*\n").unwrap()
});

static BLANK_LINES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Parse SRT text into captions.
///
/// Records with fewer than three lines are skipped, records whose text
/// normalizes to nothing are dropped, and a record with an unreadable
/// timing line fails the whole file.
pub fn parse_srt(content: &str, file: &str) -> Result<Vec<Caption>, SubtitleError> {
    let content = content.replace("\r\n", "\n");
    let content = BLANK_LINES_REGEX.replace_all(&content, "\n\n");
    let content = content.trim();

    let mut boundaries: Vec<usize> = RECORD_START_REGEX
        .find_iter(content)
        .map(|m| m.start())
        .collect();
    if boundaries.first() != Some(&0) {
        boundaries.insert(0, 0);
    }
    boundaries.push(content.len());

    let mut captions = Vec::new();

    for window in boundaries.windows(2) {
        let record = &content[window[0]..window[1]];
        if record.trim().is_empty() {
            continue;
        }

        let lines: Vec<&str> = record.split('\n').collect();
        if lines.len() < 3 {
            debug!("Skipping short subtitle record in {}: {:?}", file, record.trim());
            continue;
        }

        let (start, end) = parse_timing_line(lines[1]).ok_or_else(|| SubtitleError::ParseFailure {
            file: file.to_string(),
            record: record.trim().to_string(),
            reason: format!("invalid timing line '{}'", lines[1].trim()),
        })?;

        let text = normalize_lines(&lines[2..]);
        if text.is_empty() {
            continue;
        }

        captions.push(Caption::new(start, end, text));
    }

    Ok(captions)
}

/// Parse `start --> end`, tolerating trailing position hints after `end`
pub(crate) fn parse_timing_line(line: &str) -> Option<(f64, f64)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;

    let start = parse_timestamp(start)?;
    let mut end = parse_timestamp(end)?;

    if end < start {
        warn!("Caption ends before it starts ({} --> {}), clamping", start, end);
        end = start;
    }

    Some((start, end))
}

/// Serialize captions as a numbered SRT document
pub fn write_srt(captions: &[Caption]) -> String {
    let mut output = String::new();

    for (idx, caption) in captions.iter().enumerate() {
        // Writing into a String cannot fail
        let _ = writeln!(output, "{}", idx + 1);
        let _ = writeln!(
            output,
            "{} --> {}",
            seconds_to_srt_time(caption.start),
            seconds_to_srt_time(caption.end)
        );
        let _ = writeln!(output, "{}", caption.text);
        let _ = writeln!(output);
    }

    output
}
