//! WebVTT (`.vtt`) reading.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::normalize_lines;
use super::srt::parse_timing_line;
use super::Caption;
use crate::errors::SubtitleError;

static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Parse WebVTT text into captions.
///
/// The header and NOTE/STYLE/REGION blocks are skipped, as are blocks
/// without a timing line. A timing line that cannot be read fails the file.
pub fn parse_vtt(content: &str, file: &str) -> Result<Vec<Caption>, SubtitleError> {
    let content = content.replace("\r\n", "\n");
    let mut captions = Vec::new();

    for block in BLOCK_SEPARATOR_REGEX.split(content.trim()) {
        let lines: Vec<&str> = block.lines().collect();
        let Some(first) = lines.first() else {
            continue;
        };

        let first = first.trim_start();
        if first.starts_with("WEBVTT")
            || first.starts_with("NOTE")
            || first.starts_with("STYLE")
            || first.starts_with("REGION")
        {
            continue;
        }

        // The timing line is either first or follows a cue identifier
        let Some(timing_idx) = lines.iter().take(2).position(|line| line.contains("-->")) else {
            debug!("Skipping WebVTT block without timing in {}: {:?}", file, block);
            continue;
        };

        let (start, end) = parse_timing_line(lines[timing_idx]).ok_or_else(|| {
            SubtitleError::ParseFailure {
                file: file.to_string(),
                record: block.trim().to_string(),
                reason: format!("invalid cue timing '{}'", lines[timing_idx].trim()),
            }
        })?;

        let text = normalize_lines(&lines[timing_idx + 1..]);
        if text.is_empty() {
            continue;
        }

        captions.push(Caption::new(start, end, text));
    }

    Ok(captions)
}
