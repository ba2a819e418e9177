/*!
 * Caption decoding.
 *
 * This module turns raw subtitle file bytes into an ordered list of
 * [`Caption`] records:
 * - Byte-order mark removal and encoding detection (`decoder`)
 * - One parser per container format, picked by extension (`srt`, `vtt`)
 * - Text cleanup shared by every format (`normalize`)
 * - Timestamp parsing and formatting (`timestamp`)
 */

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod decoder;
pub mod normalize;
pub mod srt;
pub mod timestamp;
pub mod vtt;

pub use decoder::{CaptionDecoder, DecodedTrack, SubtitleFormat};

/// One timed text unit, times in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// An ordered caption sequence; insertion order is chronological order
pub type Track = Vec<Caption>;

impl Caption {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Caption {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Inclusive containment check
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    /// Strict interval overlap with `[start, end]`
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        self.start < end && self.end > start
    }

    /// Length of the intersection with `[start, end]`, zero when disjoint
    pub fn overlap_with(&self, start: f64, end: f64) -> f64 {
        (self.end.min(end) - self.start.max(start)).max(0.0)
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{} - {}] {}",
            timestamp::seconds_to_timestamp(self.start),
            timestamp::seconds_to_timestamp(self.end),
            self.text
        )
    }
}
