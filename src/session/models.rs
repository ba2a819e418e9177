/*!
 * Value types returned by session queries.
 */

use serde::{Deserialize, Serialize};

use crate::captions::Caption;

/// A read-only snapshot of one sentence or annotation.
///
/// Queries that cannot be answered (index out of range, translation
/// requested but absent) return the empty sentinel: no times, empty text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryLine {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub text: String,
}

impl QueryLine {
    /// The "no result" sentinel
    pub fn empty() -> Self {
        Self::default()
    }

    /// A span with no usable text
    pub fn span_only(caption: &Caption) -> Self {
        QueryLine {
            start: Some(caption.start),
            end: Some(caption.end),
            text: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.text.is_empty()
    }
}

impl From<&Caption> for QueryLine {
    fn from(caption: &Caption) -> Self {
        QueryLine {
            start: Some(caption.start),
            end: Some(caption.end),
            text: caption.text.clone(),
        }
    }
}

/// Which adjacent sentence to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Outcome of building a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Success,
    /// A subtitle file could not be parsed; its track is empty and no
    /// alignment was attempted
    Error(String),
}

impl SessionStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Query tuning taken from the configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuerySettings {
    /// Neighbors further than this (seconds) are not returned as context
    pub neighbor_max_gap: f64,
    /// Largest silence (seconds) joining sentences into one phrase
    pub gap_between_phrases: f64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        QuerySettings {
            neighbor_max_gap: 5.0,
            gap_between_phrases: 1.25,
        }
    }
}
