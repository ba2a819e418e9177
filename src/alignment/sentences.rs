/*!
 * Sentence reconstruction for the target track.
 *
 * Subtitle authors split sentences across several short captions. A single
 * greedy left-to-right pass glues a caption onto the previous output unit
 * when the two are close in time, the result stays short, and punctuation
 * says the previous unit has not finished its sentence. Decisions are never
 * revisited.
 *
 * The punctuation and casing heuristics are calibrated for one language
 * only; callers gate this pass on the configured sentence language.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::AlignmentConfig;
use crate::captions::Caption;

/// First characters that open an independent line or a new speaker
const LINE_OPENERS: &[char] = &['"', '\'', '(', '[', '-', '\u{201C}', '\u{266A}'];

/// Last characters that close a sentence
const SENTENCE_CLOSERS: &[char] = &['.', '!', '?', ')', ']', '"', '\u{201D}'];

const ELLIPSIS: &str = "...";

static PRONOUN_I_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^I\b").unwrap());

/// Greedy caption-to-sentence merger
#[derive(Debug, Clone)]
pub struct SentenceReconstructor {
    merge_gap: f64,
    max_duration: f64,
}

impl Default for SentenceReconstructor {
    fn default() -> Self {
        Self::new(&AlignmentConfig::default())
    }
}

impl SentenceReconstructor {
    pub fn new(config: &AlignmentConfig) -> Self {
        SentenceReconstructor {
            merge_gap: config.merge_gap,
            max_duration: config.max_sentence_duration,
        }
    }

    /// Merge caption fragments into sentence-level units
    pub fn reconstruct(&self, captions: Vec<Caption>) -> Vec<Caption> {
        let input_len = captions.len();
        let mut sentences: Vec<Caption> = Vec::with_capacity(input_len);

        for caption in captions {
            if let Some(prev) = sentences.last_mut() {
                if self.should_merge(prev, &caption) {
                    prev.end = caption.end;
                    prev.text.push(' ');
                    prev.text.push_str(&caption.text);
                    continue;
                }
            }
            sentences.push(caption);
        }

        debug!("Reconstructed {} captions into {} sentences", input_len, sentences.len());
        sentences
    }

    fn should_merge(&self, prev: &Caption, next: &Caption) -> bool {
        next.start - prev.end <= self.merge_gap
            && next.end - prev.start < self.max_duration
            && !opens_new_line(&next.text)
            && (!closes_sentence(&prev.text) || cut_at_ellipsis(&prev.text, &next.text))
    }
}

fn opens_new_line(text: &str) -> bool {
    text.chars().next().is_some_and(|c| LINE_OPENERS.contains(&c))
}

fn closes_sentence(text: &str) -> bool {
    text.chars().next_back().is_some_and(|c| SENTENCE_CLOSERS.contains(&c))
}

/// A sentence interrupted by an ellipsis and picked up by the next caption
fn cut_at_ellipsis(prev: &str, next: &str) -> bool {
    prev.ends_with(ELLIPSIS)
        && (next.starts_with(ELLIPSIS)
            || next.chars().next().is_some_and(char::is_lowercase)
            || PRONOUN_I_REGEX.is_match(next))
}
