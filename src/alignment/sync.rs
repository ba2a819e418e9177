/*!
 * Cross-track synchronization.
 *
 * Pass 1 attaches every native caption to the first sentence it overlaps
 * by more than the configured share of its own duration. Pass 2 removes
 * sentences left without a translation by folding them into a neighbor,
 * so that every remaining sentence carries some native text.
 */

use log::debug;

use crate::app_config::AlignmentConfig;
use crate::captions::Caption;

/// Sentences and their native annotations, index-aligned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedTracks {
    pub sentences: Vec<Caption>,
    pub annotations: Vec<Caption>,
}

impl AlignedTracks {
    /// Equal lengths and no empty annotation unless a single sentence remains
    pub fn is_repaired(&self) -> bool {
        self.sentences.len() == self.annotations.len()
            && (self.sentences.len() <= 1 || self.annotations.iter().all(|a| !a.text.is_empty()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MergeDirection {
    /// Fold into the previous sentence
    Backward,
    /// Fold into the next sentence
    Forward,
}

/// Aligns a native track onto reconstructed target sentences
#[derive(Debug, Clone)]
pub struct Synchronizer {
    overlap_ratio: f64,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new(&AlignmentConfig::default())
    }
}

impl Synchronizer {
    pub fn new(config: &AlignmentConfig) -> Self {
        Synchronizer {
            overlap_ratio: config.overlap_ratio,
        }
    }

    /// Run both passes and return the repaired pair
    pub fn synchronize(&self, sentences: Vec<Caption>, native: &[Caption]) -> AlignedTracks {
        let annotations = self.match_overlaps(&sentences, native);
        let mut tracks = AlignedTracks { sentences, annotations };
        let merges = repair_gaps(&mut tracks);

        debug!(
            "Synchronized {} native captions onto {} sentences ({} gap merges)",
            native.len(),
            tracks.sentences.len(),
            merges
        );

        tracks
    }

    /// Pass 1: one annotation per sentence, built from the native captions
    /// whose first sufficiently-overlapping sentence it is
    pub fn match_overlaps(&self, sentences: &[Caption], native: &[Caption]) -> Vec<Caption> {
        let mut buckets: Vec<Vec<&Caption>> = vec![Vec::new(); sentences.len()];

        for caption in native {
            let duration = caption.duration();
            if duration <= 0.0 {
                debug!("Skipping zero-length native caption at {}: {:?}", caption.start, caption.text);
                continue;
            }

            let matched = sentences.iter().position(|sentence| {
                sentence.overlaps(caption.start, caption.end)
                    && sentence.overlap_with(caption.start, caption.end) / duration > self.overlap_ratio
            });

            if let Some(idx) = matched {
                buckets[idx].push(caption);
            }
        }

        buckets
            .into_iter()
            .zip(sentences)
            .map(|(bucket, sentence)| collapse_bucket(&bucket, sentence))
            .collect()
    }
}

fn collapse_bucket(bucket: &[&Caption], sentence: &Caption) -> Caption {
    if bucket.is_empty() {
        return Caption::new(sentence.start, sentence.end, "");
    }

    let start = bucket.iter().map(|c| c.start).fold(f64::INFINITY, f64::min);
    let end = bucket.iter().map(|c| c.end).fold(f64::NEG_INFINITY, f64::max);
    let text = bucket
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Caption::new(start, end, text)
}

/// Pass 2: fold every sentence with an empty annotation into a neighbor.
///
/// The index is not advanced after a deletion, so the element that slid
/// into the current slot is examined next. Returns the number of merges.
pub fn repair_gaps(tracks: &mut AlignedTracks) -> usize {
    let AlignedTracks { sentences, annotations } = tracks;
    let mut merges = 0;
    let mut idx = 0;

    while idx < sentences.len() && sentences.len() > 1 {
        if !annotations[idx].text.is_empty() {
            idx += 1;
            continue;
        }

        let direction = merge_direction(sentences, annotations, idx);
        let removed = sentences.remove(idx);
        annotations.remove(idx);

        match direction {
            MergeDirection::Backward => {
                let prev = &mut sentences[idx - 1];
                prev.end = removed.end;
                prev.text = join_text(&prev.text, &removed.text);
            }
            MergeDirection::Forward => {
                let next = &mut sentences[idx];
                next.start = removed.start;
                next.text = join_text(&removed.text, &next.text);
            }
        }

        debug!("Merged untranslated sentence {} {:?}", idx, direction);
        merges += 1;
    }

    merges
}

fn merge_direction(sentences: &[Caption], annotations: &[Caption], idx: usize) -> MergeDirection {
    let last = sentences.len() - 1;
    let sentence = &sentences[idx];

    let prev_end = if idx > 0 { annotations[idx - 1].end } else { 0.0 };
    let next_start = if idx < last { annotations[idx + 1].start } else { 0.0 };

    if idx == last {
        MergeDirection::Backward
    } else if sentence.end <= next_start && idx > 0 {
        MergeDirection::Backward
    } else if sentence.start >= next_start || sentence.start >= prev_end {
        MergeDirection::Forward
    } else if prev_end - sentence.start > sentence.end - next_start && idx > 0 {
        MergeDirection::Backward
    } else {
        MergeDirection::Forward
    }
}

fn join_text(first: &str, second: &str) -> String {
    format!("{} {}", first, second)
}
