/*!
 * Time-indexed queries over one opened media session.
 *
 * Methods taking a time expect a playback position; `sub_delay` is
 * subtracted before comparing against subtitle times. Methods taking an
 * index return subtitle times unchanged.
 */

use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

use super::models::{Direction, QueryLine, QuerySettings, SessionStatus};
use crate::alignment::AlignedTracks;
use crate::captions::srt::write_srt;
use crate::captions::Caption;
use crate::file_utils::FileManager;

/// Separator used by [`Session::range_text`]
pub const LINE_BREAK: &str = "<br>";

/// The live (sentences, annotations, sub_delay) state for one media file
#[derive(Debug, Clone, Default)]
pub struct Session {
    sentences: Vec<Caption>,
    annotations: Vec<Caption>,
    sub_delay: f64,
    settings: QuerySettings,
    status: SessionStatus,
    warnings: Vec<String>,
}

impl Session {
    /// Annotations must be index-aligned with the sentences; a track of
    /// any other length is dropped and the session has no translations.
    pub fn new(tracks: AlignedTracks, settings: QuerySettings) -> Self {
        let AlignedTracks { sentences, mut annotations } = tracks;
        if !annotations.is_empty() && annotations.len() != sentences.len() {
            warn!(
                "Dropping {} annotations not aligned with {} sentences",
                annotations.len(),
                sentences.len()
            );
            annotations.clear();
        }

        Session {
            sentences,
            annotations,
            settings,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn sentences(&self) -> &[Caption] {
        &self.sentences
    }

    pub fn annotations(&self) -> &[Caption] {
        &self.annotations
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Non-fatal problems met while loading (e.g. encoding fallback)
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn has_translations(&self) -> bool {
        !self.annotations.is_empty()
    }

    pub fn sub_delay(&self) -> f64 {
        self.sub_delay
    }

    pub fn set_sub_delay(&mut self, sub_delay: f64) {
        self.sub_delay = sub_delay;
    }

    /// Convert a playback position to subtitle time
    pub fn to_subtitle_time(&self, playback_time: f64) -> f64 {
        playback_time - self.sub_delay
    }

    /// Convert a subtitle time to a playback position
    pub fn to_playback_time(&self, subtitle_time: f64) -> f64 {
        subtitle_time + self.sub_delay
    }

    fn lines(&self, want_translation: bool) -> &[Caption] {
        if want_translation {
            &self.annotations
        } else {
            &self.sentences
        }
    }

    /// Index of the first sentence whose span contains the playback position
    pub fn locate(&self, time_pos: f64) -> Option<usize> {
        let time = self.to_subtitle_time(time_pos);
        self.sentences.iter().position(|sentence| sentence.contains(time))
    }

    /// Sentence or annotation at `index`, or the empty sentinel
    pub fn get(&self, index: usize, want_translation: bool) -> QueryLine {
        if index >= self.sentences.len() || (want_translation && !self.has_translations()) {
            return QueryLine::empty();
        }

        QueryLine::from(&self.lines(want_translation)[index])
    }

    /// The sentence (or annotation) next to `index`.
    ///
    /// At a track boundary the boundary sentence's span comes back with
    /// empty text; when the neighbor is more than `neighbor_max_gap` away
    /// the current sentence's span comes back with empty text.
    pub fn neighbor(&self, index: usize, direction: Direction, want_translation: bool) -> QueryLine {
        let (Some(first), Some(last)) = (self.sentences.first(), self.sentences.last()) else {
            return QueryLine::empty();
        };
        if index >= self.sentences.len() {
            return QueryLine::empty();
        }

        let missing_translation = want_translation && !self.has_translations();
        let current = &self.sentences[index];

        let neighbor_idx = match direction {
            Direction::Previous => {
                if index == 0 || missing_translation {
                    return QueryLine::span_only(first);
                }
                let prev = &self.sentences[index - 1];
                if current.start - prev.end > self.settings.neighbor_max_gap {
                    return QueryLine::span_only(current);
                }
                index - 1
            }
            Direction::Next => {
                if index + 1 >= self.sentences.len() || missing_translation {
                    return QueryLine::span_only(last);
                }
                let next = &self.sentences[index + 1];
                if next.start - current.end > self.settings.neighbor_max_gap {
                    return QueryLine::span_only(current);
                }
                index + 1
            }
        };

        QueryLine::from(&self.lines(want_translation)[neighbor_idx])
    }

    /// The sentence at `index` grown over neighbors separated by at most
    /// `gap_between_phrases` seconds, first backward then forward
    pub fn phrase(&self, index: usize, want_translation: bool) -> QueryLine {
        let anchor = self.get(index, want_translation);
        let (Some(mut start), Some(mut end)) = (anchor.start, anchor.end) else {
            return anchor;
        };
        let mut text = anchor.text;
        let lines = self.lines(want_translation);
        let max_gap = self.settings.gap_between_phrases;

        for line in lines[..index].iter().rev() {
            if start - line.end > max_gap {
                break;
            }
            start = line.start;
            text = format!("{} {}", line.text, text);
        }

        for line in &lines[index + 1..] {
            if line.start - end > max_gap {
                break;
            }
            end = line.end;
            text.push(' ');
            text.push_str(&line.text);
        }

        QueryLine {
            start: Some(start),
            end: Some(end),
            text,
        }
    }

    /// Every sentence (or annotation) overlapping the padded clip window,
    /// re-based to clip-relative time.
    ///
    /// Clip bounds are playback positions. The window is
    /// `[clip_start + pad_start, clip_end - pad_end]`.
    pub fn filter(
        &self,
        clip_start: f64,
        clip_end: f64,
        pad_start: f64,
        pad_end: f64,
        want_translation: bool,
    ) -> Vec<Caption> {
        let origin = self.to_subtitle_time(clip_start);
        let clip_end = self.to_subtitle_time(clip_end);
        let window_start = origin + pad_start;
        let window_end = clip_end - pad_end;
        // Repair merges only widen spans, so sentence starts stay sorted.
        // Annotation starts carry no such guarantee and are scanned fully.
        let sorted = !want_translation;

        let mut filtered = Vec::new();
        for line in self.lines(want_translation) {
            if line.end > window_start && line.start < window_end {
                filtered.push(Caption::new(
                    line.start - origin,
                    line.end - origin,
                    line.text.clone(),
                ));
            }

            if sorted && line.start > clip_end {
                break;
            }
        }

        debug!("Filtered {} lines for clip starting at {:.3}", filtered.len(), clip_start);
        filtered
    }

    /// Texts of every sentence (or annotation) overlapping `[start, end]`,
    /// joined with [`LINE_BREAK`]
    pub fn range_text(&self, start: f64, end: f64, want_translation: bool) -> String {
        self.filter(start, end, 0.0, 0.0, want_translation)
            .into_iter()
            .map(|caption| caption.text)
            .collect::<Vec<_>>()
            .join(LINE_BREAK)
    }

    /// The filtered window serialized as an SRT document.
    ///
    /// Lines starting before `clip_start` are written from `00:00:00,000`,
    /// so reading the document back only reproduces [`Session::filter`]
    /// for lines starting at or after the clip start.
    pub fn export_window(
        &self,
        clip_start: f64,
        clip_end: f64,
        pad_start: f64,
        pad_end: f64,
        want_translation: bool,
    ) -> String {
        write_srt(&self.filter(clip_start, clip_end, pad_start, pad_end, want_translation))
    }

    /// Write the exported window to `path` as UTF-8
    pub fn write_window<P: AsRef<Path>>(
        &self,
        path: P,
        clip_start: f64,
        clip_end: f64,
        pad_start: f64,
        pad_end: f64,
        want_translation: bool,
    ) -> Result<()> {
        let content = self.export_window(clip_start, clip_end, pad_start, pad_end, want_translation);
        FileManager::write_to_file(path, &content)
    }
}
