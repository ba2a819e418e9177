/*!
 * Clip planning for flashcard generation.
 *
 * Resolves a player request (current position, optional explicit span,
 * line or phrase mode) against a session into the texts and padded time
 * spans a card needs. Nothing here touches media files; the plan is what
 * an extractor would be driven with.
 */

use log::debug;
use serde::Serialize;
use std::path::Path;

use crate::app_config::ClipConfig;
use crate::captions::timestamp::{seconds_to_filename, seconds_to_timestamp};
use crate::session::{Direction, Session};

/// Strip a source name down to something safe for media file names
pub fn format_filename(name: &str) -> String {
    name.trim().replace(['[', ']'], "").replace(' ', "_")
}

/// What a clip is built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipMode {
    /// One sentence, with its neighbors as context
    #[default]
    Line,
    /// Consecutive sentences separated by short silences
    Phrase,
}

impl ClipMode {
    pub fn is_phrase(&self) -> bool {
        matches!(self, ClipMode::Phrase)
    }
}

/// A request coming from the player
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRequest {
    /// Current playback position
    pub time_pos: f64,
    /// Explicit clip start chosen by the user, playback time
    pub time_start: Option<f64>,
    /// Explicit clip end chosen by the user, playback time
    pub time_end: Option<f64>,
    pub mode: ClipMode,
}

impl ClipRequest {
    pub fn at(time_pos: f64, mode: ClipMode) -> Self {
        ClipRequest {
            time_pos,
            time_start: None,
            time_end: None,
            mode,
        }
    }

    pub fn with_span(mut self, start: f64, end: f64) -> Self {
        self.time_start = Some(start);
        self.time_end = Some(end);
        self
    }

    /// The explicit span, when both ends are set and non-negative
    fn explicit_span(&self) -> Option<ClipSpan> {
        match (self.time_start, self.time_end) {
            (Some(start), Some(end)) if start >= 0.0 && end >= 0.0 => Some(ClipSpan {
                start,
                end,
                pad_start: 0.0,
                pad_end: 0.0,
            }),
            _ => None,
        }
    }
}

/// A padded span in playback time.
///
/// `pad_start`/`pad_end` record how much of the span is padding, so the
/// subtitle window for the clip can be cut back to the spoken part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipSpan {
    pub start: f64,
    pub end: f64,
    pub pad_start: f64,
    pub pad_end: f64,
}

impl ClipSpan {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// `<source>_<start>-<end>`, the stem used for audio and video files
    pub fn basename(&self, source: &str) -> String {
        format!(
            "{}_{}-{}",
            format_filename(source),
            seconds_to_filename(self.start),
            seconds_to_filename(self.end)
        )
    }

    /// Name of the subtitle file attached to a video of this span
    pub fn subtitles_filename(&self, source: &str) -> String {
        format!("{}.srt", self.basename(source))
    }
}

/// Everything a card needs, resolved from one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipPlan {
    pub id: String,
    pub source: String,
    /// Playback position as `HH:MM:SS.mmm`
    pub time: String,
    pub line: String,
    pub line_before: String,
    pub line_after: String,
    pub meaning: String,
    pub meaning_before: String,
    pub meaning_after: String,
    /// The clip itself; absent when no sentence matched and no explicit
    /// span was given
    pub clip: Option<ClipSpan>,
    /// Previous sentence start to next sentence end, padded
    pub context: Option<ClipSpan>,
}

impl ClipPlan {
    /// Whether any sentence was found at the requested position
    pub fn has_line(&self) -> bool {
        self.context.is_some()
    }

    /// File name of a still taken at the requested position
    pub fn snapshot_basename(&self, time_pos: f64) -> String {
        format!("{}_{}", format_filename(&self.source), seconds_to_filename(time_pos))
    }

    /// The span whose subtitles get exported next to a video
    pub fn subtitle_span(&self, with_context: bool) -> Option<&ClipSpan> {
        if with_context {
            self.context.as_ref().or(self.clip.as_ref())
        } else {
            self.clip.as_ref()
        }
    }
}

/// Resolves clip requests against a session
pub struct ClipPlanner<'a> {
    session: &'a Session,
    config: &'a ClipConfig,
    source: String,
}

impl<'a> ClipPlanner<'a> {
    pub fn new(session: &'a Session, config: &'a ClipConfig, source: impl Into<String>) -> Self {
        ClipPlanner {
            session,
            config,
            source: source.into(),
        }
    }

    /// Planner whose source name is the media file stem
    pub fn for_media<P: AsRef<Path>>(session: &'a Session, config: &'a ClipConfig, media_path: P) -> Self {
        let source = media_path
            .as_ref()
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::new(session, config, source)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn span(&self, start: f64, end: f64, pad_start: f64, pad_end: f64) -> ClipSpan {
        ClipSpan {
            start: self.session.to_playback_time(start) - pad_start,
            end: self.session.to_playback_time(end) + pad_end,
            pad_start,
            pad_end,
        }
    }

    pub fn plan(&self, request: &ClipRequest) -> ClipPlan {
        let explicit = request.explicit_span();
        let mut plan = ClipPlan {
            id: String::new(),
            source: self.source.clone(),
            time: seconds_to_timestamp(request.time_pos),
            line: String::new(),
            line_before: String::new(),
            line_after: String::new(),
            meaning: String::new(),
            meaning_before: String::new(),
            meaning_after: String::new(),
            clip: None,
            context: None,
        };

        let resolved = self
            .session
            .locate(request.time_pos)
            .and_then(|index| self.resolve(index, request.mode, &mut plan));

        plan.id = match (&resolved, &explicit) {
            (Some(clip), _) | (None, Some(clip)) => clip.basename(&self.source),
            (None, None) => format!(
                "{}_{}",
                format_filename(&self.source),
                seconds_to_filename(request.time_pos)
            ),
        };
        plan.clip = explicit.or(resolved);

        debug!("Planned clip {} ({:?} mode)", plan.id, request.mode);
        plan
    }

    /// Fill texts and the context span for the sentence at `index`,
    /// returning the padded clip span
    fn resolve(&self, index: usize, mode: ClipMode, plan: &mut ClipPlan) -> Option<ClipSpan> {
        let session = self.session;
        let (line, prev_start, next_end) = match mode {
            ClipMode::Line => {
                let line = session.get(index, false);
                let prev = session.neighbor(index, Direction::Previous, false);
                let next = session.neighbor(index, Direction::Next, false);

                plan.meaning = session.get(index, true).text;
                plan.meaning_before = session.neighbor(index, Direction::Previous, true).text;
                plan.meaning_after = session.neighbor(index, Direction::Next, true).text;
                plan.line_before = prev.text;
                plan.line_after = next.text;

                (line, prev.start, next.end)
            }
            ClipMode::Phrase => {
                let line = session.phrase(index, false);
                plan.meaning = session.phrase(index, true).text;
                (line.clone(), line.start, line.end)
            }
        };

        let (Some(start), Some(end)) = (line.start, line.end) else {
            return None;
        };
        plan.line = line.text;

        let (pad_start, pad_end) = self.config.padding_secs(mode.is_phrase());
        plan.context = Some(self.span(
            prev_start.unwrap_or(start),
            next_end.unwrap_or(end),
            pad_start,
            pad_end,
        ));

        Some(self.span(start, end, pad_start, pad_end))
    }

    /// SRT for the subtitle span of a plan, re-based to the clip start
    pub fn export_subtitles(&self, plan: &ClipPlan, with_context: bool, want_translation: bool) -> Option<String> {
        let span = plan.subtitle_span(with_context)?;
        Some(self.session.export_window(
            span.start,
            span.end,
            span.pad_start,
            span.pad_end,
            want_translation,
        ))
    }
}
