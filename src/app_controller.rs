use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::alignment::{AlignedTracks, SentenceReconstructor, Synchronizer};
use crate::app_config::Config;
use crate::captions::{Caption, CaptionDecoder};
use crate::clip_planner::{ClipPlan, ClipPlanner, ClipRequest};
use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::session::{QuerySettings, Session, SessionStatus};

// @module: Application controller for session building

/// Subtitle files found next to a media file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubtitlePaths {
    pub target: Option<PathBuf>,
    pub native: Option<PathBuf>,
}

/// Runs the decode, sentence and alignment pipeline and hands out sessions
pub struct Controller {
    // @field: App configuration
    config: Config,
    decoder: CaptionDecoder,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config
            .validate()
            .map_err(|e| AppError::Config(format!("{:#}", e)))?;
        let decoder = CaptionDecoder::new(&config.encodings);

        Ok(Self { config, decoder })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Locate the target and native subtitle files for a media file
    pub fn find_subtitles<P: AsRef<Path>>(&self, media_path: P) -> SubtitlePaths {
        let media_path = media_path.as_ref();

        let target = FileManager::find_subtitle(media_path, &self.config.target_language, true);
        let native = if self.config.native_language.is_empty() {
            None
        } else {
            FileManager::find_subtitle(media_path, &self.config.native_language, false)
        };

        SubtitlePaths { target, native }
    }

    /// Build a session for a media file from the subtitles lying next to it
    pub fn open_media<P: AsRef<Path>>(&self, media_path: P) -> Result<Session> {
        let media_path = media_path.as_ref();
        if media_path.file_stem().is_none() {
            return Err(anyhow!("Not a media file path: {:?}", media_path));
        }

        let paths = self.find_subtitles(media_path);
        match &paths.target {
            Some(path) => info!("Target subtitles: {}", path.display()),
            None => warn!("No {} subtitles found for {}", self.language_label(&self.config.target_language), media_path.display()),
        }
        if let Some(path) = &paths.native {
            info!("Native subtitles: {}", path.display());
        }

        Ok(self.open_subtitles(paths.target.as_deref(), paths.native.as_deref()))
    }

    /// Decode both tracks and build a session.
    ///
    /// A file that fails to parse leaves its track empty, marks the session
    /// as failed and skips alignment.
    pub fn open_subtitles(&self, target: Option<&Path>, native: Option<&Path>) -> Session {
        let mut warnings = Vec::new();
        let mut failures = Vec::new();

        let mut read_track = |path: Option<&Path>| -> Vec<Caption> {
            let Some(path) = path else {
                return Vec::new();
            };
            match self.decoder.read_file(path) {
                Ok(track) => {
                    debug!("Decoded {} as {}", path.display(), track.encoding);
                    if let Some(warning) = track.warning {
                        warnings.push(warning.to_string());
                    }
                    track.captions
                }
                Err(e) => {
                    error!("{}", e);
                    failures.push(e);
                    Vec::new()
                }
            }
        };

        let target_captions = read_track(target);
        let native_captions = read_track(native);

        if let Some(failure) = failures.into_iter().next() {
            let sentences = self.reconstruct(target_captions);
            return Session::new(
                AlignedTracks {
                    sentences,
                    annotations: Vec::new(),
                },
                self.query_settings(),
            )
            .with_status(failure.into())
            .with_warnings(warnings);
        }

        self.build_session(target_captions, native_captions)
            .with_warnings(warnings)
    }

    /// Run sentence reconstruction and alignment on decoded tracks
    pub fn build_session(&self, target: Vec<Caption>, native: Vec<Caption>) -> Session {
        let sentences = self.reconstruct(target);

        let tracks = if native.is_empty() || sentences.is_empty() {
            AlignedTracks {
                sentences,
                annotations: Vec::new(),
            }
        } else {
            Synchronizer::new(&self.config.alignment).synchronize(sentences, &native)
        };

        info!(
            "Session ready: {} sentences, {} annotations",
            tracks.sentences.len(),
            tracks.annotations.len()
        );

        Session::new(tracks, self.query_settings())
    }

    /// Resolve a clip request against a session
    pub fn plan_clip<P: AsRef<Path>>(&self, session: &Session, media_path: P, request: &ClipRequest) -> ClipPlan {
        self.planner(session, media_path).plan(request)
    }

    pub fn planner<'a, P: AsRef<Path>>(&'a self, session: &'a Session, media_path: P) -> ClipPlanner<'a> {
        ClipPlanner::for_media(session, &self.config.clip, media_path)
    }

    fn reconstruct(&self, target: Vec<Caption>) -> Vec<Caption> {
        if target.is_empty() || !self.config.reconstructs_sentences() {
            return target;
        }
        SentenceReconstructor::new(&self.config.alignment).reconstruct(target)
    }

    fn query_settings(&self) -> QuerySettings {
        QuerySettings {
            neighbor_max_gap: self.config.alignment.neighbor_max_gap,
            gap_between_phrases: self.config.clip.gap_between_phrases,
        }
    }

    fn language_label(&self, code: &str) -> String {
        language_utils::get_language_name(code).unwrap_or_else(|_| code.to_string())
    }
}

impl From<SubtitleError> for SessionStatus {
    fn from(error: SubtitleError) -> Self {
        SessionStatus::Error(error.to_string())
    }
}
