//! Subtitle bytes to captions: BOM removal, encoding detection and
//! format dispatch.

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};
use std::fs;
use std::path::Path;

use super::{srt, vtt, Caption, Track};
use crate::errors::SubtitleError;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Supported caption container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    Srt,
    WebVtt,
}

impl SubtitleFormat {
    /// Lookup order used when searching for subtitle files
    pub const PRIORITY: [SubtitleFormat; 2] = [SubtitleFormat::Srt, SubtitleFormat::WebVtt];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            Self::WebVtt => "vtt",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_extension(&ext).ok_or(SubtitleError::UnsupportedFormat(ext))
    }

    /// Parse already-decoded text into captions
    pub fn parse_timed_captions(&self, content: &str, file: &str) -> Result<Vec<Caption>, SubtitleError> {
        match self {
            Self::Srt => srt::parse_srt(content, file),
            Self::WebVtt => vtt::parse_vtt(content, file),
        }
    }
}

/// Result of decoding one subtitle file
#[derive(Debug, Clone)]
pub struct DecodedTrack {
    pub captions: Track,
    /// Name of the encoding the text was read with
    pub encoding: &'static str,
    /// Set when no candidate decoded cleanly and a lossy fallback was used
    pub warning: Option<SubtitleError>,
}

/// Reads subtitle files using an ordered list of candidate encodings
#[derive(Debug, Clone)]
pub struct CaptionDecoder {
    encodings: Vec<&'static Encoding>,
    labels: Vec<String>,
}

impl CaptionDecoder {
    pub fn new(labels: &[String]) -> Self {
        let encodings = labels
            .iter()
            .filter_map(|label| {
                let encoding = Encoding::for_label(label.trim().as_bytes());
                if encoding.is_none() {
                    warn!("Ignoring unknown subtitle encoding: {}", label);
                }
                encoding
            })
            .collect();

        CaptionDecoder {
            encodings,
            labels: labels.to_vec(),
        }
    }

    /// Decode bytes to text, trying each candidate encoding in order.
    /// When none decodes without error the first one is used lossily and
    /// a `DecodeFailure` is returned alongside the text.
    pub fn decode_text(&self, bytes: &[u8]) -> (String, &'static Encoding, Option<SubtitleError>) {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

        for &encoding in &self.encodings {
            if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
                debug!("Decoded subtitles as {}", encoding.name());
                return (text.into_owned(), encoding, None);
            }
        }

        let fallback = self.encodings.first().copied().unwrap_or(UTF_8);
        let (text, _) = fallback.decode_without_bom_handling(bytes);
        let error = SubtitleError::DecodeFailure {
            tried: self.labels.clone(),
        };
        warn!("{}", error);

        (text.into_owned(), fallback, Some(error))
    }

    /// Decode and parse in-memory subtitle content
    pub fn decode(&self, bytes: &[u8], format: SubtitleFormat, file: &str) -> Result<DecodedTrack, SubtitleError> {
        let (text, encoding, warning) = self.decode_text(bytes);
        let mut captions = format.parse_timed_captions(&text, file)?;

        if captions.windows(2).any(|pair| pair[1].start < pair[0].start) {
            warn!("Subtitles in {} are not in chronological order, sorting by start time", file);
            captions.sort_by(|a, b| a.start.total_cmp(&b.start));
        }

        debug!("Read {} captions from {}", captions.len(), file);

        Ok(DecodedTrack {
            captions,
            encoding: encoding.name(),
            warning,
        })
    }

    /// Read, decode and parse a subtitle file, picking the format from its extension
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<DecodedTrack, SubtitleError> {
        let path = path.as_ref();
        let format = SubtitleFormat::from_path(path)?;
        let bytes = fs::read(path)?;
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        self.decode(&bytes, format, &file)
    }
}
