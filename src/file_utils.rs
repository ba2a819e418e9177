use anyhow::{Result, Context};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::captions::SubtitleFormat;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Files directly inside `dir`, sorted by name
    fn sibling_files(dir: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        files
    }

    /// Find the subtitle file for a media file.
    ///
    /// Tries `<stem>*<language_code>*.<ext>` for each supported extension in
    /// priority order; with `allow_plain`, then falls back to `<stem>.<ext>`.
    /// The stem is matched literally, so brackets in media names are safe.
    pub fn find_subtitle<P: AsRef<Path>>(media_path: P, language_code: &str, allow_plain: bool) -> Option<PathBuf> {
        let media_path = media_path.as_ref();
        let stem = media_path.file_stem()?.to_string_lossy().to_string();
        let dir = match media_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let siblings = Self::sibling_files(&dir);
        let code = language_code.trim().to_lowercase();

        if !code.is_empty() {
            for format in SubtitleFormat::PRIORITY {
                let found = siblings.iter().find(|path| {
                    subtitle_marker(path, &stem, format)
                        .is_some_and(|marker| marker.to_lowercase().contains(&code))
                });
                if let Some(path) = found {
                    debug!("Found {} subtitles for '{}': {:?}", format.extension(), code, path);
                    return Some(path.clone());
                }
            }
        }

        if allow_plain {
            for format in SubtitleFormat::PRIORITY {
                let plain = dir.join(format!("{}.{}", stem, format.extension()));
                if Self::file_exists(&plain) {
                    debug!("Using subtitles without language marker: {:?}", plain);
                    return Some(plain);
                }
            }
        }

        None
    }
}

/// The part of a subtitle file name between the media stem and the
/// extension, when the file belongs to the media and has that format
fn subtitle_marker<'a>(path: &'a Path, stem: &str, format: SubtitleFormat) -> Option<&'a str> {
    let name = path.file_name()?.to_str()?;
    let rest = name.strip_prefix(stem)?;
    let dot = rest.rfind('.')?;
    let (marker, ext) = (&rest[..dot], &rest[dot + 1..]);

    ext.eq_ignore_ascii_case(format.extension()).then_some(marker)
}
