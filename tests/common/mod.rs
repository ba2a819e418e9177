/*!
 * Common test utilities for the subflash test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a test file from raw bytes
pub fn create_test_bytes(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// English captions split mid-sentence, the way broadcast subtitles are
pub const TARGET_SRT: &str = "1
00:00:01,000 --> 00:00:02,500
I don't know

2
00:00:03,000 --> 00:00:04,500
what to do.

3
00:00:05,000 --> 00:00:06,000
- Wait!

4
00:00:06,200 --> 00:00:08,000
<i>Stay here</i>

5
00:00:08,100 --> 00:00:09,000
with me.

6
00:00:20,000 --> 00:00:22,000
Goodbye.
";

/// Translation captions, one per spoken sentence
pub const NATIVE_SRT: &str = "1
00:00:01,000 --> 00:00:04,500
Не знаю, что делать.

2
00:00:05,000 --> 00:00:06,000
- Подожди!

3
00:00:06,200 --> 00:00:09,000
Останься со мной.

4
00:00:20,000 --> 00:00:22,000
Прощай.
";

/// Creates `<stem>.en.srt` with [`TARGET_SRT`]
pub fn create_target_subtitle(dir: &Path, stem: &str) -> Result<PathBuf> {
    create_test_file(dir, &format!("{}.en.srt", stem), TARGET_SRT)
}

/// Creates `<stem>.ru.srt` with [`NATIVE_SRT`] encoded as windows-1251
pub fn create_native_subtitle_cp1251(dir: &Path, stem: &str) -> Result<PathBuf> {
    let (bytes, _, had_errors) = encoding_rs::WINDOWS_1251.encode(NATIVE_SRT);
    assert!(!had_errors);
    create_test_bytes(dir, &format!("{}.ru.srt", stem), &bytes)
}
