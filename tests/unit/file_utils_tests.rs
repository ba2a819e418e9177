/*!
 * Tests for file utility functions and subtitle discovery
 */

use anyhow::Result;
use std::fs;
use subflash::file_utils::FileManager;
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("media").join("clip.srt");

    FileManager::write_to_file(&path, "1\n")?;

    assert_eq!(fs::read_to_string(&path)?, "1\n");
    Ok(())
}

/// Test that the language marker is found anywhere between stem and extension
#[test]
fn test_find_subtitle_withLanguageMarker_shouldMatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let media = common::create_test_file(dir, "movie.mkv", "")?;
    common::create_test_file(dir, "movie.forced.EN.srt", "")?;
    common::create_test_file(dir, "movie.ru.srt", "")?;
    common::create_test_file(dir, "other.en.srt", "")?;

    let found = FileManager::find_subtitle(&media, "en", false);
    assert_eq!(found, Some(dir.join("movie.forced.EN.srt")));

    let found = FileManager::find_subtitle(&media, "ru", false);
    assert_eq!(found, Some(dir.join("movie.ru.srt")));

    Ok(())
}

/// Test that srt wins over vtt and the first name in sorted order wins
#[test]
fn test_find_subtitle_withSeveralCandidates_shouldFollowPriority() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let media = dir.join("show.mp4");
    common::create_test_file(dir, "show.en.vtt", "")?;
    common::create_test_file(dir, "show.en.sdh.srt", "")?;
    common::create_test_file(dir, "show.en.SRT", "")?;

    let found = FileManager::find_subtitle(&media, "en", false);
    assert_eq!(found, Some(dir.join("show.en.SRT")));

    Ok(())
}

/// Test that brackets in the media name are matched literally
#[test]
fn test_find_subtitle_withBracketsInName_shouldMatchLiterally() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let media = dir.join("[Group] Show - 01 [1080p].mkv");
    common::create_test_file(dir, "[Group] Show - 01 [1080p].en.srt", "")?;
    common::create_test_file(dir, "G Show - 01 1.en.srt", "")?;

    let found = FileManager::find_subtitle(&media, "en", false);
    assert_eq!(found, Some(dir.join("[Group] Show - 01 [1080p].en.srt")));

    Ok(())
}

/// Test that the plain fallback only applies when allowed
#[test]
fn test_find_subtitle_withPlainFile_shouldRespectFallbackFlag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path();
    let media = dir.join("movie.avi");
    common::create_test_file(dir, "movie.srt", "")?;

    assert_eq!(FileManager::find_subtitle(&media, "en", true), Some(dir.join("movie.srt")));
    assert_eq!(FileManager::find_subtitle(&media, "en", false), None);
    assert_eq!(FileManager::find_subtitle(&media, "", false), None);

    Ok(())
}
