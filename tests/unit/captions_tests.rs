/*!
 * Tests for caption reading and writing through files
 */

use anyhow::Result;
use subflash::captions::srt::{parse_srt, write_srt};
use subflash::captions::{Caption, CaptionDecoder, SubtitleFormat};
use subflash::errors::SubtitleError;
use crate::common;

fn decoder() -> CaptionDecoder {
    CaptionDecoder::new(&["utf-8".to_string(), "cp1251".to_string()])
}

/// Test that an SRT file is read, normalized and kept in order
#[test]
fn test_readFile_withSrt_shouldNormalizeCaptions() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_target_subtitle(temp_dir.path(), "movie")?;

    let track = decoder().read_file(&path)?;

    assert_eq!(track.encoding, "UTF-8");
    assert!(track.warning.is_none());
    assert_eq!(track.captions.len(), 6);
    assert_eq!(track.captions[2], Caption::new(5.0, 6.0, "- Wait!"));
    assert_eq!(track.captions[3].text, "Stay here");

    Ok(())
}

/// Test that a windows-1251 file is decoded by the second candidate
#[test]
fn test_readFile_withCp1251_shouldDecodeCyrillic() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_native_subtitle_cp1251(temp_dir.path(), "movie")?;

    let track = decoder().read_file(&path)?;

    assert_eq!(track.encoding, "windows-1251");
    assert_eq!(track.captions[0].text, "Не знаю, что делать.");
    assert_eq!(track.captions.len(), 4);

    Ok(())
}

/// Test that undecodable bytes produce a warning but still yield captions
#[test]
fn test_readFile_withOnlyUtf8Candidate_shouldWarnAndContinue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode(common::NATIVE_SRT);
    let path = common::create_test_bytes(temp_dir.path(), "movie.ru.srt", &bytes)?;

    let track = CaptionDecoder::new(&["utf-8".to_string()]).read_file(&path)?;

    assert!(matches!(track.warning, Some(SubtitleError::DecodeFailure { .. })));
    assert_eq!(track.captions.len(), 4);

    Ok(())
}

/// Test that a WebVTT file goes through the same normalization
#[test]
fn test_readFile_withVtt_shouldMatchSrtOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "movie.en.vtt",
        "WEBVTT\n\n1\n00:00:01.000 --> 00:00:02.500 align:start\n<i>I don't know</i>\n\n00:03.000 --> 00:04.500\nwhat to do.\n",
    )?;

    let track = decoder().read_file(&path)?;

    assert_eq!(
        track.captions,
        vec![
            Caption::new(1.0, 2.5, "I don't know"),
            Caption::new(3.0, 4.5, "what to do."),
        ]
    );

    Ok(())
}

/// Test that unknown extensions are rejected before reading
#[test]
fn test_readFile_withUnknownExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "movie.en.ass", "[Script Info]")?;

    let result = decoder().read_file(&path);

    assert_eq!(result.unwrap_err(), SubtitleError::UnsupportedFormat("ass".to_string()));
    Ok(())
}

/// Test that a missing file is an I/O error, not a parse failure
#[test]
fn test_readFile_withMissingFile_shouldReturnIoError() {
    let result = decoder().read_file("definitely/missing/movie.srt");
    assert!(matches!(result, Err(SubtitleError::Io(_))));
}

/// Test that a malformed record fails the whole file
#[test]
fn test_parseSrt_withMalformedRecord_shouldReportIt() {
    let content = "Subtitles by someone\nnot a timing line\nhello\n\n1\n00:00:01,000 --> 00:00:02,000\nHi.\n";

    match parse_srt(content, "movie.srt") {
        Err(SubtitleError::ParseFailure { file, record, .. }) => {
            assert_eq!(file, "movie.srt");
            assert!(record.starts_with("Subtitles by someone"));
        }
        other => panic!("expected a parse failure, got {:?}", other),
    }
}

/// Test that written SRT reads back to the same captions
#[test]
fn test_writeSrt_shouldReadBack() -> Result<()> {
    let captions = vec![
        Caption::new(0.25, 1.75, "How are you?"),
        Caption::new(3723.5, 3725.25, "- Fine. - Good."),
    ];

    let written = write_srt(&captions);
    let parsed = SubtitleFormat::Srt.parse_timed_captions(&written, "written.srt")?;

    assert_eq!(parsed, captions);
    assert!(written.starts_with("1\n00:00:00,250 --> 00:00:01,750\nHow are you?\n\n2\n01:02:03,500 --> 01:02:05,250"));
    Ok(())
}
