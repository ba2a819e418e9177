/*!
 * Tests for session queries and windowed export
 */

use anyhow::Result;
use std::fs;
use subflash::alignment::AlignedTracks;
use subflash::captions::Caption;
use subflash::session::{Direction, QueryLine, QuerySettings, Session, SessionStatus};
use crate::common;

fn captions(entries: &[(f64, f64, &str)]) -> Vec<Caption> {
    entries.iter().map(|(s, e, t)| Caption::new(*s, *e, *t)).collect()
}

fn sentences_only() -> Session {
    Session::new(
        AlignedTracks {
            sentences: captions(&[(0.0, 2.0, "One."), (2.5, 4.0, "Two."), (5.0, 6.0, "Three.")]),
            annotations: Vec::new(),
        },
        QuerySettings::default(),
    )
}

/// Test that translation queries without a native track return sentinels
#[test]
fn test_get_withoutTranslations_shouldReturnSentinel() {
    let session = sentences_only();

    assert!(!session.has_translations());
    assert!(session.get(1, true).is_empty());
    assert!(session.phrase(1, true).is_empty());
    assert_eq!(session.get(1, false).text, "Two.");
    assert_eq!(session.range_text(0.0, 10.0, true), "");
}

/// Test that neighbor lookups without translations fall back to boundary spans
#[test]
fn test_neighbor_withoutTranslations_shouldReturnBoundarySpans() {
    let session = sentences_only();

    assert_eq!(
        session.neighbor(1, Direction::Previous, true),
        QueryLine { start: Some(0.0), end: Some(2.0), text: String::new() }
    );
    assert_eq!(
        session.neighbor(1, Direction::Next, true),
        QueryLine { start: Some(5.0), end: Some(6.0), text: String::new() }
    );
    assert!(session.neighbor(7, Direction::Next, false).is_empty());
}

/// Test that an empty session answers every query with a sentinel
#[test]
fn test_queries_onEmptySession_shouldNotPanic() {
    let session = Session::default();

    assert_eq!(session.locate(1.0), None);
    assert!(session.get(0, false).is_empty());
    assert!(session.neighbor(0, Direction::Previous, false).is_empty());
    assert!(session.phrase(0, false).is_empty());
    assert!(session.filter(0.0, 10.0, 0.0, 0.0, false).is_empty());
    assert_eq!(session.export_window(0.0, 10.0, 0.0, 0.0, false), "");
}

/// Test that unsorted annotations are scanned past the window end
#[test]
fn test_filter_withWideAnnotation_shouldScanAllAnnotations() {
    let session = Session::new(
        AlignedTracks {
            sentences: captions(&[(0.0, 2.0, "One."), (2.5, 4.0, "Two."), (5.0, 6.0, "Three.")]),
            annotations: captions(&[(0.0, 2.0, "Uno."), (1.0, 6.0, "Dos, larga."), (5.0, 6.0, "Tres.")]),
        },
        QuerySettings::default(),
    );

    let lines = session.filter(4.5, 7.0, 0.0, 0.0, true);

    assert_eq!(lines, captions(&[(-3.5, 1.5, "Dos, larga."), (0.5, 1.5, "Tres.")]));
}

/// Test that the exported window is re-based and written as SRT
#[test]
fn test_write_window_withSubDelay_shouldWriteRebasedSrt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("clip.srt");
    let mut session = sentences_only();
    session.set_sub_delay(0.5);

    // Playback 2.75..4.75 is subtitle time 2.25..4.25
    session.write_window(&path, 2.75, 4.75, 0.0, 0.0, false)?;

    assert_eq!(fs::read_to_string(&path)?, "1\n00:00:00,250 --> 00:00:01,750\nTwo.\n\n");
    Ok(())
}

/// Test that session status serializes with a tag
#[test]
fn test_session_status_shouldSerializeTagged() -> Result<()> {
    let ok = serde_json::to_string(&SessionStatus::Success)?;
    let failed = serde_json::to_string(&SessionStatus::Error("bad record".to_string()))?;

    assert_eq!(ok, r#"{"status":"success"}"#);
    assert_eq!(failed, r#"{"status":"error","message":"bad record"}"#);
    Ok(())
}
