/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::fs;
use subflash::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.target_language, "en");
    assert_eq!(config.native_language, "");
    assert_eq!(config.sentence_language, "en");
    assert_eq!(config.encodings, vec!["utf-8".to_string(), "cp1251".to_string()]);
    assert_eq!(config.clip.pad_start_ms, 250);
    assert_eq!(config.clip.phrase_pad_end_ms, 750);
    assert_eq!(config.alignment.merge_gap, 2.0);
    assert_eq!(config.alignment.max_sentence_duration, 15.0);
    assert_eq!(config.alignment.overlap_ratio, 0.25);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.reconstructs_sentences());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.native_language = "ru".to_string();
    assert!(config.validate().is_ok());

    config.native_language = "123".to_string();
    assert!(config.validate().is_err());
    config.native_language = String::new();

    config.encodings = vec![];
    assert!(config.validate().is_err());

    config.encodings = vec!["utf-8".to_string(), "klingon-8".to_string()];
    assert!(config.validate().is_err());
    config.encodings = vec!["latin1".to_string()];
    assert!(config.validate().is_ok());

    config.alignment.overlap_ratio = -0.1;
    assert!(config.validate().is_err());
    config.alignment.overlap_ratio = 0.25;

    config.clip.gap_between_phrases = f64::NAN;
    assert!(config.validate().is_err());
}

/// Test that sentence reconstruction follows the target language
#[test]
fn test_reconstructs_sentences_withOtherTarget_shouldBeFalse() {
    let config = Config {
        target_language: "eng".to_string(),
        ..Config::default()
    };
    assert!(config.reconstructs_sentences());

    let config = Config {
        target_language: "ja".to_string(),
        ..Config::default()
    };
    assert!(!config.reconstructs_sentences());
}

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.target_language, "en");

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.encodings, config.encodings);
    Ok(())
}

/// Test that partial config files fall back to defaults field by field
#[test]
fn test_load_or_create_withPartialFile_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "native_language": "ru", "clip": { "pad_start_ms": 100 }, "log_level": "debug" }"#,
    )?;

    let config = Config::load_or_create(&path)?;

    assert_eq!(config.native_language, "ru");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.clip.pad_start_ms, 100);
    assert_eq!(config.clip.pad_end_ms, 250);
    assert_eq!(config.clip.padding_secs(false), (0.1, 0.25));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(fs::read_to_string(&path)?.contains("\"ru\""));
    Ok(())
}

/// Test that broken JSON is reported instead of replaced
#[test]
fn test_load_or_create_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}
