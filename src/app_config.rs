use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language code of the primary (studied) subtitle track
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Language code of the translation track; empty disables it
    #[serde(default)]
    pub native_language: String,

    /// The only language whose punctuation heuristics drive sentence merging
    #[serde(default = "default_sentence_language")]
    pub sentence_language: String,

    /// Candidate text encodings, tried in order
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,

    /// Clip padding and phrase settings
    #[serde(default)]
    pub clip: ClipConfig,

    /// Thresholds used by sentence reconstruction and alignment
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Padding applied around generated clips
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClipConfig {
    /// Padding before a single-line clip, in milliseconds
    #[serde(default = "default_pad_ms")]
    pub pad_start_ms: u64,

    /// Padding after a single-line clip, in milliseconds
    #[serde(default = "default_pad_ms")]
    pub pad_end_ms: u64,

    /// Padding before a phrase clip, in milliseconds
    #[serde(default = "default_phrase_pad_ms")]
    pub phrase_pad_start_ms: u64,

    /// Padding after a phrase clip, in milliseconds
    #[serde(default = "default_phrase_pad_ms")]
    pub phrase_pad_end_ms: u64,

    /// Largest silence (seconds) still joining two sentences into one phrase
    #[serde(default = "default_gap_between_phrases")]
    pub gap_between_phrases: f64,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            pad_start_ms: default_pad_ms(),
            pad_end_ms: default_pad_ms(),
            phrase_pad_start_ms: default_phrase_pad_ms(),
            phrase_pad_end_ms: default_phrase_pad_ms(),
            gap_between_phrases: default_gap_between_phrases(),
        }
    }
}

impl ClipConfig {
    /// Padding in seconds for the given mode as (start, end)
    pub fn padding_secs(&self, phrase_mode: bool) -> (f64, f64) {
        if phrase_mode {
            (
                self.phrase_pad_start_ms as f64 / 1000.0,
                self.phrase_pad_end_ms as f64 / 1000.0,
            )
        } else {
            (
                self.pad_start_ms as f64 / 1000.0,
                self.pad_end_ms as f64 / 1000.0,
            )
        }
    }
}

/// Thresholds for the sentence and alignment passes, all in seconds
/// except `overlap_ratio`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AlignmentConfig {
    /// Largest gap between two captions that may still be merged
    #[serde(default = "default_merge_gap")]
    pub merge_gap: f64,

    /// Merged sentences must stay strictly shorter than this
    #[serde(default = "default_max_sentence_duration")]
    pub max_sentence_duration: f64,

    /// Share of a native caption that must overlap a sentence to attach to it
    #[serde(default = "default_overlap_ratio")]
    pub overlap_ratio: f64,

    /// Neighbors further away than this are not offered as context
    #[serde(default = "default_neighbor_max_gap")]
    pub neighbor_max_gap: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            merge_gap: default_merge_gap(),
            max_sentence_duration: default_max_sentence_duration(),
            overlap_ratio: default_overlap_ratio(),
            neighbor_max_gap: default_neighbor_max_gap(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_sentence_language() -> String {
    "en".to_string()
}

fn default_encodings() -> Vec<String> {
    vec!["utf-8".to_string(), "cp1251".to_string()]
}

fn default_pad_ms() -> u64 {
    250
}

fn default_phrase_pad_ms() -> u64 {
    750
}

fn default_gap_between_phrases() -> f64 {
    1.25
}

fn default_merge_gap() -> f64 {
    2.0
}

fn default_max_sentence_duration() -> f64 {
    15.0
}

fn default_overlap_ratio() -> f64 {
    0.25
}

fn default_neighbor_max_gap() -> f64 {
    5.0
}

impl Config {
    /// Load the configuration from a JSON file, writing a default one when missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::get_language_name(&self.target_language)
            .context("Invalid target language")?;
        crate::language_utils::get_language_name(&self.sentence_language)
            .context("Invalid sentence language")?;

        if !self.native_language.is_empty() {
            crate::language_utils::get_language_name(&self.native_language)
                .context("Invalid native language")?;
        }

        if self.encodings.is_empty() {
            return Err(anyhow!("At least one subtitle encoding must be configured"));
        }

        for label in &self.encodings {
            if encoding_rs::Encoding::for_label(label.as_bytes()).is_none() {
                return Err(anyhow!("Unknown subtitle encoding: {}", label));
            }
        }

        let thresholds = [
            ("merge_gap", self.alignment.merge_gap),
            ("max_sentence_duration", self.alignment.max_sentence_duration),
            ("overlap_ratio", self.alignment.overlap_ratio),
            ("neighbor_max_gap", self.alignment.neighbor_max_gap),
            ("gap_between_phrases", self.clip.gap_between_phrases),
        ];

        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("{} must be a non-negative number, got {}", name, value));
            }
        }

        Ok(())
    }

    /// Whether sentence reconstruction applies to the target track
    pub fn reconstructs_sentences(&self) -> bool {
        crate::language_utils::language_codes_match(&self.target_language, &self.sentence_language)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: default_target_language(),
            native_language: String::new(),
            sentence_language: default_sentence_language(),
            encodings: default_encodings(),
            clip: ClipConfig::default(),
            alignment: AlignmentConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
