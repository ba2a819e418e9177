// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subflash::app_config::{self, Config};
use subflash::captions::timestamp::seconds_to_timestamp;
use subflash::clip_planner::{ClipMode, ClipRequest};
use subflash::session::{Direction, Session};
use subflash::{AppError, Controller};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the aligned sentence and translation tracks
    Align {
        /// Media file whose subtitles should be aligned
        #[arg(value_name = "MEDIA")]
        media: PathBuf,

        /// Print the session as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the sentence playing at a given time, with its neighbors
    Lookup {
        #[arg(value_name = "MEDIA")]
        media: PathBuf,

        /// Playback position in seconds
        #[arg(short = 'T', long)]
        time: f64,
    },

    /// Resolve a flashcard clip and print it as JSON
    Clip {
        #[arg(value_name = "MEDIA")]
        media: PathBuf,

        /// Playback position in seconds
        #[arg(short = 'T', long)]
        time: f64,

        /// Explicit clip start in seconds
        #[arg(long, requires = "end")]
        start: Option<f64>,

        /// Explicit clip end in seconds
        #[arg(long, requires = "start")]
        end: Option<f64>,

        /// Clip the whole phrase instead of one sentence
        #[arg(long)]
        phrase: bool,
    },

    /// Write the subtitles of a time window as an SRT file re-based to its start
    Export(ExportArgs),

    /// Generate shell completions for subflash
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(value_name = "MEDIA")]
    media: PathBuf,

    /// Window start in seconds (playback time)
    #[arg(long)]
    start: f64,

    /// Window end in seconds (playback time)
    #[arg(long)]
    end: f64,

    /// Padding included at the start of the window, in seconds
    #[arg(long, default_value_t = 0.0)]
    pad_start: f64,

    /// Padding included at the end of the window, in seconds
    #[arg(long, default_value_t = 0.0)]
    pad_end: f64,

    /// Export the translation track instead of the sentences
    #[arg(long)]
    translation: bool,

    /// Output file
    #[arg(short, long)]
    output: PathBuf,
}

/// subflash - sentence-aligned subtitles for flashcard clips
#[derive(Parser, Debug)]
#[command(name = "subflash")]
#[command(version)]
#[command(about = "Subtitle alignment and clip planning for flashcards")]
#[command(long_about = "subflash finds the subtitle files next to a video, merges caption fragments into
sentences, attaches the translation track and answers time-based lookups.

EXAMPLES:
    subflash align movie.mkv                          # Print aligned sentences
    subflash -n ru lookup movie.mkv --time 61.5       # Sentence and translation at 1:01.5
    subflash clip movie.mkv --time 61.5 --phrase      # Plan a phrase clip
    subflash export movie.mkv --start 60 --end 65 -o clip.srt
    subflash completions bash > subflash.bash         # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Target (studied) language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// Native (translation) language code
    #[arg(short, long, global = true)]
    native_language: Option<String>,

    /// Subtitle delay in seconds, as set in the player
    #[arg(short = 'd', long, default_value_t = 0.0, global = true, allow_negative_numbers = true)]
    sub_delay: f64,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let emoji = Self::get_emoji_for_level(record.level());
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Accept everything; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subflash", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Align { media, json } => run_align(&controller, &media, cli.sub_delay, json),
        Commands::Lookup { media, time } => run_lookup(&controller, &media, cli.sub_delay, time),
        Commands::Clip { media, time, start, end, phrase } => {
            let mode = if phrase { ClipMode::Phrase } else { ClipMode::Line };
            let request = ClipRequest {
                time_pos: time,
                time_start: start,
                time_end: end,
                mode,
            };
            run_clip(&controller, &media, cli.sub_delay, &request)
        }
        Commands::Export(args) => run_export(&controller, &args, cli.sub_delay),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(target_language) = &cli.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(native_language) = &cli.native_language {
        config.native_language = native_language.clone();
    }

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

/// Build the session for a media file, failing when a subtitle file is broken
fn open_session(controller: &Controller, media: &Path, sub_delay: f64) -> Result<Session> {
    let mut session = controller.open_media(media)?;

    for warning in session.warnings() {
        warn!("{}", warning);
    }
    if let subflash::SessionStatus::Error(message) = session.status() {
        return Err(anyhow!("Failed to load subtitles for {:?}: {}", media, message));
    }
    if session.is_empty() {
        warn!("No subtitles loaded for {:?}", media);
    }

    session.set_sub_delay(sub_delay);
    Ok(session)
}

fn run_align(controller: &Controller, media: &Path, sub_delay: f64, json: bool) -> Result<()> {
    let session = open_session(controller, media, sub_delay)?;

    if json {
        let output = serde_json::json!({
            "sentences": session.sentences(),
            "annotations": session.annotations(),
            "status": session.status(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (idx, sentence) in session.sentences().iter().enumerate() {
        println!(
            "[{} --> {}] {}",
            seconds_to_timestamp(sentence.start),
            seconds_to_timestamp(sentence.end),
            sentence.text
        );
        if let Some(annotation) = session.annotations().get(idx) {
            println!("    {}", annotation.text);
        }
    }

    info!("{} sentences", session.len());
    Ok(())
}

fn run_lookup(controller: &Controller, media: &Path, sub_delay: f64, time: f64) -> Result<()> {
    let session = open_session(controller, media, sub_delay)?;

    let Some(index) = session.locate(time) else {
        warn!("No sentence at {}", seconds_to_timestamp(time));
        return Ok(());
    };

    let before = session.neighbor(index, Direction::Previous, false);
    let line = session.get(index, false);
    let after = session.neighbor(index, Direction::Next, false);

    println!("before:  {}", before.text);
    println!("line:    {}", line.text);
    println!("after:   {}", after.text);
    if session.has_translations() {
        println!("meaning: {}", session.get(index, true).text);
    }

    Ok(())
}

fn run_clip(controller: &Controller, media: &Path, sub_delay: f64, request: &ClipRequest) -> Result<()> {
    let session = open_session(controller, media, sub_delay)?;
    let plan = controller.plan_clip(&session, media, request);

    if !plan.has_line() {
        warn!("No sentence at {}, only the time span is known", plan.time);
    }
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn run_export(controller: &Controller, args: &ExportArgs, sub_delay: f64) -> Result<()> {
    if args.translation && controller.config().native_language.is_empty() {
        return Err(AppError::Config("No native language configured, nothing to export".to_string()).into());
    }

    let session = open_session(controller, &args.media, sub_delay)?;
    session
        .write_window(
            &args.output,
            args.start,
            args.end,
            args.pad_start,
            args.pad_end,
            args.translation,
        )
        .with_context(|| format!("Failed to export subtitles to {:?}", args.output))?;

    info!("Subtitles written to {}", args.output.display());
    Ok(())
}
