// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::{Config, ConverterKind};
use app_controller::Controller;

mod alignment;
mod annotate;
mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod lyric_parser;
mod providers;
mod resolver;
mod script_detect;
mod tag_store;

/// CLI Wrapper for ConverterKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliConverterKind {
    Kakasi,
    DeepSeek,
}

impl From<CliConverterKind> for ConverterKind {
    fn from(cli_kind: CliConverterKind) -> Self {
        match cli_kind {
            CliConverterKind::Kakasi => ConverterKind::Kakasi,
            CliConverterKind::DeepSeek => ConverterKind::DeepSeek,
        }
    }
}

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
    /// Annotate lyric files (default command)
    #[command(alias = "annotate")]
    Annotate(AnnotateArgs),

    /// Generate shell completions for jlrc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AnnotateArgs {
    /// Input audio/lyric file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output order, dash-separated (e.g. 'chin-hira-kanji')
    #[arg(short, long)]
    order: Option<String>,

    /// Provider backend to use
    #[arg(short, long, value_enum)]
    provider: Option<CliConverterKind>,

    /// API key for the remote provider
    #[arg(long, env = "JLRC_API_KEY")]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print the annotated block to stdout without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,
}

/// jlrc - Japanese lyric annotator
///
/// Reads synced lyrics from audio tags or plain LRC files, resolves
/// duplicate candidate lines per timestamp, and writes back an annotated
/// block with kana readings, romanizations and translations.
#[derive(Parser, Debug)]
#[command(name = "jlrc")]
#[command(version = "0.3.0")]
#[command(about = "Japanese lyric annotation tool")]
#[command(long_about = "jlrc reads synced lyrics from audio tags or plain LRC files, resolves \
duplicate lines sharing a timestamp, and writes back a re-annotated block.

EXAMPLES:
    jlrc song.flac                        # Annotate using default config
    jlrc -o kanji-hira-roma song.flac     # Kanji, reading, romaji lines
    jlrc -p deepseek --api-key KEY music/ # Use the DeepSeek endpoint on a folder
    jlrc -n song.lrc                      # Preview without writing
    jlrc completions bash > jlrc.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different config file with --config-path. If the config file doesn't
    exist, a default one will be created automatically.

SUPPORTED PROVIDERS:
    kakasi    - Local transliteration, readings and romaji only (default)
    deepseek  - DeepSeek chat endpoint, adds Chinese translation (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input audio/lyric file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output order, dash-separated (e.g. 'chin-hira-kanji')
    #[arg(short, long)]
    order: Option<String>,

    /// Provider backend to use
    #[arg(short, long, value_enum)]
    provider: Option<CliConverterKind>,

    /// API key for the remote provider
    #[arg(long, env = "JLRC_API_KEY")]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Print the annotated block to stdout without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,
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

    // @returns: Short tag for log level
    fn tag_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "ERR",
            Level::Warn => "WRN",
            Level::Info => "   ",
            Level::Debug => "DBG",
            Level::Trace => "TRC",
        }
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
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
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                Self::tag_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "jlrc", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Annotate(args)) => run_annotate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_path = cli
                .input_path
                .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

            let args = AnnotateArgs {
                input_path,
                order: cli.order,
                provider: cli.provider,
                api_key: cli.api_key,
                config_path: cli.config_path,
                log_level: cli.log_level,
                dry_run: cli.dry_run,
            };
            run_annotate(args).await
        }
    }
}

async fn run_annotate(options: AnnotateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(cmd_log_level.clone().into()));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        config
    };

    // Override config with CLI options if provided
    if let Some(order) = &options.order {
        config.output_order = Config::parse_order(order)?;
    }
    if let Some(provider) = &options.provider {
        config.provider.kind = provider.clone().into();
    }
    if let Some(api_key) = &options.api_key {
        config.provider.api_key = api_key.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(config.log_level));
    }

    let controller = Controller::with_config(config)?;

    if options.dry_run {
        if !options.input_path.is_file() {
            return Err(anyhow!(
                "Dry-run expects a single file: {:?}",
                options.input_path
            ));
        }
        match controller.preview(&options.input_path).await? {
            Some(text) => println!("{}", text),
            None => warn!("Nothing to annotate in {:?}", options.input_path),
        }
        return Ok(());
    }

    if options.input_path.is_file() {
        let outcome = controller.run(&options.input_path).await?;
        log::info!("Outcome for {:?}: {}", options.input_path, outcome);
    } else if options.input_path.is_dir() {
        controller.run_folder(&options.input_path).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
