use anyhow::{Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::annotate::AnnotationService;
use crate::app_config::{Config, ConverterKind};
use crate::file_utils::FileManager;
use crate::lyric_parser::{self, ParserOptions};
use crate::providers::deepseek::DeepSeekClient;
use crate::providers::kks::KakasiConverter;
use crate::providers::{ChineseTranslator, PhoneticConverter};
use crate::tag_store;

// @module: Application controller for lyric annotation

/// Per-file outcome class. Every abnormal path inside a file resolves to one
/// of these; only I/O around the engine itself surfaces as an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// Annotated and written, every group resolved cleanly
    Success,
    /// Annotated and written, but groups were skipped or drifted
    Defect,
    /// Not applicable: no synced lyrics, or not Japanese; source untouched
    Other,
    /// Nothing readable; source untouched
    Error,
}

impl ProcessOutcome {
    /// Stable lowercase name, used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Defect => "defect",
            Self::Other => "other",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ProcessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Running totals across a folder run
#[derive(Debug, Default, Clone, Copy)]
pub struct OutcomeTally {
    /// Cleanly annotated files
    pub success: usize,
    /// Annotated files with drift
    pub defect: usize,
    /// Files that were not Japanese synced lyrics
    pub other: usize,
    /// Unreadable files
    pub error: usize,
}

impl OutcomeTally {
    /// Record one outcome
    pub fn record(&mut self, outcome: ProcessOutcome) {
        match outcome {
            ProcessOutcome::Success => self.success += 1,
            ProcessOutcome::Defect => self.defect += 1,
            ProcessOutcome::Other => self.other += 1,
            ProcessOutcome::Error => self.error += 1,
        }
    }

    /// Total files seen
    pub fn total(&self) -> usize {
        self.success + self.defect + self.other + self.error
    }
}

/// Result of rendering one file without touching it
enum Rendered {
    /// No synced lyrics or not Japanese
    NotApplicable,
    /// No lyric text at all
    Unreadable,
    /// Assembled annotated block
    Block {
        /// Original raw lyric text, kept for backup
        original: String,
        /// Final annotated text
        text: String,
        /// Whether all groups resolved without drift
        clean: bool,
    },
}

/// Main application controller for lyric annotation
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Annotation service built from the configured providers
    service: AnnotationService,
    // @field: Backup directory for this run, created on first use
    backup_dir: PathBuf,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let (converter, translator): (
            Arc<dyn PhoneticConverter>,
            Option<Arc<dyn ChineseTranslator>>,
        ) = match config.provider.kind {
            ConverterKind::Kakasi => (Arc::new(KakasiConverter::new()), None),
            ConverterKind::DeepSeek => {
                let client = Arc::new(DeepSeekClient::new(&config.provider));
                (
                    Arc::clone(&client) as Arc<dyn PhoneticConverter>,
                    Some(client as Arc<dyn ChineseTranslator>),
                )
            }
        };

        let service = AnnotationService::new(&config, converter, translator);

        Ok(Controller {
            config,
            service,
            backup_dir: FileManager::backup_dir_for_run(),
        })
    }

    /// Parser options derived from the configured heuristics
    fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            max_metadata_len: self.config.heuristics.max_metadata_len,
            sentinel_token: self.config.heuristics.sentinel_token.clone(),
        }
    }

    /// Render the annotated block for one file without writing anything
    async fn render(&self, input_file: &Path) -> Result<Rendered> {
        let original = match tag_store::read_lyrics(input_file)? {
            Some(text) => text,
            None => return Ok(Rendered::Unreadable),
        };

        let parsed = lyric_parser::parse_with(&original, &self.parser_options());
        if !parsed.invalid.is_empty() {
            info!(
                "Invalid lines in {:?}: {}",
                input_file,
                parsed.invalid.join(" | ")
            );
        }
        if parsed.pairs.is_empty() {
            info!("No synced lyrics: {:?}", input_file);
            return Ok(Rendered::NotApplicable);
        }
        if !lyric_parser::looks_japanese(
            &parsed.pairs,
            self.config.heuristics.kana_gate_window,
            self.config.heuristics.kana_gate_min,
        ) {
            info!("Not Japanese lyrics: {:?}", input_file);
            return Ok(Rendered::NotApplicable);
        }

        let groups = lyric_parser::group(&parsed.pairs);
        let report = self.service.annotate(&groups).await;

        let mut output = parsed.metadata;
        for line in &report.lines {
            if !output.contains(line) {
                output.push(line.clone());
            }
        }

        Ok(Rendered::Block {
            original,
            text: output.join("\n"),
            clean: report.is_clean(),
        })
    }

    /// Render one file and return the annotated text without writing.
    /// `None` when the file is not applicable or unreadable.
    pub async fn preview(&self, input_file: &Path) -> Result<Option<String>> {
        match self.render(input_file).await? {
            Rendered::Block { text, .. } => Ok(Some(text)),
            _ => Ok(None),
        }
    }

    /// Process one file end to end: read, annotate, back up, write.
    /// All abnormal content resolves to an outcome, never a panic.
    pub async fn process_file(&self, input_file: &Path) -> ProcessOutcome {
        if !FileManager::file_exists(input_file) || !tag_store::supported_format(input_file) {
            error!("Unsupported or missing file: {:?}", input_file);
            return ProcessOutcome::Error;
        }

        let rendered = match self.render(input_file).await {
            Ok(rendered) => rendered,
            Err(e) => {
                error!("Failed to read {:?}: {}", input_file, e);
                return ProcessOutcome::Error;
            }
        };

        let (original, text, clean) = match rendered {
            Rendered::NotApplicable => return ProcessOutcome::Other,
            Rendered::Unreadable => {
                error!("No lyric text found: {:?}", input_file);
                return ProcessOutcome::Error;
            }
            Rendered::Block {
                original,
                text,
                clean,
            } => (original, text, clean),
        };

        // Backups live next to the source files, one directory per run
        let backup_dir = match input_file.parent() {
            Some(parent) => parent.join(&self.backup_dir),
            None => self.backup_dir.clone(),
        };
        if let Err(e) = FileManager::backup_original(&backup_dir, input_file, &original) {
            warn!("Could not back up original lyrics of {:?}: {}", input_file, e);
        }

        if let Err(e) = tag_store::write_lyrics(input_file, &text) {
            error!("Failed to write lyrics to {:?}: {}", input_file, e);
            return ProcessOutcome::Error;
        }

        if clean {
            info!("Annotated: {:?}", input_file);
            ProcessOutcome::Success
        } else {
            info!("Annotated with drift: {:?}", input_file);
            ProcessOutcome::Defect
        }
    }

    /// Process a single input file
    pub async fn run(&self, input_file: &Path) -> Result<ProcessOutcome> {
        if !input_file.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }
        Ok(self.process_file(input_file).await)
    }

    /// Process every supported file under a directory concurrently.
    /// Each file is an independent engine invocation; one bad file never
    /// stops the rest.
    pub async fn run_folder(&self, input_dir: &Path) -> Result<OutcomeTally> {
        let files = FileManager::find_lyric_files(input_dir)?;
        if files.is_empty() {
            warn!("No supported lyric files under {:?}", input_dir);
            return Ok(OutcomeTally::default());
        }

        info!("Processing {} files", files.len());
        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let tally = Mutex::new(OutcomeTally::default());
        let tally_ref = &tally;
        let progress_ref = &progress;

        stream::iter(files)
            .for_each_concurrent(self.config.provider.concurrent_files, |file| async move {
                let outcome = self.process_file(&file).await;
                tally_ref.lock().record(outcome);
                progress_ref.inc(1);
            })
            .await;

        progress.finish_and_clear();
        let totals = *tally.lock();
        info!(
            "Processed {} files - success: {}, defect: {}, other: {}, error: {}",
            totals.total(),
            totals.success,
            totals.defect,
            totals.other,
            totals.error
        );

        Ok(totals)
    }
}
