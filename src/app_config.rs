use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Output line kinds in emission order, e.g. [chin, hira, kanji]
    #[serde(default = "default_output_order")]
    pub output_order: Vec<OutputKind>,

    /// Phonetic/translation provider settings
    #[serde(default)]
    pub provider: ProviderSettings,

    /// Heuristic constants for parsing and resolution
    #[serde(default)]
    pub heuristics: HeuristicsConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// One kind of output line per timestamp
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    // @kind: Original-language (kanji) line
    Kanji,
    // @kind: Kana reading line
    Hira,
    // @kind: Chinese translation line
    Chin,
    // @kind: Romanization line
    Roma,
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Kanji => "kanji",
            Self::Hira => "hira",
            Self::Chin => "chin",
            Self::Roma => "roma",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for OutputKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "kanji" => Ok(Self::Kanji),
            "hira" => Ok(Self::Hira),
            "chin" => Ok(Self::Chin),
            "roma" => Ok(Self::Roma),
            _ => Err(anyhow!("Invalid output kind: {}", s)),
        }
    }
}

/// Converter backend type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    // @provider: Local kakasi conversion (no network, no translation)
    #[default]
    Kakasi,
    // @provider: DeepSeek chat-completions endpoint
    DeepSeek,
}

impl ConverterKind {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Kakasi => "Kakasi",
            Self::DeepSeek => "DeepSeek",
        }
    }
}

impl std::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kakasi => write!(f, "kakasi"),
            Self::DeepSeek => write!(f, "deepseek"),
        }
    }
}

impl std::str::FromStr for ConverterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "kakasi" => Ok(Self::Kakasi),
            "deepseek" => Ok(Self::DeepSeek),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderSettings {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub kind: ConverterKind,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Request timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Attempts per chunk when the provider miscounts lines
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    // @field: Lines per provider request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    // @field: Files processed concurrently in folder mode
    #[serde(default = "default_concurrent_files")]
    pub concurrent_files: usize,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ConverterKind::default(),
            api_key: String::new(),
            endpoint: default_endpoint(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            batch_size: default_batch_size(),
            concurrent_files: default_concurrent_files(),
        }
    }
}

/// Heuristic constants. These mirror the tuned values of the resolution
/// heuristics; change them only with a corpus to validate against.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HeuristicsConfig {
    /// How many leading synced lines the Japanese gate inspects
    #[serde(default = "default_kana_gate_window")]
    pub kana_gate_window: usize,

    /// Minimum kana-bearing lines within the window
    #[serde(default = "default_kana_gate_min")]
    pub kana_gate_min: usize,

    /// Metadata lines at or above this length are dropped as noise
    #[serde(default = "default_max_metadata_len")]
    pub max_metadata_len: usize,

    /// Content equal to this token marks an intentionally blank synced line
    #[serde(default = "default_sentinel_token")]
    pub sentinel_token: String,

    /// Minimum language-id confidence for promoting a translation candidate
    /// to root (0.0 accepts any positive detection)
    #[serde(default)]
    pub chinese_confidence_floor: f64,
}

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self {
            kana_gate_window: default_kana_gate_window(),
            kana_gate_min: default_kana_gate_min(),
            max_metadata_len: default_max_metadata_len(),
            sentinel_token: default_sentinel_token(),
            chinese_confidence_floor: 0.0,
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warn level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output_order: default_output_order(),
            provider: ProviderSettings::default(),
            heuristics: HeuristicsConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Parse a dash-separated order string such as `chin-hira-kanji`
    pub fn parse_order(order: &str) -> Result<Vec<OutputKind>> {
        let kinds: Result<Vec<OutputKind>> = order
            .split('-')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse())
            .collect();
        let kinds = kinds?;
        if kinds.is_empty() {
            return Err(anyhow!("Output order must name at least one kind"));
        }
        Ok(kinds)
    }

    /// Whether Chinese-translation handling is active for this run
    pub fn translation_enabled(&self) -> bool {
        self.output_order.contains(&OutputKind::Chin)
    }

    /// Validate the configuration, returning actionable messages
    pub fn validate(&self) -> Result<()> {
        if self.output_order.is_empty() {
            return Err(anyhow!("output_order must not be empty"));
        }
        for (i, kind) in self.output_order.iter().enumerate() {
            if self.output_order[..i].contains(kind) {
                return Err(anyhow!("output_order lists '{}' more than once", kind));
            }
        }
        if self.provider.kind == ConverterKind::DeepSeek && self.provider.api_key.trim().is_empty() {
            return Err(anyhow!("DeepSeek provider requires a non-empty api_key"));
        }
        if self.provider.batch_size == 0 {
            return Err(anyhow!("provider.batch_size must be at least 1"));
        }
        if self.provider.timeout_secs == 0 {
            return Err(anyhow!("provider.timeout_secs must be at least 1"));
        }
        if self.provider.concurrent_files == 0 {
            return Err(anyhow!("provider.concurrent_files must be at least 1"));
        }
        if self.heuristics.kana_gate_min == 0
            || self.heuristics.kana_gate_min > self.heuristics.kana_gate_window
        {
            return Err(anyhow!(
                "heuristics.kana_gate_min must be between 1 and kana_gate_window"
            ));
        }
        Ok(())
    }
}

fn default_output_order() -> Vec<OutputKind> {
    vec![OutputKind::Chin, OutputKind::Hira, OutputKind::Kanji]
}

fn default_endpoint() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_batch_size() -> usize {
    40
}

fn default_concurrent_files() -> usize {
    4
}

fn default_kana_gate_window() -> usize {
    16
}

fn default_kana_gate_min() -> usize {
    3
}

fn default_max_metadata_len() -> usize {
    100
}

fn default_sentinel_token() -> String {
    "//".to_string()
}
