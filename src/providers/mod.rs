/*!
 * Provider implementations for phonetic conversion and translation.
 *
 * This module contains the backends that supply readings, romanizations and
 * translations for resolved root lines:
 * - Kakasi: local transliteration, no network
 * - DeepSeek: OpenAI-compatible chat-completions endpoint
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Supplies phonetic renderings of Japanese text.
///
/// Both methods are batch-oriented: implementations should return exactly one
/// output line per input line, but callers must not rely on it — a remote
/// backend may miscount, and the annotation layer treats that as a
/// recoverable anomaly rather than trusting the result.
#[async_trait]
pub trait PhoneticConverter: Send + Sync + Debug {
    /// Kana readings for the given lines
    async fn to_kana(&self, lines: &[String]) -> Result<Vec<String>, ProviderError>;

    /// Romanizations for the given lines
    async fn to_romanization(&self, lines: &[String]) -> Result<Vec<String>, ProviderError>;
}

/// Supplies Chinese translations of Japanese text, batch-oriented with the
/// same count caveat as [`PhoneticConverter`]
#[async_trait]
pub trait ChineseTranslator: Send + Sync + Debug {
    /// Translations for the given lines
    async fn translate(&self, lines: &[String]) -> Result<Vec<String>, ProviderError>;
}

pub mod deepseek;
pub mod kks;
