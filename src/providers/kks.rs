use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::PhoneticConverter;

/// Local phonetic converter backed by the kakasi transliteration tables.
///
/// Always returns exactly one output line per input line and never fails;
/// it cannot translate, so it only implements [`PhoneticConverter`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KakasiConverter;

impl KakasiConverter {
    /// Create a new converter
    pub fn new() -> Self {
        KakasiConverter
    }
}

#[async_trait]
impl PhoneticConverter for KakasiConverter {
    async fn to_kana(&self, lines: &[String]) -> Result<Vec<String>, ProviderError> {
        Ok(lines
            .iter()
            .map(|line| kakasi::convert(line).hiragana)
            .collect())
    }

    async fn to_romanization(&self, lines: &[String]) -> Result<Vec<String>, ProviderError> {
        Ok(lines
            .iter()
            .map(|line| kakasi::convert(line).romaji)
            .collect())
    }
}
