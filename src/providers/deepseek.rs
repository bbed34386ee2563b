use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::app_config::ProviderSettings;
use crate::errors::ProviderError;
use crate::providers::{ChineseTranslator, PhoneticConverter};

// @const: One-line-in, one-line-out prompts. Keeping the line count is the
// contract the recovery layer checks against.
const KANA_PROMPT: &str = "You will receive Japanese song lyrics, one line per line. \
Convert each line to its hiragana reading, stripping stray characters at the ends of each line. \
Reply with the converted lines only, joined by newlines, nothing else. \
The output must contain exactly one line per input line.";

const ROMA_PROMPT: &str = "You will receive Japanese song lyrics, one line per line. \
Convert each line to Hepburn romaji with syllables separated by spaces, stripping stray \
characters at the ends of each line. Reply with the converted lines only, joined by newlines, \
nothing else. The output must contain exactly one line per input line.";

const TRANS_PROMPT: &str = "You will receive Japanese song lyrics, one line per line. \
Translate each line into Chinese, stripping stray characters at the ends of each line. \
Reply with the translated lines only, joined by newlines, nothing else. \
The output must contain exactly one line per input line.";

/// Client for a DeepSeek (OpenAI-compatible) chat-completions endpoint
#[derive(Debug)]
pub struct DeepSeekClient {
    /// Base URL of the API
    endpoint: String,
    /// Bearer token
    api_key: String,
    /// Model name
    model: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts for transient failures
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system or user)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// Chat request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    /// Model name
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Streaming disabled; the whole completion is needed at once
    stream: bool,
}

/// Chat response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Completion choices
    choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// The completion message
    message: ChatMessage,
}

impl DeepSeekClient {
    /// Create a client from provider settings
    pub fn new(settings: &ProviderSettings) -> Self {
        Self {
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            client: Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs))
                .build()
                .unwrap_or_default(),
            max_retries: settings.max_retries,
            backoff_base_ms: 1000,
        }
    }

    /// Complete one chat request with retry logic for transient failures
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            stream: false,
        };

        let mut attempt = 0;
        let mut last_error =
            ProviderError::RequestFailed("no request attempted".to_string());

        while attempt <= self.max_retries {
            if attempt > 0 {
                let backoff = self.backoff_base_ms * (1u64 << (attempt - 1));
                debug!("Retrying DeepSeek request in {}ms (attempt {})", backoff, attempt + 1);
                tokio::time::sleep(Duration::from_millis(backoff)).await;
            }
            attempt += 1;

            let response = match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    last_error = ProviderError::ConnectionError(e.to_string());
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let parsed: ChatResponse = response
                    .json()
                    .await
                    .map_err(|e| ProviderError::ParseError(e.to_string()))?;
                return parsed
                    .choices
                    .first()
                    .map(|choice| choice.message.content.clone())
                    .ok_or_else(|| {
                        ProviderError::ParseError("response carried no choices".to_string())
                    });
            }

            let message = response.text().await.unwrap_or_default();
            match status.as_u16() {
                401 | 403 => {
                    // Not transient; retrying a bad key is pointless
                    return Err(ProviderError::AuthenticationError(message));
                }
                429 => {
                    last_error = ProviderError::RateLimitExceeded(message);
                }
                code if code >= 500 => {
                    last_error = ProviderError::ApiError {
                        status_code: code,
                        message,
                    };
                }
                code => {
                    return Err(ProviderError::ApiError {
                        status_code: code,
                        message,
                    });
                }
            }
        }

        warn!("DeepSeek request failed after {} attempts", attempt);
        Err(last_error)
    }

    /// Send lines through one conversion prompt and split the reply back
    /// into lines. The caller is responsible for count verification.
    async fn convert_lines(
        &self,
        system_prompt: &str,
        lines: &[String],
    ) -> Result<Vec<String>, ProviderError> {
        if lines.is_empty() {
            return Ok(Vec::new());
        }
        let user_prompt = lines.join("\n");
        let reply = self.complete(system_prompt, &user_prompt).await?;
        Ok(reply
            .replace("\n\n", "\n")
            .trim_matches('\n')
            .split('\n')
            .map(|line| line.trim().to_string())
            .collect())
    }
}

#[async_trait]
impl PhoneticConverter for DeepSeekClient {
    async fn to_kana(&self, lines: &[String]) -> Result<Vec<String>, ProviderError> {
        self.convert_lines(KANA_PROMPT, lines).await
    }

    async fn to_romanization(&self, lines: &[String]) -> Result<Vec<String>, ProviderError> {
        self.convert_lines(ROMA_PROMPT, lines).await
    }
}

#[async_trait]
impl ChineseTranslator for DeepSeekClient {
    async fn translate(&self, lines: &[String]) -> Result<Vec<String>, ProviderError> {
        self.convert_lines(TRANS_PROMPT, lines).await
    }
}
