/*!
 * Chunked provider invocation with count-mismatch recovery.
 *
 * A provider is asked for one output line per input line, but a remote model
 * may drop or merge lines. Each chunk is retried a bounded number of times;
 * whatever stays unresolved is reported back as a count, never as an error.
 */

use std::future::Future;
use log::warn;

use crate::errors::ProviderError;

/// Result of pushing a line batch through a provider
#[derive(Debug)]
pub struct BatchOutcome {
    /// One slot per input line, `None` where no trustworthy output arrived
    pub resolved: Vec<Option<String>>,
    /// Number of lines that stayed unresolved after all attempts
    pub unresolved: usize,
}

/// Convert lines through `call`, chunk by chunk, verifying the line count of
/// every response. A chunk whose response count differs from the request is
/// retried up to `max_attempts` times; a chunk that never resolves leaves its
/// slots as `None` and is tallied in `unresolved`.
pub async fn convert_with_recovery<F, Fut>(
    lines: &[String],
    batch_size: usize,
    max_attempts: u32,
    call: F,
) -> BatchOutcome
where
    F: Fn(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<String>, ProviderError>>,
{
    let batch_size = batch_size.max(1);
    let max_attempts = max_attempts.max(1);
    let mut resolved: Vec<Option<String>> = vec![None; lines.len()];
    let mut unresolved = 0;

    for (chunk_index, chunk) in lines.chunks(batch_size).enumerate() {
        let offset = chunk_index * batch_size;
        let mut filled = false;

        for attempt in 1..=max_attempts {
            match call(chunk.to_vec()).await {
                Ok(outputs) if outputs.len() == chunk.len() => {
                    for (i, output) in outputs.into_iter().enumerate() {
                        resolved[offset + i] = Some(output);
                    }
                    filled = true;
                    break;
                }
                Ok(outputs) => {
                    let mismatch = ProviderError::CountMismatch {
                        requested: chunk.len(),
                        received: outputs.len(),
                    };
                    warn!("{} (attempt {}/{})", mismatch, attempt, max_attempts);
                }
                Err(e) => {
                    warn!(
                        "Provider call failed (attempt {}/{}): {}",
                        attempt, max_attempts, e
                    );
                }
            }
        }

        if !filled {
            unresolved += chunk.len();
        }
    }

    BatchOutcome { resolved, unresolved }
}
