use std::time::{Duration, Instant};

use tracing::debug;

use common::backoff::calculate_backoff;

use crate::client::ExecutionService;
use crate::config::PollConfig;
use crate::error::ExecutorError;
use crate::models::{ExecutionResult, ExecutionToken, TokenState};

/// Drives `ExecutionService::poll_tokens` until every token is terminal.
///
/// Waits between attempts with exponential backoff and suspends rather than
/// spinning, so other tasks keep running. A wall-clock budget bounds the
/// total wait; dropping the returned future cancels the wait cleanly.
pub struct PollingScheduler {
    config: PollConfig,
}

impl PollingScheduler {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Poll until all tokens are terminal and return their results in token
    /// order. Fails with `Timeout` once the budget is exhausted.
    pub async fn wait_for_results(
        &self,
        service: &dyn ExecutionService,
        tokens: &[ExecutionToken],
    ) -> Result<Vec<ExecutionResult>, ExecutorError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let budget = Duration::from_millis(self.config.max_wait_ms);
        let started = Instant::now();
        let mut results: Vec<Option<ExecutionResult>> = vec![None; tokens.len()];
        let mut attempt: u8 = 0;

        loop {
            let states = service.poll_tokens(tokens).await?;
            if states.len() != tokens.len() {
                return Err(ExecutorError::BatchMismatch {
                    expected: tokens.len(),
                    actual: states.len(),
                });
            }

            for (slot, state) in results.iter_mut().zip(states) {
                if let TokenState::Finished(result) = state {
                    *slot = Some(result);
                }
            }

            let finished = results.iter().filter(|r| r.is_some()).count();
            debug!(attempt, finished, total = tokens.len(), "Poll round");

            if finished == tokens.len() {
                return Ok(results.into_iter().flatten().collect());
            }

            let elapsed = started.elapsed();
            if elapsed >= budget {
                return Err(ExecutorError::Timeout {
                    waited_ms: elapsed.as_millis() as u64,
                });
            }

            attempt = attempt.saturating_add(1);
            let delay = calculate_backoff(
                attempt,
                self.config.base_delay_ms,
                self.config.max_delay_ms,
            )
            .min(budget - elapsed);
            tokio::time::sleep(delay).await;
        }
    }
}
