use tracing::{info, instrument};
use uuid::Uuid;

use crate::client::ExecutionService;
use crate::config::PollConfig;
use crate::error::ExecutorError;
use crate::language::Language;
use crate::models::{ExecutionLimits, ExecutionResult, TestCaseData};
use crate::poll::PollingScheduler;
use crate::request::build_requests;

/// Build one request per test case, dispatch the batch and await every
/// result.
///
/// Results come back in test-case order. An empty case list skips the
/// service round-trip entirely.
#[instrument(skip_all, fields(language = language.name, test_cases = cases.len()))]
pub async fn evaluate(
    service: &dyn ExecutionService,
    poll: &PollConfig,
    code: &str,
    language: Language,
    cases: &[TestCaseData],
    limits: ExecutionLimits,
) -> Result<Vec<ExecutionResult>, ExecutorError> {
    if cases.is_empty() {
        return Ok(Vec::new());
    }

    let evaluation_id = Uuid::new_v4();
    let requests = build_requests(cases, code, language.id, limits);

    let tokens = service.submit_batch(&requests).await?;
    info!(%evaluation_id, tokens = tokens.len(), "Evaluation batch dispatched");

    let scheduler = PollingScheduler::new(poll.clone());
    let results = scheduler.wait_for_results(service, &tokens).await?;
    info!(%evaluation_id, results = results.len(), "Evaluation batch complete");

    Ok(results)
}
