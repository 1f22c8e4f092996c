use common::SubmissionStatus;

use crate::models::{ExecutionResult, STATUS_ACCEPTED, STATUS_RUNTIME_ERROR};

/// Submission-level verdict reduced from an ordered list of per-test-case
/// results.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregate {
    pub status: SubmissionStatus,
    pub test_cases_passed: i32,
    /// Summed accepted-case runtime in milliseconds.
    pub runtime_ms: i32,
    /// Peak accepted-case memory in kilobytes.
    pub memory_kb: i32,
    pub error_message: Option<String>,
}

/// Reduce ordered per-test-case results into one verdict.
///
/// Every result is inspected; there is no early exit. A later non-accepted
/// case overwrites the classification and message of an earlier one, so the
/// last failure in scan order wins. An empty list is vacuously accepted.
pub fn reduce(results: &[ExecutionResult]) -> Aggregate {
    let mut status = SubmissionStatus::Accepted;
    let mut passed = 0;
    let mut runtime = 0.0f64;
    let mut memory: i64 = 0;
    let mut error_message = None;

    for result in results {
        if result.status_id == STATUS_ACCEPTED {
            passed += 1;
            runtime += result.time_ms();
            memory = memory.max(result.memory.unwrap_or(0));
        } else if result.status_id == STATUS_RUNTIME_ERROR {
            status = SubmissionStatus::RuntimeError;
            error_message = result.stderr.clone();
        } else {
            status = SubmissionStatus::WrongAnswer;
            error_message = result.stderr.clone();
        }
    }

    Aggregate {
        status,
        test_cases_passed: passed,
        runtime_ms: runtime.round() as i32,
        memory_kb: memory.clamp(0, i32::MAX as i64) as i32,
        error_message,
    }
}
