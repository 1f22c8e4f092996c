use crate::models::{ExecutionLimits, ExecutionRequest, TestCaseData};

/// Build one execution request per test case, preserving input order.
///
/// Order matters downstream: results come back and are reduced in the same
/// order the requests were built.
pub fn build_requests(
    cases: &[TestCaseData],
    source_code: &str,
    language_id: i32,
    limits: ExecutionLimits,
) -> Vec<ExecutionRequest> {
    cases
        .iter()
        .map(|case| ExecutionRequest {
            source_code: source_code.to_string(),
            language_id,
            stdin: case.input.clone(),
            expected_output: case.expected_output.clone(),
            cpu_time_limit: limits.cpu_time_limit,
            memory_limit: limits.memory_limit,
        })
        .collect()
}
