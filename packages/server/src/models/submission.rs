use executor::models::ExecutionResult;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body shared by the run and submit endpoints.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct EvaluationRequest {
    /// Source code to execute.
    #[schema(example = "#include <iostream>\nint main() { return 0; }")]
    pub code: String,
    /// Language name or accepted alias (e.g., "cpp", "c++").
    #[schema(example = "cpp")]
    pub language: String,
}

/// Outcome of one test case execution, as returned by the run endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TestCaseResultDto {
    /// Execution service verdict class for this case.
    #[schema(example = 3)]
    pub status_id: i32,
    pub passed: bool,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    /// CPU time in milliseconds, when reported.
    #[schema(example = 12)]
    pub time: Option<i32>,
    /// Peak memory in kilobytes, when reported.
    #[schema(example = 512)]
    pub memory: Option<i64>,
}

impl From<ExecutionResult> for TestCaseResultDto {
    fn from(result: ExecutionResult) -> Self {
        Self {
            status_id: result.status_id,
            passed: result.is_accepted(),
            time: result.time.map(|t| (t * 1000.0).round() as i32),
            memory: result.memory,
            stdout: result.stdout,
            stderr: result.stderr,
        }
    }
}

/// Response of the run endpoint. Nothing is persisted on this path.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RunResponse {
    /// True when every executed test case was accepted.
    pub success: bool,
    /// Per-case results, in test-case order.
    pub test_cases: Vec<TestCaseResultDto>,
    /// Summed accepted-case runtime in milliseconds.
    #[schema(example = 24)]
    pub runtime: i32,
    /// Peak accepted-case memory in kilobytes.
    #[schema(example = 1024)]
    pub memory: i32,
}

/// Response of the submit endpoint.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmitResponse {
    pub accepted: bool,
    #[schema(example = 10)]
    pub total_test_cases: i32,
    #[schema(example = 10)]
    pub passed_test_cases: i32,
    /// Summed accepted-case runtime in milliseconds.
    #[schema(example = 120)]
    pub runtime: i32,
    /// Peak accepted-case memory in kilobytes.
    #[schema(example = 2048)]
    pub memory: i32,
}

/// Validate an evaluation request body.
pub fn validate_evaluation_request(
    req: &EvaluationRequest,
    max_code_size: usize,
) -> Result<(), AppError> {
    if req.code.trim().is_empty() {
        return Err(AppError::Validation("Code is required".into()));
    }

    if req.code.len() > max_code_size {
        return Err(AppError::Validation(format!(
            "Code size ({} bytes) exceeds maximum ({} bytes)",
            req.code.len(),
            max_code_size
        )));
    }

    if req.language.trim().is_empty() {
        return Err(AppError::Validation("Language is required".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(code: &str, language: &str) -> EvaluationRequest {
        EvaluationRequest {
            code: code.to_string(),
            language: language.to_string(),
        }
    }

    #[test]
    fn accepts_a_valid_request() {
        assert!(validate_evaluation_request(&request("int main() {}", "cpp"), 1024).is_ok());
    }

    #[test]
    fn rejects_blank_code() {
        let err = validate_evaluation_request(&request("   \n", "cpp"), 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_blank_language() {
        let err = validate_evaluation_request(&request("code", "  "), 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_oversized_code() {
        let err = validate_evaluation_request(&request("aaaaaaaaaa", "cpp"), 4).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn run_result_dto_converts_time_to_milliseconds() {
        let dto = TestCaseResultDto::from(ExecutionResult {
            status_id: 3,
            time: Some(0.042),
            memory: Some(640),
            stdout: Some("ok".into()),
            stderr: None,
        });
        assert!(dto.passed);
        assert_eq!(dto.time, Some(42));
        assert_eq!(dto.memory, Some(640));
    }
}
