use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::judge;
use crate::models::submission::*;
use crate::state::AppState;

/// Execute code against a problem's sample test cases.
#[utoipa::path(
    post,
    path = "/run/{problem_id}",
    tag = "Submission",
    operation_id = "runSolution",
    summary = "Run code against the sample test cases",
    description = "Executes the given code against the problem's visible test cases and returns per-case results. Nothing is recorded.",
    params(
        ("problem_id" = i32, Path, description = "Problem ID")
    ),
    request_body = EvaluationRequest,
    responses(
        (status = 200, description = "Evaluation finished", body = RunResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, UNSUPPORTED_LANGUAGE)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Execution service failure (EXECUTION_FAILED)", body = ErrorBody),
        (status = 504, description = "Execution timed out (EXECUTION_TIMEOUT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(problem_id = %problem_id, user_id = auth_user.user_id))]
pub async fn run_solution(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(problem_id): Path<i32>,
    AppJson(payload): AppJson<EvaluationRequest>,
) -> Result<Json<RunResponse>, AppError> {
    validate_evaluation_request(&payload, state.config.submission.max_code_size)?;

    let outcome =
        judge::run_evaluation(&state, problem_id, &payload.code, &payload.language).await?;

    Ok(Json(RunResponse {
        success: outcome.aggregate.status.is_accepted(),
        runtime: outcome.aggregate.runtime_ms,
        memory: outcome.aggregate.memory_kb,
        test_cases: outcome
            .results
            .into_iter()
            .map(TestCaseResultDto::from)
            .collect(),
    }))
}

/// Submit a solution for judging against the hidden test cases.
#[utoipa::path(
    post,
    path = "/submit/{problem_id}",
    tag = "Submission",
    operation_id = "submitSolution",
    summary = "Submit a solution to a problem",
    description = "Judges the given code against the problem's hidden test cases, records the submission, and on acceptance adds the problem to the caller's solved set.",
    params(
        ("problem_id" = i32, Path, description = "Problem ID")
    ),
    request_body = EvaluationRequest,
    responses(
        (status = 200, description = "Submission judged", body = SubmitResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR, UNSUPPORTED_LANGUAGE)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Execution service failure (EXECUTION_FAILED)", body = ErrorBody),
        (status = 504, description = "Execution timed out (EXECUTION_TIMEOUT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(problem_id = %problem_id, user_id = auth_user.user_id))]
pub async fn submit_solution(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(problem_id): Path<i32>,
    AppJson(payload): AppJson<EvaluationRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    validate_evaluation_request(&payload, state.config.submission.max_code_size)?;

    let outcome = judge::submit_solution(
        &state,
        auth_user.user_id,
        problem_id,
        &payload.code,
        &payload.language,
    )
    .await?;

    Ok(Json(SubmitResponse {
        accepted: outcome.aggregate.status.is_accepted(),
        total_test_cases: outcome.test_cases_total,
        passed_test_cases: outcome.aggregate.test_cases_passed,
        runtime: outcome.aggregate.runtime_ms,
        memory: outcome.aggregate.memory_kb,
    }))
}
