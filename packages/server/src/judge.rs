//! Orchestration of the submission evaluation pipeline.
//!
//! The run path evaluates sample cases and persists nothing. The submit path
//! creates a durable Pending submission before dispatch, judges against the
//! hidden cases, writes the terminal verdict exactly once and updates the
//! caller's solved set idempotently.

use chrono::Utc;
use executor::aggregate::{self, Aggregate};
use executor::language::{self, Language};
use executor::models::{ExecutionLimits, ExecutionResult, TestCaseData};
use executor::pipeline;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument, warn};

use common::SubmissionStatus;

use crate::entity::{problem, solved_problem, submission, test_case};
use crate::error::AppError;
use crate::state::AppState;

/// Outcome of the run path: the reduced verdict plus every per-case result.
pub struct RunOutcome {
    pub aggregate: Aggregate,
    pub results: Vec<ExecutionResult>,
}

/// Outcome of the submit path.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub aggregate: Aggregate,
    pub test_cases_total: i32,
}

/// Find a problem by ID or return 404.
pub async fn find_problem<C: ConnectionTrait>(db: &C, id: i32) -> Result<problem::Model, AppError> {
    problem::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem not found".into()))
}

/// Load one side of a problem's test cases, ordered by position.
async fn load_test_cases<C: ConnectionTrait>(
    db: &C,
    problem_id: i32,
    sample: bool,
) -> Result<Vec<TestCaseData>, AppError> {
    let cases = test_case::Entity::find()
        .filter(test_case::Column::ProblemId.eq(problem_id))
        .filter(test_case::Column::IsSample.eq(sample))
        .order_by_asc(test_case::Column::Position)
        .all(db)
        .await?;

    Ok(cases
        .into_iter()
        .map(|tc| TestCaseData {
            input: tc.input,
            expected_output: tc.expected_output,
        })
        .collect())
}

fn limits_for(problem: &problem::Model) -> ExecutionLimits {
    ExecutionLimits {
        cpu_time_limit: Some(problem.time_limit as f64 / 1000.0),
        memory_limit: Some(problem.memory_limit),
    }
}

/// Evaluate code against a problem's sample cases. Persists nothing,
/// regardless of outcome.
#[instrument(skip(state, code, language_name))]
pub async fn run_evaluation(
    state: &AppState,
    problem_id: i32,
    code: &str,
    language_name: &str,
) -> Result<RunOutcome, AppError> {
    let language = language::resolve(language_name)?;
    let problem = find_problem(&state.db, problem_id).await?;
    let cases = load_test_cases(&state.db, problem_id, true).await?;

    let results = pipeline::evaluate(
        state.executor.as_ref(),
        &state.config.executor.poll,
        code,
        language,
        &cases,
        limits_for(&problem),
    )
    .await?;

    let aggregate = aggregate::reduce(&results);
    Ok(RunOutcome { aggregate, results })
}

/// Judge a submission against a problem's hidden cases and record the
/// verdict.
///
/// The Pending row is inserted before the batch is dispatched, so a failed
/// or interrupted evaluation still leaves an inspectable record. It is
/// never transitioned to a terminal status by a failed attempt.
#[instrument(skip(state, code, language_name))]
pub async fn submit_solution(
    state: &AppState,
    user_id: i32,
    problem_id: i32,
    code: &str,
    language_name: &str,
) -> Result<SubmitOutcome, AppError> {
    let language = language::resolve(language_name)?;
    let problem = find_problem(&state.db, problem_id).await?;
    let cases = load_test_cases(&state.db, problem_id, false).await?;

    let pending =
        create_pending_submission(&state.db, user_id, problem_id, language, code, &cases).await?;

    let results = match pipeline::evaluate(
        state.executor.as_ref(),
        &state.config.executor.poll,
        code,
        language,
        &cases,
        limits_for(&problem),
    )
    .await
    {
        Ok(results) => results,
        Err(e) => {
            warn!(
                submission_id = pending.id,
                error = %e,
                "Evaluation failed; submission left pending"
            );
            return Err(e.into());
        }
    };

    let aggregate = aggregate::reduce(&results);
    finalize_submission(&state.db, pending.id, &aggregate).await?;

    if aggregate.status.is_accepted() {
        mark_problem_solved(&state.db, user_id, problem_id).await?;
    }

    info!(
        submission_id = pending.id,
        status = %aggregate.status,
        passed = aggregate.test_cases_passed,
        total = cases.len(),
        "Submission judged"
    );

    Ok(SubmitOutcome {
        aggregate,
        test_cases_total: cases.len() as i32,
    })
}

/// Insert the durable Pending record for a submission about to be judged.
pub async fn create_pending_submission<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    problem_id: i32,
    language: Language,
    code: &str,
    cases: &[TestCaseData],
) -> Result<submission::Model, AppError> {
    let new_submission = submission::ActiveModel {
        code: Set(code.to_string()),
        language: Set(language.name.to_string()),
        status: Set(SubmissionStatus::Pending),
        test_cases_total: Set(cases.len() as i32),
        test_cases_passed: Set(0),
        runtime: Set(None),
        memory: Set(None),
        error_message: Set(None),
        user_id: Set(user_id),
        problem_id: Set(problem_id),
        created_at: Set(Utc::now()),
        judged_at: Set(None),
        ..Default::default()
    };

    Ok(new_submission.insert(db).await?)
}

/// Write the terminal verdict onto a Pending submission.
///
/// The update is filtered on `status = Pending`, so terminal fields are
/// written at most once. Returns whether this call applied the write.
pub async fn finalize_submission<C: ConnectionTrait>(
    db: &C,
    submission_id: i32,
    aggregate: &Aggregate,
) -> Result<bool, AppError> {
    let result = submission::Entity::update_many()
        .col_expr(submission::Column::Status, Expr::value(aggregate.status))
        .col_expr(
            submission::Column::TestCasesPassed,
            Expr::value(aggregate.test_cases_passed),
        )
        .col_expr(
            submission::Column::Runtime,
            Expr::value(Some(aggregate.runtime_ms)),
        )
        .col_expr(
            submission::Column::Memory,
            Expr::value(Some(aggregate.memory_kb)),
        )
        .col_expr(
            submission::Column::ErrorMessage,
            Expr::value(aggregate.error_message.clone()),
        )
        .col_expr(submission::Column::JudgedAt, Expr::value(Some(Utc::now())))
        .filter(submission::Column::Id.eq(submission_id))
        .filter(submission::Column::Status.eq(SubmissionStatus::Pending))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        warn!(submission_id, "Submission already finalized; write skipped");
        return Ok(false);
    }
    Ok(true)
}

/// Add a problem to a user's solved set.
///
/// A single conflict-ignoring insert on the composite key, so concurrent
/// accepted submissions of the same problem produce exactly one entry.
pub async fn mark_problem_solved<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    problem_id: i32,
) -> Result<(), AppError> {
    let entry = solved_problem::ActiveModel {
        user_id: Set(user_id),
        problem_id: Set(problem_id),
        solved_at: Set(Utc::now()),
        ..Default::default()
    };

    solved_problem::Entity::insert(entry)
        .on_conflict(
            OnConflict::columns([
                solved_problem::Column::UserId,
                solved_problem::Column::ProblemId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    Ok(())
}
