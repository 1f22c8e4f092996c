mod common;

use std::sync::Arc;

use ::common::SubmissionStatus;
use sea_orm::{DatabaseConnection, EntityTrait};
use serde_json::{Value, json};

use crate::common::*;
use server::entity::submission;
use server::state::AppState;
use server::utils::jwt;

/// Serve the app on an ephemeral port and return its base URL.
async fn spawn_app(state: AppState) -> String {
    let app = server::build_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn setup(executor: Arc<dyn executor::ExecutionService>) -> (DatabaseConnection, String, i32, String) {
    let db = test_db().await;
    let user_id = seed_user(&db, "alice").await;
    let problem_id = seed_problem_with_cases(&db, "Two Sum", 1, 2).await;
    let base = spawn_app(app_state(db.clone(), executor)).await;
    let token = jwt::sign(user_id, "alice", JWT_SECRET).unwrap();
    (db, base, problem_id, token)
}

fn body(code: &str, language: &str) -> Value {
    json!({ "code": code, "language": language })
}

#[tokio::test]
async fn submit_returns_the_verdict_payload() {
    let (db, base, problem_id, token) =
        setup(Arc::new(ScriptedExecutor::accepting())).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/submission/submit/{problem_id}"))
        .bearer_auth(&token)
        .json(&body("print(input())", "python"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["accepted"], json!(true));
    assert_eq!(payload["total_test_cases"], json!(2));
    assert_eq!(payload["passed_test_cases"], json!(2));
    assert!(payload["runtime"].is_i64());
    assert!(payload["memory"].is_i64());

    let stored = submission::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(stored.status, SubmissionStatus::Accepted);
}

#[tokio::test]
async fn run_returns_per_case_results() {
    let (_db, base, problem_id, token) =
        setup(Arc::new(ScriptedExecutor::accepting())).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/submission/run/{problem_id}"))
        .bearer_auth(&token)
        // Alias spelling resolves like the canonical name
        .json(&body("int main() {}", "c++"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["success"], json!(true));
    let cases = payload["test_cases"].as_array().unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0]["passed"], json!(true));
    assert_eq!(cases[0]["status_id"], json!(3));
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let (_db, base, problem_id, _token) =
        setup(Arc::new(ScriptedExecutor::accepting())).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/submission/run/{problem_id}"))
        .json(&body("code", "cpp"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 401);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["code"], json!("TOKEN_MISSING"));
}

#[tokio::test]
async fn unsupported_language_is_a_bad_request() {
    let (db, base, problem_id, token) =
        setup(Arc::new(ScriptedExecutor::accepting())).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/submission/submit/{problem_id}"))
        .bearer_auth(&token)
        .json(&body("code", "cobol"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["code"], json!("UNSUPPORTED_LANGUAGE"));

    // Rejected before any record was created.
    assert!(submission::Entity::find().one(&db).await.unwrap().is_none());
}

#[tokio::test]
async fn blank_code_is_a_validation_error() {
    let (_db, base, problem_id, token) =
        setup(Arc::new(ScriptedExecutor::accepting())).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/submission/submit/{problem_id}"))
        .bearer_auth(&token)
        .json(&body("   ", "cpp"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn unknown_problem_is_not_found() {
    let (_db, base, _problem_id, token) =
        setup(Arc::new(ScriptedExecutor::accepting())).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/submission/submit/9999"))
        .bearer_auth(&token)
        .json(&body("code", "cpp"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn execution_failure_maps_to_bad_gateway_and_keeps_pending_record() {
    let (db, base, problem_id, token) = setup(Arc::new(ScriptedExecutor::failing())).await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/submission/submit/{problem_id}"))
        .bearer_auth(&token)
        .json(&body("code", "cpp"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["code"], json!("EXECUTION_FAILED"));

    let stored = submission::Entity::find().one(&db).await.unwrap().unwrap();
    assert_eq!(stored.status, SubmissionStatus::Pending);
}
