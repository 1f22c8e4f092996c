#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use executor::models::{
    ExecutionRequest, ExecutionResult, ExecutionToken, STATUS_ACCEPTED, STATUS_RUNTIME_ERROR,
    TokenState,
};
use executor::{ExecutionService, ExecutorConfig, ExecutorError, PollConfig};
use server::config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, SubmissionConfig,
};
use server::entity::{problem, test_case, user};
use server::state::AppState;

pub const JWT_SECRET: &str = "test-secret";

/// Fresh in-memory database with the schema synced.
///
/// A single pooled connection keeps every query on the same in-memory
/// instance.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .expect("Failed to open in-memory database");
    server::database::sync_schema(&db)
        .await
        .expect("Failed to sync schema");
    db
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors: CorsConfig {
                allow_origins: vec![],
                max_age: 3600,
            },
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.into(),
        },
        submission: SubmissionConfig {
            max_code_size: 65536,
        },
        executor: ExecutorConfig {
            base_url: "http://127.0.0.1:1".into(),
            auth_token: None,
            request_timeout_ms: 1000,
            poll: PollConfig {
                base_delay_ms: 1,
                max_delay_ms: 2,
                max_wait_ms: 1000,
            },
        },
    }
}

pub fn app_state(db: DatabaseConnection, executor: Arc<dyn ExecutionService>) -> AppState {
    AppState {
        db,
        executor,
        config: Arc::new(test_config()),
    }
}

pub fn accepted_result(time: f64, memory: i64) -> ExecutionResult {
    ExecutionResult {
        status_id: STATUS_ACCEPTED,
        time: Some(time),
        memory: Some(memory),
        stdout: Some("ok".into()),
        stderr: None,
    }
}

pub fn wrong_result(stderr: &str) -> ExecutionResult {
    ExecutionResult {
        status_id: 6,
        time: Some(0.01),
        memory: Some(128),
        stdout: Some("nope".into()),
        stderr: Some(stderr.into()),
    }
}

pub fn crashed_result(stderr: &str) -> ExecutionResult {
    ExecutionResult {
        status_id: STATUS_RUNTIME_ERROR,
        time: None,
        memory: None,
        stdout: None,
        stderr: Some(stderr.into()),
    }
}

/// Execution service double. Hands out one token per request and answers
/// polls with a scripted result per test case (cycling when the batch is
/// larger than the script).
pub struct ScriptedExecutor {
    script: Vec<ExecutionResult>,
    fail_submit: bool,
    pub batch_sizes: Mutex<Vec<usize>>,
}

impl ScriptedExecutor {
    /// Accepts every test case.
    pub fn accepting() -> Self {
        Self::with_script(vec![accepted_result(0.01, 256)])
    }

    pub fn with_script(script: Vec<ExecutionResult>) -> Self {
        Self {
            script,
            fail_submit: false,
            batch_sizes: Mutex::new(Vec::new()),
        }
    }

    /// Fails every batch dispatch.
    pub fn failing() -> Self {
        Self {
            script: vec![],
            fail_submit: true,
            batch_sizes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ExecutionService for ScriptedExecutor {
    async fn submit_batch(
        &self,
        requests: &[ExecutionRequest],
    ) -> Result<Vec<ExecutionToken>, ExecutorError> {
        if self.fail_submit {
            return Err(ExecutorError::Service {
                status: 503,
                detail: "unavailable".into(),
            });
        }
        self.batch_sizes.lock().unwrap().push(requests.len());
        Ok((0..requests.len())
            .map(|i| ExecutionToken(format!("t{i}")))
            .collect())
    }

    async fn poll_tokens(
        &self,
        tokens: &[ExecutionToken],
    ) -> Result<Vec<TokenState>, ExecutorError> {
        Ok(tokens
            .iter()
            .enumerate()
            .map(|(i, _)| TokenState::Finished(self.script[i % self.script.len()].clone()))
            .collect())
    }
}

pub async fn seed_user(db: &DatabaseConnection, username: &str) -> i32 {
    let model = user::ActiveModel {
        username: Set(username.to_string()),
        password: Set("argon2-hash".into()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.expect("Failed to seed user").id
}

pub async fn seed_problem(db: &DatabaseConnection, title: &str) -> i32 {
    let model = problem::ActiveModel {
        title: Set(title.to_string()),
        content: Set("Add two numbers.".into()),
        time_limit: Set(1000),
        memory_limit: Set(262_144),
        reference_solutions: Set(serde_json::json!({})),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.expect("Failed to seed problem").id
}

pub async fn seed_test_case(db: &DatabaseConnection, problem_id: i32, position: i32, sample: bool) {
    let model = test_case::ActiveModel {
        position: Set(position),
        input: Set(format!("in-{position}")),
        expected_output: Set(format!("out-{position}")),
        explanation: Set(None),
        is_sample: Set(sample),
        problem_id: Set(problem_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.expect("Failed to seed test case");
}

/// Seed a problem with `samples` visible and `hidden` hidden test cases.
pub async fn seed_problem_with_cases(
    db: &DatabaseConnection,
    title: &str,
    samples: i32,
    hidden: i32,
) -> i32 {
    let problem_id = seed_problem(db, title).await;
    for position in 0..samples {
        seed_test_case(db, problem_id, position, true).await;
    }
    for position in 0..hidden {
        seed_test_case(db, problem_id, samples + position, false).await;
    }
    problem_id
}
