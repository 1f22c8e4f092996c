use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution service status id: waiting in queue.
pub const STATUS_IN_QUEUE: i32 = 1;
/// Execution service status id: currently running.
pub const STATUS_PROCESSING: i32 = 2;
/// Execution service status id: run succeeded and output matched.
pub const STATUS_ACCEPTED: i32 = 3;
/// Execution service status id: the program crashed at runtime.
pub const STATUS_RUNTIME_ERROR: i32 = 4;

/// Input and expected output for one test case execution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestCaseData {
    /// Data fed to the program on stdin.
    pub input: String,
    /// Expected stdout for comparison.
    pub expected_output: String,
}

/// Per-request resource limits, applied uniformly across a batch.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecutionLimits {
    /// CPU time limit in seconds.
    pub cpu_time_limit: Option<f64>,
    /// Memory limit in kilobytes.
    pub memory_limit: Option<i32>,
}

/// One test case execution as sent to the execution service.
#[derive(Clone, Debug, Serialize)]
pub struct ExecutionRequest {
    pub source_code: String,
    pub language_id: i32,
    pub stdin: String,
    pub expected_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_time_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<i32>,
}

/// Opaque handle identifying one in-flight execution request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionToken(pub String);

impl fmt::Display for ExecutionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal result of one execution.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionResult {
    pub status_id: i32,
    /// CPU time in seconds, as reported by the service.
    pub time: Option<f64>,
    /// Peak memory in kilobytes.
    pub memory: Option<i64>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl ExecutionResult {
    pub fn is_accepted(&self) -> bool {
        self.status_id == STATUS_ACCEPTED
    }

    /// Reported CPU time converted to milliseconds (0 when absent).
    pub fn time_ms(&self) -> f64 {
        self.time.unwrap_or(0.0) * 1000.0
    }
}

/// Outcome of one poll round for a single token.
#[derive(Clone, Debug)]
pub enum TokenState {
    /// The service has not finished this execution yet.
    InProgress,
    Finished(ExecutionResult),
}
