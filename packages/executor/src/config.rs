use serde::Deserialize;

/// Settings for the execution service client.
#[derive(Debug, Deserialize, Clone)]
pub struct ExecutorConfig {
    /// Base URL of the execution service, e.g. `http://127.0.0.1:2358`.
    pub base_url: String,
    /// Optional token sent as `X-Auth-Token` on every request.
    pub auth_token: Option<String>,
    /// Per-request HTTP timeout in milliseconds.
    pub request_timeout_ms: u64,
    pub poll: PollConfig,
}

/// Settings for the result polling loop.
#[derive(Debug, Deserialize, Clone)]
pub struct PollConfig {
    /// Delay before the second poll; doubles each attempt (jittered).
    pub base_delay_ms: u64,
    /// Upper bound for a single delay between polls.
    pub max_delay_ms: u64,
    /// Wall-clock budget for one batch before the wait is abandoned.
    pub max_wait_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 250,
            max_delay_ms: 2000,
            max_wait_ms: 30_000,
        }
    }
}
