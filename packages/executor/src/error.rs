use thiserror::Error;

/// Errors from the execution service client and polling loop.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The requested language is not in the language table.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Transport-level failure talking to the execution service.
    #[error("Execution service transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The execution service answered with a non-success status.
    #[error("Execution service returned HTTP {status}: {detail}")]
    Service { status: u16, detail: String },

    /// The service returned a different number of entries than requested.
    #[error("Execution service batch mismatch: expected {expected} entries, got {actual}")]
    BatchMismatch { expected: usize, actual: usize },

    /// The polling budget was exhausted before every token became terminal.
    #[error("Execution results not ready after {waited_ms} ms")]
    Timeout { waited_ms: u64 },
}
