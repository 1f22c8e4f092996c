pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod language;
pub mod models;
pub mod pipeline;
pub mod poll;
pub mod request;

pub use client::{ExecutionService, HttpExecutionClient};
pub use config::{ExecutorConfig, PollConfig};
pub use error::ExecutorError;
