use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SubmissionConfig {
    /// Maximum source size in bytes.
    pub max_code_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub submission: SubmissionConfig,
    pub executor: executor::ExecutorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("submission.max_code_size", 65536)?
            .set_default("executor.base_url", "http://127.0.0.1:2358")?
            .set_default("executor.request_timeout_ms", 10_000)?
            .set_default("executor.poll.base_delay_ms", 250)?
            .set_default("executor.poll.max_delay_ms", 2000)?
            .set_default("executor.poll.max_wait_ms", 30_000)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., CHICORY__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("CHICORY").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
