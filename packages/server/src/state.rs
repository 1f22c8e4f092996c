use std::sync::Arc;

use executor::ExecutionService;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub executor: Arc<dyn ExecutionService>,
    pub config: Arc<AppConfig>,
}
