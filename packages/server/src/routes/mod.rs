use axum::{Router, routing::post};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/submission", submission_routes())
}

fn submission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/run/{problem_id}",
            post(handlers::submission::run_solution),
        )
        .route(
            "/submit/{problem_id}",
            post(handlers::submission::submit_solution),
        )
}
