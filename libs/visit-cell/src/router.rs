use std::sync::Arc;
use axum::{routing::post, Router};
use shared_config::AppConfig;

use crate::handlers;

pub fn visit_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/visit", post(handlers::register_visit))
        .with_state(state)
}
