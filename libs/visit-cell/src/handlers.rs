use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::VisitRequest;
use crate::services::validation::validate_visit_request;
use crate::services::{SupabaseVisitStore, VisitRegistrar};

pub const VISIT_REGISTERED_MESSAGE: &str = "Visit registered successfully";

/// `POST /visit`. The request is validated in full before a store session is
/// opened; the session lives only as long as this call.
#[axum::debug_handler]
pub async fn register_visit(
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<VisitRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let visit = validate_visit_request(request)?;

    let store = SupabaseVisitStore::open(&config)
        .map_err(|e| AppError::Database(e.to_string()))?;

    VisitRegistrar::new(store).register_visit(visit).await?;

    Ok(Json(json!({
        "message": VISIT_REGISTERED_MESSAGE
    })))
}
