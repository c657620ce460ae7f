use std::sync::Arc;
use axum::{extract::State, Json};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{Doctor, Service};
use crate::services::CatalogService;

#[axum::debug_handler]
pub async fn list_doctors(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let service = CatalogService::new(&config)
        .map_err(|e| AppError::Database(e.to_string()))?;

    let doctors = service.list_doctors()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn list_services(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Service>>, AppError> {
    let service = CatalogService::new(&config)
        .map_err(|e| AppError::Database(e.to_string()))?;

    let services = service.list_services()
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    Ok(Json(services))
}
