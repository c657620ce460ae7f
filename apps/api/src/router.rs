use std::sync::Arc;

use axum::{
    Router,
    response::Html,
    routing::get,
};

use catalog_cell::router::catalog_routes;
use shared_config::AppConfig;
use visit_cell::router::visit_routes;

const LANDING_PAGE: &str = include_str!("../static/index.html");

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { Html(LANDING_PAGE) }))
        .route("/health", get(|| async { "Vet clinic API is running!" }))
        .merge(catalog_routes(state.clone()))
        .merge(visit_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::net::{IpAddr, Ipv4Addr};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppConfig> {
        Arc::new(AppConfig {
            supabase_url: String::new(),
            supabase_service_key: String::new(),
            api_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            api_port: 8000,
        })
    }

    #[tokio::test]
    async fn landing_page_is_served() {
        let response = create_router(test_state())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("<form"));
    }

    #[tokio::test]
    async fn cell_routes_are_mounted() {
        let response = create_router(test_state())
            .oneshot(Request::builder().uri("/doctors").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // No store configured, but the route exists.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
