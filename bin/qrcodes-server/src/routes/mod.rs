//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI spec endpoint (disable with `QRCODES_ENABLE_SWAGGER=false`)
//! - Landing page, service worker, `/static` assets and health routes
//! - QR-code record routes under `/api`

pub mod doc;
mod health;
mod index;
mod qrcodes;

use axum::{Router, middleware};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

// ── Router builder ────────────────────────────────────────────────────────────

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(index::router())
        .merge(health::router())
        .nest("/api", qrcodes::router())
        .nest_service("/static", ServeDir::new(&state.config.static_dir));

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(&state.config)))
        .layer(middleware::from_fn_with_state(state.clone(), trace::trace_middleware))
        .with_state(state)
}

#[cfg(test)]
mod test {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use qrcodes_core::SqlStore;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    async fn app() -> Router {
        let config = Config { enable_swagger: false, ..Config::default() };
        let store = SqlStore::in_memory().await.unwrap();
        build(Arc::new(AppState::new(config, store)))
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app.oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn serves_static_scripts() {
        let app = app().await;
        for path in ["/static/js/app.js", "/static/js/scanner.js", "/static/manifest.json"] {
            let response = get(app.clone(), path).await;
            assert_eq!(response.status(), StatusCode::OK, "{path}");
        }
        let response = get(app, "/static/js/missing.js").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn service_worker_served_from_root() {
        let response = get(app().await, "/sw.js").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/javascript")
        );
    }

    #[tokio::test]
    async fn health_route_checks_database() {
        let response = get(app().await, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
