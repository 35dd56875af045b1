//! Liveness plus a database round-trip.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::warn;
use utoipa::OpenApi;

use crate::schemas::HealthResponse;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_health), components(schemas(HealthResponse)))]
pub struct HealthApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// 200 when the SQLite pool answers `SELECT 1`, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    )
)]
pub async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label, database) = match state.records.store().ping().await {
        Ok(()) => (StatusCode::OK, "ok", "ok"),
        Err(e) => {
            warn!(error = %e, "health check: database unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
        }
    };
    let body = HealthResponse {
        status: label.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        database: database.to_owned(),
    };
    (status, Json(body))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::Config;
    use qrcodes_core::SqlStore;

    async fn state() -> (Arc<AppState>, SqlStore) {
        let store = SqlStore::in_memory().await.unwrap();
        (Arc::new(AppState::new(Config::default(), store.clone())), store)
    }

    #[tokio::test]
    async fn healthy_database_reports_ok() {
        let (state, _) = state().await;
        let (status, Json(body)) = get_health(State(state)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "ok");
        assert!(!body.version.is_empty());
    }

    #[tokio::test]
    async fn closed_pool_is_503() {
        let (state, store) = state().await;
        store.close().await;
        let (status, Json(body)) = get_health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.database, "unreachable");
    }
}
