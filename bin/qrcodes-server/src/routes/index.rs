//! Landing page and service worker.
//!
//! Both are embedded in the binary. The worker is served from `/` so its
//! scope covers the whole app; everything else lives under `/static`.

use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

static INDEX_HTML: &str = include_str!("../../static/index.html");
static SERVICE_WORKER_JS: &str = include_str!("../../static/sw.js");

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/sw.js", get(service_worker))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn service_worker() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/javascript; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        SERVICE_WORKER_JS,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn serves_html_page() {
        let Html(page) = index().await;
        assert!(page.contains("<html"));
        assert!(page.contains("/static/js/app.js"));
        assert!(page.contains("/static/manifest.json"));
    }

    #[tokio::test]
    async fn service_worker_is_javascript() {
        let response = service_worker().await.into_response();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );
    }
}
