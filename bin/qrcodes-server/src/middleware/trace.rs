//! Per-request trace ID and request/response logging.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

pub static X_TRACE_ID: &str = "x-trace-id";

/// JSON bodies up to this size are logged verbatim at debug level.
const MAX_LOGGED_BODY: usize = 1024;

pub async fn trace_middleware(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let start_time = Instant::now();

    // Reuse a caller-supplied trace ID when it is a valid UUID.
    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("→ request started");
        let header_value = HeaderValue::from_str(&trace_id.to_string()).ok();

        let (parts, body) = req.into_parts();
        let mut response = match read_request(body, state.config.max_body_bytes).await {
            Ok(bytes) => {
                log_body("request", &parts.headers, &bytes);
                let mut req = Request::from_parts(parts, Body::from(bytes));
                if let Some(value) = &header_value {
                    req.headers_mut().insert(X_TRACE_ID, value.clone());
                }
                let response = next.run(req).await;
                buffer_response(response).await
            }
            Err(err) => err.into_response(),
        };

        if let Some(value) = header_value {
            response.headers_mut().insert(X_TRACE_ID, value);
        }

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "← response finished"
        );
        response
    }
    .instrument(span)
    .await
}

/// Collect at most `limit` bytes of the request body.
async fn read_request(body: Body, limit: usize) -> Result<Bytes, ServerError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(limit, "request body too large");
            Err(ServerError::PayloadTooLarge(format!(
                "request body exceeds {limit} bytes"
            )))
        }
        Err(e) => {
            warn!(error = %e, "failed to read request body");
            Err(ServerError::BadRequest("failed to read request body".to_owned()))
        }
    }
}

async fn buffer_response(response: Response) -> Response {
    let (parts, body) = response.into_parts();
    match body.collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            log_body("response", &parts.headers, &bytes);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => ServerError::Internal(format!("failed to read response body: {e}")).into_response(),
    }
}

fn log_body(direction: &str, headers: &HeaderMap, bytes: &Bytes) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") && bytes.len() <= MAX_LOGGED_BODY {
        if let Ok(text) = std::str::from_utf8(bytes) {
            debug!(direction, body = %text, "body");
        }
    } else if !bytes.is_empty() {
        debug!(direction, content_type, size = bytes.len(), "body skipped");
    }
}

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use axum::routing::post;
    use axum::{Router, middleware};
    use qrcodes_core::SqlStore;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;

    async fn echo_app(max_body_bytes: usize) -> Router {
        let config = Config { max_body_bytes, ..Config::default() };
        let store = SqlStore::in_memory().await.unwrap();
        let state = Arc::new(AppState::new(config, store));
        Router::new()
            .route("/echo", post(|body: Bytes| async move { body }))
            .layer(middleware::from_fn_with_state(state.clone(), trace_middleware))
            .with_state(state)
    }

    fn post_bytes(len: usize) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/echo")
            .body(Body::from(vec![b'x'; len]))
            .unwrap()
    }

    #[tokio::test]
    async fn body_within_limit_reaches_handler() {
        let response = echo_app(64).await.oneshot(post_bytes(64)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(X_TRACE_ID));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.len(), 64);
    }

    #[tokio::test]
    async fn oversized_body_is_413_before_handler() {
        let response = echo_app(64).await.oneshot(post_bytes(65)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.headers().contains_key(X_TRACE_ID));
    }

    #[tokio::test]
    async fn valid_trace_id_is_reused() {
        let id = Uuid::new_v4().to_string();
        let mut request = post_bytes(1);
        request.headers_mut().insert(X_TRACE_ID, HeaderValue::from_str(&id).unwrap());
        let response = echo_app(64).await.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[X_TRACE_ID], id.as_str());
    }
}
