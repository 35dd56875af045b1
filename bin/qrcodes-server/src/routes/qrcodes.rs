//! QR-code record endpoints, nested under `/api`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use qrcodes_core::QrCodeStats;
use qrcodes_core::schemas::{CreateRecord, PatchRecord, RecordResponse, ReplaceRecord, VerifyRequest};
use tracing::info;
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::extract::ApiJson;
use crate::schemas::{CreatedResponse, VerifyResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_records,
        create_record,
        get_record,
        replace_record,
        patch_record,
        delete_record,
        verify_content,
        get_stats
    ),
    components(schemas(
        CreateRecord,
        ReplaceRecord,
        PatchRecord,
        VerifyRequest,
        RecordResponse,
        CreatedResponse,
        VerifyResponse,
        QrCodeStats
    ))
)]
pub struct QrCodesApi;

/// Register record routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/qrcodes/", get(list_records).post(create_record))
        .route("/qrcodes/verify/", post(verify_content))
        .route("/qrcodes/stats/", get(get_stats))
        .route(
            "/qrcodes/{id}/",
            get(get_record)
                .put(replace_record)
                .patch(patch_record)
                .delete(delete_record),
        )
}

#[utoipa::path(
    get,
    path = "/api/qrcodes/",
    tag = "qrcodes",
    responses(
        (status = 200, description = "Records, newest first", body = Vec<RecordResponse>),
        (status = 500, description = "Database error"),
    )
)]
pub async fn list_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecordResponse>>, ServerError> {
    let records = state.records.list().await?;
    Ok(Json(records.iter().map(|r| r.to_response()).collect()))
}

#[utoipa::path(
    post,
    path = "/api/qrcodes/",
    tag = "qrcodes",
    request_body = CreateRecord,
    responses(
        (status = 201, description = "Record created", body = CreatedResponse),
        (status = 400, description = "Invalid fields or identifier already taken"),
        (status = 500, description = "Database error"),
    )
)]
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateRecord>,
) -> Result<(StatusCode, Json<CreatedResponse>), ServerError> {
    let record = state.records.create(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "QR code created".to_owned(),
            record: record.to_response(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/qrcodes/{id}/",
    tag = "qrcodes",
    params(("id" = i64, Path, description = "Record ID")),
    responses(
        (status = 200, description = "Record retrieved", body = RecordResponse),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn get_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RecordResponse>, ServerError> {
    Ok(Json(state.records.get(id).await?.to_response()))
}

#[utoipa::path(
    put,
    path = "/api/qrcodes/{id}/",
    tag = "qrcodes",
    params(("id" = i64, Path, description = "Record ID")),
    request_body = ReplaceRecord,
    responses(
        (status = 200, description = "Record replaced", body = RecordResponse),
        (status = 400, description = "Invalid fields or identifier already taken"),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn replace_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<ReplaceRecord>,
) -> Result<Json<RecordResponse>, ServerError> {
    Ok(Json(state.records.replace(id, req).await?.to_response()))
}

#[utoipa::path(
    patch,
    path = "/api/qrcodes/{id}/",
    tag = "qrcodes",
    params(("id" = i64, Path, description = "Record ID")),
    request_body = PatchRecord,
    responses(
        (status = 200, description = "Record updated", body = RecordResponse),
        (status = 400, description = "Invalid fields or identifier already taken"),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn patch_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<PatchRecord>,
) -> Result<Json<RecordResponse>, ServerError> {
    Ok(Json(state.records.patch(id, req).await?.to_response()))
}

#[utoipa::path(
    delete,
    path = "/api/qrcodes/{id}/",
    tag = "qrcodes",
    params(("id" = i64, Path, description = "Record ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Record not found"),
    )
)]
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    state.records.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve scanned text to a record. A miss is a 200 with `found: false`.
#[utoipa::path(
    post,
    path = "/api/qrcodes/verify/",
    tag = "qrcodes",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Lookup outcome", body = VerifyResponse),
        (status = 400, description = "Content missing or blank"),
    )
)]
pub async fn verify_content(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ServerError> {
    let (content, resolved) = state.records.verify(req).await?;
    let body = match resolved {
        Some(resolved) => {
            info!(
                id = resolved.record.id,
                matched_by = resolved.matched_by.as_str(),
                "QR code verified"
            );
            VerifyResponse {
                found: true,
                message: "QR code found".to_owned(),
                record: Some(resolved.record.to_response()),
                content: None,
            }
        }
        None => {
            info!(content = %content, "QR code not found");
            VerifyResponse {
                found: false,
                message: "QR code not found".to_owned(),
                record: None,
                content: Some(content),
            }
        }
    };
    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/qrcodes/stats/",
    tag = "qrcodes",
    responses(
        (status = 200, description = "Creation counts", body = QrCodeStats),
        (status = 500, description = "Database error"),
    )
)]
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<QrCodeStats>, ServerError> {
    Ok(Json(state.records.stats(Utc::now()).await?))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
