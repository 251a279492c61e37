use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use warehouse_infra::StoreError;

use crate::context::RequestContext;

/// Store failures are transport-level errors, never a rejected request.
pub fn store_error_to_response(ctx: &RequestContext, err: StoreError) -> axum::response::Response {
    tracing::error!(request_id = %ctx.request_id(), error = %err, "store failure");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({
            "error": "store_error",
            "message": err.to_string(),
            "request_id": ctx.request_id().to_string(),
        })),
    )
        .into_response()
}

/// A warehouse call that never completed (its blocking task panicked or was
/// cancelled).
pub fn join_error_to_response(ctx: &RequestContext, err: tokio::task::JoinError) -> axum::response::Response {
    tracing::error!(request_id = %ctx.request_id(), error = %err, "warehouse task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({
            "error": "internal_error",
            "message": "request could not be completed",
            "request_id": ctx.request_id().to_string(),
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
