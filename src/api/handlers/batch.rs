use crate::AppState;
use crate::api::error::AppError;
use crate::models::{BatchRequest, BatchResponse};
use axum::{
    Json,
    extract::{Host, State},
    http::HeaderMap,
};

/// `POST /objects/batch` — negotiates per-object transfer actions.
///
/// Hrefs are built from the request's own host so clients behind port
/// forwards or proxies get URLs they can actually reach; a proxy that
/// terminates TLS is expected to set `x-forwarded-proto`.
pub async fn batch(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let base_url = format!("{}://{}", scheme, host);

    let response = state.negotiator.negotiate(&base_url, request).await?;
    Ok(Json(response))
}
