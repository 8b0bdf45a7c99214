use crate::AppState;
use crate::api::error::AppError;
use crate::utils::validation::validate_oid;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::Response,
};

/// `PUT /objects/{oid}` — streams one upload body into the store.
///
/// 200 with an empty body on success, including the no-op case where the
/// object is already stored. The body is never buffered whole; the transfer
/// service enforces the size cap and digest check chunk by chunk.
pub async fn upload_object(
    State(state): State<AppState>,
    Path(oid): Path<String>,
    body: Body,
) -> Result<StatusCode, AppError> {
    validate_oid(&oid).map_err(AppError::InvalidOid)?;

    state
        .transfers
        .receive_object(&oid, body.into_data_stream())
        .await?;

    Ok(StatusCode::OK)
}

/// `GET /objects/{oid}` — streams a stored object back as an opaque octet
/// body. 404 when the oid has never been published.
pub async fn download_object(
    State(state): State<AppState>,
    Path(oid): Path<String>,
) -> Result<Response, AppError> {
    validate_oid(&oid).map_err(AppError::InvalidOid)?;

    let stream = state.transfers.open_download(&oid).await?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            mime::APPLICATION_OCTET_STREAM.as_ref(),
        )
        .body(Body::from_stream(stream))
        .unwrap())
}
