//! Receipt handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};

use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use penny_core::models::ReceiptExtraction;

/// POST /api/upload-receipt - Extract the total and store from a receipt image
///
/// The body is the raw image. Nothing is stored; the client decides whether
/// to record the result.
pub async fn upload_receipt(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ReceiptExtraction>, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_UPLOAD_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body or file too large (max 10MB)"))?;

    if bytes.is_empty() {
        return Err(AppError::bad_request("No image data provided"));
    }

    // OCR shells out and blocks
    let extractor = state.extractor.clone();
    let extraction = tokio::task::spawn_blocking(move || extractor.extract(&bytes)).await?;

    Ok(Json(extraction))
}
