// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};

use super::request::MaskPreviewRequest;
use super::response::MaskPreviewResponse;
use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::http_server::AppState;
use crate::imaging::DataUri;

/// POST /api/mask-preview - Save a mask so it can be inspected in a browser
pub async fn mask_preview_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MaskPreviewRequest>,
) -> Result<Json<MaskPreviewResponse>, ApiError> {
    request.validate()?;

    let mask = DataUri::parse(&request.mask_data)?;
    let stored = state
        .previews
        .save(&mask.bytes, request.timestamp_or_now())
        .await?;

    Ok(Json(MaskPreviewResponse {
        path: stored.served_path,
    }))
}
