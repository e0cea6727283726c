// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Thumbnail generation endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info};

use super::request::GenerateImageRequest;
use super::response::GenerateImageResponse;
use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::http_server::AppState;
use crate::geometry::snap_dimensions;
use crate::prediction::PredictionRequest;

/// POST /api/generate - Generate a thumbnail from a text prompt
///
/// Pipeline:
/// 1. Validate request (400 on missing prompt)
/// 2. Snap the requested size onto the model lattice (400 on zero dimension)
/// 3. Create the prediction and poll until terminal
/// 4. Return the output URL
pub async fn generate_image_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    debug!(
        "Generation request received: prompt_len={}, size={:?}x{:?}",
        request.prompt.len(),
        request.width,
        request.height
    );

    request.validate()?;

    let requested = request.requested_size(state.thumbnail_size);
    let size = snap_dimensions(requested)?;

    let prediction =
        PredictionRequest::generation(&state.generation_model, request.prompt.trim(), size);
    let done = state.orchestrator.run(&prediction).await?;

    info!(
        "Thumbnail generated: id={}, requested={}, snapped={}, polls={}",
        done.id, requested, size, done.polls
    );

    Ok(Json(GenerateImageResponse {
        image_url: done.output_url,
        id: done.id,
        width: size.width,
        height: size.height,
    }))
}
