// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inpainting endpoint handler

use axum::{extract::State, Json};
use tracing::{debug, info};

use super::request::{EditImageRequest, MaskSource};
use super::response::EditImageResponse;
use crate::api::errors::ApiError;
use crate::api::extract::ApiJson;
use crate::api::http_server::AppState;
use crate::imaging::DataUri;
use crate::mask::project;
use crate::prediction::PredictionRequest;

/// POST /api/edit - Inpaint the masked region of an image
///
/// Pipeline:
/// 1. Validate request (400 on missing prompt, image or mask)
/// 2. Reject when no inpainting model is configured (503)
/// 3. Claim the session's in-flight slot (409 if an edit is already running)
/// 4. Decode the source image to learn its true pixel size
/// 5. Project the selection into a mask, or check the supplied mask's size
/// 6. Create the prediction and poll until terminal
pub async fn edit_image_handler(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EditImageRequest>,
) -> Result<Json<EditImageResponse>, ApiError> {
    debug!(
        "Edit request received: prompt_len={}, session={:?}, selection={}",
        request.prompt.len(),
        request.session_id,
        request.selection.is_some()
    );

    request.validate()?;

    let model = state.inpaint_model.clone().ok_or_else(|| {
        ApiError::ServiceUnavailable("INPAINT_MODEL_VERSION is not configured".to_string())
    })?;

    // Held until the response is produced; dropping releases the slot
    let _guard = match request.session_id.as_deref() {
        Some(id) if !id.trim().is_empty() => Some(state.sessions.try_begin(id)?),
        _ => None,
    };

    let source = DataUri::parse(&request.image)?.with_detected_mime()?;
    let (_, image_info) = source.decode_image()?;
    let true_size = image_info.dimensions();
    request.check_declared_size(true_size)?;

    let mask_uri = match request.mask_source()? {
        MaskSource::Selection {
            selection,
            display_size,
        } => project(selection, display_size, true_size)?.to_data_uri()?,
        MaskSource::DataUri(mask) => {
            let mask = DataUri::parse(mask)?.with_detected_mime()?;
            let (_, mask_info) = mask.decode_image()?;
            let mask_size = mask_info.dimensions();
            if mask_size != true_size {
                return Err(ApiError::MaskDimensionMismatch {
                    image: true_size,
                    mask: mask_size,
                });
            }
            mask.to_string()
        }
    };

    let prediction = PredictionRequest::inpaint(
        &model,
        request.prompt.trim(),
        source.to_string(),
        mask_uri,
        true_size,
    );
    let done = state.orchestrator.run(&prediction).await?;

    info!(
        "Edit completed: id={}, image={}, polls={}",
        done.id,
        true_size,
        done.polls
    );

    Ok(Json(EditImageResponse {
        image_url: done.output_url,
    }))
}
