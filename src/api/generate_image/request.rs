// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Thumbnail generation request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::geometry::ImageDimensions;

/// Request for thumbnail generation via POST /api/generate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    /// Text prompt describing the desired image
    #[serde(default)]
    pub prompt: String,

    /// Requested width before snapping (defaults to the configured thumbnail width)
    #[serde(default)]
    pub width: Option<u32>,

    /// Requested height before snapping
    #[serde(default)]
    pub height: Option<u32>,
}

impl GenerateImageRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.prompt.trim().is_empty() {
            return Err(ApiError::MissingField("prompt"));
        }
        Ok(())
    }

    /// Requested size, falling back per axis to `default`
    pub fn requested_size(&self, default: ImageDimensions) -> ImageDimensions {
        ImageDimensions::new(
            self.width.unwrap_or(default.width),
            self.height.unwrap_or(default.height),
        )
    }
}
