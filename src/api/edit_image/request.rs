// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inpainting request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::geometry::{DisplayRect, ImageDimensions};

/// Request for an inpainting edit via POST /api/edit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditImageRequest {
    /// Text prompt describing the edit
    #[serde(default)]
    pub prompt: String,

    /// Source image as a data URI
    #[serde(default)]
    pub image: String,

    /// Precomputed mask as a data URI (white = edit)
    #[serde(default)]
    pub mask: Option<String>,

    /// Selection drawn on the canvas, in display pixels
    #[serde(default)]
    pub selection: Option<DisplayRect>,

    /// Rendered canvas size the selection was drawn on
    #[serde(default)]
    pub display_size: Option<ImageDimensions>,

    /// Expected true width of the source image
    #[serde(default)]
    pub width: Option<u32>,

    /// Expected true height of the source image
    #[serde(default)]
    pub height: Option<u32>,

    /// Editor session id; one edit per session may be in flight
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Where the mask for an edit comes from
#[derive(Debug, Clone, PartialEq)]
pub enum MaskSource<'a> {
    /// Project a display-space selection against the decoded image size
    Selection {
        selection: &'a DisplayRect,
        display_size: ImageDimensions,
    },
    /// Use a client-rendered mask as-is
    DataUri(&'a str),
}

impl EditImageRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.prompt.trim().is_empty() {
            return Err(ApiError::MissingField("prompt"));
        }
        if self.image.trim().is_empty() {
            return Err(ApiError::MissingField("image"));
        }
        self.mask_source()?;
        Ok(())
    }

    /// Resolve the mask source; a selection takes precedence over a supplied mask
    pub fn mask_source(&self) -> Result<MaskSource<'_>, ApiError> {
        if let (Some(selection), Some(display_size)) = (&self.selection, self.display_size) {
            return Ok(MaskSource::Selection {
                selection,
                display_size,
            });
        }
        match self.mask.as_deref().map(str::trim) {
            Some(mask) if !mask.is_empty() => Ok(MaskSource::DataUri(mask)),
            _ => Err(ApiError::MissingField("mask")),
        }
    }

    /// Check client-declared width/height against the decoded image
    pub fn check_declared_size(&self, actual: ImageDimensions) -> Result<(), ApiError> {
        let width_ok = self.width.map_or(true, |w| w == actual.width);
        let height_ok = self.height.map_or(true, |h| h == actual.height);
        if width_ok && height_ok {
            return Ok(());
        }
        Err(ApiError::InvalidRequest(format!(
            "declared size {}x{} does not match image size {}",
            self.width.map_or("?".to_string(), |w| w.to_string()),
            self.height.map_or("?".to_string(), |h| h.to_string()),
            actual
        )))
    }
}
