// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Request to persist a mask for inspection via POST /api/mask-preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskPreviewRequest {
    /// Mask image as a data URI
    #[serde(default)]
    pub mask_data: String,

    /// Client timestamp in milliseconds, used in the file name
    #[serde(default)]
    pub timestamp: Option<u64>,
}

impl MaskPreviewRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.mask_data.trim().is_empty() {
            return Err(ApiError::MissingField("maskData"));
        }
        Ok(())
    }

    /// Client timestamp, or the current time when absent
    pub fn timestamp_or_now(&self) -> u64 {
        self.timestamp
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().max(0) as u64)
    }
}
