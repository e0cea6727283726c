// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

/// Response from thumbnail generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    /// URL of the generated image reported by the prediction service
    pub image_url: String,
    /// Prediction id
    pub id: String,
    /// Snapped width sent to the model
    pub width: u32,
    /// Snapped height sent to the model
    pub height: u32,
}
