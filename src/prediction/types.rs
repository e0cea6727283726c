// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Remote prediction types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::geometry::ImageDimensions;

/// Lifecycle status reported by the prediction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Starting,
    Processing,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Starting => "starting",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Succeeded => "succeeded",
            PredictionStatus::Failed => "failed",
            PredictionStatus::Canceled => "canceled",
            PredictionStatus::Unknown => "unknown",
        }
    }
}

/// Prediction as returned by create and get calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub status: PredictionStatus,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl Prediction {
    pub fn new(id: impl Into<String>, status: PredictionStatus) -> Self {
        Self {
            id: id.into(),
            status,
            output: None,
            error: None,
        }
    }

    pub fn with_output(mut self, output: Value) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(Value::String(error.into()));
        self
    }

    /// Explicit error payload, if the service sent a non-empty one
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// First output URL; output may be a single string or a list of strings
    pub fn output_url(&self) -> Option<String> {
        match self.output.as_ref()? {
            Value::String(url) => Some(url.trim().to_string()).filter(|u| !u.is_empty()),
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .find(|u| !u.is_empty())
                .map(str::to_string),
            _ => None,
        }
    }
}

/// Body of a create-prediction call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Model version hash, or `owner/model` for an official model
    pub version: String,
    pub input: Map<String, Value>,
}

impl PredictionRequest {
    /// Text-to-image request at snapped dimensions
    pub fn generation(version: &str, prompt: &str, size: ImageDimensions) -> Self {
        let mut input = Map::new();
        input.insert("prompt".to_string(), Value::from(prompt));
        input.insert("width".to_string(), Value::from(size.width));
        input.insert("height".to_string(), Value::from(size.height));
        Self {
            version: version.to_string(),
            input,
        }
    }

    /// Inpainting request; image and mask are data URIs of equal pixel size
    pub fn inpaint(
        version: &str,
        prompt: &str,
        image_uri: String,
        mask_uri: String,
        size: ImageDimensions,
    ) -> Self {
        let mut input = Map::new();
        input.insert("prompt".to_string(), Value::from(prompt));
        input.insert("image".to_string(), Value::String(image_uri));
        input.insert("mask".to_string(), Value::String(mask_uri));
        input.insert("width".to_string(), Value::from(size.width));
        input.insert("height".to_string(), Value::from(size.height));
        Self {
            version: version.to_string(),
            input,
        }
    }

    /// Whether `version` names an official model (`owner/name`)
    pub fn targets_model(&self) -> bool {
        self.version.contains('/')
    }
}

/// Successful prediction outcome
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedPrediction {
    pub id: String,
    pub output_url: String,
    /// Number of status polls issued after creation
    pub polls: u32,
}

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("prediction request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("prediction service returned {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("prediction failed: {0}")]
    RemoteService(String),

    #[error("prediction did not finish after {attempts} polls")]
    Timeout { attempts: u32 },

    #[error("prediction {0} succeeded without an output URL")]
    MissingOutput(String),
}
