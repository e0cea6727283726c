// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::geometry::{GeometryError, ImageDimensions};
use crate::imaging::ImageError;
use crate::prediction::PredictionError;
use crate::session::SessionError;
use crate::storage::StorageError;

/// Fixed message returned when polling exceeds its bound
pub const TIMEOUT_MESSAGE: &str = "Prediction timed out";

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    MissingField(&'static str),
    InvalidRequest(String),
    InvalidGeometry(GeometryError),
    InvalidImage(String),
    MaskDimensionMismatch {
        image: ImageDimensions,
        mask: ImageDimensions,
    },
    PayloadTooLarge(String),
    SessionBusy(String),
    RemoteServiceError(String),
    Timeout,
    ServiceUnavailable(String),
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            ApiError::MissingField(field) => (format!("Missing required field: {}", field), None),
            ApiError::InvalidRequest(msg) => ("Invalid request".to_string(), Some(msg.clone())),
            ApiError::InvalidGeometry(e) => ("Invalid selection geometry".to_string(), Some(e.to_string())),
            ApiError::InvalidImage(msg) => ("Invalid image data".to_string(), Some(msg.clone())),
            ApiError::MaskDimensionMismatch { image, mask } => (
                "Mask dimensions do not match image".to_string(),
                Some(format!("image is {}, mask is {}", image, mask)),
            ),
            ApiError::PayloadTooLarge(msg) => {
                ("Request body too large".to_string(), Some(msg.clone()))
            }
            ApiError::SessionBusy(session_id) => (
                "An edit is already in progress for this session".to_string(),
                Some(session_id.clone()),
            ),
            ApiError::RemoteServiceError(msg) => {
                ("Remote prediction failed".to_string(), Some(msg.clone()))
            }
            ApiError::Timeout => (TIMEOUT_MESSAGE.to_string(), None),
            ApiError::ServiceUnavailable(msg) => ("Service unavailable".to_string(), Some(msg.clone())),
            ApiError::InternalError(msg) => ("Internal error".to_string(), Some(msg.clone())),
        };

        ErrorResponse { error, details }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidRequest(_)
            | ApiError::InvalidGeometry(_)
            | ApiError::InvalidImage(_)
            | ApiError::MaskDimensionMismatch { .. } => 400,
            ApiError::SessionBusy(_) => 409,
            ApiError::PayloadTooLarge(_) => 413,
            ApiError::RemoteServiceError(_) | ApiError::Timeout | ApiError::InternalError(_) => {
                500
            }
            ApiError::ServiceUnavailable(_) => 503,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MissingField(field) => write!(f, "Missing required field: {}", field),
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::InvalidGeometry(e) => write!(f, "Invalid geometry: {}", e),
            ApiError::InvalidImage(msg) => write!(f, "Invalid image: {}", msg),
            ApiError::MaskDimensionMismatch { image, mask } => {
                write!(f, "Mask is {} but image is {}", mask, image)
            }
            ApiError::PayloadTooLarge(msg) => write!(f, "Request body too large: {}", msg),
            ApiError::SessionBusy(id) => write!(f, "Session {} already has an edit in flight", id),
            ApiError::RemoteServiceError(msg) => write!(f, "Remote service error: {}", msg),
            ApiError::Timeout => f.write_str(TIMEOUT_MESSAGE),
            ApiError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<GeometryError> for ApiError {
    fn from(e: GeometryError) -> Self {
        ApiError::InvalidGeometry(e)
    }
}

impl From<ImageError> for ApiError {
    fn from(e: ImageError) -> Self {
        ApiError::InvalidImage(e.to_string())
    }
}

impl From<PredictionError> for ApiError {
    fn from(e: PredictionError) -> Self {
        match e {
            PredictionError::Timeout { .. } => ApiError::Timeout,
            PredictionError::RemoteService(msg) => ApiError::RemoteServiceError(msg),
            other => ApiError::RemoteServiceError(other.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::SubmissionInFlight { session_id } => ApiError::SessionBusy(session_id),
            SessionError::Geometry(g) => ApiError::InvalidGeometry(g),
            other => ApiError::InvalidRequest(other.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Image(img) => img.into(),
            StorageError::Io(io) => ApiError::InternalError(io.to_string()),
        }
    }
}
