// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request body extraction with JSON error bodies

use axum::extract::{rejection::JsonRejection, FromRequest};

use super::errors::ApiError;
use crate::imaging::MAX_IMAGE_SIZE;

/// Largest accepted request body: two base64-encoded images (source and
/// mask) at the decode cap, plus room for the other fields.
pub const MAX_REQUEST_BODY: usize = 2 * base64_len(MAX_IMAGE_SIZE) + 1024 * 1024;

const fn base64_len(bytes: usize) -> usize {
    (bytes + 2) / 3 * 4
}

/// `Json` extractor whose rejections render as [`ApiError`]
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidRequest(rejection.body_text())
        }
    }
}
