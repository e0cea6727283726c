// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod edit_image;
pub mod errors;
pub mod extract;
pub mod generate_image;
pub mod http_server;
pub mod mask_preview;

pub use edit_image::{edit_image_handler, EditImageRequest, EditImageResponse};
pub use extract::{ApiJson, MAX_REQUEST_BODY};
pub use errors::{ApiError, ErrorResponse, TIMEOUT_MESSAGE};
pub use generate_image::{generate_image_handler, GenerateImageRequest, GenerateImageResponse};
pub use http_server::{create_app, start_server, AppState};
pub use mask_preview::{mask_preview_handler, MaskPreviewRequest, MaskPreviewResponse};
