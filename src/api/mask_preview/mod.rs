// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod handler;
pub mod request;
pub mod response;

pub use handler::mask_preview_handler;
pub use request::MaskPreviewRequest;
pub use response::MaskPreviewResponse;
