// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inpainting endpoint module
//!
//! Provides POST /api/edit for masked edits of an existing image.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::edit_image_handler;
pub use request::{EditImageRequest, MaskSource};
pub use response::EditImageResponse;
