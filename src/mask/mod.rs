// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Inpainting masks built from canvas selections

pub mod bitmap;
pub mod projector;

pub use bitmap::{Mask, EDIT, PRESERVE};
pub use projector::{clip_to_image, project, project_rect, scale_selection, ScaleFactors};
