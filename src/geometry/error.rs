// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Geometry error types

use thiserror::Error;

/// Failures raised by dimension snapping and mask projection.
///
/// These are caught before anything is submitted to a remote model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A width or height of zero was supplied where a positive size is required
    #[error("invalid dimension: {width}x{height} (both sides must be > 0)")]
    InvalidDimension { width: u32, height: u32 },

    /// The display canvas has not been laid out yet (zero-sized)
    #[error("canvas display size {width}x{height} is unresolved")]
    UnresolvedCanvas { width: u32, height: u32 },

    /// The selection covers no pixels of the target image
    #[error("selection is degenerate: {reason}")]
    DegenerateSelection { reason: String },
}
