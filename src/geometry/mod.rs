// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Coordinate spaces, dimensions and generation-size snapping

pub mod dimensions;
pub mod error;
pub mod rect;
pub mod snap;

pub use dimensions::ImageDimensions;
pub use error::GeometryError;
pub use rect::{
    CoordinateSpace, DisplayRect, DisplaySpace, PixelRect, PixelSpace, Point, Rectangle, TrueRect,
};
pub use snap::{nearest_lattice_value, snap, snap_dimensions, SIZE_LATTICE};
