// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image dimensions in either display or true pixel space

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build dimensions that are known to be positive on both axes
    pub fn positive(width: u32, height: u32) -> Result<Self, GeometryError> {
        let dims = Self { width, height };
        dims.ensure_positive()?;
        Ok(dims)
    }

    pub fn ensure_positive(&self) -> Result<(), GeometryError> {
        if self.width == 0 || self.height == 0 {
            return Err(GeometryError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Height divided by width
    pub fn aspect_ratio(&self) -> f64 {
        self.height as f64 / self.width as f64
    }

    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for ImageDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for ImageDimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}
