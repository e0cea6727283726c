// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Coordinate-space tagged rectangles
//!
//! Every rectangle carries its coordinate space in its type. A selection
//! captured on the canvas is a `Rectangle<DisplaySpace>`; only the mask
//! projector turns it into true-pixel coordinates.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Marker trait for coordinate spaces
pub trait CoordinateSpace: Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    const NAME: &'static str;
}

/// Rendered, possibly CSS-scaled, canvas coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplaySpace;

/// Native pixel grid of the stored image
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelSpace;

impl CoordinateSpace for DisplaySpace {
    const NAME: &'static str = "display";
}

impl CoordinateSpace for PixelSpace {
    const NAME: &'static str = "true-pixel";
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Point<S: CoordinateSpace> {
    pub x: f64,
    pub y: f64,
    #[serde(skip)]
    space: PhantomData<S>,
}

impl<S: CoordinateSpace> Point<S> {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }
}

/// Axis-aligned rectangle with non-negative extent.
///
/// Fields are private so the non-negative invariant cannot be broken after
/// construction; deserialization goes through [`Rectangle::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "", from = "RawRectangle")]
pub struct Rectangle<S: CoordinateSpace> {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(skip)]
    space: PhantomData<S>,
}

pub type DisplayRect = Rectangle<DisplaySpace>;
pub type TrueRect = Rectangle<PixelSpace>;

#[derive(Deserialize)]
struct RawRectangle {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl<S: CoordinateSpace> From<RawRectangle> for Rectangle<S> {
    fn from(raw: RawRectangle) -> Self {
        Self::new(raw.x, raw.y, raw.width, raw.height)
    }
}

impl<S: CoordinateSpace> Rectangle<S> {
    /// Create a rectangle, normalizing negative extents.
    ///
    /// A drag from right to left produces a negative width; the origin moves
    /// to the minimum corner and the extent becomes its absolute value.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        let (x, width) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (y, height) = if height < 0.0 {
            (y + height, -height)
        } else {
            (y, height)
        };
        Self {
            x,
            y,
            width,
            height,
            space: PhantomData,
        }
    }

    /// Rectangle spanned by two drag corners in any order
    pub fn from_corners(a: Point<S>, b: Point<S>) -> Self {
        Self::new(a.x, a.y, b.x - a.x, b.y - a.y)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// True when the rectangle has no area or carries non-finite values
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn space_name(&self) -> &'static str {
        S::NAME
    }
}

/// Integral rectangle in true-pixel space, already clipped to its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x
            && py >= self.y
            && (px as u64) < self.x as u64 + self.width as u64
            && (py as u64) < self.y as u64 + self.height as u64
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
