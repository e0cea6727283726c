// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Display-space selection to true-pixel mask projection
//!
//! Selections are always captured in display space (the rendered canvas,
//! possibly CSS-scaled) and converted here, and only here, into the source
//! image's native pixel grid. Horizontal and vertical scale factors are
//! computed independently so a canvas shown at a different aspect ratio than
//! the stored image still maps correctly.

use tracing::debug;

use super::bitmap::Mask;
use crate::geometry::{DisplayRect, GeometryError, ImageDimensions, PixelRect, TrueRect};

/// Independent horizontal and vertical display-to-true scale factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub fn between(
        canvas: ImageDimensions,
        true_size: ImageDimensions,
    ) -> Result<Self, GeometryError> {
        if canvas.is_empty() {
            return Err(GeometryError::UnresolvedCanvas {
                width: canvas.width,
                height: canvas.height,
            });
        }
        true_size.ensure_positive()?;

        Ok(Self {
            x: true_size.width as f64 / canvas.width as f64,
            y: true_size.height as f64 / canvas.height as f64,
        })
    }
}

/// Scale a display selection into true-pixel space, rounding each field.
///
/// The result is not clipped; see [`clip_to_image`].
pub fn scale_selection(selection: &DisplayRect, scale: ScaleFactors) -> TrueRect {
    TrueRect::new(
        (selection.x() * scale.x).round(),
        (selection.y() * scale.y).round(),
        (selection.width() * scale.x).round(),
        (selection.height() * scale.y).round(),
    )
}

/// Clip a true-pixel rectangle to `[0, width] x [0, height]`
pub fn clip_to_image(rect: &TrueRect, size: ImageDimensions) -> PixelRect {
    let max_x = size.width as f64;
    let max_y = size.height as f64;

    let x0 = rect.x().clamp(0.0, max_x);
    let y0 = rect.y().clamp(0.0, max_y);
    let x1 = rect.right().clamp(0.0, max_x);
    let y1 = rect.bottom().clamp(0.0, max_y);

    PixelRect {
        x: x0 as u32,
        y: y0 as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    }
}

/// Project a display selection to a clipped true-pixel rectangle.
///
/// # Errors
/// * `UnresolvedCanvas` - display size has a zero side
/// * `InvalidDimension` - true size has a zero side
/// * `DegenerateSelection` - the selection or its clipped projection has no area
pub fn project_rect(
    selection: &DisplayRect,
    canvas: ImageDimensions,
    true_size: ImageDimensions,
) -> Result<PixelRect, GeometryError> {
    let scale = ScaleFactors::between(canvas, true_size)?;

    if selection.is_degenerate() {
        return Err(GeometryError::DegenerateSelection {
            reason: format!(
                "selection {}x{} has no area",
                selection.width(),
                selection.height()
            ),
        });
    }

    let scaled = scale_selection(selection, scale);
    let clipped = clip_to_image(&scaled, true_size);

    if clipped.is_empty() {
        return Err(GeometryError::DegenerateSelection {
            reason: format!("selection does not overlap the {} image", true_size),
        });
    }

    debug!(
        "projected selection ({:.1},{:.1} {:.1}x{:.1}) on {} canvas -> ({},{} {}x{}) on {} image",
        selection.x(),
        selection.y(),
        selection.width(),
        selection.height(),
        canvas,
        clipped.x,
        clipped.y,
        clipped.width,
        clipped.height,
        true_size
    );

    Ok(clipped)
}

/// Project a display selection into a mask the size of the true image.
///
/// The returned mask always has exactly `true_size` dimensions, and the same
/// inputs always produce a pixel-identical mask.
pub fn project(
    selection: &DisplayRect,
    canvas: ImageDimensions,
    true_size: ImageDimensions,
) -> Result<Mask, GeometryError> {
    let region = project_rect(selection, canvas, true_size)?;
    Ok(Mask::from_rect(true_size, region))
}
