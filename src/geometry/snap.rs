// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Aspect-ratio-preserving dimension snapping onto the model size lattice

use tracing::debug;

use super::dimensions::ImageDimensions;
use super::error::GeometryError;

/// Edge lengths the diffusion models accept, ascending
pub const SIZE_LATTICE: [u32; 16] = [
    64, 128, 192, 256, 320, 384, 448, 512, 576, 640, 704, 768, 832, 896, 960, 1024,
];

/// Lattice value closest to `value`.
///
/// Scans ascending and only replaces the best candidate on a strictly smaller
/// distance, so the smaller lattice value wins ties.
pub fn nearest_lattice_value(value: f64) -> u32 {
    let mut best = SIZE_LATTICE[0];
    let mut best_distance = (value - best as f64).abs();
    for &candidate in &SIZE_LATTICE[1..] {
        let distance = (value - candidate as f64).abs();
        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}

pub fn is_lattice_value(value: u32) -> bool {
    SIZE_LATTICE.binary_search(&value).is_ok()
}

fn aspect_error(candidate_width: u32, candidate_height: u32, target_ratio: f64) -> f64 {
    (candidate_height as f64 / candidate_width as f64 - target_ratio).abs()
}

/// Snap a requested size to the lattice pair that best preserves its aspect ratio.
///
/// Two candidates are built: one anchored on the nearest lattice width, one on
/// the nearest lattice height. The candidate with the smaller `|h/w - ratio|`
/// wins; on equal error the width-anchored candidate is returned.
pub fn snap(width: u32, height: u32) -> Result<(u32, u32), GeometryError> {
    if width == 0 || height == 0 {
        return Err(GeometryError::InvalidDimension { width, height });
    }

    let w = width as f64;
    let h = height as f64;
    let ratio = h / w;

    let nearest_width = nearest_lattice_value(w);
    let scaled_height = (nearest_width as f64 * h / w).round();
    let width_first = (nearest_width, nearest_lattice_value(scaled_height));

    let nearest_height = nearest_lattice_value(h);
    let scaled_width = (nearest_height as f64 * w / h).round();
    let height_first = (nearest_lattice_value(scaled_width), nearest_height);

    let width_first_error = aspect_error(width_first.0, width_first.1, ratio);
    let height_first_error = aspect_error(height_first.0, height_first.1, ratio);

    let chosen = if height_first_error < width_first_error {
        height_first
    } else {
        width_first
    };

    debug!(
        "snap {}x{} -> {}x{} (width-first {:?} err={:.4}, height-first {:?} err={:.4})",
        width,
        height,
        chosen.0,
        chosen.1,
        width_first,
        width_first_error,
        height_first,
        height_first_error
    );

    Ok(chosen)
}

/// [`snap`] over [`ImageDimensions`]
pub fn snap_dimensions(requested: ImageDimensions) -> Result<ImageDimensions, GeometryError> {
    snap(requested.width, requested.height).map(ImageDimensions::from)
}
