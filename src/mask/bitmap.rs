// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Binary inpainting mask bitmap

use image::{DynamicImage, GrayImage, Luma};

use crate::geometry::{ImageDimensions, PixelRect};
use crate::imaging::{encode_png, DataUri, ImageError};

/// Pixel value for regions the model must keep
pub const PRESERVE: u8 = 0;
/// Pixel value for regions the model may repaint
pub const EDIT: u8 = 255;

/// Single-rectangle binary mask in true-pixel space.
///
/// Black everywhere except one white rectangle. Pixels are only ever 0 or
/// 255; there is no anti-aliasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    image: GrayImage,
    region: PixelRect,
}

impl Mask {
    /// Synthesize a mask of `size` with `region` filled white.
    ///
    /// `region` must already be clipped to `size`; anything outside is ignored.
    pub fn from_rect(size: ImageDimensions, region: PixelRect) -> Self {
        let mut image = GrayImage::from_pixel(size.width, size.height, Luma([PRESERVE]));

        let x_end = region.x.saturating_add(region.width).min(size.width);
        let y_end = region.y.saturating_add(region.height).min(size.height);
        for y in region.y.min(y_end)..y_end {
            for x in region.x.min(x_end)..x_end {
                image.put_pixel(x, y, Luma([EDIT]));
            }
        }

        let region = PixelRect {
            x: region.x.min(x_end),
            y: region.y.min(y_end),
            width: x_end - region.x.min(x_end),
            height: y_end - region.y.min(y_end),
        };

        Self { image, region }
    }

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.image.width(), self.image.height())
    }

    /// The white (editable) rectangle
    pub fn region(&self) -> PixelRect {
        self.region
    }

    pub fn is_edit(&self, x: u32, y: u32) -> bool {
        self.image.get_pixel(x, y).0[0] == EDIT
    }

    pub fn edit_pixel_count(&self) -> u64 {
        self.image.pixels().filter(|p| p.0[0] == EDIT).count() as u64
    }

    pub fn as_image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    pub fn to_png(&self) -> Result<Vec<u8>, ImageError> {
        encode_png(&DynamicImage::ImageLuma8(self.image.clone()))
    }

    pub fn to_data_uri(&self) -> Result<String, ImageError> {
        Ok(DataUri::png(&self.to_png()?))
    }
}
