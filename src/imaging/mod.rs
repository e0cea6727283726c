// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image transport helpers (data URIs, decoding, PNG encoding)

pub mod data_uri;
pub mod image_utils;

pub use data_uri::DataUri;
pub use image_utils::{
    decode_image_bytes, detect_format, encode_png, format_to_mime, ImageError, ImageInfo,
    MAX_IMAGE_SIZE,
};
