// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! `data:image/<fmt>;base64,<payload>` transport
//!
//! Images cross the HTTP boundary as data URIs. Inside the service they are
//! plain byte buffers; the prefix is stripped before decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat};
use std::fmt;

use super::image_utils::{decode_image_bytes, detect_format, format_to_mime, ImageError, ImageInfo};

const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Parse an image data URI, decoding its base64 payload
    pub fn parse(uri: &str) -> Result<Self, ImageError> {
        let uri = uri.trim();
        if uri.is_empty() {
            return Err(ImageError::EmptyData);
        }

        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::MalformedDataUri("missing 'data:' prefix".to_string()))?;

        let (mime_type, payload) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
            ImageError::MalformedDataUri("missing ';base64,' marker".to_string())
        })?;

        let mime_type = mime_type.to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(ImageError::NotAnImage(mime_type));
        }

        let bytes = STANDARD.decode(payload)?;
        if bytes.is_empty() {
            return Err(ImageError::EmptyData);
        }

        Ok(Self { mime_type, bytes })
    }

    /// Decode the payload into an image
    pub fn decode_image(&self) -> Result<(DynamicImage, ImageInfo), ImageError> {
        decode_image_bytes(&self.bytes)
    }

    /// Relabel with the MIME type sniffed from the payload.
    ///
    /// Clients sometimes declare `image/jpeg` for a PNG; the model should see
    /// the real type.
    pub fn with_detected_mime(mut self) -> Result<Self, ImageError> {
        self.mime_type = format_to_mime(detect_format(&self.bytes)?).to_string();
        Ok(self)
    }

    pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
        format!("data:{}{}{}", mime_type, BASE64_MARKER, STANDARD.encode(bytes))
    }

    pub fn png(bytes: &[u8]) -> String {
        Self::encode(format_to_mime(ImageFormat::Png), bytes)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::encode(&self.mime_type, &self.bytes))
    }
}
