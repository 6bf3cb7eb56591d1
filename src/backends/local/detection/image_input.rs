// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Validated view of the `image` input object.
//!
//! ```text
//! "image" (Object)
//!   "blob"   : Blob, interleaved row-major bytes
//!   "dtype"  : String, must be "uint8_t"
//!   "format" : String, must be "NDARRAY"
//!   "shape"  : Array[Int64] = [height, width, channels]
//! ```

use crate::context::Context;
use crate::errors::ProcessError;

pub const IMAGE_KEY: &str = "image";
pub const SUPPORTED_DTYPE: &str = "uint8_t";
pub const SUPPORTED_FORMAT: &str = "NDARRAY";

/// Borrowed, shape-checked pixel buffer.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    pub data: &'a [u8],
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl<'a> ImageView<'a> {
    /// Validates the `image` object of an io context.
    pub fn from_context(ctx: &'a Context) -> Result<Self, ProcessError> {
        let image = ctx
            .get_by_key(IMAGE_KEY)
            .map_err(|_| ProcessError::invalid("missing 'image' object"))?;
        Self::from_image_object(image)
    }

    /// Validates an `image` object itself.
    pub fn from_image_object(image: &'a Context) -> Result<Self, ProcessError> {
        if !image.is_object() {
            return Err(ProcessError::invalid("'image' must be an object"));
        }

        let dtype = read_string(image, "dtype")?;
        if dtype != SUPPORTED_DTYPE {
            return Err(ProcessError::invalid(format!(
                "unsupported image dtype '{}', expected '{}'",
                dtype, SUPPORTED_DTYPE
            )));
        }

        let format = read_string(image, "format")?;
        if format != SUPPORTED_FORMAT {
            return Err(ProcessError::invalid(format!(
                "unsupported image format '{}', expected '{}'",
                format, SUPPORTED_FORMAT
            )));
        }

        let shape = image
            .get_by_key("shape")
            .map_err(|_| ProcessError::invalid("missing 'image.shape'"))?;
        if !shape.is_array() || shape.size() != 3 {
            return Err(ProcessError::invalid(
                "'image.shape' must be an array of [height, width, channels]",
            ));
        }
        let mut dims = [0usize; 3];
        for (slot, dim) in dims.iter_mut().zip(shape.iter()) {
            let value = dim
                .get_int64()
                .map_err(|e| ProcessError::invalid(format!("'image.shape' entries must be int64: {}", e)))?;
            if value <= 0 || value > u32::MAX as i64 {
                return Err(ProcessError::invalid(format!(
                    "'image.shape' entries must be within 1..={}, got {}",
                    u32::MAX,
                    value
                )));
            }
            *slot = value as usize;
        }
        let [height, width, channels] = dims;
        if !matches!(channels, 1 | 3 | 4) {
            return Err(ProcessError::invalid(format!(
                "unsupported channel count {}, expected 1, 3 or 4",
                channels
            )));
        }

        let data = image
            .get_by_key("blob")
            .and_then(Context::get_blob)
            .map_err(|e| ProcessError::invalid(format!("'image.blob' must be a blob: {}", e)))?;
        let expected = height
            .checked_mul(width)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| ProcessError::invalid("'image.shape' is too large"))?;
        if data.len() != expected {
            return Err(ProcessError::invalid(format!(
                "'image.blob' holds {} bytes but shape requires {}",
                data.len(),
                expected
            )));
        }

        Ok(Self {
            data,
            height,
            width,
            channels,
        })
    }

    /// Channel bytes of the pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> &'a [u8] {
        let start = (y * self.width + x) * self.channels;
        &self.data[start..start + self.channels]
    }
}

fn read_string<'a>(image: &'a Context, key: &str) -> Result<&'a str, ProcessError> {
    image
        .get_by_key(key)
        .and_then(Context::get_string)
        .map_err(|e| ProcessError::invalid(format!("'image.{}' must be a string: {}", key, e)))
}
