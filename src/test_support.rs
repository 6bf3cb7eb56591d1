// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Builders shared by the unit tests.

use crate::context::Context;

/// Skin tone that falls inside the default YCbCr window.
pub const SKIN: [u8; 3] = [224, 172, 140];

/// An io context holding a well-formed `image` object.
pub fn image_context(height: i64, width: i64, channels: i64, blob: Vec<u8>) -> Context {
    let mut ctx = Context::new();
    let image = ctx.get_or_insert_by_key("image").unwrap();
    image.get_or_insert_by_key("blob").unwrap().set_blob(blob).unwrap();
    image.get_or_insert_by_key("dtype").unwrap().set_string("uint8_t").unwrap();
    image.get_or_insert_by_key("format").unwrap().set_string("NDARRAY").unwrap();
    let shape = image.get_or_insert_by_key("shape").unwrap();
    for dim in [height, width, channels] {
        shape.push_back(dim).unwrap();
    }
    ctx
}

/// RGB bytes of a black `width`x`height` canvas with skin-coloured squares
/// painted at `(x, y, side)`.
pub fn canvas_with_squares(width: usize, height: usize, squares: &[(usize, usize, usize)]) -> Vec<u8> {
    let mut blob = vec![0u8; width * height * 3];
    for &(x0, y0, side) in squares {
        for y in y0..(y0 + side).min(height) {
            for x in x0..(x0 + side).min(width) {
                let at = (y * width + x) * 3;
                blob[at..at + 3].copy_from_slice(&SKIN);
            }
        }
    }
    blob
}

/// Darker skin tone, still inside the default YCbCr window.
pub const SKIN_DARK: [u8; 3] = [200, 140, 110];

/// Paints a `side`x`side` face at `(x0, y0)` onto an RGB blob: one half [`SKIN`],
/// the other [`SKIN_DARK`]. `mirrored` swaps the halves.
pub fn paint_two_tone_face(
    blob: &mut [u8],
    width: usize,
    (x0, y0, side): (usize, usize, usize),
    mirrored: bool,
) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            let left = x - x0 < side / 2;
            let tone = if left != mirrored { SKIN } else { SKIN_DARK };
            let at = (y * width + x) * 3;
            blob[at..at + 3].copy_from_slice(&tone);
        }
    }
}
