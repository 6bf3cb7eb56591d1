// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Glue between the `image` crate and the io context schema.
//!
//! Decoding and drawing are not part of the processing contract; these helpers
//! exist so tools (the demo binary among them) can feed real pictures to a block
//! and render its `objects` back onto them.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::backends::local::detection::image_input::{IMAGE_KEY, SUPPORTED_DTYPE, SUPPORTED_FORMAT};
use crate::backends::local::blocks::face_detector::OBJECTS_KEY;
use crate::context::Context;
use crate::errors::ContextError;

/// Writes `image` into `ctx["image"]` as interleaved RGB bytes.
///
/// Any previous `image` entry is replaced; other keys are left alone.
pub fn image_to_context(image: &DynamicImage, ctx: &mut Context) -> Result<(), ContextError> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    let slot = ctx.get_or_insert_by_key(IMAGE_KEY)?;
    slot.clear();
    slot.get_or_insert_by_key("blob")?.set_blob(rgb.into_raw())?;
    slot.get_or_insert_by_key("dtype")?.set_string(SUPPORTED_DTYPE)?;
    slot.get_or_insert_by_key("format")?.set_string(SUPPORTED_FORMAT)?;
    let shape = slot.get_or_insert_by_key("shape")?;
    for dim in [height as i64, width as i64, 3] {
        shape.push_back(dim)?;
    }
    Ok(())
}

/// Reads every `objects[i].bbox` back as `[x1, y1, x2, y2]`.
///
/// A context without `objects` has no boxes.
pub fn bboxes_from_context(ctx: &Context) -> Result<Vec<[f64; 4]>, ContextError> {
    if !ctx.contains(OBJECTS_KEY) {
        return Ok(Vec::new());
    }
    let objects = ctx.get_by_key(OBJECTS_KEY)?;
    let mut boxes = Vec::with_capacity(objects.size());
    for object in objects {
        let bbox = object.get_by_key("bbox")?;
        let mut coords = [0.0; 4];
        for (i, slot) in coords.iter_mut().enumerate() {
            *slot = bbox.get_by_index(i)?.get_double()?;
        }
        boxes.push(coords);
    }
    Ok(boxes)
}

/// Draws normalized boxes onto `canvas` as one-pixel hollow rectangles.
pub fn draw_bboxes(canvas: &mut RgbImage, boxes: &[[f64; 4]], color: Rgb<u8>) {
    let (width, height) = (canvas.width() as f64, canvas.height() as f64);
    for [x1, y1, x2, y2] in boxes {
        let left = (x1 * width).round() as i32;
        let top = (y1 * height).round() as i32;
        let w = ((x2 - x1) * width).round().max(1.0) as u32;
        let h = ((y2 - y1) * height).round().max(1.0) as u32;
        draw_hollow_rect_mut(canvas, Rect::at(left, top).of_size(w, h), color);
    }
}
