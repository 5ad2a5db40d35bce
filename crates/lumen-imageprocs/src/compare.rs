/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Side by side comparison of an image before and after an effect
use lumen_core::colorspace::ColorSpace;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;

/// Place `original` and `processed` next to each other
///
/// The result is an RGB image twice as wide as the inputs with the
/// original on the left. Columns `w-1` and `w` are painted white to
/// separate the two halves. Alpha is dropped
///
/// # Errors
/// - [`ImageErrors::DimensionsMisMatch`] if the images differ in size
/// - [`ImageErrors::ShapeMismatch`] for grayscale images
pub fn side_by_side(original: &Image, processed: &Image) -> Result<Image, ImageErrors> {
    let (width, height) = original.dimensions();
    let (p_width, p_height) = processed.dimensions();

    if (width, height) != (p_width, p_height) {
        return Err(ImageErrors::DimensionsMisMatch(width * height, p_width * p_height));
    }
    let mut left = original.clone();
    let mut right = processed.clone();

    for image in [&mut left, &mut right] {
        if image.colorspace().is_grayscale() {
            return Err(ImageErrors::ShapeMismatch(format!(
                "Comparison needs color images, found {:?}",
                image.colorspace()
            )));
        }
        image.convert_colorspace(ColorSpace::RGB)?;
    }
    let out_width = width * 2;
    let mut channels = vec![vec![0_u8; out_width * height]; 3];

    for ((out, l), r) in channels
        .iter_mut()
        .zip(left.channels_ref(false))
        .zip(right.channels_ref(false))
    {
        for (y, out_row) in out.chunks_exact_mut(out_width).enumerate() {
            let (out_left, out_right) = out_row.split_at_mut(width);
            out_left.copy_from_slice(&l[y * width..(y + 1) * width]);
            out_right.copy_from_slice(&r[y * width..(y + 1) * width]);

            for x in width.saturating_sub(1)..(width + 1).min(out_width) {
                out_row[x] = 255;
            }
        }
    }
    Image::new(channels, out_width, height, ColorSpace::RGB)
}
