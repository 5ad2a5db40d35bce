/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per channel tone adjustments and the masks they use
use lumen_core::colorspace::ColorComponent;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;

use crate::grayscale::image_luma;
use crate::threshold::{adaptive_threshold, threshold, ThresholdMethod};
use crate::utils::truncate_u8;

/// Window of the local mean used to find shadows
pub const SHADOW_BLOCK_SIZE: usize = 21;
/// How far below the local mean a pixel must be to count as shadow
pub const SHADOW_OFFSET: i16 = 10;
/// Luma at or above which a pixel counts as a highlight
pub const HIGHLIGHT_THRESHOLD: u8 = 200;

fn shift_channel(channel: &mut [u8], delta: f32) {
    for x in channel.iter_mut() {
        *x = truncate_u8(f32::from(*x) + delta);
    }
}

/// Warm or cool an image
///
/// For a positive warmth red is raised by `warmth * 50` and blue lowered by
/// `warmth * 25`, for a negative warmth blue is raised by `|warmth| * 50`
/// and red lowered by `|warmth| * 25`. Green is left alone.
/// Results are clamped and truncated
///
/// # Errors
/// [`ImageErrors::ShapeMismatch`] for grayscale images
pub fn color_temperature_shift(image: &mut Image, warmth: f32) -> Result<(), ImageErrors> {
    let (raised, lowered) = if warmth >= 0.0 {
        (ColorComponent::Red, ColorComponent::Blue)
    } else {
        (ColorComponent::Blue, ColorComponent::Red)
    };
    let amount = warmth.abs();

    for (component, delta) in [(raised, amount * 50.0), (lowered, -amount * 25.0)] {
        let colorspace = image.colorspace();
        let channel = image.color_channel_mut(component).ok_or_else(|| {
            ImageErrors::ShapeMismatch(format!(
                "Color temperature needs a color image, found {:?}",
                colorspace
            ))
        })?;
        shift_channel(channel, delta);
    }
    Ok(())
}

/// Mark pixels that are darker than their surroundings
///
/// The image is converted to luma and compared against a gaussian weighted
/// local mean over a 21x21 window, pixels at least 10 levels below the mean
/// are set to `255`, everything else to `0`
///
/// # Errors
/// [`ImageErrors::ShapeMismatch`] for grayscale images
pub fn shadow_mask(image: &Image) -> Result<Vec<u8>, ImageErrors> {
    let (width, height) = image.dimensions();
    let luma = image_luma(image)?;
    let mut mask = vec![0; width * height];

    adaptive_threshold(
        &luma,
        &mut mask,
        width,
        height,
        SHADOW_BLOCK_SIZE,
        SHADOW_OFFSET,
        ThresholdMethod::BinaryInv
    )?;
    Ok(mask)
}

/// Mark pixels whose luma is at least `level` with `255`, everything else `0`
///
/// # Errors
/// [`ImageErrors::ShapeMismatch`] for grayscale images
pub fn highlight_mask(image: &Image, level: u8) -> Result<Vec<u8>, ImageErrors> {
    let (width, height) = image.dimensions();
    let luma = image_luma(image)?;
    let mut mask = vec![255; width * height];

    // threshold selects strictly greater values
    if let Some(below) = level.checked_sub(1) {
        threshold(&luma, &mut mask, below, ThresholdMethod::Binary);
    }
    Ok(mask)
}
