/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Binary thresholds used to build masks
use lumen_image::errors::ImageErrors;

use crate::gaussian_blur::{gaussian_blur_u8, gaussian_kernel, sigma_for_kernel_size, BorderMode};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ThresholdMethod {
    /// Values above the threshold become 255, the rest 0
    Binary,
    /// Values above the threshold become 0, the rest 255
    BinaryInv
}

/// Global threshold, `value > threshold` selects the pixel
pub fn threshold(in_channel: &[u8], out: &mut [u8], threshold: u8, method: ThresholdMethod) {
    for (x, out) in in_channel.iter().zip(out.iter_mut()) {
        let above = *x > threshold;
        *out = match (method, above) {
            (ThresholdMethod::Binary, true) | (ThresholdMethod::BinaryInv, false) => 255,
            _ => 0
        };
    }
}

/// Adaptive threshold against a gaussian weighted local mean
///
/// The local mean of each pixel is a `block_size x block_size` gaussian
/// weighted average (sigma derived from the block size, edges replicated),
/// rounded to 8 bits. A pixel is selected when it is above `mean - offset`
/// for [`ThresholdMethod::Binary`], and when it is at or below that for
/// [`ThresholdMethod::BinaryInv`]
///
/// # Errors
/// [`ImageErrors::InvalidParameter`] if the block size is even or smaller than 3
pub fn adaptive_threshold(
    in_channel: &[u8], out: &mut [u8], width: usize, height: usize, block_size: usize,
    offset: i16, method: ThresholdMethod
) -> Result<(), ImageErrors> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(ImageErrors::InvalidParameter(
            "block_size",
            format!("expected an odd block size of at least 3 but found {}", block_size)
        ));
    }
    let kernel = gaussian_kernel(block_size, sigma_for_kernel_size(block_size))?;

    let mut mean = in_channel.to_vec();
    gaussian_blur_u8(&mut mean, width, height, &kernel, BorderMode::Replicate);

    for ((x, m), out) in in_channel.iter().zip(&mean).zip(out.iter_mut()) {
        let above = i16::from(*x) - i16::from(*m) > -offset;
        *out = match (method, above) {
            (ThresholdMethod::Binary, true) | (ThresholdMethod::BinaryInv, false) => 255,
            _ => 0
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::threshold::{adaptive_threshold, threshold, ThresholdMethod};

    #[test]
    fn binary_threshold_is_strict() {
        let input = [199, 200, 201, 255];
        let mut out = [0; 4];

        threshold(&input, &mut out, 200, ThresholdMethod::Binary);
        assert_eq!(out, [0, 0, 255, 255]);

        threshold(&input, &mut out, 200, ThresholdMethod::BinaryInv);
        assert_eq!(out, [255, 255, 0, 0]);
    }

    #[test]
    fn flat_regions_are_not_shadow() {
        let input = vec![90_u8; 40 * 40];
        let mut out = vec![0; 40 * 40];

        adaptive_threshold(&input, &mut out, 40, 40, 21, 10, ThresholdMethod::BinaryInv).unwrap();
        assert!(out.iter().all(|x| *x == 0));
    }

    #[test]
    fn dark_spot_in_bright_surrounding_is_shadow() {
        let width = 41;
        let mut input = vec![200_u8; width * width];
        input[20 * width + 20] = 20;
        let mut out = vec![0; width * width];

        adaptive_threshold(&input, &mut out, width, width, 21, 10, ThresholdMethod::BinaryInv)
            .unwrap();

        assert_eq!(out[20 * width + 20], 255);
        assert_eq!(out[0], 0);
        assert_eq!(out.iter().filter(|x| **x == 255).count(), 1);
    }

    #[test]
    fn even_block_is_rejected() {
        let input = vec![0_u8; 16];
        let mut out = vec![0; 16];
        assert!(adaptive_threshold(&input, &mut out, 4, 4, 4, 10, ThresholdMethod::Binary).is_err());
    }
}
