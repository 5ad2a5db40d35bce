/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Gaussian blur
//!
//! The blur is separable, a 1D kernel is run across rows, the image is
//! transposed, the kernel is run across rows again and the result is
//! transposed back.
//!
//! Kernels are either given explicitly as an odd size and a sigma
//! (`15x15, sigma=10` for highlight glow) or derived from one of the two.
//! Sigma driven kernels are used when the strength of an effect should scale
//! with the image, e.g light rays use a sigma of `0.01 * diagonal`.
use lumen_core::log::trace;
use lumen_image::errors::ImageErrors;
use lumen_image::field::ScalarField;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::transpose::transpose;
use crate::utils::round_u8;

/// How pixels outside the image are read
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BorderMode {
    /// Reflect without repeating the edge pixel, `dcb|abcd|cba`
    Reflect101,
    /// Repeat the edge pixel, `aaa|abcd|ddd`
    Replicate
}

impl BorderMode {
    /// Map a possibly out of bounds position to a valid index in `0..len`
    #[inline]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn index(self, pos: isize, len: usize) -> usize {
        debug_assert!(len > 0);

        match self {
            BorderMode::Replicate => pos.clamp(0, len as isize - 1) as usize,
            BorderMode::Reflect101 => {
                if len == 1 {
                    return 0;
                }
                let period = 2 * (len as isize - 1);
                let p = pos.rem_euclid(period);

                if p >= len as isize {
                    (period - p) as usize
                } else {
                    p as usize
                }
            }
        }
    }
}

/// Sigma implied by a kernel size when no sigma is given
///
/// `0.3 * ((size - 1) / 2 - 1) + 0.8`
#[allow(clippy::cast_precision_loss)]
pub fn sigma_for_kernel_size(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Kernel size used for a sigma when no size is given
///
/// `round(8 * sigma + 1)`, forced to be odd
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn kernel_size_for_sigma(sigma: f32) -> usize {
    ((sigma * 8.0 + 1.0).round() as usize) | 1
}

/// Create a normalized 1D gaussian kernel
///
/// Entry `i` is proportional to `exp(-(i - (size-1)/2)^2 / (2 sigma^2))`
/// and the entries sum to one
///
/// # Errors
/// [`ImageErrors::InvalidParameter`] if the size is zero or even, or sigma is
/// not a positive finite number
#[allow(clippy::cast_precision_loss)]
pub fn gaussian_kernel(size: usize, sigma: f32) -> Result<Vec<f32>, ImageErrors> {
    if size == 0 || size % 2 == 0 {
        return Err(ImageErrors::InvalidParameter(
            "kernel_size",
            format!("expected a positive odd kernel size but found {}", size)
        ));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageErrors::InvalidParameter(
            "sigma",
            format!("expected a positive finite sigma but found {}", sigma)
        ));
    }
    let center = (size as f32 - 1.0) * 0.5;
    let scale = -0.5 / (sigma * sigma);

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - center;
            (x * x * scale).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|x| *x /= sum);

    Ok(kernel)
}

/// Convolve every row of `input` with `kernel` writing to `output`
fn blur_rows(
    input: &[f32], output: &mut [f32], width: usize, kernel: &[f32], border: BorderMode
) {
    let radius = kernel.len() / 2;
    let mut padded = vec![0.0_f32; width + 2 * radius];

    for (in_row, out_row) in input
        .chunks_exact(width)
        .zip(output.chunks_exact_mut(width))
    {
        #[allow(clippy::cast_possible_wrap)]
        for (pos, value) in padded.iter_mut().enumerate() {
            *value = in_row[border.index(pos as isize - radius as isize, width)];
        }
        for (window, out) in padded.windows(kernel.len()).zip(out_row.iter_mut()) {
            *out = window.iter().zip(kernel).map(|(a, b)| a * b).sum();
        }
    }
}

/// Blur a single plane of floats in place
///
/// `scratch_space` must be as large as `in_out_image`
pub fn gaussian_blur_f32(
    in_out_image: &mut [f32], scratch_space: &mut [f32], width: usize, height: usize,
    kernel: &[f32], border: BorderMode
) {
    if width == 0 || height == 0 || kernel.is_empty() {
        return;
    }
    blur_rows(in_out_image, scratch_space, width, kernel, border);
    transpose(scratch_space, in_out_image, width, height);
    blur_rows(in_out_image, scratch_space, height, kernel, border);
    transpose(scratch_space, in_out_image, height, width);
}

/// Blur a single 8 bit plane in place, rounding the result
pub fn gaussian_blur_u8(
    in_out_image: &mut [u8], width: usize, height: usize, kernel: &[f32], border: BorderMode
) {
    let mut data: Vec<f32> = in_out_image.iter().map(|x| f32::from(*x)).collect();
    let mut scratch = vec![0.0; data.len()];

    gaussian_blur_f32(&mut data, &mut scratch, width, height, kernel, border);

    for (out, value) in in_out_image.iter_mut().zip(&data) {
        *out = round_u8(*value);
    }
}

/// Blur a scalar field with a kernel sized from `sigma`
///
/// Used for light fields whose blur strength depends on the image size
///
/// # Errors
/// [`ImageErrors::InvalidParameter`] if sigma is not a positive finite number
pub fn blur_field(field: &mut ScalarField, sigma: f32, border: BorderMode) -> Result<(), ImageErrors> {
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(ImageErrors::InvalidParameter(
            "sigma",
            format!("expected a positive finite sigma but found {}", sigma)
        ));
    }
    let size = kernel_size_for_sigma(sigma);
    let kernel = gaussian_kernel(size, sigma)?;
    let (width, height) = field.dimensions();

    trace!("Blurring {}x{} field with sigma {} and kernel size {}", width, height, sigma, size);

    let mut scratch = vec![0.0; width * height];
    gaussian_blur_f32(field.data_mut(), &mut scratch, width, height, &kernel, border);
    Ok(())
}

/// Blur the color channels of an image
///
/// Alpha is not blurred. Borders reflect without repeating the edge pixel.
///
/// With the `threads` feature every channel is blurred on its own thread
#[derive(Copy, Clone, Debug)]
pub struct GaussianBlur {
    kernel_size: usize,
    sigma:       f32
}

impl GaussianBlur {
    /// Create a blur with an explicit kernel size and sigma
    ///
    /// Both are checked when the blur runs
    #[must_use]
    pub fn new(kernel_size: usize, sigma: f32) -> GaussianBlur {
        GaussianBlur { kernel_size, sigma }
    }

    /// Create a blur whose sigma is derived from the kernel size
    #[must_use]
    pub fn from_kernel_size(kernel_size: usize) -> GaussianBlur {
        GaussianBlur::new(kernel_size, sigma_for_kernel_size(kernel_size))
    }

    /// Create a blur whose kernel size is derived from sigma
    #[must_use]
    pub fn from_sigma(sigma: f32) -> GaussianBlur {
        let size = if sigma.is_finite() && sigma > 0.0 {
            kernel_size_for_sigma(sigma)
        } else {
            1
        };
        GaussianBlur::new(size, sigma)
    }
}

impl OperationsTrait for GaussianBlur {
    fn name(&self) -> &'static str {
        "Gaussian blur"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let (width, height) = image.dimensions();
        let kernel = gaussian_kernel(self.kernel_size, self.sigma)?;

        trace!(
            "Gaussian blur with kernel size {} and sigma {}",
            self.kernel_size,
            self.sigma
        );

        #[cfg(feature = "threads")]
        {
            trace!("Running gaussian blur in multithreaded mode");
            std::thread::scope(|s| {
                // blur each channel on a separate thread
                for channel in image.channels_mut(true) {
                    let kernel = &kernel;
                    s.spawn(move || {
                        gaussian_blur_u8(channel, width, height, kernel, BorderMode::Reflect101);
                    });
                }
            });
        }
        #[cfg(not(feature = "threads"))]
        {
            trace!("Running gaussian blur in single threaded mode");
            for channel in image.channels_mut(true) {
                gaussian_blur_u8(channel, width, height, &kernel, BorderMode::Reflect101);
            }
        }
        Ok(())
    }
}
