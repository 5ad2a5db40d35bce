/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Vignette
#![allow(clippy::cast_precision_loss)]

use lumen_core::log::debug;
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::blend::multiply;
use crate::geometry::separable_gaussian_product;
use crate::utils::check_finite;

/// Parameters of a vignette
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct VignetteParams {
    /// How strongly the edges are darkened, any positive value.
    ///
    /// The spread of the gaussian along each axis is `dimension / intensity`,
    /// so large values darken more and values close to zero leave the image
    /// almost as is
    pub intensity: f32
}

impl Default for VignetteParams {
    fn default() -> Self {
        VignetteParams { intensity: 1.5 }
    }
}

impl VignetteParams {
    /// # Errors
    /// [`ImageErrors::InvalidParameter`] if intensity is not a positive finite number,
    /// intensity is never clamped
    pub fn validate(&self) -> Result<VignetteParams, ImageErrors> {
        let intensity = check_finite("intensity", self.intensity)?;

        if intensity <= 0.0 {
            return Err(ImageErrors::InvalidParameter(
                "intensity",
                format!("expected a positive intensity but found {}", intensity)
            ));
        }
        Ok(VignetteParams { intensity })
    }
}

/// Darken the borders of an image
///
/// The mask is a 2D gaussian, normalized to one at its peak, and every color
/// channel is multiplied by it
///
/// # Errors
/// See [`VignetteParams::validate`]
pub fn apply_vignette(image: &mut Image, params: &VignetteParams) -> Result<(), ImageErrors> {
    let (width, height) = image.dimensions();
    let params = params.validate()?;

    let spread_x = width as f32 / params.intensity;
    let spread_y = height as f32 / params.intensity;

    debug!("Vignette with spreads {}x{}", spread_x, spread_y);

    let mask = separable_gaussian_product(width, height, spread_x, spread_y)?;

    for channel in image.channels_mut(true) {
        multiply(channel, mask.data());
    }
    Ok(())
}

/// Vignette operation
#[derive(Copy, Clone, Debug)]
pub struct Vignette {
    params:  VignetteParams,
    options: EffectOptions
}

impl Vignette {
    #[must_use]
    pub fn new(params: VignetteParams) -> Vignette {
        Vignette {
            params,
            options: EffectOptions::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> Vignette {
        self.options = options;
        self
    }
}

impl OperationsTrait for Vignette {
    fn name(&self) -> &'static str {
        "Vignette"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        apply_vignette(image, &self.params)
    }

    fn options(&self) -> EffectOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_image::image::Image;
    use lumen_image::traits::OperationsTrait;

    use crate::effects::vignette::{Vignette, VignetteParams};

    #[test]
    fn center_kept_corners_darkened() {
        let image = Image::fill(200, ColorSpace::RGBA, 64, 48);
        let out = Vignette::new(VignetteParams { intensity: 2.0 })
            .clone_and_execute(&image)
            .unwrap();

        assert_eq!(out.pixel(32, 24), vec![200, 200, 200, 200]);
        assert!(out.pixel(0, 0)[0] < 120);
        assert!(out.pixel(63, 47)[1] < 120);
        assert!(out.pixel(0, 0)[0] < out.pixel(16, 12)[0]);
    }

    #[test]
    fn larger_intensity_is_darker() {
        let image = Image::fill(200, ColorSpace::RGB, 40, 40);
        let soft = Vignette::new(VignetteParams { intensity: 0.5 })
            .clone_and_execute(&image)
            .unwrap();
        let hard = Vignette::new(VignetteParams { intensity: 3.0 })
            .clone_and_execute(&image)
            .unwrap();

        assert!(hard.pixel(2, 2)[0] < soft.pixel(2, 2)[0]);
    }

    #[test]
    fn non_positive_intensity_is_rejected() {
        let image = Image::fill(200, ColorSpace::RGB, 4, 4);

        for intensity in [0.0, -1.0, f32::INFINITY] {
            assert!(Vignette::new(VignetteParams { intensity })
                .clone_and_execute(&image)
                .is_err());
        }
    }
}
