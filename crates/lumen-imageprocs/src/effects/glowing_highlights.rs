/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Glowing highlights
//!
//! Bright parts of the image are isolated, blurred and added back,
//! so highlights bleed softly into their surroundings.
use lumen_core::log::debug;
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::blend::weighted_add;
use crate::gaussian_blur::GaussianBlur;
use crate::tone::{highlight_mask, HIGHLIGHT_THRESHOLD};
use crate::utils::check_range;

/// Kernel size of the glow blur
pub const GLOW_KERNEL_SIZE: usize = 15;
/// Sigma of the glow blur
pub const GLOW_SIGMA: f32 = 10.0;

/// Parameters of the highlight glow
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct GlowingHighlightsParams {
    /// Weight of the glow, `0.5..=3.0`
    pub intensity: f32
}

impl Default for GlowingHighlightsParams {
    fn default() -> Self {
        GlowingHighlightsParams { intensity: 1.5 }
    }
}

impl GlowingHighlightsParams {
    /// # Errors
    /// Non finite intensity, or intensity out of range in strict mode
    pub fn validate(&self, options: &EffectOptions) -> Result<GlowingHighlightsParams, ImageErrors> {
        Ok(GlowingHighlightsParams {
            intensity: check_range("intensity", self.intensity, 0.5, 3.0, options)?
        })
    }
}

/// Add a blurred copy of the highlights to the image
///
/// Pixels with luma of at least `200` keep their color in the glow layer, the
/// rest are black. The layer is blurred with a 15x15 gaussian (sigma 10)
/// and added with weight `intensity`, rounding and saturating
///
/// # Errors
/// See [`GlowingHighlightsParams::validate`]
pub fn apply_glowing_highlights(
    image: &mut Image, params: &GlowingHighlightsParams, options: &EffectOptions
) -> Result<(), ImageErrors> {
    let params = params.validate(options)?;
    let mask = highlight_mask(image, HIGHLIGHT_THRESHOLD)?;

    let highlights = mask.iter().filter(|x| **x != 0).count();
    debug!(
        "Glowing highlights with intensity {}, {} highlight pixels",
        params.intensity, highlights
    );
    if highlights == 0 {
        return Ok(());
    }

    let mut glow = image.clone();
    for channel in glow.channels_mut(true) {
        for (pix, m) in channel.iter_mut().zip(&mask) {
            if *m == 0 {
                *pix = 0;
            }
        }
    }
    GaussianBlur::new(GLOW_KERNEL_SIZE, GLOW_SIGMA).execute_impl(&mut glow)?;

    for (channel, glow_channel) in image
        .channels_mut(true)
        .iter_mut()
        .zip(glow.channels_ref(true))
    {
        weighted_add(channel, glow_channel, params.intensity);
    }
    Ok(())
}

/// Glowing highlights operation
#[derive(Copy, Clone, Debug)]
pub struct GlowingHighlights {
    params:  GlowingHighlightsParams,
    options: EffectOptions
}

impl GlowingHighlights {
    #[must_use]
    pub fn new(params: GlowingHighlightsParams) -> GlowingHighlights {
        GlowingHighlights {
            params,
            options: EffectOptions::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> GlowingHighlights {
        self.options = options;
        self
    }
}

impl OperationsTrait for GlowingHighlights {
    fn name(&self) -> &'static str {
        "Glowing Highlights"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        apply_glowing_highlights(image, &self.params, &self.options)
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

    use crate::effects::glowing_highlights::{GlowingHighlights, GlowingHighlightsParams};

    #[test]
    fn dark_images_are_unchanged() {
        let image = Image::fill(120, ColorSpace::BGR, 25, 25);
        let out = GlowingHighlights::new(GlowingHighlightsParams::default())
            .clone_and_execute(&image)
            .unwrap();
        assert_eq!(out, image);
    }

    #[test]
    fn glow_spreads_around_a_bright_spot() {
        let image = Image::from_fn(31, 31, ColorSpace::RGBA, |x, y, px| {
            let v = if x == 15 && y == 15 { 250 } else { 50 };
            px.copy_from_slice(&[v, v, v, 255]);
        });
        let out = GlowingHighlights::new(GlowingHighlightsParams { intensity: 3.0 })
            .clone_and_execute(&image)
            .unwrap();

        // neighbours pick up some of the glow
        assert!(out.pixel(16, 15)[0] > 50);
        assert!(out.pixel(15, 13)[1] > 50);
        // far away pixels do not
        assert_eq!(out.pixel(0, 0), vec![50, 50, 50, 255]);
        assert_eq!(out.pixel(15, 15)[3], 255);
    }

    #[test]
    fn luma_of_exactly_200_glows() {
        let image = Image::from_fn(31, 31, ColorSpace::RGB, |x, y, px| {
            let v = if x == 15 && y == 15 { 200 } else { 50 };
            px.copy_from_slice(&[v, v, v]);
        });
        let out = GlowingHighlights::new(GlowingHighlightsParams { intensity: 3.0 })
            .clone_and_execute(&image)
            .unwrap();

        assert!(out.pixel(16, 15)[0] > 50);
    }
}
