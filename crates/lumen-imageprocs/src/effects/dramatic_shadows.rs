/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Dramatic shadows
//!
//! Pixels darker than their neighbourhood are pushed further down,
//! increasing local contrast in the shadows.
use lumen_core::log::debug;
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::blend::weighted_add;
use crate::tone::shadow_mask;
use crate::utils::check_range;

/// Parameters of the shadow effect
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct DramaticShadowsParams {
    /// Strength of the darkening, `0.5..=3.0`
    pub intensity: f32
}

impl Default for DramaticShadowsParams {
    fn default() -> Self {
        DramaticShadowsParams { intensity: 1.5 }
    }
}

impl DramaticShadowsParams {
    /// # Errors
    /// Non finite intensity, or intensity out of range in strict mode
    pub fn validate(&self, options: &EffectOptions) -> Result<DramaticShadowsParams, ImageErrors> {
        Ok(DramaticShadowsParams {
            intensity: check_range("intensity", self.intensity, 0.5, 3.0, options)?
        })
    }
}

/// Subtract `intensity * mask` from every color channel, where the mask
/// is `255` for shadow pixels and `0` elsewhere
///
/// # Errors
/// See [`DramaticShadowsParams::validate`]
pub fn apply_dramatic_shadows(
    image: &mut Image, params: &DramaticShadowsParams, options: &EffectOptions
) -> Result<(), ImageErrors> {
    let params = params.validate(options)?;
    let mask = shadow_mask(image)?;

    debug!(
        "Dramatic shadows with intensity {}, {} shadow pixels",
        params.intensity,
        mask.iter().filter(|x| **x != 0).count()
    );

    for channel in image.channels_mut(true) {
        weighted_add(channel, &mask, -params.intensity);
    }
    Ok(())
}

/// Dramatic shadows operation
#[derive(Copy, Clone, Debug)]
pub struct DramaticShadows {
    params:  DramaticShadowsParams,
    options: EffectOptions
}

impl DramaticShadows {
    #[must_use]
    pub fn new(params: DramaticShadowsParams) -> DramaticShadows {
        DramaticShadows {
            params,
            options: EffectOptions::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> DramaticShadows {
        self.options = options;
        self
    }
}

impl OperationsTrait for DramaticShadows {
    fn name(&self) -> &'static str {
        "Dramatic Shadows"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        apply_dramatic_shadows(image, &self.params, &self.options)
    }

    fn options(&self) -> EffectOptions {
        self.options
    }
}
