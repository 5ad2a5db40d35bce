/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Color temperature
use lumen_core::log::debug;
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::tone::color_temperature_shift;
use crate::utils::check_range;

/// Parameters of a color temperature shift
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct ColorTemperatureParams {
    /// `-1.0..=1.0`, positive values warm the image, negative values cool it
    pub warmth: f32
}

impl ColorTemperatureParams {
    /// # Errors
    /// Non finite warmth, or warmth out of range in strict mode
    pub fn validate(&self, options: &EffectOptions) -> Result<ColorTemperatureParams, ImageErrors> {
        Ok(ColorTemperatureParams {
            warmth: check_range("warmth", self.warmth, -1.0, 1.0, options)?
        })
    }
}

/// Shift the red and blue channels of an image
///
/// # Errors
/// See [`ColorTemperatureParams::validate`]
pub fn apply_color_temperature(
    image: &mut Image, params: &ColorTemperatureParams, options: &EffectOptions
) -> Result<(), ImageErrors> {
    let params = params.validate(options)?;

    debug!("Color temperature with warmth {}", params.warmth);

    color_temperature_shift(image, params.warmth)
}

/// Color temperature operation
#[derive(Copy, Clone, Debug)]
pub struct ColorTemperature {
    params:  ColorTemperatureParams,
    options: EffectOptions
}

impl ColorTemperature {
    #[must_use]
    pub fn new(params: ColorTemperatureParams) -> ColorTemperature {
        ColorTemperature {
            params,
            options: EffectOptions::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> ColorTemperature {
        self.options = options;
        self
    }
}

impl OperationsTrait for ColorTemperature {
    fn name(&self) -> &'static str {
        "Color Temperature"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        apply_color_temperature(image, &self.params, &self.options)
    }

    fn options(&self) -> EffectOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_core::options::EffectOptions;
    use lumen_image::image::Image;
    use lumen_image::traits::OperationsTrait;

    use crate::effects::color_temperature::{ColorTemperature, ColorTemperatureParams};

    #[test]
    fn warm_raises_red() {
        let image = Image::fill(100, ColorSpace::RGB, 8, 8);
        let out = ColorTemperature::new(ColorTemperatureParams { warmth: 1.0 })
            .clone_and_execute(&image)
            .unwrap();
        assert_eq!(out.pixel(3, 3), vec![150, 100, 75]);
    }

    #[test]
    fn out_of_range_warmth() {
        let image = Image::fill(100, ColorSpace::RGB, 8, 8);
        let params = ColorTemperatureParams { warmth: -4.0 };

        // clamped to -1
        let out = ColorTemperature::new(params)
            .clone_and_execute(&image)
            .unwrap();
        assert_eq!(out.pixel(0, 0), vec![75, 100, 150]);

        assert!(ColorTemperature::new(params)
            .with_options(EffectOptions::new_strict())
            .clone_and_execute(&image)
            .is_err());
    }
}
