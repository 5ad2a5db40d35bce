/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Spotlight
//!
//! Pixels within `0.7 * radius` of the center are boosted by `brightness`,
//! the light then fades linearly to `ambient` at `radius` and stays there.
#![allow(clippy::cast_precision_loss)]

use lumen_core::log::{debug, warn};
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::effects::image_center;
use crate::geometry::radial_falloff;
use crate::utils::{check_finite, check_range, truncate_u8};

/// Fraction of the radius that is fully lit
pub const SPOTLIGHT_INNER_FRACTION: f32 = 0.7;

/// Parameters of a spotlight
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct SpotlightParams {
    /// Center of the light, the middle of the image when `None`.
    /// May lie outside the image
    pub center:     Option<(i64, i64)>,
    /// Radius of the light in pixels, at most half the smaller side of the image.
    /// The largest allowed radius when `None`
    pub radius:     Option<f32>,
    /// Boost for lit pixels, `0.5..=3.0`
    pub brightness: f32,
    /// Light level outside the spot, `0.0..=0.5`
    pub ambient:    f32
}

impl Default for SpotlightParams {
    fn default() -> Self {
        SpotlightParams {
            center:     None,
            radius:     None,
            brightness: 1.5,
            ambient:    0.2
        }
    }
}

impl SpotlightParams {
    /// Resolve defaults and bring every value into range for an image
    /// of the given size
    ///
    /// A radius larger than half the smaller side is reduced to it in both
    /// lenient and strict mode, since that bound depends on the image
    ///
    /// # Errors
    /// - A radius that is not positive
    /// - Non finite values
    /// - Out of range brightness or ambient in strict mode
    pub fn validate(
        &self, width: usize, height: usize, options: &EffectOptions
    ) -> Result<SpotlightParams, ImageErrors> {
        let bound = width.min(height) as f32 / 2.0;
        let radius = check_finite("radius", self.radius.unwrap_or(bound))?;

        if radius <= 0.0 {
            return Err(ImageErrors::InvalidParameter(
                "radius",
                format!("expected a positive radius but found {}", radius)
            ));
        }
        let radius = if radius > bound {
            warn!(
                "Spotlight radius {} exceeds half the image size, using {}",
                radius, bound
            );
            bound
        } else {
            radius
        };

        Ok(SpotlightParams {
            center:     Some(self.center.unwrap_or_else(|| image_center(width, height))),
            radius:     Some(radius),
            brightness: check_range("brightness", self.brightness, 0.5, 3.0, options)?,
            ambient:    check_range("ambient", self.ambient, 0.0, 0.5, options)?
        })
    }
}

/// Apply a spotlight to the color channels of an image
///
/// # Errors
/// See [`SpotlightParams::validate`]
pub fn apply_spotlight(
    image: &mut Image, params: &SpotlightParams, options: &EffectOptions
) -> Result<(), ImageErrors> {
    let (width, height) = image.dimensions();
    let params = params.validate(width, height, options)?;

    let (cx, cy) = params.center.unwrap_or_else(|| image_center(width, height));
    let radius = params.radius.unwrap_or(1.0);
    let (brightness, ambient) = (params.brightness, params.ambient);

    debug!(
        "Spotlight at ({},{}) radius {} brightness {} ambient {}",
        cx, cy, radius, brightness, ambient
    );
    let mask = radial_falloff(
        width,
        height,
        (cx as f32, cy as f32),
        SPOTLIGHT_INNER_FRACTION * radius,
        radius,
        1.0,
        ambient
    )?;

    for channel in image.channels_mut(true) {
        for (pix, m) in channel.iter_mut().zip(mask.data()) {
            let value = f32::from(*pix);
            // only the lit part is boosted, the boost saturates before the mask
            let lit = if *m > ambient {
                (value * brightness).clamp(0.0, 255.0)
            } else {
                value
            };
            *pix = truncate_u8(lit * m);
        }
    }
    Ok(())
}

/// Spotlight operation
#[derive(Copy, Clone, Debug)]
pub struct Spotlight {
    params:  SpotlightParams,
    options: EffectOptions
}

impl Spotlight {
    #[must_use]
    pub fn new(params: SpotlightParams) -> Spotlight {
        Spotlight {
            params,
            options: EffectOptions::default()
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> Spotlight {
        self.options = options;
        self
    }
}

impl OperationsTrait for Spotlight {
    fn name(&self) -> &'static str {
        "Spotlight"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        apply_spotlight(image, &self.params, &self.options)
    }

    fn options(&self) -> EffectOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_core::options::EffectOptions;
    use lumen_image::errors::ImageErrors;
    use lumen_image::image::Image;
    use lumen_image::traits::OperationsTrait;

    use crate::effects::spotlight::{Spotlight, SpotlightParams};

    #[test]
    fn lit_dim_and_falloff() {
        let image = Image::fill(100, ColorSpace::RGB, 101, 101);
        let params = SpotlightParams {
            center:     Some((50, 50)),
            radius:     Some(40.0),
            brightness: 2.0,
            ambient:    0.25
        };
        let out = Spotlight::new(params).clone_and_execute(&image).unwrap();

        assert_eq!(out.pixel(50, 50), vec![200, 200, 200]);
        assert_eq!(out.pixel(50, 50 + 28), vec![200, 200, 200]);
        assert_eq!(out.pixel(0, 0), vec![25, 25, 25]);
        // halfway through the band, brightened then scaled by 0.625
        assert_eq!(out.pixel(50 + 34, 50)[0], 125);
    }

    #[test]
    fn alpha_is_untouched() {
        let image = Image::fill(90, ColorSpace::BGRA, 20, 20);
        let out = Spotlight::new(SpotlightParams::default())
            .clone_and_execute(&image)
            .unwrap();

        assert_eq!(out.alpha_channel(), image.alpha_channel());
        assert_eq!(out.pixel(10, 10), vec![135, 135, 135, 90]);
    }

    #[test]
    fn non_positive_radius_is_rejected_in_both_modes() {
        let image = Image::fill(90, ColorSpace::RGB, 20, 20);

        for options in [EffectOptions::new_lenient(), EffectOptions::new_strict()] {
            for radius in [0.0, -3.0, f32::NAN] {
                let params = SpotlightParams {
                    radius: Some(radius),
                    ..SpotlightParams::default()
                };
                let err = Spotlight::new(params)
                    .with_options(options)
                    .clone_and_execute(&image)
                    .unwrap_err();
                assert!(matches!(err, ImageErrors::InvalidParameter("radius", _)));
            }
        }
    }

    #[test]
    fn strict_mode_rejects_out_of_range_brightness() {
        let image = Image::fill(90, ColorSpace::RGB, 20, 20);
        let params = SpotlightParams {
            brightness: 5.0,
            ..SpotlightParams::default()
        };
        assert!(Spotlight::new(params)
            .with_options(EffectOptions::new_strict())
            .clone_and_execute(&image)
            .is_err());

        let lenient = Spotlight::new(params).clone_and_execute(&image).unwrap();
        // clamped to 3.0
        assert_eq!(lenient.pixel(10, 10), vec![255, 255, 255]);
    }
}
