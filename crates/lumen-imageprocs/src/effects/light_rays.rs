/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Light rays
//!
//! Rays leave a light source placed outside the frame, half a diagonal away
//! from the center in the direction opposite to `angle`, and travel towards
//! `angle`. The rays are blurred twice and screened onto the image.
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use core::cell::RefCell;

use lumen_core::log::debug;
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::field::ScalarField;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::blend::screen_blend;
use crate::effects::{diagonal, image_center};
use crate::gaussian_blur::{blur_field, BorderMode};
use crate::geometry::{rasterize_segments, ray_segments};
use crate::random::UniformSource;
use crate::utils::{check_count, check_finite, check_range, truncate_u8};

/// Maximum deviation of a single ray from the main angle, in degrees
pub const RAY_JITTER_DEGREES: f32 = 15.0;
/// Sigma of the first blur as a fraction of the image diagonal
pub const RAY_BLUR_FRACTION: f32 = 0.01;
/// Sigma of the glow blur as a fraction of the image diagonal
pub const RAY_GLOW_FRACTION: f32 = 0.03;

/// Parameters of the light rays effect
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct LightRaysParams {
    /// Strength of the rays, `0.1..=2.0`
    pub intensity: f32,
    /// Direction the rays travel in, degrees. Taken modulo 360
    pub angle:     f32,
    /// Number of rays, `5..=50`
    pub count:     u32,
    /// Stroke width of a ray in pixels, `1..=10`
    pub width:     u32,
    /// Length of a ray as a fraction of the image diagonal, `0.1..=1.0`
    pub length:    f32
}

impl Default for LightRaysParams {
    fn default() -> Self {
        LightRaysParams {
            intensity: 1.0,
            angle:     45.0,
            count:     20,
            width:     2,
            length:    0.8
        }
    }
}

impl LightRaysParams {
    /// # Errors
    /// - Non finite values
    /// - A count or width of zero
    /// - Out of range values in strict mode
    pub fn validate(&self, options: &EffectOptions) -> Result<LightRaysParams, ImageErrors> {
        Ok(LightRaysParams {
            intensity: check_range("intensity", self.intensity, 0.1, 2.0, options)?,
            angle:     check_finite("angle", self.angle)?.rem_euclid(360.0),
            count:     check_count("count", self.count, 5, 50, options)?,
            width:     check_count("width", self.width, 1, 10, options)?,
            length:    check_range("length", self.length, 0.1, 1.0, options)?
        })
    }
}

/// Point the rays leave from, half a diagonal behind the image center
/// opposite to `angle_degrees`, usually outside the image
pub fn ray_source(width: usize, height: usize, angle_degrees: f32) -> (i64, i64) {
    let distance = diagonal(width, height) * 0.5;
    let angle = angle_degrees.to_radians();
    let (cx, cy) = image_center(width, height);

    (
        (cx as f32 - angle.cos() * distance) as i64,
        (cy as f32 - angle.sin() * distance) as i64
    )
}

/// Build the light field of the rays, before intensity is applied
///
/// Rays are drawn from [`ray_source`] towards `angle`, blurred with a sigma
/// of `0.01 * diagonal`, and mixed `0.6/0.4` with a further blur of that
/// result at `0.03 * diagonal`
///
/// # Errors
/// Propagates blur failures
pub fn light_rays_field(
    width: usize, height: usize, params: &LightRaysParams, random: &mut dyn UniformSource
) -> Result<ScalarField, ImageErrors> {
    let diag = diagonal(width, height);
    let angle = params.angle.to_radians();
    let source = ray_source(width, height, params.angle);

    debug!("Light rays source at {:?}, diagonal {}", source, diag);

    let segments = ray_segments(
        source,
        angle,
        params.count as usize,
        RAY_JITTER_DEGREES,
        diag * params.length,
        random
    );
    let mut rays = ScalarField::new(width, height, 0.0);
    rasterize_segments(&mut rays, &segments, params.width as f32);

    blur_field(&mut rays, diag * RAY_BLUR_FRACTION, BorderMode::Reflect101)?;

    let mut glow = rays.clone();
    blur_field(&mut glow, diag * RAY_GLOW_FRACTION, BorderMode::Reflect101)?;

    for (ray, g) in rays.data_mut().iter_mut().zip(glow.data()) {
        *ray = *ray * 0.6 + *g * 0.4;
    }
    Ok(rays)
}

/// Screen light rays onto the color channels of an image
///
/// # Errors
/// See [`LightRaysParams::validate`]
pub fn apply_light_rays(
    image: &mut Image, params: &LightRaysParams, options: &EffectOptions,
    random: &mut dyn UniformSource
) -> Result<(), ImageErrors> {
    let (width, height) = image.dimensions();
    let params = params.validate(options)?;

    debug!("Light rays with {:?}", params);

    let rays = light_rays_field(width, height, &params, random)?;

    for channel in image.channels_mut(true) {
        for (pix, ray) in channel.iter_mut().zip(rays.data()) {
            let blended = screen_blend(f32::from(*pix) / 255.0, ray * params.intensity);
            *pix = truncate_u8(blended.clamp(0.0, 1.0) * 255.0);
        }
    }
    Ok(())
}

/// Light rays operation
///
/// Borrows the random source for its lifetime, each execution continues
/// the sequence where the last one stopped
pub struct LightRays<'a> {
    params:  LightRaysParams,
    options: EffectOptions,
    random:  RefCell<&'a mut dyn UniformSource>
}

impl<'a> LightRays<'a> {
    #[must_use]
    pub fn new(params: LightRaysParams, random: &'a mut dyn UniformSource) -> LightRays<'a> {
        LightRays {
            params,
            options: EffectOptions::default(),
            random: RefCell::new(random)
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> LightRays<'a> {
        self.options = options;
        self
    }
}

impl<'a> OperationsTrait for LightRays<'a> {
    fn name(&self) -> &'static str {
        "Light Rays"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let mut random = self.random.borrow_mut();
        apply_light_rays(image, &self.params, &self.options, &mut **random)
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

    use lumen_image::field::ScalarField;

    use crate::effects::light_rays::*;
    use crate::gaussian_blur::{blur_field, BorderMode};
    use crate::geometry::{rasterize_segments, ray_segments};
    use crate::random::{seeded_source, UniformSource};

    /// Every ray goes straight along the main angle with brightness 0.85
    struct Midpoint;

    impl UniformSource for Midpoint {
        fn next_f32(&mut self, low: f32, high: f32) -> f32 {
            (low + high) / 2.0
        }
    }

    fn column_max(field: &ScalarField, x: usize) -> f32 {
        let (_, height) = field.dimensions();
        (0..height).map(|y| field.get(x, y)).fold(0.0, f32::max)
    }

    #[test]
    fn source_sits_behind_the_center() {
        // diagonal of 200x50 is ~206.2, so the source is ~103 pixels away
        assert_eq!(ray_source(200, 50, 0.0), (-3, 25));
        assert_eq!(ray_source(200, 50, 180.0), (203, 25));
        assert_eq!(ray_source(200, 50, 90.0), (100, -78));
    }

    #[test]
    fn rays_travel_along_the_angle() {
        let params = LightRaysParams {
            angle: 0.0,
            ..LightRaysParams::default()
        };
        let field = light_rays_field(200, 50, &params, &mut Midpoint).unwrap();

        assert!(field.get(0, 25) > 1.0);
        assert!(field.get(100, 25) > 1.0);
        // rays end at x=161, beyond both blurs nothing is lit
        for x in 196..200 {
            assert!(column_max(&field, x) < 1e-3);
        }

        let params = LightRaysParams {
            angle: 180.0,
            ..LightRaysParams::default()
        };
        let field = light_rays_field(200, 50, &params, &mut Midpoint).unwrap();

        assert!(field.get(199, 25) > 1.0);
        assert!(field.get(100, 25) > 1.0);
        for x in 0..4 {
            assert!(column_max(&field, x) < 1e-3);
        }
    }

    #[test]
    fn field_mixes_two_blurs() {
        let (width, height) = (120, 90);
        let params = LightRaysParams::default();
        let diag = (width as f32).hypot(height as f32);

        let segments = ray_segments(
            ray_source(width, height, params.angle),
            params.angle.to_radians(),
            params.count as usize,
            RAY_JITTER_DEGREES,
            diag * params.length,
            &mut seeded_source(21)
        );
        let mut sharp = ScalarField::new(width, height, 0.0);
        rasterize_segments(&mut sharp, &segments, params.width as f32);
        blur_field(&mut sharp, diag * 0.01, BorderMode::Reflect101).unwrap();

        let mut glow = sharp.clone();
        blur_field(&mut glow, diag * 0.03, BorderMode::Reflect101).unwrap();

        let field = light_rays_field(width, height, &params, &mut seeded_source(21)).unwrap();

        for ((f, s), g) in field.data().iter().zip(sharp.data()).zip(glow.data()) {
            assert!((f - (0.6 * s + 0.4 * g)).abs() < 1e-5);
        }
        assert!(field.max() > 0.0);
    }

    #[test]
    fn rays_only_brighten() {
        let image = Image::fill(80, ColorSpace::RGBA, 64, 64);
        let mut random = seeded_source(7);
        let out = LightRays::new(LightRaysParams::default(), &mut random)
            .clone_and_execute(&image)
            .unwrap();

        let brighter = out
            .channels_ref(true)
            .iter()
            .flatten()
            .filter(|x| **x > 80)
            .count();
        assert!(brighter > 0);
        assert!(out.channels_ref(true).iter().flatten().all(|x| *x >= 79));
        assert_eq!(out.alpha_channel(), image.alpha_channel());
    }

    #[test]
    fn same_seed_same_field() {
        let params = LightRaysParams::default();
        let a = light_rays_field(50, 40, &params, &mut seeded_source(3)).unwrap();
        let b = light_rays_field(50, 40, &params, &mut seeded_source(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn angle_wraps_around() {
        let options = EffectOptions::default();
        let params = LightRaysParams {
            angle: 405.0,
            ..LightRaysParams::default()
        };
        assert_eq!(params.validate(&options).unwrap().angle, 45.0);

        let params = LightRaysParams {
            angle: -90.0,
            ..LightRaysParams::default()
        };
        assert_eq!(params.validate(&options).unwrap().angle, 270.0);
    }

    #[test]
    fn zero_count_is_rejected() {
        let image = Image::fill(80, ColorSpace::RGB, 16, 16);
        let mut random = seeded_source(7);
        let params = LightRaysParams {
            count: 0,
            ..LightRaysParams::default()
        };
        let err = LightRays::new(params, &mut random)
            .clone_and_execute(&image)
            .unwrap_err();
        assert!(matches!(err, ImageErrors::InvalidParameter("count", _)));
    }
}
