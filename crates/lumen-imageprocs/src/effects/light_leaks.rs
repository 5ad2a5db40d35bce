/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Light leaks
//!
//! A few large colored discs are thrown onto the left half of the frame,
//! blurred until only soft blotches remain and added to the image.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]

use core::cell::RefCell;

use lumen_core::colorspace::ColorComponent;
use lumen_core::log::{debug, trace};
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::blend::weighted_add;
use crate::gaussian_blur::GaussianBlur;
use crate::random::UniformSource;
use crate::utils::check_range;

/// Number of leaks drawn
pub const LEAK_COUNT: usize = 4;
/// Kernel size of the leak blur
pub const LEAK_KERNEL_SIZE: usize = 151;
/// Colors a leak can have, as red, green and blue
///
/// Blue, light blue, orange and violet
pub const LEAK_PALETTE: [[u8; 3]; 4] = [
    [50, 100, 255],
    [100, 200, 255],
    [255, 150, 100],
    [200, 50, 255]
];

/// Parameters of the light leak effect
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct LightLeaksParams {
    /// Weight of the leak overlay, `0.1..=1.0`
    pub intensity: f32
}

impl Default for LightLeaksParams {
    fn default() -> Self {
        LightLeaksParams { intensity: 0.5 }
    }
}

impl LightLeaksParams {
    /// # Errors
    /// Non finite intensity, or intensity out of range in strict mode
    pub fn validate(&self, options: &EffectOptions) -> Result<LightLeaksParams, ImageErrors> {
        Ok(LightLeaksParams {
            intensity: check_range("intensity", self.intensity, 0.1, 1.0, options)?
        })
    }
}

/// A filled disc of a single color
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Leak {
    pub center: (i64, i64),
    pub radius: i64,
    pub color:  [u8; 3]
}

/// Draw the leaks for an image of the given size
///
/// Every leak draws its x position in `[0, width/2)`, its y position in
/// `[0, height)`, its radius in `[width/6, width/3)` and its palette index,
/// in that order
pub fn random_leaks(width: usize, height: usize, random: &mut dyn UniformSource) -> Vec<Leak> {
    let (w, h) = (width as i64, height as i64);

    (0..LEAK_COUNT)
        .map(|_| {
            let x = random.next_int(0, w / 2);
            let y = random.next_int(0, h);
            let radius = random.next_int(w / 6, w / 3);
            let index = random.next_int(0, LEAK_PALETTE.len() as i64) as usize;

            Leak {
                center: (x, y),
                radius,
                color: LEAK_PALETTE[index.min(LEAK_PALETTE.len() - 1)]
            }
        })
        .collect()
}

/// Paint leaks onto `overlay`, later leaks cover earlier ones
fn paint_leaks(overlay: &mut Image, leaks: &[Leak]) {
    let (width, height) = overlay.dimensions();

    for leak in leaks {
        let (cx, cy) = leak.center;
        let r = leak.radius;

        let x_start = (cx - r).max(0);
        let x_end = (cx + r).min(width as i64 - 1);
        let y_start = (cy - r).max(0);
        let y_end = (cy + r).min(height as i64 - 1);

        if x_start > x_end || y_start > y_end {
            trace!("Leak at {:?} is outside the image", leak.center);
            continue;
        }
        let components = [
            ColorComponent::Red,
            ColorComponent::Green,
            ColorComponent::Blue
        ];
        for (component, value) in components.into_iter().zip(leak.color) {
            let Some(channel) = overlay.color_channel_mut(component) else {
                continue;
            };
            for y in y_start..=y_end {
                let dy = y - cy;
                for x in x_start..=x_end {
                    let dx = x - cx;
                    if dx * dx + dy * dy <= r * r {
                        channel[y as usize * width + x as usize] = value;
                    }
                }
            }
        }
    }
}

/// Add blurred light leaks to the color channels of an image
///
/// # Errors
/// See [`LightLeaksParams::validate`]
pub fn apply_light_leaks(
    image: &mut Image, params: &LightLeaksParams, options: &EffectOptions,
    random: &mut dyn UniformSource
) -> Result<(), ImageErrors> {
    let (width, height) = image.dimensions();
    let params = params.validate(options)?;

    let leaks = random_leaks(width, height, random);
    debug!("Light leaks with intensity {}: {:?}", params.intensity, leaks);

    let mut overlay = Image::fill(0, image.colorspace(), width, height);
    paint_leaks(&mut overlay, &leaks);

    GaussianBlur::from_kernel_size(LEAK_KERNEL_SIZE).execute_impl(&mut overlay)?;

    for (channel, leak) in image
        .channels_mut(true)
        .iter_mut()
        .zip(overlay.channels_ref(true))
    {
        weighted_add(channel, leak, params.intensity);
    }
    Ok(())
}

/// Light leaks operation
///
/// Borrows the random source for its lifetime, each execution continues
/// the sequence where the last one stopped
pub struct LightLeaks<'a> {
    params:  LightLeaksParams,
    options: EffectOptions,
    random:  RefCell<&'a mut dyn UniformSource>
}

impl<'a> LightLeaks<'a> {
    #[must_use]
    pub fn new(params: LightLeaksParams, random: &'a mut dyn UniformSource) -> LightLeaks<'a> {
        LightLeaks {
            params,
            options: EffectOptions::default(),
            random: RefCell::new(random)
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> LightLeaks<'a> {
        self.options = options;
        self
    }
}

impl<'a> OperationsTrait for LightLeaks<'a> {
    fn name(&self) -> &'static str {
        "Light Leaks"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let mut random = self.random.borrow_mut();
        apply_light_leaks(image, &self.params, &self.options, &mut **random)
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

    use crate::effects::light_leaks::*;
    use crate::random::seeded_source;

    #[test]
    fn leaks_stay_in_their_ranges() {
        let mut random = seeded_source(11);

        for _ in 0..50 {
            for leak in random_leaks(120, 80, &mut random) {
                assert!((0..60).contains(&leak.center.0));
                assert!((0..80).contains(&leak.center.1));
                assert!((20..40).contains(&leak.radius));
                assert!(LEAK_PALETTE.contains(&leak.color));
            }
        }
    }

    #[test]
    fn later_leaks_cover_earlier_ones() {
        let mut overlay = Image::fill(0, ColorSpace::BGR, 10, 10);
        let leaks = [
            Leak {
                center: (5, 5),
                radius: 3,
                color:  LEAK_PALETTE[0]
            },
            Leak {
                center: (5, 5),
                radius: 1,
                color:  LEAK_PALETTE[2]
            }
        ];
        paint_leaks(&mut overlay, &leaks);

        // BGR order, orange inside a blue disc
        assert_eq!(overlay.pixel(5, 5), vec![100, 150, 255]);
        assert_eq!(overlay.pixel(5, 8), vec![255, 100, 50]);
        assert_eq!(overlay.pixel(0, 0), vec![0, 0, 0]);
    }

    #[test]
    fn palette_colors_land_in_their_components() {
        let mut overlay = Image::fill(0, ColorSpace::RGB, 3, 3);
        let leak = Leak {
            center: (1, 1),
            radius: 1,
            color:  LEAK_PALETTE[0]
        };
        paint_leaks(&mut overlay, &[leak]);

        // the first leak is blue
        assert_eq!(overlay.pixel(1, 1), vec![50, 100, 255]);
    }

    #[test]
    fn leaks_only_brighten() {
        let image = Image::fill(60, ColorSpace::RGBA, 48, 32);
        let mut random = seeded_source(5);
        let out = LightLeaks::new(LightLeaksParams::default(), &mut random)
            .clone_and_execute(&image)
            .unwrap();

        assert!(out.channels_ref(true).iter().flatten().all(|x| *x >= 60));
        assert!(out.channels_ref(true).iter().flatten().any(|x| *x > 60));
        assert_eq!(out.alpha_channel(), image.alpha_channel());
    }
}
