/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The lighting effects
//!
//! Each effect has a parameter struct and an operation implementing
//! [`OperationsTrait`](lumen_image::traits::OperationsTrait).
//!
//! | Effect              | Builds                                    | Composites with   |
//! |---------------------|-------------------------------------------|-------------------|
//! | Spotlight           | radial falloff                            | multiply          |
//! | Vignette            | separable gaussian product                | multiply          |
//! | Light rays          | jittered rays, two blurs                  | screen            |
//! | Color temperature   | red/blue shift                            | channel replace   |
//! | Dramatic shadows    | adaptive threshold mask                   | weighted subtract |
//! | Glowing highlights  | threshold mask, blurred                   | weighted add      |
//! | Light leaks         | random colored discs, heavily blurred     | weighted add      |
//! | Lens flare          | stamps, streak and halo                   | alpha stamp, screen |
//!
//! Parameters outside their documented range are clamped or rejected
//! depending on [`EffectOptions::strict_mode`](lumen_core::options::EffectOptions::strict_mode).
//! Alpha channels are carried through unchanged.
pub mod color_temperature;
pub mod dramatic_shadows;
pub mod glowing_highlights;
pub mod lens_flare;
pub mod light_leaks;
pub mod light_rays;
pub mod spotlight;
pub mod vignette;

/// Middle pixel of an image, rounded down
#[allow(clippy::cast_possible_wrap)]
pub(crate) const fn image_center(width: usize, height: usize) -> (i64, i64) {
    ((width / 2) as i64, (height / 2) as i64)
}

/// Length of the image diagonal in pixels
#[allow(clippy::cast_precision_loss)]
pub(crate) fn diagonal(width: usize, height: usize) -> f32 {
    (width as f32).hypot(height as f32)
}
