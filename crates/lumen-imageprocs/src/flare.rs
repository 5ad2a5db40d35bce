/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Flare stamps
//!
//! A lens flare stamps a small image onto the picture several times. The
//! stamp is either loaded from a file or synthesized as a white disc whose
//! alpha falls off linearly from the middle to the edge.
#![allow(clippy::cast_precision_loss)]

use std::path::Path;

use lumen_core::colorspace::ColorSpace;
use lumen_core::log::{debug, warn};
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;

/// Fraction of the smaller image side used for a synthesized stamp
pub const SYNTHETIC_FLARE_FRACTION: f32 = 0.3;

/// An RGB or RGBA image used as a flare stamp
#[derive(Clone, Debug, PartialEq)]
pub struct FlareTemplate {
    image: Image
}

impl FlareTemplate {
    /// Synthesize a `size_px x size_px` stamp
    ///
    /// The stamp is white, its alpha is `max(0, 255 * (1 - d / r))` truncated,
    /// where `d` is the distance to pixel `(size/2, size/2)` and `r = size / 2`.
    /// A one pixel stamp is a single opaque pixel
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn synthesize(size_px: usize) -> FlareTemplate {
        let center = (size_px / 2) as f32;
        let radius = (size_px / 2) as f32;

        let image = Image::from_fn(size_px, size_px, ColorSpace::RGBA, |x, y, px| {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let distance = (dx * dx + dy * dy).sqrt();

            let alpha = if radius > 0.0 {
                (255.0 * (1.0 - distance / radius)).max(0.0)
            } else if distance == 0.0 {
                255.0
            } else {
                0.0
            };
            px.copy_from_slice(&[255, 255, 255, alpha as u8]);
        });
        FlareTemplate { image }
    }

    /// Synthesize the stamp used for an image of the given dimensions,
    /// `0.3 * min(width, height)` pixels wide
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn synthesize_for(width: usize, height: usize) -> FlareTemplate {
        let size = (width.min(height) as f32 * SYNTHETIC_FLARE_FRACTION) as usize;
        FlareTemplate::synthesize(size)
    }

    /// Use an existing image as a stamp
    ///
    /// BGR layouts are reordered to RGB and grayscale images are expanded
    /// so the stamp always has red, green and blue planes
    ///
    /// # Errors
    /// Propagates colorspace conversion failures
    pub fn from_image(mut image: Image) -> Result<FlareTemplate, ImageErrors> {
        let target = if image.colorspace().has_alpha() {
            ColorSpace::RGBA
        } else {
            ColorSpace::RGB
        };
        image.convert_colorspace(target)?;
        Ok(FlareTemplate { image })
    }

    /// Load a stamp from an image file
    ///
    /// # Errors
    /// [`ImageErrors::MissingAsset`] if the file does not exist or cannot be decoded,
    /// callers are expected to fall back to [`FlareTemplate::synthesize_for`]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<FlareTemplate, ImageErrors> {
        let path = path.as_ref();

        let image = Image::open(path).map_err(|e| {
            warn!("Could not load flare template {:?}: {:?}", path, e);
            ImageErrors::MissingAsset(format!("{}", path.display()))
        })?;
        debug!("Loaded flare template {:?} {:?}", path, image.dimensions());

        FlareTemplate::from_image(image)
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        self.image.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_image::errors::ImageErrors;
    use lumen_image::image::Image;

    use crate::flare::FlareTemplate;

    #[test]
    fn synthetic_stamp_fades_from_the_middle() {
        let template = FlareTemplate::synthesize(30);
        let image = template.image();

        assert_eq!(image.colorspace(), ColorSpace::RGBA);
        assert_eq!(image.pixel(15, 15), vec![255, 255, 255, 255]);
        // d = 5, r = 15, 255 * 2/3 = 170 before truncation
        assert!((169..=170).contains(&image.pixel(20, 15)[3]));
        assert_eq!(image.pixel(0, 0)[3], 0);
        assert_eq!(image.pixel(15, 0)[3], 0);
    }

    #[test]
    fn synthetic_size_follows_the_image() {
        assert_eq!(FlareTemplate::synthesize_for(200, 100).dimensions(), (30, 30));
        assert_eq!(FlareTemplate::synthesize_for(3, 3).dimensions(), (0, 0));
        assert_eq!(FlareTemplate::synthesize(1).image().pixel(0, 0)[3], 255);
    }

    #[test]
    fn bgr_templates_are_reordered() {
        let bgr = Image::from_fn(2, 2, ColorSpace::BGR, |_, _, px| {
            px.copy_from_slice(&[1, 2, 3]);
        });
        let template = FlareTemplate::from_image(bgr).unwrap();
        assert_eq!(template.image().pixel(0, 0), vec![3, 2, 1]);
    }

    #[test]
    fn missing_file_is_a_missing_asset() {
        let err = FlareTemplate::open("/definitely/not/here/flare.png").unwrap_err();
        assert!(matches!(err, ImageErrors::MissingAsset(_)));
    }
}
