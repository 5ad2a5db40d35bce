/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Luma computation for masks
//!
//! Shadow and highlight masks are computed on `0.299 R + 0.587 G + 0.114 B`,
//! evaluated in 14 bit fixed point and rounded
use lumen_core::colorspace::ColorComponent;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;

const R_COEF: u32 = 4899;
const G_COEF: u32 = 9617;
const B_COEF: u32 = 1868;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Convert three color planes into a luma plane
#[allow(clippy::cast_possible_truncation)]
pub fn rgb_to_grayscale((r, g, b): (&[u8], &[u8], &[u8]), out: &mut [u8]) {
    for (((r, g), b), out) in r.iter().zip(g).zip(b).zip(out.iter_mut()) {
        let luma = u32::from(*r) * R_COEF + u32::from(*g) * G_COEF + u32::from(*b) * B_COEF;
        *out = ((luma + ROUND) >> SHIFT) as u8;
    }
}

/// Luma plane of a color image, the channel order of the
/// colorspace is respected so BGR and RGB images give the same result
///
/// # Errors
/// [`ImageErrors::ShapeMismatch`] for grayscale images
pub fn image_luma(image: &Image) -> Result<Vec<u8>, ImageErrors> {
    let (width, height) = image.dimensions();

    let plane = |component: ColorComponent| {
        image.color_channel(component).ok_or_else(|| {
            ImageErrors::ShapeMismatch(format!(
                "Luma needs a color image, found {:?}",
                image.colorspace()
            ))
        })
    };
    let r = plane(ColorComponent::Red)?;
    let g = plane(ColorComponent::Green)?;
    let b = plane(ColorComponent::Blue)?;

    let mut out = vec![0; width * height];
    rgb_to_grayscale((r, g, b), &mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use lumen_core::colorspace::ColorSpace;
    use lumen_image::image::Image;

    use crate::grayscale::{image_luma, rgb_to_grayscale};

    #[test]
    fn weights_sum_to_white() {
        let mut out = [0; 3];
        rgb_to_grayscale(
            (&[255, 0, 10], &[255, 0, 200], &[255, 0, 30]),
            &mut out
        );
        // 0.299*10 + 0.587*200 + 0.114*30 = 123.81
        assert_eq!(out, [255, 0, 124]);
    }

    #[test]
    fn channel_order_is_respected() {
        let rgb = Image::from_fn(2, 1, ColorSpace::RGB, |_, _, px| {
            px.copy_from_slice(&[200, 10, 40]);
        });
        let bgra = Image::from_fn(2, 1, ColorSpace::BGRA, |_, _, px| {
            px.copy_from_slice(&[40, 10, 200, 0]);
        });
        assert_eq!(image_luma(&rgb).unwrap(), image_luma(&bgra).unwrap());
    }

    #[test]
    fn grayscale_input_is_rejected() {
        let luma = Image::fill(0, ColorSpace::Luma, 2, 2);
        assert!(image_luma(&luma).is_err());
    }
}

#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    #[bench]
    fn rgb_to_grayscale_scalar(b: &mut test::Bencher) {
        use crate::grayscale::rgb_to_grayscale;
        let width = 800;
        let height = 800;
        let dimensions = width * height;

        let c1 = vec![0; dimensions];
        let c2 = vec![0; dimensions];
        let c3 = vec![0; dimensions];

        let mut c4 = vec![255; dimensions];
        b.iter(|| {
            rgb_to_grayscale((&c1, &c2, &c3), &mut c4);
        });
    }
}
