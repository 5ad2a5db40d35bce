/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PNG decoding and encoding via `zune-png`
use lumen_core::colorspace::ColorSpace;
use lumen_core::log::debug;
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace as ZColorSpace;
use zune_core::options::{DecoderOptions, EncoderOptions};
use zune_png::{PngDecoder, PngEncoder};

use crate::codecs::from_zune_colorspace;
use crate::errors::{ImageErrors, ImgEncodeErrors};
use crate::image::Image;

/// Colorspaces the png encoder can store directly
pub static PNG_ENCODER_COLORSPACES: [ColorSpace; 4] = [
    ColorSpace::RGB,
    ColorSpace::RGBA,
    ColorSpace::Luma,
    ColorSpace::LumaA
];

fn to_zune_colorspace(colorspace: ColorSpace) -> ZColorSpace {
    match colorspace {
        ColorSpace::RGB => ZColorSpace::RGB,
        ColorSpace::RGBA => ZColorSpace::RGBA,
        ColorSpace::BGR => ZColorSpace::BGR,
        ColorSpace::BGRA => ZColorSpace::BGRA,
        ColorSpace::Luma => ZColorSpace::Luma,
        ColorSpace::LumaA => ZColorSpace::LumaA
    }
}

/// Decode a png file, 16 bit images are stripped to 8 bits
///
/// # Errors
/// [`ImageErrors::ImageDecodeErrors`] for corrupt files or unsupported layouts
pub fn decode_png(data: &[u8]) -> Result<Image, ImageErrors> {
    let options = DecoderOptions::default().png_set_strip_to_8bit(true);
    let mut decoder = PngDecoder::new_with_options(data, options);

    let pixels = decoder
        .decode_raw()
        .map_err(|e| ImageErrors::ImageDecodeErrors(format!("{:?}", e)))?;

    let (width, height) = decoder
        .get_dimensions()
        .ok_or(ImageErrors::GenericStr("Png decoder did not report dimensions"))?;

    let colorspace = decoder
        .get_colorspace()
        .and_then(from_zune_colorspace)
        .ok_or_else(|| {
            ImageErrors::ImageDecodeErrors("Png decoder produced an unsupported colorspace".to_string())
        })?;

    debug!("Decoded {}x{} png image in {:?}", width, height, colorspace);

    Image::from_u8(&pixels, width, height, colorspace)
}

/// Encode an image as png
///
/// BGR(A) images are reordered to RGB(A) first since png has no BGR layout
///
/// # Errors
/// Never returns errors for valid images, the result type is kept for symmetry
/// with the other encoders
pub fn encode_png(image: &Image) -> Result<Vec<u8>, ImageErrors> {
    let mut image = image.clone();

    match image.colorspace() {
        ColorSpace::BGR => image.convert_colorspace(ColorSpace::RGB)?,
        ColorSpace::BGRA => image.convert_colorspace(ColorSpace::RGBA)?,
        _ => ()
    }
    let colorspace = image.colorspace();

    if !PNG_ENCODER_COLORSPACES.contains(&colorspace) {
        return Err(ImgEncodeErrors::UnsupportedColorspace(colorspace, &PNG_ENCODER_COLORSPACES).into());
    }
    let (width, height) = image.dimensions();
    let pixels = image.flatten_u8();

    let options = EncoderOptions::new(
        width,
        height,
        to_zune_colorspace(colorspace),
        BitDepth::Eight
    );
    let mut encoder = PngEncoder::new(&pixels, options);

    Ok(encoder.encode())
}
