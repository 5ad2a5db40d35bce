/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! JPEG decoding via `zune-jpeg` and encoding via `jpeg-encoder`
use jpeg_encoder::{ColorType, Encoder};
use lumen_core::colorspace::ColorSpace;
use lumen_core::log::debug;
use zune_core::colorspace::ColorSpace as ZColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

use crate::codecs::from_zune_colorspace;
use crate::errors::{ImageErrors, ImgEncodeErrors};
use crate::image::Image;

/// Quality used when saving jpeg files
pub const JPEG_QUALITY: u8 = 90;

/// Decode a jpeg file into an RGB image
///
/// # Errors
/// [`ImageErrors::ImageDecodeErrors`] for corrupt files
pub fn decode_jpeg(data: &[u8]) -> Result<Image, ImageErrors> {
    let options = DecoderOptions::default().jpeg_set_out_colorspace(ZColorSpace::RGB);
    let mut decoder = JpegDecoder::new_with_options(data, options);

    let pixels = decoder
        .decode()
        .map_err(|e| ImageErrors::ImageDecodeErrors(format!("{:?}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .ok_or(ImageErrors::GenericStr("Jpeg decoder did not report dimensions"))?;

    let colorspace = decoder
        .get_output_colorspace()
        .and_then(from_zune_colorspace)
        .ok_or_else(|| {
            ImageErrors::ImageDecodeErrors("Jpeg decoder produced an unsupported colorspace".to_string())
        })?;

    debug!("Decoded {}x{} jpeg image in {:?}", width, height, colorspace);

    Image::from_u8(&pixels, width, height, colorspace)
}

/// Encode an image as jpeg
///
/// Alpha is kept in the pixel layout passed to the encoder, which
/// discards it, jpeg has no transparency
///
/// # Errors
/// - Images wider or taller than 65535 pixels
/// - Errors from the underlying encoder
pub fn encode_jpeg(image: &Image) -> Result<Vec<u8>, ImageErrors> {
    let (width, height) = image.dimensions();

    let w = u16::try_from(width).map_err(|_| {
        ImgEncodeErrors::Generic(format!("Width {} too large for jpeg", width))
    })?;
    let h = u16::try_from(height).map_err(|_| {
        ImgEncodeErrors::Generic(format!("Height {} too large for jpeg", height))
    })?;

    let color_type = match image.colorspace() {
        ColorSpace::RGB => ColorType::Rgb,
        ColorSpace::RGBA => ColorType::Rgba,
        ColorSpace::BGR => ColorType::Bgr,
        ColorSpace::BGRA => ColorType::Bgra,
        ColorSpace::Luma => ColorType::Luma,
        ColorSpace::LumaA => {
            let mut gray = image.clone();
            gray.convert_colorspace(ColorSpace::Luma)?;
            return encode_jpeg(&gray);
        }
    };
    let pixels = image.flatten_u8();
    let mut sink = Vec::new();

    Encoder::new(&mut sink, JPEG_QUALITY)
        .encode(&pixels, w, h, color_type)
        .map_err(|e| ImgEncodeErrors::ImageEncodeErrors(e.to_string()))?;

    Ok(sink)
}
