/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for the codecs the library understands
//!
//! Only PNG and JPEG are supported, both can be enabled and disabled
//! with the `png` and `jpeg` features.
//!
//! Decoded images are always 8 bit, 16 bit PNG files are stripped
//! to 8 bits during decoding.
use std::path::Path;

#[cfg(any(feature = "jpeg", feature = "png"))]
use lumen_core::colorspace::ColorSpace;
use lumen_core::log::trace;

use crate::errors::{ImageErrors, ImgEncodeErrors};
use crate::image::Image;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

/// All supported image formats
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum ImageFormat {
    /// Joint Photographic Experts Group
    JPEG,
    /// Portable Network Graphics
    PNG,
    /// Any unknown format
    Unknown
}

impl ImageFormat {
    /// Guess the format from a file extension, case insensitive
    pub fn from_extension(ext: &str) -> ImageFormat {
        match ext.to_ascii_lowercase().as_str() {
            "png" => ImageFormat::PNG,
            "jpg" | "jpeg" => ImageFormat::JPEG,
            _ => ImageFormat::Unknown
        }
    }

    /// Guess the format from the extension of a path
    pub fn from_path<P: AsRef<Path>>(path: P) -> ImageFormat {
        path.as_ref()
            .extension()
            .and_then(|x| x.to_str())
            .map_or(ImageFormat::Unknown, ImageFormat::from_extension)
    }

    pub const fn has_decoder(self) -> bool {
        match self {
            ImageFormat::JPEG => cfg!(feature = "jpeg"),
            ImageFormat::PNG => cfg!(feature = "png"),
            ImageFormat::Unknown => false
        }
    }

    pub const fn has_encoder(self) -> bool {
        self.has_decoder()
    }

    /// Decode `data` which is expected to be in this format
    ///
    /// # Errors
    /// [`ImageErrors::ImageDecodeErrors`] if the format is unknown, not compiled in
    /// or the data is corrupt
    pub fn decode(self, data: &[u8]) -> Result<Image, ImageErrors> {
        match self {
            ImageFormat::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    jpeg::decode_jpeg(data)
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    let _ = data;
                    Err(ImageErrors::ImageDecodeErrors(
                        "JPEG support was not compiled in, enable the `jpeg` feature".to_string()
                    ))
                }
            }
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    png::decode_png(data)
                }
                #[cfg(not(feature = "png"))]
                {
                    let _ = data;
                    Err(ImageErrors::ImageDecodeErrors(
                        "PNG support was not compiled in, enable the `png` feature".to_string()
                    ))
                }
            }
            ImageFormat::Unknown => Err(ImageErrors::ImageDecodeErrors(
                "Unknown image format, could not decode".to_string()
            ))
        }
    }

    /// Encode an image into this format, returning the encoded bytes
    ///
    /// # Errors
    /// [`ImageErrors::EncodeErrors`] if the format is unknown, not compiled in
    /// or the encoder fails
    pub fn encode(self, image: &Image) -> Result<Vec<u8>, ImageErrors> {
        match self {
            ImageFormat::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    jpeg::encode_jpeg(image)
                }
                #[cfg(not(feature = "jpeg"))]
                {
                    let _ = image;
                    Err(ImgEncodeErrors::GenericStatic("JPEG encoder was not compiled in").into())
                }
            }
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    png::encode_png(image)
                }
                #[cfg(not(feature = "png"))]
                {
                    let _ = image;
                    Err(ImgEncodeErrors::GenericStatic("PNG encoder was not compiled in").into())
                }
            }
            ImageFormat::Unknown => {
                Err(ImgEncodeErrors::GenericStatic("No encoder for unknown format").into())
            }
        }
    }
}

#[cfg(any(feature = "jpeg", feature = "png"))]
pub(crate) fn from_zune_colorspace(colorspace: zune_core::colorspace::ColorSpace) -> Option<ColorSpace> {
    use zune_core::colorspace::ColorSpace as ZColorSpace;

    match colorspace {
        ZColorSpace::RGB => Some(ColorSpace::RGB),
        ZColorSpace::RGBA => Some(ColorSpace::RGBA),
        ZColorSpace::BGR => Some(ColorSpace::BGR),
        ZColorSpace::BGRA => Some(ColorSpace::BGRA),
        ZColorSpace::Luma => Some(ColorSpace::Luma),
        ZColorSpace::LumaA => Some(ColorSpace::LumaA),
        _ => None
    }
}

/// Guess the format of an image from its first bytes
pub fn guess_format(bytes: &[u8]) -> ImageFormat {
    const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

    if bytes.starts_with(&PNG_SIGNATURE) {
        ImageFormat::PNG
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        ImageFormat::JPEG
    } else {
        ImageFormat::Unknown
    }
}

impl Image {
    /// Decode an image held in memory, the format is guessed from its contents
    ///
    /// # Errors
    /// See [`ImageFormat::decode`]
    pub fn read(data: &[u8]) -> Result<Image, ImageErrors> {
        let format = guess_format(data);
        trace!("Guessed image format as {:?}", format);
        format.decode(data)
    }

    /// Open and decode an image file
    ///
    /// # Errors
    /// [`ImageErrors::IoErrors`] if the file cannot be read, otherwise
    /// see [`ImageFormat::decode`]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Image, ImageErrors> {
        let data = std::fs::read(path)?;
        Image::read(&data)
    }

    /// Encode the image using the format implied by the file extension and
    /// write it to `path`
    ///
    /// # Errors
    /// Encoding errors or [`ImageErrors::IoErrors`] when writing fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageErrors> {
        let format = ImageFormat::from_path(path.as_ref());
        self.save_to(path, format)
    }

    /// Encode the image in `format` and write it to `path`
    ///
    /// # Errors
    /// Encoding errors or [`ImageErrors::IoErrors`] when writing fails
    pub fn save_to<P: AsRef<Path>>(&self, path: P, format: ImageFormat) -> Result<(), ImageErrors> {
        let data = format.encode(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::codecs::{guess_format, ImageFormat};

    #[test]
    fn format_from_magic_bytes() {
        assert_eq!(
            guess_format(&[137, 80, 78, 71, 13, 10, 26, 10, 0]),
            ImageFormat::PNG
        );
        assert_eq!(guess_format(&[0xFF, 0xD8, 0xFF]), ImageFormat::JPEG);
        assert_eq!(guess_format(b"GIF89a"), ImageFormat::Unknown);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ImageFormat::from_path("a/b/out.JPG"), ImageFormat::JPEG);
        assert_eq!(ImageFormat::from_path("out.png"), ImageFormat::PNG);
        assert_eq!(ImageFormat::from_path("out"), ImageFormat::Unknown);
    }

    #[test]
    #[cfg(feature = "png")]
    fn png_round_trip_keeps_pixels() {
        use lumen_core::colorspace::ColorSpace;

        use crate::image::Image;

        let image = Image::from_fn(7, 5, ColorSpace::RGBA, |x, y, px| {
            px.copy_from_slice(&[(x * 30) as u8, (y * 40) as u8, 9, 200]);
        });
        let encoded = ImageFormat::PNG.encode(&image).unwrap();
        let decoded = Image::read(&encoded).unwrap();

        assert_eq!(decoded, image);
    }
}
