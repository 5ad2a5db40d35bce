/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

use lumen_core::colorspace::ColorSpace;

/// All possible image errors that can occur.
///
/// This is the grandfather of image errors and contains
/// all decoding,processing and encoding errors possible
pub enum ImageErrors {
    /// A parameter is outside its domain.
    ///
    /// Contains the parameter name and the reason it was rejected
    InvalidParameter(&'static str, String),
    /// The pixel buffer is not a raster the operation can work on,
    /// e.g wrong channel count or channel lengths that do not match
    /// the dimensions
    ShapeMismatch(String),
    /// An optional asset could not be loaded.
    ///
    /// Effects never return this, it comes from asset loaders and
    /// callers are expected to fall back to a synthesized asset
    MissingAsset(String),
    DimensionsMisMatch(usize, usize),
    UnsupportedColorspace(ColorSpace, &'static str, &'static [ColorSpace]),
    ImageDecodeErrors(String),
    EncodeErrors(ImgEncodeErrors),
    IoErrors(std::io::Error),
    GenericString(String),
    GenericStr(&'static str)
}

/// All errors possible during image encoding
pub enum ImgEncodeErrors {
    Generic(String),
    GenericStatic(&'static str),
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    ImageEncodeErrors(String)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(name, reason) => {
                writeln!(f, "Invalid parameter `{}`: {}", name, reason)
            }
            Self::ShapeMismatch(reason) => {
                writeln!(f, "Shape mismatch: {}", reason)
            }
            Self::MissingAsset(asset) => {
                writeln!(f, "Missing asset: {}", asset)
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {} but found {}",
                    expected, found
                )
            }
            Self::UnsupportedColorspace(present, operation, supported) => {
                writeln!(f, "Unsupported colorspace {:?}, for the operation {}\nSupported colorspaces are {:?}", present, operation, supported)
            }
            Self::ImageDecodeErrors(err) => {
                writeln!(f, "{}", err)
            }
            Self::EncodeErrors(err) => writeln!(f, "{:?}", err),
            Self::IoErrors(err) => writeln!(f, "I/O error: {}", err),
            Self::GenericString(err) => writeln!(f, "{}", err),
            Self::GenericStr(err) => writeln!(f, "{}", err)
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ImageErrors {}

impl Debug for ImgEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generic(ref string) => writeln!(f, "{}", string),
            Self::GenericStatic(ref string) => writeln!(f, "{}", string),
            Self::UnsupportedColorspace(ref found, ref expected) => {
                writeln!(
                    f,
                    "Found colorspace {:?} but the encoder supports {:?}",
                    found, expected
                )
            }
            Self::ImageEncodeErrors(ref err) => {
                writeln!(f, "Image could not be encoded, reason: {}", err)
            }
        }
    }
}

impl From<ImgEncodeErrors> for ImageErrors {
    fn from(from: ImgEncodeErrors) -> Self {
        ImageErrors::EncodeErrors(from)
    }
}

impl From<std::io::Error> for ImageErrors {
    fn from(value: std::io::Error) -> Self {
        ImageErrors::IoErrors(value)
    }
}

impl From<String> for ImageErrors {
    fn from(s: String) -> ImageErrors {
        ImageErrors::GenericString(s)
    }
}

impl From<&'static str> for ImageErrors {
    fn from(s: &'static str) -> ImageErrors {
        ImageErrors::GenericStr(s)
    }
}
