/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! This module represents a single image
//!
//! An image is represented as
//!
//! - separated channels
//!     - of 8 bit samples
//!         - representing a colorspace
//!             -    with the same width and height
//!
//! Effects read and write the color channels and leave alpha as it was,
//! so the channel layout of an image never changes under an effect.
use lumen_core::colorspace::{ColorComponent, ColorSpace};

use crate::errors::ImageErrors;

/// Represents a single image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    channels:   Vec<Vec<u8>>,
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl Image {
    /// Create a new image from planar channels
    ///
    /// # Errors
    /// - [`ImageErrors::ShapeMismatch`] if the number of channels does not match the colorspace
    ///   or a channel length is not `width * height`
    pub fn new(
        channels: Vec<Vec<u8>>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        let image = Image {
            channels,
            width,
            height,
            colorspace
        };
        image.validate()?;
        Ok(image)
    }

    /// Create an image from interleaved pixels
    ///
    /// Pixels are expected to be laid out according to the colorspace,
    /// e.g for RGB `[R,G,B,R,G,B]`
    ///
    /// # Errors
    /// - [`ImageErrors::DimensionsMisMatch`] if `pixels.len()` is not `width * height * components`
    pub fn from_u8(
        pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<Image, ImageErrors> {
        let components = colorspace.num_components();
        let expected = width * height * components;

        if pixels.len() != expected {
            return Err(ImageErrors::DimensionsMisMatch(expected, pixels.len()));
        }
        let mut channels = vec![vec![0_u8; width * height]; components];

        for (pos, pixel) in pixels.chunks_exact(components).enumerate() {
            for (channel, sample) in channels.iter_mut().zip(pixel) {
                channel[pos] = *sample;
            }
        }
        Image::new(channels, width, height, colorspace)
    }

    /// Create an image with every sample set to `value`
    pub fn fill(value: u8, colorspace: ColorSpace, width: usize, height: usize) -> Image {
        let channels = vec![vec![value; width * height]; colorspace.num_components()];

        Image {
            channels,
            width,
            height,
            colorspace
        }
    }

    /// Create an image from a function
    ///
    /// The function receives `(x, y, pixel)` where pixel is a slice with
    /// as many components as the colorspace, zero initialized, which the
    /// function fills in
    pub fn from_fn<F>(width: usize, height: usize, colorspace: ColorSpace, mut func: F) -> Image
    where
        F: FnMut(usize, usize, &mut [u8])
    {
        let components = colorspace.num_components();
        let mut channels = vec![vec![0_u8; width * height]; components];
        let mut pixel = vec![0_u8; components];

        for y in 0..height {
            for x in 0..width {
                pixel.iter_mut().for_each(|p| *p = 0);
                func(x, y, &mut pixel);

                let pos = y * width + x;
                for (channel, sample) in channels.iter_mut().zip(&pixel) {
                    channel[pos] = *sample;
                }
            }
        }
        Image {
            channels,
            width,
            height,
            colorspace
        }
    }

    /// Confirm that the channels agree with the dimensions and colorspace
    ///
    /// # Errors
    /// [`ImageErrors::ShapeMismatch`] describing the first problem found
    pub fn validate(&self) -> Result<(), ImageErrors> {
        let components = self.colorspace.num_components();

        if self.channels.len() != components {
            return Err(ImageErrors::ShapeMismatch(format!(
                "Colorspace {:?} expects {} channels but image has {}",
                self.colorspace,
                components,
                self.channels.len()
            )));
        }
        let expected = self.width * self.height;

        for (pos, channel) in self.channels.iter().enumerate() {
            if channel.len() != expected {
                return Err(ImageErrors::ShapeMismatch(format!(
                    "Channel {} has {} samples, expected {} ({}x{})",
                    pos,
                    channel.len(),
                    expected,
                    self.width,
                    self.height
                )));
            }
        }
        Ok(())
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get the colorspace this image is stored
    /// in
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Return a reference to the underlying channels
    ///
    /// If `ignore_alpha` is true and the colorspace has an alpha channel,
    /// the alpha channel is left out
    pub fn channels_ref(&self, ignore_alpha: bool) -> &[Vec<u8>] {
        if ignore_alpha && self.colorspace.has_alpha() {
            &self.channels[..self.colorspace.num_color_components()]
        } else {
            &self.channels
        }
    }

    /// Return a mutable view into the image channels
    ///
    /// If `ignore_alpha` is true and the colorspace has an alpha channel,
    /// the alpha channel is left out
    pub fn channels_mut(&mut self, ignore_alpha: bool) -> &mut [Vec<u8>] {
        if ignore_alpha && self.colorspace.has_alpha() {
            let components = self.colorspace.num_color_components();
            &mut self.channels[..components]
        } else {
            &mut self.channels
        }
    }

    /// Return the channel holding a color component, or `None` for grayscale images
    pub fn color_channel(&self, component: ColorComponent) -> Option<&[u8]> {
        self.colorspace
            .component_position(component)
            .map(|pos| self.channels[pos].as_slice())
    }

    /// Return the channel holding a color component mutably
    pub fn color_channel_mut(&mut self, component: ColorComponent) -> Option<&mut [u8]> {
        self.colorspace
            .component_position(component)
            .map(|pos| self.channels[pos].as_mut_slice())
    }

    /// Return the alpha channel if the colorspace has one
    pub fn alpha_channel(&self) -> Option<&[u8]> {
        self.colorspace
            .alpha_position()
            .map(|pos| self.channels[pos].as_slice())
    }

    /// Read a single pixel, components are in colorspace order
    ///
    /// # Panics
    /// If `x` or `y` lie outside the image
    pub fn pixel(&self, x: usize, y: usize) -> Vec<u8> {
        assert!(x < self.width && y < self.height, "Pixel out of bounds");
        let pos = y * self.width + x;
        self.channels.iter().map(|c| c[pos]).collect()
    }

    /// Convert image to a byte representation interleaving
    /// image pixels
    ///
    /// Channels are interleaved according to the colorspace
    /// i.e if colorspace is RGB, the vector will contain
    /// data in the format `[R,G,B,R,G,B,R,G,B,R,G,B]`
    pub fn flatten_u8(&self) -> Vec<u8> {
        let components = self.channels.len();
        let mut out_pixel = vec![0; self.width * self.height * components];

        for (pos, out) in out_pixel.chunks_exact_mut(components).enumerate() {
            for (sample, channel) in out.iter_mut().zip(&self.channels) {
                *sample = channel[pos];
            }
        }
        out_pixel
    }

    /// Convert the image to another colorspace
    ///
    /// Supported conversions are between members of the same family
    /// (swapping red and blue, adding an opaque alpha or dropping alpha)
    /// and from grayscale to color, which replicates luma in all color channels.
    ///
    /// # Errors
    /// [`ImageErrors::UnsupportedColorspace`] for color to grayscale conversions
    pub fn convert_colorspace(&mut self, to: ColorSpace) -> Result<(), ImageErrors> {
        let from = self.colorspace;
        if from == to {
            return Ok(());
        }
        if to.is_grayscale() && !from.is_grayscale() {
            return Err(ImageErrors::UnsupportedColorspace(
                from,
                "colorspace conversion",
                &[
                    ColorSpace::RGB,
                    ColorSpace::RGBA,
                    ColorSpace::BGR,
                    ColorSpace::BGRA
                ]
            ));
        }
        let size = self.width * self.height;
        let mut color: Vec<Vec<u8>> = Vec::with_capacity(to.num_components());

        if to.is_grayscale() {
            color.push(self.channels[0].clone());
        } else {
            for component in [ColorComponent::Red, ColorComponent::Green, ColorComponent::Blue] {
                let source = from.component_position(component).unwrap_or(0);
                color.push(self.channels[source].clone());
            }
            // ordered as RGB now, swap to BGR when needed
            if to.component_position(ColorComponent::Red) == Some(2) {
                color.swap(0, 2);
            }
        }
        if to.has_alpha() {
            let alpha = match from.alpha_position() {
                Some(pos) => self.channels[pos].clone(),
                None => vec![u8::MAX; size]
            };
            color.push(alpha);
        }
        self.channels = color;
        self.colorspace = to;
        Ok(())
    }
}
