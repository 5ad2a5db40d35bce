/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared by every effect
use lumen_core::colorspace::{ColorSpace, EFFECT_COLORSPACES};
use lumen_core::log::trace;
use lumen_core::options::EffectOptions;

use crate::errors::ImageErrors;
use crate::image::Image;

/// This encapsulates an image operation.
///
/// All operations that can be stored in a workflow
/// need to implement this trait, and effects apply themselves
/// through it
pub trait OperationsTrait {
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Execute the operation on an image which has already been validated
    ///
    /// Implementors can assume the colorspace is one returned by
    /// [`supported_colorspaces`](OperationsTrait::supported_colorspaces),
    /// the channels agree with the dimensions, and the image is not empty
    ///
    /// # Errors
    /// Any error specific to the operation, most commonly
    /// [`ImageErrors::InvalidParameter`]
    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors>;

    /// Colorspaces this operation accepts
    fn supported_colorspaces(&self) -> &'static [ColorSpace] {
        &EFFECT_COLORSPACES
    }

    /// Options the operation was configured with
    ///
    /// Operations that do not carry options use the defaults
    fn options(&self) -> EffectOptions {
        EffectOptions::default()
    }

    /// Execute the operation on an image using the operation's own options
    ///
    /// # Errors
    /// See [`execute_with_options`](OperationsTrait::execute_with_options)
    fn execute(&self, image: &mut Image) -> Result<(), ImageErrors> {
        self.execute_with_options(image, &self.options())
    }

    /// Validate the image against the options and the operation's supported
    /// colorspaces and then run the operation
    ///
    /// # Errors
    /// - [`ImageErrors::ShapeMismatch`]: the image is empty, larger than the options allow,
    ///   has inconsistent channels or is a grayscale image
    /// - [`ImageErrors::UnsupportedColorspace`]: a color layout the operation does not handle
    /// - Anything returned by [`execute_impl`](OperationsTrait::execute_impl)
    fn execute_with_options(
        &self, image: &mut Image, options: &EffectOptions
    ) -> Result<(), ImageErrors> {
        let name = self.name();

        image.validate()?;

        let (width, height) = image.dimensions();
        let colorspace = image.colorspace();

        if width == 0 || height == 0 {
            return Err(ImageErrors::ShapeMismatch(format!(
                "{} cannot run on an empty image ({}x{})",
                name, width, height
            )));
        }
        if width > options.max_width() || height > options.max_height() {
            return Err(ImageErrors::ShapeMismatch(format!(
                "Image dimensions {}x{} exceed the configured maximum of {}x{}",
                width,
                height,
                options.max_width(),
                options.max_height()
            )));
        }
        if colorspace.is_grayscale() {
            return Err(ImageErrors::ShapeMismatch(format!(
                "{} needs a 3 or 4 channel image but found {:?} with {} channel(s)",
                name,
                colorspace,
                colorspace.num_components()
            )));
        }
        let supported = self.supported_colorspaces();

        if !supported.contains(&colorspace) {
            return Err(ImageErrors::UnsupportedColorspace(colorspace, name, supported));
        }
        trace!("Running {} on {}x{} {:?} image", name, width, height, colorspace);

        self.execute_impl(image)
    }

    /// Run the operation on a copy of the image, returning the copy
    ///
    /// # Errors
    /// See [`execute`](OperationsTrait::execute)
    fn clone_and_execute(&self, image: &Image) -> Result<Image, ImageErrors> {
        let mut new_img = image.clone();
        self.execute(&mut new_img)?;
        Ok(new_img)
    }
}
