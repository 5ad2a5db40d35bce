/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raster types for lumen
//!
//! This crate holds the types every lighting effect is written against
//!
//! - [`Image`](crate::image::Image): a planar 8 bit raster with 3 or 4
//!   channels for effects (grayscale rasters exist so decoded files can be
//!   converted before use)
//! - [`ScalarField`](crate::field::ScalarField): a per pixel `f32` grid used for
//!   masks and light contributions
//! - [`OperationsTrait`](crate::traits::OperationsTrait): the trait every effect
//!   implements
//! - [`ImageErrors`](crate::errors::ImageErrors): the error type shared by the
//!   workspace
//!
//! ## Features
//!
//!| Feature      | Decoder       | Encoder        |
//!|--------------|---------------|----------------|
//!| jpeg         | zune-jpeg     | [jpeg-encoder] |
//!| png          | zune-png      | zune-png       |
//!
//! Codecs are a convenience for the command line front end, effects never
//! touch files.
//!
//! [jpeg-encoder]: https://crates.io/crates/jpeg-encoder
#![allow(clippy::redundant_field_names, clippy::uninlined_format_args)]

pub mod codecs;
pub mod errors;
pub mod field;
pub mod image;
pub mod traits;
