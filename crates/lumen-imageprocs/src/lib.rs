/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Lighting effects for `lumen-image`
//!
//! This implements parametric lighting and compositing effects, spotlights,
//! vignettes, light rays, color temperature, shadow and highlight
//! enhancement, light leaks and lens flares, together with the building
//! blocks they are made of
//!
//! - [`geometry`]: scalar fields built from distances and angles
//! - [`tone`]: per channel adjustments and the masks they use
//! - [`gaussian_blur`]: separable gaussian blur for images and fields
//! - [`blend`]: screen, weighted add, multiply and alpha stamping
//!
//! Every effect implements the `OperationsTrait` defined by lumen-image.
//!
//! # Example
//! - Darken the borders of an image
//! ```
//! use lumen_core::colorspace::ColorSpace;
//! use lumen_image::image::Image;
//! use lumen_image::traits::OperationsTrait;
//! use lumen_imageprocs::effects::vignette::{Vignette, VignetteParams};
//! let mut image = Image::fill(233, ColorSpace::RGB, 100, 100);
//! let vignette = Vignette::new(VignetteParams { intensity: 1.5 });
//! // execute the effect
//! vignette.execute(&mut image).unwrap();
//! ```
//!
//! - Run an effect chosen at runtime with a fixed seed
//! ```
//! use lumen_core::colorspace::ColorSpace;
//! use lumen_core::options::EffectOptions;
//! use lumen_image::image::Image;
//! use lumen_imageprocs::pipeline::{Effect, EffectPipeline};
//! let image = Image::fill(100, ColorSpace::RGBA, 64, 64);
//! let pipeline = EffectPipeline::new(EffectOptions::default().set_seed(Some(7)));
//! let effect = Effect::from_name("light_leaks").unwrap();
//! let output = pipeline.apply_seeded(&image, &effect).unwrap();
//! assert_eq!(output.dimensions(), (64, 64));
//! ```

// Benchmark support needs nightly
#![cfg_attr(feature = "benchmarks", feature(test))]
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::wildcard_imports,
    clippy::uninlined_format_args
)]

pub mod blend;
pub mod compare;
pub mod effects;
pub mod flare;
pub mod gaussian_blur;
pub mod geometry;
pub mod grayscale;
pub mod pipeline;
pub mod random;
pub mod resize;
pub mod threshold;
pub mod tone;
pub mod transpose;
mod utils;
