/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all lumen crates
//!
//! It currently contains
//!
//! - Colorspace information shared by images and effects
//! - Effect options, the knobs that decide how parameters are validated
//!   and how random elements are seeded
//! - Logging macros that compile to nothing unless the `log` feature is enabled
//!
//! # Features
//!  - `log`: Forward the logging macros to the [log](https://crates.io/crates/log) crate
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
#![macro_use]

pub mod colorspace;
pub mod log;
pub mod options;
