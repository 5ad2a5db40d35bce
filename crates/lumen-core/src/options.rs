/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Effect options
//!
//! This module exposes a struct whose values are shared by all
//! effects, i.e the same `EffectOptions` can be reused for every effect
//! in a session.

/// Seed used when the caller does not provide one.
pub const DEFAULT_SEED: u64 = 0x6C75_6D65_6E5F_7378;

/// Options respected by all effects
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EffectOptions {
    /// Maximum width of an image effects will process
    ///
    /// - Default value: 16384
    max_width:   usize,
    /// Maximum height of an image effects will process
    ///
    /// - Default value: 16384
    max_height:  usize,
    /// Whether out of range parameters are rejected instead of clamped
    ///
    /// - Default value: false
    strict_mode: bool,
    /// Seed for the random source used by effects with random elements
    ///
    /// - Default value: None, which means [`DEFAULT_SEED`]
    seed:        Option<u64>
}

impl Default for EffectOptions {
    fn default() -> Self {
        EffectOptions {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false,
            seed:        None
        }
    }
}

impl EffectOptions {
    /// Create options that clamp slider style parameters to
    /// their documented range
    ///
    /// This is the same as `default`
    pub fn new_lenient() -> EffectOptions {
        EffectOptions::default()
    }

    /// Create options that reject out of range parameters
    pub fn new_strict() -> EffectOptions {
        EffectOptions::default().set_strict_mode(true)
    }

    /// Get maximum width an effect will accept
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height an effect will accept
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Return true if out of range parameters should be rejected
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// The seed configured for random elements, if any
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// The seed to use, falling back to [`DEFAULT_SEED`]
    pub fn seed_or_default(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Set maximum width an effect will process
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height an effect will process
    ///
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether effects should run in strict mode
    ///
    /// In strict mode a parameter outside its documented range is an error,
    /// otherwise it is clamped to the nearest bound.
    /// Semantically invalid values (NaN, non-positive radius...) are errors in
    /// both modes.
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }

    /// Set the seed for random elements
    ///
    /// Two runs with the same seed and parameters produce identical output
    pub fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
