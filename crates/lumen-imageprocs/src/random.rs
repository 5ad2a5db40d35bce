/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Random sources for effects with random elements
//!
//! Light rays, light leaks and lens flares place elements at random.
//! They draw values through [`UniformSource`] so callers can inject their own
//! generator, and so a seeded generator reproduces the same image.
//!
//! [`nanorand::WyRand`] implements the trait and is what
//! [`EffectPipeline::apply_seeded`](crate::pipeline::EffectPipeline::apply_seeded) uses.
use nanorand::{Rng, WyRand};

/// A source of uniformly distributed numbers
pub trait UniformSource {
    /// Return a value in `[low, high)`
    ///
    /// When `high <= low`, `low` is returned
    fn next_f32(&mut self, low: f32, high: f32) -> f32;

    /// Return an integer in `[low, high)`
    ///
    /// When `high <= low`, `low` is returned
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn next_int(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        let span = (high - low) as f32;
        let offset = (self.next_f32(0.0, span).floor() as i64).min(high - low - 1);
        low + offset
    }
}

impl UniformSource for WyRand {
    fn next_f32(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        // generate returns a value in [0,1)
        let unit: f32 = self.generate();
        let value = low + unit * (high - low);
        // rounding can land exactly on high for wide ranges
        if value >= high {
            low
        } else {
            value
        }
    }
}

/// Create the default random source for a seed
pub fn seeded_source(seed: u64) -> WyRand {
    WyRand::new_seed(seed)
}

#[cfg(test)]
mod tests {
    use crate::random::{seeded_source, UniformSource};

    #[test]
    fn values_stay_in_range() {
        let mut source = seeded_source(7);

        for _ in 0..1000 {
            let v = source.next_f32(-15.0, 15.0);
            assert!((-15.0..15.0).contains(&v));

            let i = source.next_int(3, 9);
            assert!((3..9).contains(&i));
        }
    }

    #[test]
    fn empty_ranges_return_low() {
        let mut source = seeded_source(7);

        assert_eq!(source.next_f32(2.0, 2.0), 2.0);
        assert_eq!(source.next_int(5, 1), 5);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = seeded_source(99);
        let mut b = seeded_source(99);

        let first: Vec<f32> = (0..32).map(|_| a.next_f32(0.0, 1.0)).collect();
        let second: Vec<f32> = (0..32).map(|_| b.next_f32(0.0, 1.0)).collect();

        assert_eq!(first, second);
    }
}
