/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A per pixel floating point grid
//!
//! Scalar fields carry masks and light contributions between the stages
//! of an effect, they live as long as a single effect invocation
use crate::errors::ImageErrors;

/// A `width x height` grid of `f32` values stored in row major order
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarField {
    data:   Vec<f32>,
    width:  usize,
    height: usize
}

impl ScalarField {
    /// Create a field with every value set to `value`
    pub fn new(width: usize, height: usize, value: f32) -> ScalarField {
        ScalarField {
            data: vec![value; width * height],
            width,
            height
        }
    }

    /// Create a field from existing row major data
    ///
    /// # Errors
    /// [`ImageErrors::DimensionsMisMatch`] if `data.len()` is not `width*height`
    pub fn from_vec(data: Vec<f32>, width: usize, height: usize) -> Result<ScalarField, ImageErrors> {
        if data.len() != width * height {
            return Err(ImageErrors::DimensionsMisMatch(width * height, data.len()));
        }
        Ok(ScalarField {
            data,
            width,
            height
        })
    }

    /// Create a field by calling `func(x, y)` for every position
    pub fn from_fn<F>(width: usize, height: usize, func: F) -> ScalarField
    where
        F: Fn(usize, usize) -> f32
    {
        let mut data = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                data.push(func(x, y));
            }
        }
        ScalarField {
            data,
            width,
            height
        }
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Value at `(x,y)`
    ///
    /// # Panics
    /// If the position lies outside the field
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.data[y * self.width + x] = value;
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Apply `func` to every value in place
    pub fn map_inplace<F>(&mut self, func: F)
    where
        F: Fn(f32) -> f32
    {
        self.data.iter_mut().for_each(|x| *x = func(*x));
    }

    /// Largest value in the field, or `f32::NEG_INFINITY` for an empty field
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}
