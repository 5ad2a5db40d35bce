/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Matrix transposition
//!
//! Separable filters run a horizontal pass, transpose, run the same
//! horizontal pass again and transpose back, so only one pass needs to be
//! written and it always walks memory in order.

/// Transpose a `width x height` row major matrix into a `height x width` one
///
/// # Panics
/// If either matrix length is not `width * height`
pub fn transpose<T: Copy + Default>(
    in_matrix: &[T], out_matrix: &mut [T], width: usize, height: usize
) {
    // tiled transpose, each 8x8 tile is read in rows and written
    // in columns through a small buffer to stay in cache
    let dimensions = width * height;
    assert_eq!(
        in_matrix.len(),
        dimensions,
        "In matrix dimensions do not match width and height"
    );
    assert_eq!(
        out_matrix.len(),
        dimensions,
        "Out matrix dimensions do not match width and height"
    );
    const TILE: usize = 8;

    let mut tile = [T::default(); TILE * TILE];

    let full_cols = width - width % TILE;
    let full_rows = height - height % TILE;

    for y0 in (0..full_rows).step_by(TILE) {
        for x0 in (0..full_cols).step_by(TILE) {
            for k in 0..TILE {
                let row = &in_matrix[(y0 + k) * width + x0..(y0 + k) * width + x0 + TILE];
                for (l, value) in row.iter().enumerate() {
                    tile[l * TILE + k] = *value;
                }
            }
            for (l, column) in tile.chunks_exact(TILE).enumerate() {
                let start = (x0 + l) * height + y0;
                out_matrix[start..start + TILE].copy_from_slice(column);
            }
        }
    }
    // leftover columns on the right and rows at the bottom
    for y in 0..height {
        for x in full_cols..width {
            out_matrix[x * height + y] = in_matrix[y * width + x];
        }
    }
    for y in full_rows..height {
        for x in 0..full_cols {
            out_matrix[x * height + y] = in_matrix[y * width + x];
        }
    }
}


#[cfg(feature = "benchmarks")]
#[cfg(test)]
mod benchmarks {
    extern crate test;

    #[bench]
    fn transpose_f32_800x800(b: &mut test::Bencher) {
        let width = 800;
        let height = 800;
        let input = vec![0.0_f32; width * height];
        let mut out = vec![0.0_f32; width * height];

        b.iter(|| {
            crate::transpose::transpose(&input, &mut out, width, height);
        });
    }
}
