/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Resizing for flare stamps
use crate::utils::round_u8;

/// Bilinear interpolation of a single channel, this interpolates a single channel, but not an image
///
/// Pixel centers are aligned, i.e output pixel `x` samples the input at
/// `(x + 0.5) * in_width / out_width - 0.5`, clamped to the input
///
/// # Panics
/// - `in_width*in_height` do not match `in_channel.len()`.
/// - `out_width*out_height` do not match `out_channel.len()`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub fn resize_bilinear(
    in_channel: &[u8], out_channel: &mut [u8], in_width: usize, in_height: usize,
    out_width: usize, out_height: usize
) {
    assert_eq!(in_channel.len(), in_width * in_height);
    assert_eq!(out_channel.len(), out_width * out_height);

    if in_width == 0 || in_height == 0 || out_width == 0 || out_height == 0 {
        return;
    }
    let w_ratio = in_width as f32 / out_width as f32;
    let h_ratio = in_height as f32 / out_height as f32;

    // (index, next index, weight of next) for every output column
    let columns: Vec<(usize, usize, f32)> = (0..out_width)
        .map(|x| sample_position(x, w_ratio, in_width))
        .collect();

    for (y, out_row) in out_channel.chunks_exact_mut(out_width).enumerate() {
        let (y0, y1, b) = sample_position(y, h_ratio, in_height);

        let row0 = &in_channel[y0 * in_width..(y0 + 1) * in_width];
        let row1 = &in_channel[y1 * in_width..(y1 + 1) * in_width];

        for (out, &(x0, x1, a)) in out_row.iter_mut().zip(&columns) {
            let p00 = f32::from(row0[x0]);
            let p10 = f32::from(row0[x1]);
            let p01 = f32::from(row1[x0]);
            let p11 = f32::from(row1[x1]);

            let interpolated_pixel = p00 * (1.0 - a) * (1.0 - b)
                + p10 * a * (1.0 - b)
                + p01 * (1.0 - a) * b
                + p11 * a * b;

            *out = round_u8(interpolated_pixel);
        }
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
fn sample_position(pos: usize, ratio: f32, len: usize) -> (usize, usize, f32) {
    let src = ((pos as f32 + 0.5) * ratio - 0.5).max(0.0);
    let p0 = (src.floor() as usize).min(len - 1);
    let p1 = (p0 + 1).min(len - 1);
    let weight = if p0 == p1 { 0.0 } else { src - p0 as f32 };

    (p0, p1, weight)
}

#[cfg(test)]
mod tests {
    use crate::resize::resize_bilinear;

    #[test]
    fn same_size_is_a_copy() {
        let input: Vec<u8> = (0..30).map(|x| x * 7).collect();
        let mut out = vec![0; 30];

        resize_bilinear(&input, &mut out, 6, 5, 6, 5);
        assert_eq!(input, out);
    }

    #[test]
    fn upscale_interpolates_between_neighbours() {
        let input = [0_u8, 100];
        let mut out = [0_u8; 4];

        resize_bilinear(&input, &mut out, 2, 1, 4, 1);
        // samples at -0.25 (clamped), 0.25, 0.75, 1.25 (clamped)
        assert_eq!(out, [0, 25, 75, 100]);
    }

    #[test]
    fn downscale_averages() {
        let input = [0_u8, 100, 200, 100];
        let mut out = [0_u8; 2];

        resize_bilinear(&input, &mut out, 4, 1, 2, 1);
        assert_eq!(out, [50, 150]);
    }
}
