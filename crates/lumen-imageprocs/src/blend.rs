/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Compositing operators
//!
//! - screen: `1 - (1 - a)(1 - b)`, on normalized `[0,1]` floats
//! - weighted add: `base + overlay * weight`, saturated to 8 bits
//! - multiply: `base * mask`, truncated to 8 bits
//! - alpha stamp: screen a stamp onto part of an image with a per pixel alpha
use crate::utils::{round_u8, truncate_u8};

/// Screen two normalized values
///
/// Commutative, screening with `0` leaves the other value unchanged and
/// screening with `1` gives `1`
#[inline(always)]
pub fn screen_blend(base: f32, overlay: f32) -> f32 {
    1.0 - (1.0 - base) * (1.0 - overlay)
}

/// Screen `overlay` onto `base` in place
pub fn screen_blend_channel(base: &mut [f32], overlay: &[f32]) {
    for (b, o) in base.iter_mut().zip(overlay) {
        *b = screen_blend(*b, *o);
    }
}

/// `base + overlay * weight` with rounding and saturation
///
/// The base keeps its full weight, so a positive weight brightens
/// and a negative one darkens
pub fn weighted_add(base: &mut [u8], overlay: &[u8], weight: f32) {
    for (b, o) in base.iter_mut().zip(overlay) {
        *b = round_u8(f32::from(*b) + f32::from(*o) * weight);
    }
}

/// `base * mask`, clamped and truncated
pub fn multiply(base: &mut [u8], mask: &[f32]) {
    for (b, m) in base.iter_mut().zip(mask) {
        *b = truncate_u8(f32::from(*b) * m);
    }
}

/// A stamp placed on an image
///
/// Color planes are in the same order as the planes of the image the
/// stamp is applied to
pub struct Stamp<'a> {
    pub color:  &'a [&'a [u8]],
    pub alpha:  Option<&'a [u8]>,
    pub width:  usize,
    pub height: usize
}

/// Composite a stamp onto normalized color planes
///
/// For every covered pixel, with `a = alpha / 255 * intensity` (`intensity`
/// for stamps without alpha) and `s = stamp / 255`:
///
/// `base = base * (1 - a) + screen(base, s) * a`
///
/// `origin` is the position of the stamp's top left pixel and may be
/// negative or past the image, only the overlapping rectangle is touched
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn alpha_stamp(
    base: &mut [Vec<f32>], base_width: usize, base_height: usize, stamp: &Stamp,
    origin: (i64, i64), intensity: f32
) {
    let (ox, oy) = origin;

    let x_start = ox.max(0);
    let y_start = oy.max(0);
    let x_end = (ox + stamp.width as i64).min(base_width as i64);
    let y_end = (oy + stamp.height as i64).min(base_height as i64);

    if x_start >= x_end || y_start >= y_end {
        return;
    }
    for (plane, stamp_plane) in base.iter_mut().zip(stamp.color) {
        for y in y_start..y_end {
            let sy = (y - oy) as usize;
            let dst_row = y as usize * base_width;
            let src_row = sy * stamp.width;

            for x in x_start..x_end {
                let sx = (x - ox) as usize;
                let src = src_row + sx;

                let a = match stamp.alpha {
                    Some(alpha) => f32::from(alpha[src]) / 255.0 * intensity,
                    None => intensity
                };
                let s = f32::from(stamp_plane[src]) / 255.0;
                let b = &mut plane[dst_row + x as usize];

                *b = *b * (1.0 - a) + screen_blend(*b, s) * a;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::blend::*;

    #[test]
    fn screen_properties() {
        let values = [0.0, 0.1, 0.25, 0.5, 0.9, 1.0];

        for a in values {
            assert!((screen_blend(a, 0.0) - a).abs() < 1e-6);
            assert_eq!(screen_blend(a, 1.0), 1.0);
            for b in values {
                assert_eq!(screen_blend(a, b), screen_blend(b, a));
                assert!(screen_blend(a, b) >= a.max(b) - 1e-6);
            }
        }
    }

    #[test]
    fn weighted_add_saturates_both_ways() {
        let mut base = [100_u8, 200, 10];
        weighted_add(&mut base, &[50, 200, 255], 0.5);
        assert_eq!(base, [125, 255, 138]);

        let mut base = [100_u8, 200, 10];
        weighted_add(&mut base, &[0, 255, 255], -1.5);
        assert_eq!(base, [100, 0, 0]);
    }

    #[test]
    fn multiply_truncates() {
        let mut base = [128_u8, 255, 3];
        multiply(&mut base, &[0.5, 0.999, 0.2]);
        assert_eq!(base, [64, 254, 0]);
    }

    #[test]
    fn stamp_partial_overlap_is_clipped() {
        // 4x4 black image, 3x3 white opaque stamp hanging off the top left corner
        let mut base = vec![vec![0.0_f32; 16]];
        let color = vec![255_u8; 9];
        let planes = [color.as_slice()];
        let stamp = Stamp {
            color:  &planes,
            alpha:  None,
            width:  3,
            height: 3
        };
        alpha_stamp(&mut base, 4, 4, &stamp, (-1, -2), 1.0);

        let lit: Vec<usize> = (0..16).filter(|i| base[0][*i] > 0.0).collect();
        // columns 0..2 of row 0
        assert_eq!(lit, vec![0, 1]);
    }

    #[test]
    fn stamp_completely_outside_is_ignored() {
        let mut base = vec![vec![0.25_f32; 4]];
        let color = vec![255_u8; 4];
        let alpha = vec![255_u8; 4];
        let planes = [color.as_slice()];
        let stamp = Stamp {
            color:  &planes,
            alpha:  Some(&alpha),
            width:  2,
            height: 2
        };
        alpha_stamp(&mut base, 2, 2, &stamp, (2, 0), 1.0);
        alpha_stamp(&mut base, 2, 2, &stamp, (-2, -2), 1.0);
        assert!(base[0].iter().all(|x| *x == 0.25));

        alpha_stamp(&mut base, 2, 2, &stamp, (1, 1), 0.5);
        // 0.25 * 0.5 + 1.0 * 0.5
        assert!((base[0][3] - 0.625).abs() < 1e-6);
    }
}
