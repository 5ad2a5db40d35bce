/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scalar fields built from pixel geometry
//!
//! Every function here produces a [`ScalarField`] the size of the image,
//! which effects then soften with a blur and composite onto the image.
//!
//! Positions are in pixels with `(0,0)` at the top left and `y` growing
//! downwards, a pixel `(x,y)` is sampled at exactly `(x,y)`.
#![allow(clippy::cast_precision_loss)]

use lumen_core::log::trace;
use lumen_image::errors::ImageErrors;
use lumen_image::field::ScalarField;

use crate::random::UniformSource;

fn check_positive(name: &'static str, value: f32) -> Result<f32, ImageErrors> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ImageErrors::InvalidParameter(
            name,
            format!("expected a positive finite value but found {}", value)
        ));
    }
    Ok(value)
}

fn check_point(name: &'static str, (x, y): (f32, f32)) -> Result<(f32, f32), ImageErrors> {
    if !(x.is_finite() && y.is_finite()) {
        return Err(ImageErrors::InvalidParameter(
            name,
            format!("expected a finite position but found ({}, {})", x, y)
        ));
    }
    Ok((x, y))
}

/// A field that is `inside_value` within `inner_radius` of `center`,
/// `outside_value` beyond `outer_radius` and linearly interpolated
/// in between
///
/// Distances are compared squared, a square root is only taken for
/// pixels inside the transition band
///
/// # Errors
/// [`ImageErrors::InvalidParameter`] if `outer_radius <= inner_radius`, the inner
/// radius is negative or any argument is not finite
pub fn radial_falloff(
    width: usize, height: usize, center: (f32, f32), inner_radius: f32, outer_radius: f32,
    inside_value: f32, outside_value: f32
) -> Result<ScalarField, ImageErrors> {
    let (cx, cy) = check_point("center", center)?;

    if !(inner_radius.is_finite() && inner_radius >= 0.0) {
        return Err(ImageErrors::InvalidParameter(
            "inner_radius",
            format!("expected a finite non negative radius but found {}", inner_radius)
        ));
    }
    if !(outer_radius.is_finite() && outer_radius > inner_radius) {
        return Err(ImageErrors::InvalidParameter(
            "outer_radius",
            format!(
                "outer radius {} must be larger than inner radius {}",
                outer_radius, inner_radius
            )
        ));
    }
    let inner_sq = inner_radius * inner_radius;
    let outer_sq = outer_radius * outer_radius;
    let band = outer_radius - inner_radius;

    Ok(ScalarField::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dist_sq = dx * dx + dy * dy;

        if dist_sq <= inner_sq {
            inside_value
        } else if dist_sq > outer_sq {
            outside_value
        } else {
            let t = (dist_sq.sqrt() - inner_radius) / band;
            inside_value + (outside_value - inside_value) * t
        }
    }))
}

/// `exp(-d^2 / (2 sigma^2))` where `d` is the distance to `center`
///
/// # Errors
/// [`ImageErrors::InvalidParameter`] if sigma is not positive or the center is not finite
pub fn gaussian_radial(
    width: usize, height: usize, center: (f32, f32), sigma: f32
) -> Result<ScalarField, ImageErrors> {
    let (cx, cy) = check_point("center", center)?;
    let sigma = check_positive("sigma", sigma)?;
    let scale = -0.5 / (sigma * sigma);

    Ok(ScalarField::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        ((dx * dx + dy * dy) * scale).exp()
    }))
}

/// One axis of a gaussian centered on the axis, scaled so its largest
/// sample is exactly `1.0`
///
/// The offset of the sample closest to the middle is subtracted before
/// exponentiating, so tiny spreads do not underflow to all zeros
fn axis_gaussian(len: usize, spread: f32) -> Vec<f32> {
    let center = (len as f32 - 1.0) * 0.5;
    let scale = -0.5 / (spread * spread);
    // 0 for odd lengths, 0.5 for even ones
    let nearest = center.fract();
    let nearest_sq = nearest * nearest;

    (0..len)
        .map(|i| {
            let d = i as f32 - center;
            ((d * d - nearest_sq) * scale).exp()
        })
        .collect()
}

/// Outer product of a horizontal and a vertical gaussian centered on the
/// image, normalized so the largest value is exactly `1.0`
///
/// Different spreads give an elliptical field
///
/// # Errors
/// [`ImageErrors::InvalidParameter`] if either spread is not positive and finite
pub fn separable_gaussian_product(
    width: usize, height: usize, spread_x: f32, spread_y: f32
) -> Result<ScalarField, ImageErrors> {
    let spread_x = check_positive("spread_x", spread_x)?;
    let spread_y = check_positive("spread_y", spread_y)?;

    let kx = axis_gaussian(width, spread_x);
    let ky = axis_gaussian(height, spread_y);

    Ok(ScalarField::from_fn(width, height, |x, y| ky[y] * kx[x]))
}

/// A straight ray drawn as a thick line
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaySegment {
    pub start:      (i64, i64),
    pub end:        (i64, i64),
    pub brightness: f32
}

/// Generate `count` rays leaving `source`
///
/// Each ray draws an angle offset in `[-jitter_degrees, jitter_degrees)`
/// and then a brightness in `[0.7, 1.0)`, in that order. Its end point is
/// `length` pixels away along the jittered angle, truncated to whole pixels
#[allow(clippy::cast_possible_truncation)]
pub fn ray_segments(
    source: (i64, i64), base_angle: f32, count: usize, jitter_degrees: f32, length: f32,
    random: &mut dyn UniformSource
) -> Vec<RaySegment> {
    let (sx, sy) = source;

    (0..count)
        .map(|_| {
            let jitter = random.next_f32(-jitter_degrees, jitter_degrees);
            let brightness = random.next_f32(0.7, 1.0);

            let angle = base_angle + jitter.to_radians();
            let end_x = (sx as f32 + angle.cos() * length) as i64;
            let end_y = (sy as f32 + angle.sin() * length) as i64;

            RaySegment {
                start: source,
                end: (end_x, end_y),
                brightness
            }
        })
        .collect()
}

fn distance_sq_to_segment(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let (apx, apy) = (px - a.0, py - a.1);
    let len_sq = abx * abx + aby * aby;

    let t = if len_sq > 0.0 {
        ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = apx - t * abx;
    let dy = apy - t * aby;
    dx * dx + dy * dy
}

/// Rasterize rays into `field` with the given stroke width
///
/// Pixels within half the stroke width of a ray receive its brightness.
/// Contributions from overlapping rays are added, so crossings get brighter.
/// Parts of a ray outside the field are clipped
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap
)]
pub fn rasterize_segments(field: &mut ScalarField, segments: &[RaySegment], stroke_width: f32) {
    let (width, height) = field.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    let radius = (stroke_width * 0.5).max(0.5);
    let radius_sq = radius * radius;

    for segment in segments {
        let a = (segment.start.0 as f32, segment.start.1 as f32);
        let b = (segment.end.0 as f32, segment.end.1 as f32);

        let min_x = (a.0.min(b.0) - radius).floor().max(0.0);
        let max_x = (a.0.max(b.0) + radius).ceil().min(width as f32 - 1.0);
        let min_y = (a.1.min(b.1) - radius).floor().max(0.0);
        let max_y = (a.1.max(b.1) + radius).ceil().min(height as f32 - 1.0);

        if min_x > max_x || min_y > max_y {
            trace!("Ray {:?} -> {:?} is outside the image", segment.start, segment.end);
            continue;
        }
        for y in (min_y as usize)..=(max_y as usize) {
            for x in (min_x as usize)..=(max_x as usize) {
                if distance_sq_to_segment(x as f32, y as f32, a, b) <= radius_sq {
                    let value = field.get(x, y) + segment.brightness;
                    field.set(x, y, value);
                }
            }
        }
    }
}

/// A horizontal streak through `center.1`
///
/// Vertically it is a gaussian with a standard deviation of `0.01 * height`,
/// horizontally it is a triangle that is `1` in the middle column and `0` at
/// the left and right edges. The result is scaled by `0.7 * intensity`
pub fn anamorphic_streak(
    width: usize, height: usize, center: (f32, f32), intensity: f32
) -> ScalarField {
    let sigma = height as f32 * 0.01;
    let scale = -0.5 / (sigma * sigma);
    let cy = center.1;

    let column: Vec<f32> = (0..height)
        .map(|y| {
            let d = y as f32 - cy;
            (d * d * scale).exp() * intensity
        })
        .collect();

    let last = width.saturating_sub(1);
    let row: Vec<f32> = (0..width)
        .map(|x| {
            // a single column has no middle, it gets no streak
            if last == 0 {
                return 0.0;
            }
            let t = x as f32 / last as f32;
            1.0 - (2.0 * t - 1.0).abs()
        })
        .collect();

    ScalarField::from_fn(width, height, |x, y| column[y] * row[x] * 0.7)
}
