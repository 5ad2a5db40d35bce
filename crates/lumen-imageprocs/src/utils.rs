/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Quantization and parameter checking helpers shared by the effects
use lumen_core::log::warn;
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;

/// Clamp to `[0,255]` and drop the fractional part
///
/// NaN maps to zero
#[inline(always)]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn truncate_u8(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Round to nearest and saturate to `[0,255]`
///
/// NaN maps to zero
#[inline(always)]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Reject NaN and infinities
pub(crate) fn check_finite(name: &'static str, value: f32) -> Result<f32, ImageErrors> {
    if !value.is_finite() {
        return Err(ImageErrors::InvalidParameter(
            name,
            format!("expected a finite number but found {}", value)
        ));
    }
    Ok(value)
}

/// Bring a slider style parameter into `min..=max`
///
/// Lenient options clamp the value and log a warning, strict options
/// reject it. Non finite values are rejected in both modes
pub(crate) fn check_range(
    name: &'static str, value: f32, min: f32, max: f32, options: &EffectOptions
) -> Result<f32, ImageErrors> {
    let value = check_finite(name, value)?;

    if (min..=max).contains(&value) {
        return Ok(value);
    }
    if options.strict_mode() {
        return Err(ImageErrors::InvalidParameter(
            name,
            format!("{} is outside the allowed range {}..={}", value, min, max)
        ));
    }
    let clamped = value.clamp(min, max);
    warn!("{} of {} is out of range, clamping to {}", name, value, clamped);
    Ok(clamped)
}

/// Integer version of [`check_range`], zero is always rejected
pub(crate) fn check_count(
    name: &'static str, value: u32, min: u32, max: u32, options: &EffectOptions
) -> Result<u32, ImageErrors> {
    if value == 0 {
        return Err(ImageErrors::InvalidParameter(
            name,
            "expected a non zero value".to_string()
        ));
    }
    if (min..=max).contains(&value) {
        return Ok(value);
    }
    if options.strict_mode() {
        return Err(ImageErrors::InvalidParameter(
            name,
            format!("{} is outside the allowed range {}..={}", value, min, max)
        ));
    }
    let clamped = value.clamp(min, max);
    warn!("{} of {} is out of range, clamping to {}", name, value, clamped);
    Ok(clamped)
}

#[cfg(test)]
mod tests {
    use lumen_core::options::EffectOptions;

    use crate::utils::{check_count, check_range, round_u8, truncate_u8};

    #[test]
    fn quantizers_saturate() {
        assert_eq!(truncate_u8(254.9), 254);
        assert_eq!(round_u8(254.5), 255);
        assert_eq!(truncate_u8(-3.0), 0);
        assert_eq!(round_u8(1e9), 255);
        assert_eq!(truncate_u8(f32::NAN), 0);
    }

    #[test]
    fn lenient_clamps_strict_rejects() {
        let lenient = EffectOptions::new_lenient();
        let strict = EffectOptions::new_strict();

        assert_eq!(check_range("x", 4.0, 0.5, 3.0, &lenient).unwrap(), 3.0);
        assert!(check_range("x", 4.0, 0.5, 3.0, &strict).is_err());
        assert_eq!(check_range("x", 2.0, 0.5, 3.0, &strict).unwrap(), 2.0);
        assert!(check_range("x", f32::NAN, 0.5, 3.0, &lenient).is_err());
    }

    #[test]
    fn zero_count_is_always_rejected() {
        let lenient = EffectOptions::new_lenient();

        assert!(check_count("count", 0, 5, 50, &lenient).is_err());
        assert_eq!(check_count("count", 2, 5, 50, &lenient).unwrap(), 5);
        assert_eq!(check_count("count", 80, 5, 50, &lenient).unwrap(), 50);
    }
}
