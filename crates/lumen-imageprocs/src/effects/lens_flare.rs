/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Lens flare
//!
//! A main flare stamp at the light position, up to five smaller stamps along
//! the line through the image center, a horizontal streak and a soft halo.
//! Everything is composited in normalized floats and truncated at the end.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use core::cell::RefCell;

use lumen_core::colorspace::{ColorComponent, ColorSpace};
use lumen_core::log::{debug, trace};
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::blend::{alpha_stamp, screen_blend_channel, Stamp};
use crate::effects::image_center;
use crate::flare::FlareTemplate;
use crate::geometry::{anamorphic_streak, gaussian_radial};
use crate::random::UniformSource;
use crate::resize::resize_bilinear;
use crate::utils::{check_range, truncate_u8};

/// Number of secondary flare elements tried
pub const SECONDARY_FLARES: usize = 5;
/// Halo radius as a fraction of the smaller image side
pub const HALO_FRACTION: f32 = 0.4;

/// Parameters of a lens flare
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct LensFlareParams {
    /// Position of the light, `(0.7 * width, 0.3 * height)` when `None`
    pub position:  Option<(i64, i64)>,
    /// Strength of the flare, `0.1..=1.0`
    pub intensity: f32,
    /// Scale of the flare elements, `0.5..=2.0`
    pub size:      f32
}

impl Default for LensFlareParams {
    fn default() -> Self {
        LensFlareParams {
            position:  None,
            intensity: 0.5,
            size:      1.0
        }
    }
}

impl LensFlareParams {
    /// Resolve the default position and bring every value into range
    ///
    /// # Errors
    /// Non finite values, or out of range values in strict mode
    pub fn validate(
        &self, width: usize, height: usize, options: &EffectOptions
    ) -> Result<LensFlareParams, ImageErrors> {
        let position = self.position.unwrap_or((
            (width as f64 * 0.7) as i64,
            (height as f64 * 0.3) as i64
        ));
        Ok(LensFlareParams {
            position:  Some(position),
            intensity: check_range("intensity", self.intensity, 0.1, 1.0, options)?,
            size:      check_range("size", self.size, 0.5, 2.0, options)?
        })
    }
}

/// Resize `template` by `scale` and stamp it centered on `position`
///
/// Template planes are reordered to the layout of `colorspace`. Stamps that
/// shrink to nothing are skipped
#[allow(clippy::too_many_arguments)]
fn add_flare_element(
    planes: &mut [Vec<f32>], width: usize, height: usize, colorspace: ColorSpace,
    template: &FlareTemplate, position: (i64, i64), scale: f32, intensity: f32
) -> Result<(), ImageErrors> {
    let (fw, fh) = template.dimensions();
    let (new_w, new_h) = ((fw as f32 * scale) as usize, (fh as f32 * scale) as usize);

    if new_w == 0 || new_h == 0 {
        trace!("Flare element at {:?} is too small, skipping", position);
        return Ok(());
    }
    let resize = |plane: &[u8]| {
        let mut out = vec![0; new_w * new_h];
        resize_bilinear(plane, &mut out, fw, fh, new_w, new_h);
        out
    };
    let source = template.image();

    let mut components = [
        ColorComponent::Red,
        ColorComponent::Green,
        ColorComponent::Blue
    ];
    components.sort_by_key(|c| colorspace.component_position(*c));

    let mut color = Vec::with_capacity(components.len());
    for component in components {
        let plane = source.color_channel(component).ok_or_else(|| {
            ImageErrors::ShapeMismatch(format!(
                "Flare template has no {:?} channel",
                component
            ))
        })?;
        color.push(resize(plane));
    }
    let alpha = source.alpha_channel().map(resize);
    let color_refs: Vec<&[u8]> = color.iter().map(Vec::as_slice).collect();

    let stamp = Stamp {
        color:  &color_refs,
        alpha:  alpha.as_deref(),
        width:  new_w,
        height: new_h
    };
    let origin = (
        position.0 - (new_w / 2) as i64,
        position.1 - (new_h / 2) as i64
    );
    alpha_stamp(planes, width, height, &stamp, origin, intensity);
    Ok(())
}

/// Add a lens flare to the color channels of an image
///
/// The template is synthesized for the image size when none is given
///
/// # Errors
/// See [`LensFlareParams::validate`]
pub fn apply_lens_flare(
    image: &mut Image, params: &LensFlareParams, options: &EffectOptions,
    template: Option<&FlareTemplate>, random: &mut dyn UniformSource
) -> Result<(), ImageErrors> {
    let (width, height) = image.dimensions();
    let colorspace = image.colorspace();
    let params = params.validate(width, height, options)?;

    let synthesized;
    let template = match template {
        Some(template) => template,
        None => {
            synthesized = FlareTemplate::synthesize_for(width, height);
            &synthesized
        }
    };
    let position = params.position.unwrap_or_else(|| image_center(width, height));
    let (intensity, size) = (params.intensity, params.size);

    debug!(
        "Lens flare at {:?} intensity {} size {}, template {:?}",
        position,
        intensity,
        size,
        template.dimensions()
    );

    let mut planes: Vec<Vec<f32>> = image
        .channels_ref(true)
        .iter()
        .map(|c| c.iter().map(|x| f32::from(*x) / 255.0).collect())
        .collect();

    add_flare_element(
        &mut planes, width, height, colorspace, template, position, size, intensity
    )?;

    let (cx, cy) = image_center(width, height);
    let (dx, dy) = (position.0 - cx, position.1 - cy);

    for _ in 0..SECONDARY_FLARES {
        let factor = random.next_f32(-0.8, 1.5);
        let sec_x = (cx as f32 + dx as f32 * factor) as i64;
        let sec_y = (cy as f32 + dy as f32 * factor) as i64;

        if !((0..width as i64).contains(&sec_x) && (0..height as i64).contains(&sec_y)) {
            trace!("Secondary flare at ({},{}) is outside the image", sec_x, sec_y);
            continue;
        }
        let sec_size = size * random.next_f32(0.2, 0.6);
        let sec_intensity = intensity * random.next_f32(0.3, 0.7);

        add_flare_element(
            &mut planes,
            width,
            height,
            colorspace,
            template,
            (sec_x, sec_y),
            sec_size,
            sec_intensity
        )?;
    }
    let center = (position.0 as f32, position.1 as f32);

    let streak = anamorphic_streak(width, height, center, intensity * 0.7);

    let halo_radius = width.min(height) as f32 * HALO_FRACTION * size;
    let mut halo = gaussian_radial(width, height, center, halo_radius / 3.0)?;
    halo.map_inplace(|x| x * intensity * 0.5);

    for (plane, channel) in planes.iter_mut().zip(image.channels_mut(true)) {
        screen_blend_channel(plane, streak.data());
        screen_blend_channel(plane, halo.data());

        for (pix, value) in channel.iter_mut().zip(plane.iter()) {
            *pix = truncate_u8(value.clamp(0.0, 1.0) * 255.0);
        }
    }
    Ok(())
}

/// Lens flare operation
///
/// Borrows the random source for its lifetime, each execution continues
/// the sequence where the last one stopped
pub struct LensFlare<'a> {
    params:   LensFlareParams,
    options:  EffectOptions,
    template: Option<&'a FlareTemplate>,
    random:   RefCell<&'a mut dyn UniformSource>
}

impl<'a> LensFlare<'a> {
    #[must_use]
    pub fn new(params: LensFlareParams, random: &'a mut dyn UniformSource) -> LensFlare<'a> {
        LensFlare {
            params,
            options: EffectOptions::default(),
            template: None,
            random: RefCell::new(random)
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EffectOptions) -> LensFlare<'a> {
        self.options = options;
        self
    }

    /// Use a loaded template instead of the synthesized one
    #[must_use]
    pub fn with_template(mut self, template: &'a FlareTemplate) -> LensFlare<'a> {
        self.template = Some(template);
        self
    }
}

impl<'a> OperationsTrait for LensFlare<'a> {
    fn name(&self) -> &'static str {
        "Lens Flare"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), ImageErrors> {
        let mut random = self.random.borrow_mut();
        apply_lens_flare(
            image,
            &self.params,
            &self.options,
            self.template,
            &mut **random
        )
    }

    fn options(&self) -> EffectOptions {
        self.options
    }
}
