/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Dispatch of effects by value
//!
//! [`Effect`] carries the parameters of one of the eight effects,
//! [`EffectPipeline`] turns it into the matching operation and runs it
//! with shared options, random source and flare template.
use lumen_core::log::debug;
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;

use crate::effects::color_temperature::{ColorTemperature, ColorTemperatureParams};
use crate::effects::dramatic_shadows::{DramaticShadows, DramaticShadowsParams};
use crate::effects::glowing_highlights::{GlowingHighlights, GlowingHighlightsParams};
use crate::effects::lens_flare::{LensFlare, LensFlareParams};
use crate::effects::light_leaks::{LightLeaks, LightLeaksParams};
use crate::effects::light_rays::{LightRays, LightRaysParams};
use crate::effects::spotlight::{Spotlight, SpotlightParams};
use crate::effects::vignette::{Vignette, VignetteParams};
use crate::flare::FlareTemplate;
use crate::random::{seeded_source, UniformSource};

/// An effect together with its parameters
///
/// With the `serde-support` feature this reads from and writes to objects
/// tagged with the effect name, e.g. `{"effect": "vignette", "intensity": 2.0}`.
/// Missing parameters take their defaults
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde-support",
    serde(tag = "effect", rename_all = "snake_case")
)]
pub enum Effect {
    Spotlight(SpotlightParams),
    Vignette(VignetteParams),
    LightRays(LightRaysParams),
    ColorTemperature(ColorTemperatureParams),
    DramaticShadows(DramaticShadowsParams),
    GlowingHighlights(GlowingHighlightsParams),
    LightLeaks(LightLeaksParams),
    LensFlare(LensFlareParams)
}

/// Names accepted by [`Effect::from_name`]
pub static EFFECT_NAMES: [&str; 8] = [
    "spotlight",
    "vignette",
    "light_rays",
    "color_temperature",
    "dramatic_shadows",
    "glowing_highlights",
    "light_leaks",
    "lens_flare"
];

impl Effect {
    /// The snake case name of the effect
    pub const fn name(&self) -> &'static str {
        match self {
            Effect::Spotlight(_) => "spotlight",
            Effect::Vignette(_) => "vignette",
            Effect::LightRays(_) => "light_rays",
            Effect::ColorTemperature(_) => "color_temperature",
            Effect::DramaticShadows(_) => "dramatic_shadows",
            Effect::GlowingHighlights(_) => "glowing_highlights",
            Effect::LightLeaks(_) => "light_leaks",
            Effect::LensFlare(_) => "lens_flare"
        }
    }

    /// An effect with default parameters from its name
    ///
    /// Dashes are accepted in place of underscores
    pub fn from_name(name: &str) -> Option<Effect> {
        let effect = match name.replace('-', "_").as_str() {
            "spotlight" => Effect::Spotlight(SpotlightParams::default()),
            "vignette" => Effect::Vignette(VignetteParams::default()),
            "light_rays" => Effect::LightRays(LightRaysParams::default()),
            "color_temperature" => Effect::ColorTemperature(ColorTemperatureParams::default()),
            "dramatic_shadows" => Effect::DramaticShadows(DramaticShadowsParams::default()),
            "glowing_highlights" => Effect::GlowingHighlights(GlowingHighlightsParams::default()),
            "light_leaks" => Effect::LightLeaks(LightLeaksParams::default()),
            "lens_flare" => Effect::LensFlare(LensFlareParams::default()),
            _ => return None
        };
        Some(effect)
    }

    /// Whether the effect draws from a random source
    pub const fn is_random(&self) -> bool {
        matches!(
            self,
            Effect::LightRays(_) | Effect::LightLeaks(_) | Effect::LensFlare(_)
        )
    }
}

/// Runs effects with shared options
#[derive(Clone, Debug, Default)]
pub struct EffectPipeline {
    options:        EffectOptions,
    flare_template: Option<FlareTemplate>
}

impl EffectPipeline {
    pub fn new(options: EffectOptions) -> EffectPipeline {
        EffectPipeline {
            options,
            flare_template: None
        }
    }

    /// Use `template` for lens flares instead of synthesizing one
    #[must_use]
    pub fn with_flare_template(mut self, template: FlareTemplate) -> EffectPipeline {
        self.flare_template = Some(template);
        self
    }

    pub const fn options(&self) -> &EffectOptions {
        &self.options
    }

    pub const fn flare_template(&self) -> Option<&FlareTemplate> {
        self.flare_template.as_ref()
    }

    /// Create the operation for an effect
    ///
    /// Random effects borrow `random` for as long as the operation lives
    pub fn operation<'a>(
        &'a self, effect: &Effect, random: &'a mut dyn UniformSource
    ) -> Box<dyn OperationsTrait + 'a> {
        let options = self.options;

        match *effect {
            Effect::Spotlight(params) => Box::new(Spotlight::new(params).with_options(options)),
            Effect::Vignette(params) => Box::new(Vignette::new(params).with_options(options)),
            Effect::LightRays(params) => {
                Box::new(LightRays::new(params, random).with_options(options))
            }
            Effect::ColorTemperature(params) => {
                Box::new(ColorTemperature::new(params).with_options(options))
            }
            Effect::DramaticShadows(params) => {
                Box::new(DramaticShadows::new(params).with_options(options))
            }
            Effect::GlowingHighlights(params) => {
                Box::new(GlowingHighlights::new(params).with_options(options))
            }
            Effect::LightLeaks(params) => {
                Box::new(LightLeaks::new(params, random).with_options(options))
            }
            Effect::LensFlare(params) => {
                let flare = LensFlare::new(params, random).with_options(options);

                match &self.flare_template {
                    Some(template) => Box::new(flare.with_template(template)),
                    None => Box::new(flare)
                }
            }
        }
    }

    /// Apply an effect to a copy of `image`
    ///
    /// # Errors
    /// Errors of the effect, see the individual effects
    pub fn apply(
        &self, image: &Image, effect: &Effect, random: &mut dyn UniformSource
    ) -> Result<Image, ImageErrors> {
        debug!("Applying {} to {:?} image", effect.name(), image.dimensions());

        let mut output = image.clone();
        self.operation(effect, random).execute(&mut output)?;
        Ok(output)
    }

    /// Apply an effect using a random source seeded from the options
    ///
    /// Calls with the same options, image and effect give the same output
    ///
    /// # Errors
    /// Errors of the effect, see the individual effects
    pub fn apply_seeded(&self, image: &Image, effect: &Effect) -> Result<Image, ImageErrors> {
        let mut random = seeded_source(self.options.seed_or_default());
        self.apply(image, effect, &mut random)
    }
}
