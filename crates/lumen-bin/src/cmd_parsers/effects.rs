/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Turn the command line into an [`Effect`]
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::debug;
use lumen_image::errors::ImageErrors;
use lumen_imageprocs::pipeline::Effect;

fn set_f32(args: &ArgMatches, id: &str, value: &mut f32) {
    if let Some(v) = args.get_one::<f32>(id) {
        *value = *v;
    }
}

fn set_u32(args: &ArgMatches, id: &str, value: &mut u32) {
    if let Some(v) = args.get_one::<u32>(id) {
        *value = *v;
    }
}

fn get_point(args: &ArgMatches, id: &str) -> Option<(i64, i64)> {
    let values: Vec<i64> = args.get_many::<i64>(id)?.copied().collect();

    match values[..] {
        [x, y] => Some((x, y)),
        _ => None
    }
}

/// Build an effect from a subcommand, starting from default parameters
pub fn effect_from_subcommand(name: &str, args: &ArgMatches) -> Result<Effect, ImageErrors> {
    let mut effect = Effect::from_name(name)
        .ok_or_else(|| ImageErrors::GenericString(format!("Unknown effect {}", name)))?;

    match &mut effect {
        Effect::Spotlight(params) => {
            if let Some(center) = get_point(args, "center") {
                params.center = Some(center);
            }
            if let Some(radius) = args.get_one::<f32>("radius") {
                params.radius = Some(*radius);
            }
            set_f32(args, "brightness", &mut params.brightness);
            set_f32(args, "ambient", &mut params.ambient);
        }
        Effect::LightRays(params) => {
            set_f32(args, "intensity", &mut params.intensity);
            set_f32(args, "angle", &mut params.angle);
            set_u32(args, "count", &mut params.count);
            set_u32(args, "width", &mut params.width);
            set_f32(args, "length", &mut params.length);
        }
        Effect::ColorTemperature(params) => set_f32(args, "warmth", &mut params.warmth),
        Effect::Vignette(params) => set_f32(args, "intensity", &mut params.intensity),
        Effect::DramaticShadows(params) => set_f32(args, "intensity", &mut params.intensity),
        Effect::GlowingHighlights(params) => set_f32(args, "intensity", &mut params.intensity),
        Effect::LightLeaks(params) => set_f32(args, "intensity", &mut params.intensity),
        Effect::LensFlare(params) => {
            if let Some(position) = get_point(args, "position") {
                params.position = Some(position);
            }
            set_f32(args, "intensity", &mut params.intensity);
            set_f32(args, "size", &mut params.size);
        }
    }
    Ok(effect)
}

/// Read an effect description from a JSON file
pub fn effect_from_config(path: &Path) -> Result<Effect, ImageErrors> {
    let contents = read_to_string(path)?;

    serde_json::from_str(&contents).map_err(|e| {
        ImageErrors::GenericString(format!("Could not parse config {:?}: {}", path, e))
    })
}

/// The effect asked for on the command line
///
/// A subcommand wins over `--config`
pub fn parse_effect(args: &ArgMatches) -> Result<Effect, ImageErrors> {
    let effect = if let Some((name, sub_args)) = args.subcommand() {
        effect_from_subcommand(name, sub_args)?
    } else if let Some(path) = args.get_one::<PathBuf>("config") {
        effect_from_config(path)?
    } else {
        return Err(ImageErrors::GenericStr(
            "No effect given, use a subcommand or --config"
        ));
    };
    debug!("Parsed effect {:?}", effect);

    Ok(effect)
}

#[cfg(test)]
mod tests {
    use lumen_imageprocs::effects::lens_flare::LensFlareParams;
    use lumen_imageprocs::effects::light_rays::LightRaysParams;
    use lumen_imageprocs::pipeline::Effect;

    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::effects::parse_effect;

    fn parse(args: &[&str]) -> Effect {
        let mut full = vec!["lumen", "-i", "a.png", "-o", "b.png"];
        full.extend_from_slice(args);

        let matches = create_cmd_args().try_get_matches_from(full).unwrap();
        parse_effect(&matches).unwrap()
    }

    #[test]
    fn unset_flags_keep_defaults() {
        let effect = parse(&["light-rays", "--count", "12", "--angle", "-30"]);

        assert_eq!(
            effect,
            Effect::LightRays(LightRaysParams {
                count: 12,
                angle: -30.0,
                ..LightRaysParams::default()
            })
        );
    }

    #[test]
    fn flare_position() {
        let effect = parse(&["lens-flare", "--position", "5", "6", "--size", "2"]);

        assert_eq!(
            effect,
            Effect::LensFlare(LensFlareParams {
                position: Some((5, 6)),
                size: 2.0,
                ..LensFlareParams::default()
            })
        );
    }

    #[test]
    fn missing_effect_is_an_error() {
        let matches = create_cmd_args()
            .try_get_matches_from(["lumen", "-i", "a.png", "-o", "b.png"])
            .unwrap();
        assert!(parse_effect(&matches).is_err());
    }
}
