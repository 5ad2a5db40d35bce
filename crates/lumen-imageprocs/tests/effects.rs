/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lumen_core::colorspace::{ColorSpace, EFFECT_COLORSPACES};
use lumen_core::options::EffectOptions;
use lumen_image::errors::ImageErrors;
use lumen_image::image::Image;
use lumen_image::traits::OperationsTrait;
use lumen_imageprocs::blend::screen_blend;
use lumen_imageprocs::compare::side_by_side;
use lumen_imageprocs::effects::color_temperature::{ColorTemperature, ColorTemperatureParams};
use lumen_imageprocs::effects::lens_flare::{LensFlare, LensFlareParams};
use lumen_imageprocs::effects::light_leaks::{LightLeaks, LightLeaksParams};
use lumen_imageprocs::effects::light_rays::LightRaysParams;
use lumen_imageprocs::effects::spotlight::{Spotlight, SpotlightParams};
use lumen_imageprocs::effects::vignette::{Vignette, VignetteParams};
use lumen_imageprocs::flare::FlareTemplate;
use lumen_imageprocs::pipeline::{Effect, EffectPipeline, EFFECT_NAMES};
use lumen_imageprocs::random::seeded_source;
use nanorand::{Rng, WyRand};
use xxhash_rust::xxh3::xxh3_128;

fn random_image(colorspace: ColorSpace, width: usize, height: usize, seed: u64) -> Image {
    let mut rand = WyRand::new_seed(seed);
    Image::from_fn(width, height, colorspace, |_, _, px| {
        rand.fill(px);
    })
}

fn hash(image: &Image) -> u128 {
    xxh3_128(&image.flatten_u8())
}

#[test]
fn every_effect_preserves_the_shape() {
    let pipeline = EffectPipeline::default();

    for colorspace in EFFECT_COLORSPACES {
        let image = random_image(colorspace, 37, 23, 1);

        for name in EFFECT_NAMES {
            let effect = Effect::from_name(name).unwrap();
            let out = pipeline.apply_seeded(&image, &effect).unwrap();

            assert_eq!(out.dimensions(), (37, 23), "{} {:?}", name, colorspace);
            assert_eq!(out.colorspace(), colorspace, "{} {:?}", name, colorspace);
            assert_eq!(out.alpha_channel(), image.alpha_channel());
        }
    }
}

#[test]
fn vignette_on_flat_gray() {
    let mut image = Image::fill(128, ColorSpace::RGB, 100, 100);
    Vignette::new(VignetteParams { intensity: 1.5 })
        .execute(&mut image)
        .unwrap();

    assert_eq!(image.pixel(50, 50), vec![128, 128, 128]);

    for (x, y) in [(0, 0), (99, 0), (0, 99), (99, 99)] {
        assert!(image.pixel(x, y).iter().all(|v| *v < 100), "corner {},{}", x, y);
    }
}

#[test]
fn huge_vignette_keeps_only_the_center() {
    let mut image = Image::fill(128, ColorSpace::RGB, 101, 101);
    Vignette::new(VignetteParams { intensity: 1000.0 })
        .execute(&mut image)
        .unwrap();

    assert_eq!(image.pixel(50, 50), vec![128, 128, 128]);
    assert_eq!(image.pixel(0, 0), vec![0, 0, 0]);
}

#[test]
fn spotlight_radius_is_clamped_to_the_image() {
    let image = Image::fill(128, ColorSpace::RGB, 100, 100);
    let params = SpotlightParams {
        center:     Some((50, 50)),
        radius:     Some(600.0),
        brightness: 1.5,
        ambient:    0.2
    };

    for options in [EffectOptions::new_lenient(), EffectOptions::new_strict()] {
        let out = Spotlight::new(params)
            .with_options(options)
            .clone_and_execute(&image)
            .unwrap();

        // inner zone is 0.7 * 50 pixels
        assert_eq!(out.pixel(50, 50), vec![192, 192, 192]);
        assert_eq!(out.pixel(50, 16), vec![192, 192, 192]);
        // corners are past the clamped radius
        assert_eq!(out.pixel(0, 0), vec![25, 25, 25]);
        assert_eq!(out.pixel(99, 99), vec![25, 25, 25]);
    }
}

#[test]
fn spotlight_lit_and_ambient_zones() {
    let image = random_image(ColorSpace::BGR, 64, 64, 9);
    let (cx, cy, radius) = (30_i64, 34_i64, 20.0_f32);
    let params = SpotlightParams {
        center:     Some((cx, cy)),
        radius:     Some(radius),
        brightness: 2.0,
        ambient:    0.3
    };
    let out = Spotlight::new(params).clone_and_execute(&image).unwrap();

    for y in 0..64 {
        for x in 0..64 {
            let dx = (x as i64 - cx) as f32;
            let dy = (y as i64 - cy) as f32;
            let distance = (dx * dx + dy * dy).sqrt();

            for (input, output) in image.pixel(x, y).iter().zip(out.pixel(x, y)) {
                let v = f32::from(*input);

                if distance <= 0.7 * radius - 0.01 {
                    assert_eq!(output, (v * 2.0).min(255.0) as u8);
                    assert!(output >= *input);
                } else if distance > radius + 0.01 {
                    assert_eq!(output, (v * 0.3) as u8);
                }
            }
        }
    }
}

#[test]
fn zero_warmth_is_the_identity() {
    for colorspace in EFFECT_COLORSPACES {
        let image = random_image(colorspace, 20, 20, 3);
        let out = ColorTemperature::new(ColorTemperatureParams { warmth: 0.0 })
            .clone_and_execute(&image)
            .unwrap();
        assert_eq!(out, image);
    }
}

#[test]
fn screen_is_commutative() {
    let mut rand = WyRand::new_seed(21);

    for _ in 0..1000 {
        let a: f32 = rand.generate();
        let b: f32 = rand.generate();

        assert_eq!(screen_blend(a, b), screen_blend(b, a));
        assert!((screen_blend(a, 0.0) - a).abs() < 1e-6);
    }
}

#[test]
fn seeded_light_leaks_are_reproducible() {
    let image = random_image(ColorSpace::RGB, 90, 60, 4);
    let run = |seed: u64| {
        let mut random = seeded_source(seed);
        let out = LightLeaks::new(LightLeaksParams::default(), &mut random)
            .clone_and_execute(&image)
            .unwrap();
        hash(&out)
    };

    assert_eq!(run(17), run(17));
    assert_ne!(run(17), run(18));
}

#[test]
fn seeded_lens_flares_are_reproducible() {
    let image = random_image(ColorSpace::RGBA, 90, 60, 5);
    let template = FlareTemplate::synthesize(24);
    let run = || {
        let mut random = seeded_source(99);
        let out = LensFlare::new(LensFlareParams::default(), &mut random)
            .with_template(&template)
            .clone_and_execute(&image)
            .unwrap();
        hash(&out)
    };
    assert_eq!(run(), run());
}

#[test]
fn pipeline_with_a_seed_is_reproducible() {
    let image = random_image(ColorSpace::BGRA, 50, 50, 6);
    let options = EffectOptions::default().set_seed(Some(1234));
    let pipeline = EffectPipeline::new(options).with_flare_template(FlareTemplate::synthesize(10));

    for name in ["light_rays", "light_leaks", "lens_flare"] {
        let effect = Effect::from_name(name).unwrap();
        let first = pipeline.apply_seeded(&image, &effect).unwrap();
        let second = pipeline.apply_seeded(&image, &effect).unwrap();
        assert_eq!(hash(&first), hash(&second), "{}", name);
    }
}

#[test]
fn flare_in_a_corner_is_clipped() {
    let image = Image::fill(20, ColorSpace::RGB, 40, 40);

    for position in [(0, 0), (39, 39), (-5, 20), (45, -3)] {
        let params = LensFlareParams {
            position: Some(position),
            ..LensFlareParams::default()
        };
        let mut random = seeded_source(2);
        let out = LensFlare::new(params, &mut random)
            .clone_and_execute(&image)
            .unwrap();
        assert_eq!(out.dimensions(), (40, 40));
    }
    let params = LensFlareParams {
        position: Some((0, 0)),
        ..LensFlareParams::default()
    };
    let mut random = seeded_source(2);
    let out = LensFlare::new(params, &mut random)
        .clone_and_execute(&image)
        .unwrap();
    assert!(out.pixel(0, 0)[0] > 20);
}

#[test]
fn strict_mode_rejects_what_lenient_mode_clamps() {
    let image = Image::fill(100, ColorSpace::RGB, 30, 30);
    let effect = Effect::LightRays(LightRaysParams {
        count: 100,
        ..LightRaysParams::default()
    });

    let lenient = EffectPipeline::new(EffectOptions::new_lenient());
    assert!(lenient.apply_seeded(&image, &effect).is_ok());

    let strict = EffectPipeline::new(EffectOptions::new_strict());
    let err = strict.apply_seeded(&image, &effect).unwrap_err();
    assert!(matches!(err, ImageErrors::InvalidParameter("count", _)));
}

#[test]
fn non_finite_parameters_are_always_rejected() {
    let image = Image::fill(100, ColorSpace::RGB, 30, 30);
    let effects = [
        Effect::Vignette(VignetteParams { intensity: f32::NAN }),
        Effect::ColorTemperature(ColorTemperatureParams {
            warmth: f32::INFINITY
        }),
        Effect::LightLeaks(LightLeaksParams {
            intensity: f32::NAN
        })
    ];
    for options in [EffectOptions::new_lenient(), EffectOptions::new_strict()] {
        let pipeline = EffectPipeline::new(options);

        for effect in &effects {
            let err = pipeline.apply_seeded(&image, effect).unwrap_err();
            assert!(matches!(err, ImageErrors::InvalidParameter(_, _)));
        }
    }
}

#[test]
fn grayscale_images_are_shape_mismatches() {
    let pipeline = EffectPipeline::default();

    for colorspace in [ColorSpace::Luma, ColorSpace::LumaA] {
        let image = Image::fill(100, colorspace, 10, 10);

        for name in EFFECT_NAMES {
            let effect = Effect::from_name(name).unwrap();
            let err = pipeline.apply_seeded(&image, &effect).unwrap_err();
            assert!(matches!(err, ImageErrors::ShapeMismatch(_)), "{}", name);
        }
    }
}

#[test]
fn oversized_images_are_rejected() {
    let image = Image::fill(100, ColorSpace::RGB, 30, 10);
    let options = EffectOptions::default().set_max_width(20);
    let effect = Effect::from_name("vignette").unwrap();

    let err = EffectPipeline::new(options)
        .apply_seeded(&image, &effect)
        .unwrap_err();
    assert!(matches!(err, ImageErrors::ShapeMismatch(_)));
}

#[test]
fn comparison_of_an_effect() {
    let image = random_image(ColorSpace::RGBA, 16, 12, 8);
    let effect = Effect::from_name("glowing_highlights").unwrap();
    let processed = EffectPipeline::default()
        .apply_seeded(&image, &effect)
        .unwrap();

    let compared = side_by_side(&image, &processed).unwrap();
    assert_eq!(compared.dimensions(), (32, 12));
    assert_eq!(compared.colorspace(), ColorSpace::RGB);
    assert_eq!(compared.pixel(15, 0), vec![255, 255, 255]);
    assert_eq!(compared.pixel(16, 5), vec![255, 255, 255]);
    assert_eq!(compared.pixel(17, 3), processed.pixel(1, 3)[..3].to_vec());
}
