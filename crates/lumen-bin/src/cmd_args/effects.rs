/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Subcommands, one per effect
use clap::{value_parser, Arg, Command};

fn float_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .allow_negative_numbers(true)
        .value_parser(value_parser!(f32))
}

fn intensity_arg(range: &'static str) -> Arg {
    float_arg("intensity", range)
}

fn point_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .num_args(2)
        .value_names(["X", "Y"])
        .allow_negative_numbers(true)
        .value_parser(value_parser!(i64))
}

fn count_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .value_parser(value_parser!(u32))
}

#[rustfmt::skip]
pub fn effect_commands() -> Vec<Command> {
    vec![
        Command::new("spotlight")
            .about("Light a circle around a point and dim everything else")
            .arg(point_arg("center", "Center of the light, defaults to the image center"))
            .arg(float_arg("radius", "Radius of the light in pixels, at most half the smaller side"))
            .arg(float_arg("brightness", "Boost for lit pixels, 0.5 to 3.0 [default: 1.5]"))
            .arg(float_arg("ambient", "Light level outside the spot, 0.0 to 0.5 [default: 0.2]")),
        Command::new("vignette")
            .about("Darken the borders of the image")
            .arg(intensity_arg("Any positive value, larger values darken more [default: 1.5]")),
        Command::new("light-rays")
            .about("Add god rays coming from outside the frame")
            .arg(intensity_arg("Strength of the rays, 0.1 to 2.0 [default: 1.0]"))
            .arg(float_arg("angle", "Direction the rays travel in, degrees [default: 45]"))
            .arg(count_arg("count", "Number of rays, 5 to 50 [default: 20]"))
            .arg(count_arg("width", "Width of a ray in pixels, 1 to 10 [default: 2]"))
            .arg(float_arg("length", "Length of a ray as a fraction of the diagonal, 0.1 to 1.0 [default: 0.8]")),
        Command::new("color-temperature")
            .about("Warm or cool the image")
            .arg(float_arg("warmth", "-1.0 (cool) to 1.0 (warm) [default: 0.0]")),
        Command::new("dramatic-shadows")
            .about("Deepen shadows relative to their surroundings")
            .arg(intensity_arg("0.5 to 3.0 [default: 1.5]")),
        Command::new("glowing-highlights")
            .about("Make bright areas glow")
            .arg(intensity_arg("0.5 to 3.0 [default: 1.5]")),
        Command::new("light-leaks")
            .about("Add soft colored light leaks")
            .arg(intensity_arg("0.1 to 1.0 [default: 0.5]")),
        Command::new("lens-flare")
            .about("Add a lens flare")
            .arg(point_arg("position", "Position of the light, defaults to (0.7 * width, 0.3 * height)"))
            .arg(intensity_arg("0.1 to 1.0 [default: 0.5]"))
            .arg(float_arg("size", "Scale of the flare elements, 0.5 to 2.0 [default: 1.0]"))
    ]
}
