/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

pub static CONFIG_HELP: &str = "Read the effect and its parameters from a JSON file

The file holds a single object tagged with the effect name, e.g
{\"effect\": \"spotlight\", \"radius\": 120.0, \"brightness\": 2.0}

Parameters that are left out take their default values.
An effect given as a subcommand takes precedence over this option";

pub static STRICT_HELP: &str = "Reject parameters outside their documented range

By default such parameters are clamped to the nearest valid value
and a warning is printed";

pub static FLARE_TEMPLATE_HELP: &str = "Image used for the lens flare elements

An RGB or RGBA image, the alpha channel controls how much of each
element is blended in. When the file cannot be loaded a radial
gradient is synthesized instead";

pub static COMPARE_HELP: &str = "Write the original and the processed image side by side

The output is twice as wide as the input, with the original on the
left and the processed image on the right";
