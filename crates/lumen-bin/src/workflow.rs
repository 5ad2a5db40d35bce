/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{stdin, BufRead};
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{debug, info};
use lumen_image::errors::ImageErrors;
use lumen_imageprocs::compare::side_by_side;
use lumen_imageprocs::pipeline::EffectPipeline;

use crate::cmd_parsers::effects::parse_effect;
use crate::cmd_parsers::global_options::CmdOptions;
use crate::file_io::{read_flare_template, read_image, write_image};

fn input_paths(args: &ArgMatches) -> Result<(&PathBuf, &PathBuf), ImageErrors> {
    let in_file = args
        .get_one::<PathBuf>("in")
        .ok_or(ImageErrors::GenericStr("No input file given"))?;
    let out_file = args
        .get_one::<PathBuf>("out")
        .ok_or(ImageErrors::GenericStr("No output file given"))?;
    Ok((in_file, out_file))
}

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), ImageErrors> {
    info!("Creating workflow from input");

    let (in_file, out_file) = input_paths(args)?;
    verify_file_paths(in_file, out_file, cmd_opts)?;

    let effect = parse_effect(args)?;
    let image = read_image(in_file)?;

    let mut pipeline = EffectPipeline::new(cmd_opts.effect_options());

    if let Some(template) = read_flare_template(cmd_opts.flare_template.as_ref()) {
        pipeline = pipeline.with_flare_template(template);
    }
    info!("Applying {}", effect.name());
    let processed = pipeline.apply_seeded(&image, &effect)?;

    let output = if cmd_opts.compare {
        debug!("Building side by side comparison");
        side_by_side(&image, &processed)?
    } else {
        processed
    };
    write_image(&output, out_file)
}

fn verify_file_paths(p0: &Path, p1: &Path, cmd_opts: &CmdOptions) -> Result<(), ImageErrors> {
    if p0 == p1 {
        return Err(ImageErrors::GenericString(format!(
            "Cannot use {:?} as both input and output",
            p0
        )));
    }
    if !p0.exists() {
        return Err(ImageErrors::GenericString(format!(
            "Path {:?}, does not exist",
            p0
        )));
    }
    if !p0.is_file() {
        return Err(ImageErrors::GenericString(format!(
            "Path {:?} is not a file",
            p0
        )));
    }

    if p1.exists() {
        if cmd_opts.override_files {
            info!("Overwriting path {:?} ", p1);
        } else {
            println!("File {:?} exists, overwrite [y/N]", p1);
            let mut result = String::new();

            stdin().lock().read_line(&mut result)?;

            if result.trim() != "y" {
                return Err(ImageErrors::GenericString(format!(
                    "Not overwriting file {:?}",
                    p1
                )));
            }
        }
    }
    Ok(())
}
