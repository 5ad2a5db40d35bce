/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, Level};
use lumen_core::options::EffectOptions;

#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub max_width:      usize,
    pub max_height:     usize,
    pub strict_mode:    bool,
    pub seed:           Option<u64>,
    pub override_files: bool,
    pub compare:        bool,
    pub flare_template: Option<PathBuf>
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        let defaults = EffectOptions::default();

        CmdOptions {
            max_width:      defaults.max_width(),
            max_height:     defaults.max_height(),
            strict_mode:    false,
            seed:           None,
            override_files: false,
            compare:        false,
            flare_template: None
        }
    }

    /// Options handed to every effect
    pub fn effect_options(&self) -> EffectOptions {
        EffectOptions::default()
            .set_max_width(self.max_width)
            .set_max_height(self.max_height)
            .set_strict_mode(self.strict_mode)
            .set_seed(self.seed)
    }
}

fn flag_set(options: &ArgMatches, id: &str) -> bool {
    options.get_one::<bool>(id).copied().unwrap_or(false)
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }
    if flag_set(options, "strict") {
        info!("Running effects in strict mode");
        cmd_options.strict_mode = true;
    }
    if let Some(seed) = options.get_one::<u64>("seed") {
        info!("Using seed {}", seed);
        cmd_options.seed = Some(*seed);
    }
    if options.value_source("all-yes") == Some(ValueSource::CommandLine) {
        info!("Setting all commands to yes");
        cmd_options.override_files = true;
    }
    if flag_set(options, "compare") {
        info!("Writing a side by side comparison");
        cmd_options.compare = true;
    }
    cmd_options.flare_template = options.get_one::<PathBuf>("flare-template").cloned();

    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if flag_set(options, "debug") {
        log_level = Level::Debug;
    } else if flag_set(options, "trace") {
        log_level = Level::Trace;
    } else if flag_set(options, "warn") {
        log_level = Level::Warn
    } else if flag_set(options, "info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {}", e);
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
