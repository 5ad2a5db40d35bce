/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::cmd_args::help_strings::{COMPARE_HELP, CONFIG_HELP, FLARE_TEMPLATE_HELP, STRICT_HELP};

pub mod effects;
pub mod help_strings;

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("lumen")
        .about("Apply lighting effects to images")
        .subcommands(effects::effect_commands())
        .subcommand_precedence_over_arg(true)
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input file to read data from")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output to write the data to, the extension picks the format")
            .value_parser(value_parser!(PathBuf))
            .required(true))
        .arg(Arg::new("config")
            .long("config")
            .help("Read the effect from a JSON file")
            .long_help(CONFIG_HELP)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("seed")
            .long("seed")
            .help("Seed for effects with random elements")
            .value_parser(value_parser!(u64)))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help("Reject out of range parameters instead of clamping them")
            .long_help(STRICT_HELP))
        .arg(Arg::new("flare-template")
            .long("flare-template")
            .help("Image used for lens flare elements")
            .long_help(FLARE_TEMPLATE_HELP)
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("compare")
            .long("compare")
            .action(ArgAction::SetTrue)
            .help("Write the original and processed image side by side")
            .long_help(COMPARE_HELP))
        .arg(Arg::new("all-yes")
            .short('y')
            .long("yes")
            .action(ArgAction::SetTrue)
            .help("Overwrite the output file without asking"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the effect options"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .help_heading("ADVANCED")
            .help("Maximum width of an image effects will process")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .help_heading("ADVANCED")
            .help("Maximum height of an image effects will process")
            .value_parser(value_parser!(usize))
            .default_value("16384"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::cmd_args::create_cmd_args;

    #[test]
    fn command_is_well_formed() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn effect_flags_are_parsed() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "lumen", "-i", "in.png", "-o", "out.png", "--seed", "5", "spotlight", "--center",
                "10", "-20", "--radius", "30"
            ])
            .unwrap();

        assert_eq!(
            matches.get_one::<PathBuf>("in"),
            Some(&PathBuf::from("in.png"))
        );
        assert_eq!(matches.get_one::<u64>("seed"), Some(&5));

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "spotlight");

        let center: Vec<i64> = sub.get_many::<i64>("center").unwrap().copied().collect();
        assert_eq!(center, vec![10, -20]);
        assert_eq!(sub.get_one::<f32>("radius"), Some(&30.0));
    }
}
