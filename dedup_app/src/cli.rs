//! Command line definition

use std::path::PathBuf;

use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub inputs: Vec<PathBuf>,
    pub png: bool,
    pub force: bool,
    pub keep_intermediate: bool,
    pub output_directory: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

pub fn command() -> Command {
    Command::new("mtldedup")
        .version(crate_version!())
        .about("Collapses render-identical materials in Wavefront OBJ/MTL models")
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .help("Models to convert")
                .num_args(0..)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("png")
                .long("png")
                .help("Rewrite texture references to .png and convert the images")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Try to convert files with unrecognized extensions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("keep-intermediate")
                .long("keep-intermediate")
                .help("Keep intermediate files and write the duplicate report")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output-directory")
                .short('o')
                .long("output-directory")
                .value_name("DIR")
                .help("Directory for converted files (default: next to each input)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Conversion settings (.toml or .ron); flags override it")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log debug output")
                .action(ArgAction::SetTrue),
        )
}

impl CliArgs {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            inputs: matches
                .get_many::<PathBuf>("input")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            png: matches.get_flag("png"),
            force: matches.get_flag("force"),
            keep_intermediate: matches.get_flag("keep-intermediate"),
            output_directory: matches.get_one::<PathBuf>("output-directory").cloned(),
            config: matches.get_one::<PathBuf>("config").cloned(),
            verbose: matches.get_flag("verbose"),
        }
    }
}
