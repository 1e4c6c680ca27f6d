use anyhow::{Context, Result};
use mtl_dedup::prelude::*;

mod cli;
use cli::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::from_matches(&cli::command().get_matches());

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    mtl_dedup::foundation::logging::init_with_level(level);

    if args.inputs.is_empty() {
        log::error!("Specify at least one input file");
        std::process::exit(1);
    }

    let config = match &args.config {
        Some(path) => ConversionConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConversionConfig::default(),
    }
    .merge_flags(
        args.png,
        args.force,
        args.keep_intermediate,
        args.output_directory.clone(),
    );
    log::debug!("Using {config:?}");
    announce(&config);

    let converter = mtl_dedup::io::Converter::new(config);
    let mut failures = 0;

    for input in &args.inputs {
        match converter.convert(input) {
            Ok(summary) => log::debug!(
                "{}: {} uses redirected, {} textures copied, {} converted",
                input.display(),
                summary.stats.redirected_uses,
                summary.textures.copied,
                summary.textures.converted
            ),
            Err(e) => {
                log::error!("Failed to convert {}: {e}", input.display());
                failures += 1;
            }
        }
    }

    log::info!("Done.");

    if failures == args.inputs.len() {
        std::process::exit(1);
    }

    Ok(())
}

fn announce(config: &ConversionConfig) {
    for message in announcements(config) {
        log::info!("{message}");
    }
}

/// Startup messages for the options that are switched on
fn announcements(config: &ConversionConfig) -> Vec<String> {
    let mut messages = Vec::new();
    if config.normalize_textures_to_png {
        messages.push("Will convert all textures to PNG".to_string());
    }
    if config.force_conversion {
        messages.push("Will attempt conversion for unsupported input file types".to_string());
    }
    if config.keep_intermediate {
        messages.push("Will keep intermediate files and write duplicate reports".to_string());
    }
    if let Some(dir) = &config.output_directory {
        messages.push(format!("Will write output to {}", dir.display()));
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_announce_nothing() {
        assert!(announcements(&ConversionConfig::default()).is_empty());
    }

    #[test]
    fn test_enabled_options_are_announced() {
        let config = ConversionConfig::default()
            .with_png_textures(true)
            .with_force_conversion(true)
            .with_output_directory("out");

        assert_eq!(
            announcements(&config),
            vec![
                "Will convert all textures to PNG".to_string(),
                "Will attempt conversion for unsupported input file types".to_string(),
                "Will write output to out".to_string(),
            ]
        );
    }
}
