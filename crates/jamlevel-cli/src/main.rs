mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::export::ExportPaths;
use config::CliConfig;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let directive = if cli.verbose {
        "jamlevel=debug"
    } else {
        "jamlevel=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load_or_default(&cli.config);
    let paths = &config.paths;

    match cli.command {
        Command::Parse { input, output } => {
            commands::parse::run(
                input.as_deref().unwrap_or(&paths.container),
                output.as_deref().unwrap_or(&paths.parsed),
            )?;
        }
        Command::Hardness {
            input,
            guids,
            output,
        } => {
            commands::hardness::run(
                input.as_deref().unwrap_or(&paths.container),
                guids.as_deref().unwrap_or(&paths.guids),
                output.as_deref().unwrap_or(&paths.hardness),
            )?;
        }
        Command::Export {
            parsed,
            guids,
            hardness,
            output,
            count,
        } => {
            let export_paths = ExportPaths {
                parsed: parsed.as_deref().unwrap_or(&paths.parsed),
                guids: guids.as_deref().unwrap_or(&paths.guids),
                hardness: hardness.as_deref().unwrap_or(&paths.hardness),
                output: output.as_deref().unwrap_or(&paths.output),
            };
            commands::export::run(&export_paths, &config.export_config(count))?;
        }
        Command::Verify {
            levels,
            snapshot,
            verified,
            save,
        } => {
            let matched = commands::verify::run(
                levels.as_deref().unwrap_or(&paths.output),
                snapshot.as_deref().unwrap_or(&paths.snapshot),
                config.verified_levels(verified),
                save,
            )?;
            if !matched {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Inspect {
            blob,
            name,
            at,
            len,
        } => {
            commands::inspect::run(&blob, name.as_deref(), at, len)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
