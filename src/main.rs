//! Soundsplit CLI
//!
//! Command-line interface for the soundsplit pipeline.

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use soundsplit::cli::{commands, Cli, Commands};
use soundsplit::{PipelineConfig, SoundError};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Soundsplit v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    handle_command(cli.command, config)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "soundsplit=debug" } else { "soundsplit=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

/// Attach the error kind and input file to a failure
fn report(input: &Path, err: SoundError) -> anyhow::Error {
    let code = err.error_code();
    anyhow::Error::new(err).context(format!("[{}] {}", code, input.display()))
}

fn handle_command(cmd: Commands, config: PipelineConfig) -> anyhow::Result<()> {
    match cmd {
        Commands::SplitReverse {
            input,
            output,
            boundaries,
            transform,
            parallel,
        } => {
            let config = config.with_overrides(&transform, parallel);
            commands::split_reverse(&input, output.as_deref(), boundaries.as_deref(), &config)
                .map_err(|e| report(&input, e))?;
        }
        Commands::Split {
            input,
            output_dir,
            boundaries,
        } => {
            commands::write_splits(&input, output_dir.as_deref(), boundaries.as_deref(), &config)
                .map_err(|e| report(&input, e))?;
        }
        Commands::Apply {
            input,
            output,
            transform,
        } => {
            commands::apply(&input, &output, &transform).map_err(|e| report(&input, e))?;
        }
        Commands::Batch { dir, output_dir } => {
            let summary = commands::batch(&dir, output_dir.as_deref(), &config)
                .map_err(|e| report(&dir, e))?;
            if !summary.failed.is_empty() {
                anyhow::bail!("{} file(s) failed", summary.failed.len());
            }
        }
        Commands::Detect { input } => {
            commands::detect(&input, &config).map_err(|e| report(&input, e))?;
        }
        Commands::Tone {
            output,
            frequency,
            duration,
            rate,
        } => {
            commands::tone(&output, frequency, duration, rate).map_err(|e| report(&output, e))?;
        }
    }
    Ok(())
}
