//! imgbatch CLI - apply a grayscale or blur filter to every image in a folder.
//!
//! # Usage
//!
//! ```bash
//! # One worker, completion lines in directory order
//! imgbatch -src ./photos -dst ./out -filter grayscale -task waitgrp
//!
//! # One task per file, completion lines in finish order
//! imgbatch -src ./photos -dst ./out -filter blur -task channel
//!
//! # View configuration
//! imgbatch config show
//! ```

use clap::{Parser, Subcommand};
use imgbatch_core::config::expand_path;
use imgbatch_core::Config;
use std::path::PathBuf;

mod cli;
mod logging;

/// imgbatch - batch-apply an image filter with a choice of dispatch strategy.
#[derive(Parser, Debug)]
#[command(name = "imgbatch")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "IMGBATCH_CONFIG")]
    config: Option<PathBuf>,

    #[command(flatten)]
    run: cli::run::RunArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(cli::args::normalize(std::env::args_os()));

    let config_path = cli
        .config
        .as_deref()
        .map(expand_path)
        .unwrap_or_else(Config::default_path);

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let loaded = if config_path.exists() {
        Config::load_from(&config_path)
    } else {
        Ok(Config::default())
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `imgbatch config path`."
            );
            Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("imgbatch v{}", imgbatch_core::VERSION);

    match cli.command {
        Some(Commands::Config(args)) => cli::config::execute(args, &config, &config_path),
        None => cli::run::execute(cli.run, config).await,
    }
}
