//! Amalgam CLI — the main entry point.
//!
//! Commands:
//! - `build`   — Assemble the single-file distribution
//! - `check`   — Validate the configuration and the manifest's files
//! - `guards`  — List the guard identifier of every manifest path
//! - `init`    — Print a starter configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "amalgam",
    about = "Amalgam — merge a C/C++ library into a single-file distribution",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the amalgamation config
    #[arg(
        short,
        long,
        global = true,
        env = "AMALGAM_CONFIG",
        default_value = amalgam_config::DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,

    /// Override the directory manifest paths are resolved against
    #[arg(long, global = true, env = "AMALGAM_ROOT_DIR")]
    root_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the single-file distribution
    Build {
        /// Output file (defaults to the config's `output`, else stdout)
        #[arg(short, long, env = "AMALGAM_OUTPUT")]
        output: Option<PathBuf>,

        /// Print the assembly report as JSON on stderr
        #[arg(long)]
        report: bool,
    },

    /// Validate configuration, include rules and manifest files
    Check,

    /// List manifest paths with their derived guard identifiers
    Guards {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print a starter configuration
    Init,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so the document can be piped from stdout.
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let source = commands::ConfigSource {
        path: cli.config,
        root_dir: cli.root_dir,
    };

    match cli.command {
        Commands::Build { output, report } => commands::build::run(&source, output, report)?,
        Commands::Check => commands::check::run(&source)?,
        Commands::Guards { json } => commands::guards::run(&source, json)?,
        Commands::Init => commands::init::run()?,
    }

    Ok(())
}
