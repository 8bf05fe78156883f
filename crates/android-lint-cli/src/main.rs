//! android-lint-sensor CLI tool.
//!
//! Usage:
//! ```bash
//! android-lint-sensor check [OPTIONS] [PATH]
//! android-lint-sensor probe [PATH]
//! android-lint-sensor list-rules
//! android-lint-sensor init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Runs Android Lint on a module and reports issues of active rules
#[derive(Parser)]
#[command(name = "android-lint-sensor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run Android Lint and report violations
    Check {
        /// Module base directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        #[command(flatten)]
        module: ModuleArgs,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Explain whether Android Lint applies to a module
    Probe {
        /// Module base directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        module: ModuleArgs,
    },

    /// List the rules active in the configured profile
    ListRules {
        /// Module base directory used to locate the config
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Command-line overrides of the `[module]` config section.
#[derive(clap::Args, Debug, Default)]
pub struct ModuleArgs {
    /// Path, relative to the base directory, of the Android project
    #[arg(long, env = "ANDROID_LINT_PROJECT_PATH")]
    pub project_path: Option<PathBuf>,

    /// Source directory (can be specified multiple times)
    #[arg(long = "source")]
    pub sources: Vec<PathBuf>,

    /// Compiled output directory (can be specified multiple times)
    #[arg(long = "binary")]
    pub binaries: Vec<PathBuf>,

    /// Classpath entry (can be specified multiple times)
    #[arg(long)]
    pub classpath: Vec<PathBuf>,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let locator = config_resolver::ConfigLocator::new(cli.config.as_deref());

    match cli.command {
        Commands::Check {
            path,
            format,
            module,
            exclude,
        } => {
            let source = locator.locate(&path);
            commands::check::run(&path, format, &module, exclude, &source)
        }
        Commands::Probe { path, module } => {
            let source = locator.locate(&path);
            commands::probe::run(&path, &module, &source)
        }
        Commands::ListRules { path } => {
            let source = locator.locate(&path);
            commands::list_rules::run(&source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
