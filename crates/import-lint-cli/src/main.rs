//! import-lint CLI tool.
//!
//! Usage:
//! ```bash
//! import-lint check [--rule-file RULES] [--mod-dir DIR]
//! import-lint list-rules
//! import-lint init
//! ```
//!
//! Exit status: 0 when clean, 3 when violations are found, 2 on any
//! configuration error.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Enforce import boundaries between the packages of a Go module
#[derive(Parser)]
#[command(name = "import-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every package of the module against the rules
    Check {
        #[command(flatten)]
        target: Target,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude glob patterns relative to the module root (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Report one entry per file instead of one per file and rule
        #[arg(long)]
        merge_rules: bool,
    },

    /// List the rules of the resolved rule file
    ListRules {
        #[command(flatten)]
        target: Target,
    },

    /// Create a starter rule file
    Init {
        /// Directory to write `import-lint.yaml` into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing rule file
        #[arg(long)]
        force: bool,
    },
}

/// Where the rules and the module live.
#[derive(Args)]
struct Target {
    /// Path to the rule file (YAML or TOML)
    #[arg(short, long, env = "IMPORT_LINT_RULE_FILE")]
    rule_file: Option<PathBuf>,

    /// Go module directory (holding go.mod)
    #[arg(short, long, default_value = ".")]
    mod_dir: PathBuf,
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report grouped by package and file.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Check {
            target,
            format,
            exclude,
            merge_rules,
        } => commands::check::run(&commands::check::CheckArgs {
            rule_file: target.rule_file,
            mod_dir: target.mod_dir,
            format,
            exclude,
            merge_rules,
        }),
        Commands::ListRules { target } => {
            commands::list_rules::run(&target.mod_dir, target.rule_file.as_deref())
        }
        Commands::Init { path, force } => commands::init::run(&path, force),
    };

    match outcome {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            commands::report_error(&err);
            ExitCode::from(commands::EXIT_CONFIG_ERROR)
        }
    }
}
