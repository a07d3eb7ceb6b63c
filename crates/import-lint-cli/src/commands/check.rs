//! Check command implementation.

use anyhow::{Context, Result};
use import_lint_core::{has_violation, ImportRuleEngine, PackageResult};
use import_lint_go::{scan_module, DiscoverOptions};
use std::io::Write;
use std::path::PathBuf;

use super::{output, Outcome};
use crate::OutputFormat;

/// Arguments of the check command.
pub struct CheckArgs {
    /// Explicit rule file, if given.
    pub rule_file: Option<PathBuf>,
    /// Go module directory.
    pub mod_dir: PathBuf,
    /// Report format.
    pub format: OutputFormat,
    /// Exclude globs relative to the module root.
    pub exclude: Vec<String>,
    /// Collapse per-rule file groups.
    pub merge_rules: bool,
}

/// Runs the check command.
pub fn run(args: &CheckArgs) -> Result<Outcome> {
    // Rules first: a bad pattern must fail before any scanning.
    let (_, rules) = crate::config_resolver::load(&args.mod_dir, args.rule_file.as_deref())?;

    let options = DiscoverOptions {
        exclude: args.exclude.clone(),
    };
    let scan = scan_module(&args.mod_dir, &options)
        .with_context(|| format!("Failed to scan module at {}", args.mod_dir.display()))?;

    tracing::info!(
        "Checking {} package(s) in {} file(s) against {} rule(s)",
        scan.packages.len(),
        scan.file_count(),
        rules.len()
    );

    let engine = ImportRuleEngine::new(rules);
    let mut results = engine.check(&scan.packages);
    if args.merge_rules {
        results = results.iter().map(PackageResult::merged).collect();
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::write(&mut out, &results, args.format)?;
    out.flush().context("Failed to flush report")?;

    if has_violation(&results) {
        Ok(Outcome::Violations)
    } else {
        Ok(Outcome::Clean)
    }
}
