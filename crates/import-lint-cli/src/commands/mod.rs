//! Subcommand implementations.

use import_lint_core::LoadRulesError;
use import_lint_go::ScanError;
use miette::Diagnostic;
use std::process::ExitCode;

pub mod check;
pub mod init;
pub mod list_rules;
pub mod output;

/// Exit status when the module has no violation.
pub const EXIT_CLEAN: u8 = 0;
/// Exit status for unreadable or invalid rules, manifests, or sources.
pub const EXIT_CONFIG_ERROR: u8 = 2;
/// Exit status when at least one violation is reported.
pub const EXIT_VIOLATIONS: u8 = 3;

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report.
    Clean,
    /// Violations were reported.
    Violations,
}

impl Outcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::from(EXIT_CLEAN),
            Self::Violations => ExitCode::from(EXIT_VIOLATIONS),
        }
    }
}

/// Prints a configuration error and, when available, its help text.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("error: {err:#}");
    if let Some(help) = diagnostic_help(err) {
        eprintln!("  = help: {help}");
    }
}

fn diagnostic_help(err: &anyhow::Error) -> Option<String> {
    if let Some(e) = err.downcast_ref::<LoadRulesError>() {
        return first_help(e);
    }
    if let Some(e) = err.downcast_ref::<ScanError>() {
        return first_help(e);
    }
    None
}

/// Help of the diagnostic itself, else of the nearest diagnostic source.
fn first_help(diag: &dyn Diagnostic) -> Option<String> {
    diag.help()
        .map(|h| h.to_string())
        .or_else(|| diag.diagnostic_source().and_then(first_help))
}
