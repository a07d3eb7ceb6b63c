//! Report rendering for check results.
//!
//! Every renderer writes to a caller-supplied sink; the caller owns
//! flushing it.

use anyhow::Result;
use import_lint_core::{has_violation, PackageResult};
use serde::Serialize;
use std::io::Write;

use crate::OutputFormat;

/// Write check results in the specified format.
pub fn write(out: &mut dyn Write, results: &[PackageResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(out, results)?,
        OutputFormat::Json => write_json(out, results)?,
        OutputFormat::Compact => write_compact(out, results)?,
    }
    Ok(())
}

/// Packages with violations get a header, then each file with violations
/// is listed with one line per violation. A clean run prints nothing.
fn write_text(out: &mut dyn Write, results: &[PackageResult]) -> std::io::Result<()> {
    let mut packages = 0;
    let mut violations = 0;

    for result in results.iter().filter(|r| r.has_violation()) {
        packages += 1;
        writeln!(out, "## {}", result.src_import_path)?;
        writeln!(out)?;
        writeln!(out, "Violations found in the following files:")?;
        writeln!(out)?;

        for file in result.results.iter().filter(|r| r.has_violation()) {
            writeln!(out, "- {}", file.file_path.display())?;
            for violation in &file.violations {
                violations += 1;
                writeln!(out, "  - {violation}")?;
            }
        }
        writeln!(out)?;
    }

    if violations > 0 {
        writeln!(
            out,
            "Found {violations} violation(s) in {packages} package(s)"
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    has_violation: bool,
    violation_count: usize,
    packages_checked: usize,
    results: &'a [PackageResult],
}

fn write_json(out: &mut dyn Write, results: &[PackageResult]) -> Result<()> {
    let report = JsonReport {
        has_violation: has_violation(results),
        violation_count: results.iter().map(PackageResult::violation_count).sum(),
        packages_checked: results.len(),
        results,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn write_compact(out: &mut dyn Write, results: &[PackageResult]) -> std::io::Result<()> {
    for result in results {
        for file in &result.results {
            for violation in &file.violations {
                writeln!(
                    out,
                    "{}: {}: {violation}",
                    file.file_path.display(),
                    result.src_import_path,
                )?;
            }
        }
    }
    Ok(())
}
