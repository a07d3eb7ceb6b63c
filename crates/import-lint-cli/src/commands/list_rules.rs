//! List rules command implementation.

use anyhow::Result;
use import_lint_core::RuleSet;
use std::io::Write;
use std::path::Path;

use super::Outcome;

/// Runs the list-rules command.
pub fn run(mod_dir: &Path, rule_file: Option<&Path>) -> Result<Outcome> {
    let (path, rules) = crate::config_resolver::load(mod_dir, rule_file)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_rules(&mut out, &path, &rules)?;
    out.flush()?;

    Ok(Outcome::Clean)
}

fn write_rules(out: &mut dyn Write, path: &Path, rules: &RuleSet) -> std::io::Result<()> {
    writeln!(out, "Rules from {}:\n", path.display())?;

    if rules.is_empty() {
        writeln!(out, "  (no rules)")?;
        return Ok(());
    }

    for (i, rule) in rules.iter().enumerate() {
        let name = if rule.name().is_empty() {
            "(unnamed)"
        } else {
            rule.name()
        };
        writeln!(out, "{:>3}. {name}", i + 1)?;
        for pattern in rule.src_patterns() {
            writeln!(out, "     applies to: {pattern}")?;
        }
        for pattern in rule.forbidden_patterns() {
            writeln!(out, "     forbids:    {pattern}")?;
        }
    }

    Ok(())
}
