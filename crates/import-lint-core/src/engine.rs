//! Import boundary validation engine.
//!
//! Evaluates a [`RuleSet`] against scanned [`Package`]s, producing one
//! [`PackageResult`] per package.

use crate::rule::{Rule, RuleSet};
use crate::types::{File, FileResult, Package, PackageResult, Violation};

/// Holds compiled rules for the duration of a run.
#[derive(Debug, Clone)]
pub struct ImportRuleEngine {
    rules: RuleSet,
}

impl ImportRuleEngine {
    /// Create a new engine from compiled rules.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// The rules this engine evaluates.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Check packages against the engine's rules.
    #[must_use]
    pub fn check(&self, packages: &[Package]) -> Vec<PackageResult> {
        validate(&self.rules, packages)
    }
}

/// Validates every package against every rule.
///
/// Results come back in package order. Each rule that applies to a package
/// contributes one [`FileResult`] per file, even when that file is clean,
/// so a package matched by N rules has N groups per file.
#[must_use]
pub fn validate(rules: &RuleSet, packages: &[Package]) -> Vec<PackageResult> {
    packages
        .iter()
        .map(|package| validate_package(rules, package))
        .collect()
}

fn validate_package(rules: &RuleSet, package: &Package) -> PackageResult {
    let mut result = PackageResult::new(&package.import_path);

    for rule in rules {
        if !rule.applies_to(&package.import_path) {
            continue;
        }
        result
            .results
            .extend(package.files.iter().map(|file| check_file(rule, file)));
    }

    result
}

fn check_file(rule: &Rule, file: &File) -> FileResult {
    let mut result = FileResult::new(&file.path);

    for import in &file.imports {
        // One violation per matching pattern, not per import.
        result.violations.extend(
            rule.forbidden_matches(&import.path)
                .map(|_| Violation::new(rule.name(), &import.path)),
        );
    }

    result
}
