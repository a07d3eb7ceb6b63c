//! Core types for scanned packages and validation results.

use serde::Serialize;
use std::path::PathBuf;

/// A single import declaration as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Import {
    /// Literal import path with quote delimiters stripped (e.g., `fmt`).
    pub path: String,
}

impl Import {
    /// Creates a new import.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// A compilable source file and the imports it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    /// Path relative to the module root.
    pub path: PathBuf,
    /// Imports in declaration order.
    pub imports: Vec<Import>,
}

impl File {
    /// Creates a new file from a path and its import paths.
    #[must_use]
    pub fn new<I, S>(path: impl Into<PathBuf>, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            imports: imports.into_iter().map(Import::new).collect(),
        }
    }
}

/// A package: the unit rules are applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Logical import path (module path joined with the package directory).
    pub import_path: String,
    /// Files of the package in scan order.
    pub files: Vec<File>,
}

impl Package {
    /// Creates a new package.
    #[must_use]
    pub fn new(import_path: impl Into<String>, files: Vec<File>) -> Self {
        Self {
            import_path: import_path.into(),
            files,
        }
    }
}

/// A forbidden import found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Violation {
    /// Name of the violated rule (may be empty).
    pub rule_name: String,
    /// The offending import path.
    pub import_path: String,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(rule_name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Self {
            rule_name: rule_name.into(),
            import_path: import_path.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "import `{}` violates rule `{}`",
            self.import_path, self.rule_name
        )
    }
}

/// Violations found in one file by one applicable rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileResult {
    /// Path of the checked file.
    pub file_path: PathBuf,
    /// Violations in import order; an import matching several forbidden
    /// patterns appears once per pattern, in pattern order.
    pub violations: Vec<Violation>,
}

impl FileResult {
    /// Creates an empty result for a file.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            violations: Vec::new(),
        }
    }

    /// Returns true if this file has any violation.
    #[must_use]
    pub fn has_violation(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Validation result for one package.
///
/// `results` holds one [`FileResult`] per file for every rule that applied
/// to the package, so a file appears once per applicable rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageResult {
    /// Import path of the checked package.
    pub src_import_path: String,
    /// Per-file results in (rule order x file order).
    pub results: Vec<FileResult>,
}

impl PackageResult {
    /// Creates an empty result for a package.
    #[must_use]
    pub fn new(src_import_path: impl Into<String>) -> Self {
        Self {
            src_import_path: src_import_path.into(),
            results: Vec::new(),
        }
    }

    /// Returns true if any file result has a violation.
    #[must_use]
    pub fn has_violation(&self) -> bool {
        self.results.iter().any(FileResult::has_violation)
    }

    /// Total number of violations across all file results.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.results.iter().map(|r| r.violations.len()).sum()
    }

    /// Collapses the per-rule file groups into one entry per file.
    ///
    /// Files keep the order of their first appearance; violations are
    /// concatenated in rule order.
    #[must_use]
    pub fn merged(&self) -> Self {
        let mut results: Vec<FileResult> = Vec::new();
        for result in &self.results {
            match results.iter_mut().find(|r| r.file_path == result.file_path) {
                Some(existing) => existing.violations.extend(result.violations.iter().cloned()),
                None => results.push(result.clone()),
            }
        }
        Self {
            src_import_path: self.src_import_path.clone(),
            results,
        }
    }
}

/// Returns true if any package result has a violation.
#[must_use]
pub fn has_violation(results: &[PackageResult]) -> bool {
    results.iter().any(PackageResult::has_violation)
}
