//! Rule file resolution.
//!
//! Resolves the rule file path using a deterministic priority order:
//!
//! 1. `--rule-file` flag (explicit path, or `IMPORT_LINT_RULE_FILE`)
//! 2. `{mod-dir}/import-lint.yaml`, `.yml`, `.toml`, then the dot-prefixed
//!    `.import-lint.yaml` / `.import-lint.toml`
//! 3. Not found → configuration error

use anyhow::{bail, Context, Result};
use import_lint_core::{load_rules, RuleSet};
use std::path::{Path, PathBuf};

/// Where the rule file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// Explicitly specified via `--rule-file`.
    Explicit(PathBuf),
    /// Found in the module directory.
    Project(PathBuf),
    /// No rule file found.
    NotFound,
}

impl RuleSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

/// Project-level rule file names, checked in order.
pub const PROJECT_RULE_FILES: &[&str] = &[
    "import-lint.yaml",
    "import-lint.yml",
    "import-lint.toml",
    ".import-lint.yaml",
    ".import-lint.toml",
];

/// Resolves the rule file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(mod_dir: &Path, explicit: Option<&Path>) -> RuleSource {
    if let Some(p) = explicit {
        return RuleSource::Explicit(p.to_path_buf());
    }

    for name in PROJECT_RULE_FILES {
        let candidate = mod_dir.join(name);
        if candidate.is_file() {
            tracing::debug!("Found project rule file: {}", candidate.display());
            return RuleSource::Project(candidate);
        }
    }

    RuleSource::NotFound
}

/// Resolves and loads the rule file, returning its path and compiled rules.
///
/// # Errors
///
/// Returns error if no rule file is found or it fails to load.
pub fn load(mod_dir: &Path, explicit: Option<&Path>) -> Result<(PathBuf, RuleSet)> {
    let source = resolve(mod_dir, explicit);
    let Some(path) = source.path() else {
        bail!(
            "No rule file found in {}. Pass --rule-file or run `import-lint init` to create one.",
            mod_dir.display()
        );
    };

    let rules =
        load_rules(path).with_context(|| format!("Failed to load rules from {}", path.display()))?;
    tracing::info!("Using {} rule(s) from {}", rules.len(), path.display());
    Ok((path.to_path_buf(), rules))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("custom.yaml");
        fs::write(&explicit, "").unwrap();
        fs::write(tmp.path().join("import-lint.yaml"), "").unwrap();

        let result = resolve(tmp.path(), Some(&explicit));
        assert_eq!(result, RuleSource::Explicit(explicit));
    }

    #[test]
    fn explicit_does_not_check_existence() {
        let result = resolve(Path::new("/tmp"), Some(Path::new("/nonexistent.yaml")));
        assert_eq!(
            result,
            RuleSource::Explicit(PathBuf::from("/nonexistent.yaml"))
        );
    }

    #[test]
    fn project_yaml_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("import-lint.yaml"), "").unwrap();

        let result = resolve(tmp.path(), None);
        assert_eq!(
            result,
            RuleSource::Project(tmp.path().join("import-lint.yaml"))
        );
    }

    #[test]
    fn yaml_preferred_over_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("import-lint.toml"), "").unwrap();
        fs::write(tmp.path().join("import-lint.yaml"), "").unwrap();

        let result = resolve(tmp.path(), None);
        assert_eq!(
            result,
            RuleSource::Project(tmp.path().join("import-lint.yaml"))
        );
    }

    #[test]
    fn dot_prefixed_file_found() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".import-lint.toml"), "").unwrap();

        let result = resolve(tmp.path(), None);
        assert_eq!(
            result,
            RuleSource::Project(tmp.path().join(".import-lint.toml"))
        );
    }

    #[test]
    fn directory_named_like_rule_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("import-lint.yaml")).unwrap();

        assert_eq!(resolve(tmp.path(), None), RuleSource::NotFound);
    }

    #[test]
    fn nothing_found() {
        let tmp = TempDir::new().unwrap();
        let source = resolve(tmp.path(), None);
        assert_eq!(source, RuleSource::NotFound);
        assert!(source.path().is_none());
    }

    #[test]
    fn load_reports_missing_rule_file() {
        let tmp = TempDir::new().unwrap();
        let err = load(tmp.path(), None).unwrap_err();
        assert!(err.to_string().contains("No rule file found"));
    }

    #[test]
    fn load_compiles_project_rules() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("import-lint.toml"),
            "[[rules]]\nname = \"r\"\nsrcImportPathPatterns = [\"a\"]\n",
        )
        .unwrap();

        let (path, rules) = load(tmp.path(), None).unwrap();
        assert_eq!(path, tmp.path().join("import-lint.toml"));
        assert_eq!(rules.len(), 1);
    }
}
