//! Rule file loading.
//!
//! Rule files come in two shapes:
//!
//! ```yaml
//! # import-lint.yaml: a top-level list of rules
//! - name: domain-is-pure
//!   srcImportPathPatterns: ["^example.com/app/domain"]
//!   forbiddenImportPathPatterns: ["^example.com/app/infra", "^database/sql$"]
//! ```
//!
//! ```toml
//! # import-lint.toml: one [[rules]] table per rule
//! [[rules]]
//! name = "domain-is-pure"
//! srcImportPathPatterns = ["^example.com/app/domain"]
//! forbiddenImportPathPatterns = ["^example.com/app/infra"]
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::rule::{RuleDef, RuleError, RuleSet};

/// Serialization format of a rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    /// YAML sequence of rules.
    Yaml,
    /// TOML with `[[rules]]` tables.
    Toml,
}

impl RuleFormat {
    /// Picks the format from the file extension. Anything that is not
    /// `.toml` is read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// Errors when loading a rule file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadRulesError {
    /// Failed to read the rule file.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(import_lint::rule_file::io))]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// The YAML document is not a list of rules.
    #[error("invalid YAML rule file: {0}")]
    #[diagnostic(
        code(import_lint::rule_file::yaml),
        help("a YAML rule file is a top-level list of rules with `name`, `srcImportPathPatterns` and `forbiddenImportPathPatterns`")
    )]
    Yaml(#[from] serde_yaml::Error),

    /// The TOML document could not be parsed.
    #[error("invalid TOML rule file: {0}")]
    #[diagnostic(
        code(import_lint::rule_file::toml),
        help("a TOML rule file holds one `[[rules]]` table per rule")
    )]
    Toml(#[from] toml::de::Error),

    /// A rule failed to compile.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Rule(#[from] RuleError),
}

/// Raw contents of a rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFile {
    /// Rule definitions in file order.
    pub rules: Vec<RuleDef>,
}

impl RuleFile {
    /// Load from a YAML or TOML file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, LoadRulesError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadRulesError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content, RuleFormat::from_path(path))
    }

    /// Parse rule file content.
    ///
    /// An empty document has no rules.
    ///
    /// # Errors
    ///
    /// Returns error if the content does not match the rule file shape.
    pub fn parse(content: &str, format: RuleFormat) -> Result<Self, LoadRulesError> {
        /// Wrapper for the `[[rules]]` array in TOML.
        #[derive(Deserialize)]
        struct TomlRules {
            #[serde(default)]
            rules: Vec<RuleDef>,
        }

        let rules = match format {
            RuleFormat::Yaml => {
                let doc: Option<Vec<RuleDef>> = if content.trim().is_empty() {
                    None
                } else {
                    serde_yaml::from_str(content)?
                };
                doc.unwrap_or_default()
            }
            RuleFormat::Toml => toml::from_str::<TomlRules>(content)?.rules,
        };

        Ok(Self { rules })
    }

    /// Compile the rules of this file.
    ///
    /// # Errors
    ///
    /// Returns the first invalid pattern.
    pub fn compile(&self) -> Result<RuleSet, RuleError> {
        RuleSet::compile(&self.rules)
    }
}

/// Reads, parses and compiles a rule file in one step.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed, or any pattern is
/// invalid.
pub fn load_rules(path: &Path) -> Result<RuleSet, LoadRulesError> {
    let file = RuleFile::from_file(path)?;
    let rules = file.compile()?;
    tracing::debug!("Loaded {} rule(s) from {}", rules.len(), path.display());
    Ok(rules)
}
