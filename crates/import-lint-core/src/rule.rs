//! Import boundary rules and their compiled form.
//!
//! A rule is written as two lists of regular expressions: the packages it
//! applies to and the imports those packages must not use. [`RuleSet::compile`]
//! turns raw [`RuleDef`]s into matchers once; a single bad pattern rejects
//! the whole set.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rule as declared in a rule file, before compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDef {
    /// Rule name used in reports. May be empty.
    #[serde(default)]
    pub name: String,

    /// Patterns selecting the importing packages.
    #[serde(
        rename = "srcImportPathPatterns",
        alias = "src_import_path_patterns",
        default
    )]
    pub src_import_path_patterns: Vec<String>,

    /// Patterns selecting the import paths those packages may not use.
    #[serde(
        rename = "forbiddenImportPathPatterns",
        alias = "forbidden_import_path_patterns",
        default
    )]
    pub forbidden_import_path_patterns: Vec<String>,
}

/// Which list of a rule a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSide {
    /// `srcImportPathPatterns`
    Source,
    /// `forbiddenImportPathPatterns`
    Forbidden,
}

impl fmt::Display for PatternSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "srcImportPathPatterns"),
            Self::Forbidden => write!(f, "forbiddenImportPathPatterns"),
        }
    }
}

/// Errors from compiling rules.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum RuleError {
    /// A pattern is not a valid regular expression.
    #[error("rules[{index}] '{name}': {side}[{position}] `{pattern}` is not a valid regular expression: {source}")]
    #[diagnostic(
        code(import_lint::invalid_pattern),
        help("patterns use RE2-style syntax; escape literal dots as `\\.`")
    )]
    InvalidPattern {
        /// Index of the rule in the rule file.
        index: usize,
        /// Rule name.
        name: String,
        /// Which pattern list held the bad pattern.
        side: PatternSide,
        /// Index of the pattern within its list.
        position: usize,
        /// The raw pattern text.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// A compiled import-path pattern.
///
/// Matching is unanchored search: `foo` matches `example.com/foo/bar`.
/// Anchor with `^`/`$` for exact matches.
#[derive(Debug, Clone)]
pub struct ImportPattern {
    raw: String,
    compiled: Regex,
}

impl ImportPattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            raw: pattern.to_string(),
            compiled: Regex::new(pattern)?,
        })
    }

    /// Returns true if the pattern matches anywhere in `import_path`.
    #[must_use]
    pub fn is_match(&self, import_path: &str) -> bool {
        self.compiled.is_match(import_path)
    }

    /// Returns the raw pattern text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for ImportPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for ImportPattern {}

impl fmt::Display for ImportPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A compiled, immutable rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    src_patterns: Vec<ImportPattern>,
    forbidden_patterns: Vec<ImportPattern>,
}

impl Rule {
    /// Compiles a rule definition. `index` is the rule's position in its
    /// rule file and is only used for error context.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] for the first bad pattern.
    pub fn compile(def: &RuleDef, index: usize) -> Result<Self, RuleError> {
        let compile_side = |patterns: &[String], side: PatternSide| {
            patterns
                .iter()
                .enumerate()
                .map(|(position, p)| {
                    ImportPattern::new(p).map_err(|source| RuleError::InvalidPattern {
                        index,
                        name: def.name.clone(),
                        side,
                        position,
                        pattern: p.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        };

        Ok(Self {
            name: def.name.clone(),
            src_patterns: compile_side(&def.src_import_path_patterns, PatternSide::Source)?,
            forbidden_patterns: compile_side(
                &def.forbidden_import_path_patterns,
                PatternSide::Forbidden,
            )?,
        })
    }

    /// Rule name (may be empty).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source-side patterns in declaration order.
    #[must_use]
    pub fn src_patterns(&self) -> &[ImportPattern] {
        &self.src_patterns
    }

    /// Forbidden-side patterns in declaration order.
    #[must_use]
    pub fn forbidden_patterns(&self) -> &[ImportPattern] {
        &self.forbidden_patterns
    }

    /// Does this rule apply to the package at `import_path`?
    #[must_use]
    pub fn applies_to(&self, import_path: &str) -> bool {
        self.src_patterns.iter().any(|p| p.is_match(import_path))
    }

    /// Forbidden patterns matching `import_path`, in declaration order.
    ///
    /// Every match counts: an import matched by two patterns yields two items.
    pub fn forbidden_matches<'a>(
        &'a self,
        import_path: &'a str,
    ) -> impl Iterator<Item = &'a ImportPattern> + 'a {
        self.forbidden_patterns
            .iter()
            .filter(move |p| p.is_match(import_path))
    }
}

/// Ordered collection of compiled rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compiles every definition, in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleError`]; no partial set is produced.
    pub fn compile(defs: &[RuleDef]) -> Result<Self, RuleError> {
        let rules = defs
            .iter()
            .enumerate()
            .map(|(i, def)| Rule::compile(def, i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterates rules in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
