//! # import-lint-core
//!
//! Core engine for enforcing import boundaries inside a module.
//!
//! A rule says "packages matching these patterns must not import paths
//! matching those patterns". This crate provides:
//!
//! - [`RuleDef`] / [`RuleFile`] for declaring rules in YAML or TOML
//! - [`RuleSet`] of compiled [`Rule`]s (regex matchers built once)
//! - [`validate`] / [`ImportRuleEngine`] to check [`Package`]s
//! - [`PackageResult`] / [`FileResult`] / [`Violation`] for the findings
//!
//! ## Example
//!
//! ```
//! use import_lint_core::{validate, File, Package, RuleDef, RuleSet};
//!
//! let rules = RuleSet::compile(&[RuleDef {
//!     name: "R1".into(),
//!     src_import_path_patterns: vec!["^pkg1$".into()],
//!     forbidden_import_path_patterns: vec!["^pkg2$".into(), "^pkg3$".into()],
//! }])?;
//! let packages = [Package::new("pkg1", vec![File::new("a.go", ["pkg2", "pkg3"])])];
//!
//! let results = validate(&rules, &packages);
//! assert_eq!(results[0].results[0].violations.len(), 2);
//! # Ok::<(), import_lint_core::RuleError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod rule;
mod types;

pub use config::{load_rules, LoadRulesError, RuleFile, RuleFormat};
pub use engine::{validate, ImportRuleEngine};
pub use rule::{ImportPattern, PatternSide, Rule, RuleDef, RuleError, RuleSet};
pub use types::{has_violation, File, FileResult, Import, Package, PackageResult, Violation};
