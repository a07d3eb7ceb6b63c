//! # import-lint-go
//!
//! Tree-sitter based Go front end for import-lint.
//!
//! Turns a Go module on disk into the [`import_lint_core::Package`]s the
//! validation engine consumes:
//!
//! - [`module_path`] reads the module path from `go.mod`
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`GoExtractor`] for Go package clause and import extraction
//! - [`scan_module`] / [`discover_packages`] to walk the tree and group
//!   files into packages

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod discover;
pub mod extractor;
pub mod golang;
pub mod manifest;

pub use discover::{discover_packages, import_path, scan_module, DiscoverOptions, ModuleScan, ScanError};
pub use extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor, PackageClause};
pub use golang::GoExtractor;
pub use manifest::{module_path, ManifestError};
