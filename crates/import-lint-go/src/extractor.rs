//! What discovery needs from a source file: its package clause and imports.
//!
//! Discovery only talks to [`LanguageExtractor`]; Go is the one
//! implementation today.

use std::path::PathBuf;

/// Package clause extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageClause {
    /// Line number (1-indexed).
    pub line: usize,
    /// Declared package name (e.g., `user` or `user_test`).
    pub name: String,
}

/// A single import spec extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
    /// Local name, if any (`db`, `.` or `_`).
    pub alias: Option<String>,
    /// Import path with quote delimiters stripped (e.g., `net/http`).
    pub path: String,
}

/// Package clause and imports of one parsed file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path relative to the module root.
    pub file_path: PathBuf,
    /// Package clause, if present.
    pub package: Option<PackageClause>,
    /// All import specs in source order.
    pub imports: Vec<ImportInfo>,
}

/// Errors from analyzing a single source file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {source}")]
    #[diagnostic(code(import_lint::extract::grammar))]
    Grammar {
        /// Language identifier.
        language: &'static str,
        /// Tree-sitter error.
        source: tree_sitter::LanguageError,
    },

    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    #[diagnostic(code(import_lint::extract::no_tree))]
    NoTree,

    /// The source has a syntax error.
    #[error("syntax error at line {line}, column {column}")]
    #[diagnostic(
        code(import_lint::extract::syntax),
        help("fix the source or exclude it with --exclude")
    )]
    Syntax {
        /// Line number (1-indexed).
        line: usize,
        /// Column number (1-indexed).
        column: usize,
    },
}

/// Parses one source file into a [`FileAnalysis`].
///
/// Implementations must be shareable across threads and hold nothing
/// between calls besides the loaded grammar.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract imports and package info from source code.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the source cannot be parsed.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;
}
