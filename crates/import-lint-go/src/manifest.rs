//! `go.mod` reading: the module path is the root of every package import path.

use std::path::{Path, PathBuf};

/// Name of the Go module manifest.
pub const MANIFEST_FILE: &str = "go.mod";

/// Errors when reading the module manifest.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ManifestError {
    /// Failed to read `go.mod`.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(
        code(import_lint::manifest::io),
        help("point --mod-dir at the directory holding go.mod")
    )]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// A `module` directive is malformed.
    #[error("{path}:{line}: {message}")]
    #[diagnostic(code(import_lint::manifest::parse))]
    Parse {
        /// Manifest path.
        path: PathBuf,
        /// Line number (1-indexed).
        line: usize,
        /// What is wrong.
        message: String,
    },

    /// No `module` directive found.
    #[error("{path}: no module directive")]
    #[diagnostic(code(import_lint::manifest::missing_module))]
    MissingModule {
        /// Manifest path.
        path: PathBuf,
    },
}

/// Reads `<dir>/go.mod` and returns its module path.
///
/// # Errors
///
/// Returns error if the file cannot be read or has no valid `module` directive.
pub fn module_path(dir: &Path) -> Result<String, ManifestError> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| ManifestError::Io {
        path: path.clone(),
        source: e,
    })?;
    parse_module_path(&content, &path)
}

/// Extracts the module path from `go.mod` content. `path` is used for
/// error context only.
///
/// Accepts `module example.com/m`, quoted paths, trailing `//` comments,
/// and the block form `module ( example.com/m )`.
///
/// # Errors
///
/// Returns error if the directive is malformed or absent.
pub fn parse_module_path(content: &str, path: &Path) -> Result<String, ManifestError> {
    let parse_error = |line: usize, message: &str| ManifestError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.to_string(),
    };

    let mut in_block = false;
    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }

        if in_block {
            if line == ")" {
                in_block = false;
                continue;
            }
            return parse_path(line).ok_or_else(|| parse_error(line_no, "invalid module path"));
        }

        let Some(rest) = line.strip_prefix("module") else {
            continue;
        };
        // `modulefoo` is not a module directive.
        if !(rest.is_empty() || rest.starts_with(char::is_whitespace) || rest.starts_with('(')) {
            continue;
        }

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(parse_error(line_no, "module directive has no path"));
        }
        if rest == "(" {
            in_block = true;
            continue;
        }
        return parse_path(rest).ok_or_else(|| parse_error(line_no, "invalid module path"));
    }

    Err(ManifestError::MissingModule {
        path: path.to_path_buf(),
    })
}

fn strip_comment(line: &str) -> &str {
    line.find("//").map_or(line, |i| &line[..i])
}

/// Parses a bare or quoted module path; `None` if it is empty or has
/// trailing tokens.
fn parse_path(text: &str) -> Option<String> {
    let path = match text.chars().next()? {
        q @ ('"' | '`') => text.strip_prefix(q)?.strip_suffix(q)?,
        _ => text,
    };
    if path.is_empty() || path.contains(char::is_whitespace) {
        return None;
    }
    Some(path.to_string())
}
