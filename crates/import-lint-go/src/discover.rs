//! Package discovery: walks a module tree and groups Go files into packages.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use import_lint_core::{File, Package};

use crate::extractor::{ExtractError, LanguageExtractor};
use crate::golang::GoExtractor;
use crate::manifest::{self, ManifestError};

/// Options for [`discover_packages`].
#[derive(Debug, Clone, Default)]
pub struct DiscoverOptions {
    /// Glob patterns (relative to the module root) of files to skip.
    pub exclude: Vec<String>,
}

/// A scanned module: its path and every package found under its root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleScan {
    /// Module path from `go.mod`.
    pub module_path: String,
    /// Packages in directory order, then package-name order.
    pub packages: Vec<Package>,
}

impl ModuleScan {
    /// Total number of files across all packages.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.packages.iter().map(|p| p.files.len()).sum()
    }
}

/// Errors while scanning a module.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ScanError {
    /// Reading `go.mod` failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Manifest(#[from] ManifestError),

    /// The directory walk failed.
    #[error("failed to walk module tree: {0}")]
    #[diagnostic(code(import_lint::scan::walk))]
    Walk(#[from] ignore::Error),

    /// An exclude pattern is not a valid glob.
    #[error("invalid exclude pattern `{pattern}`: {source}")]
    #[diagnostic(code(import_lint::scan::exclude))]
    Exclude {
        /// The raw pattern.
        pattern: String,
        /// Glob error.
        source: glob::PatternError,
    },

    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    #[diagnostic(code(import_lint::scan::io))]
    Io {
        /// File that failed.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// A source file could not be parsed.
    #[error("{path}: {source}")]
    #[diagnostic(code(import_lint::scan::parse))]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Extraction error.
        #[diagnostic_source]
        source: ExtractError,
    },

    /// A source file has no package clause.
    #[error("{path}: expected package clause")]
    #[diagnostic(code(import_lint::scan::no_package))]
    MissingPackageClause {
        /// File that failed.
        path: PathBuf,
    },
}

/// Reads `go.mod` under `root` and discovers every package of the module.
///
/// # Errors
///
/// Returns the first manifest, walk, read, or parse failure.
pub fn scan_module(root: &Path, options: &DiscoverOptions) -> Result<ModuleScan, ScanError> {
    let module_path = manifest::module_path(root)?;
    tracing::info!("Module {module_path} at {}", root.display());
    let packages = discover_packages(root, &module_path, options)?;
    Ok(ModuleScan {
        module_path,
        packages,
    })
}

/// Walks `root` and returns its Go packages in a deterministic order.
///
/// Files are grouped by directory and package clause, so a directory with
/// both `user` and `user_test` files yields two packages sharing one
/// import path. File paths are relative to `root`.
///
/// # Errors
///
/// Returns the first walk, read, or parse failure.
pub fn discover_packages(
    root: &Path,
    module_path: &str,
    options: &DiscoverOptions,
) -> Result<Vec<Package>, ScanError> {
    let extractor = GoExtractor::new();
    let exclude = compile_excludes(&options.exclude)?;
    let files = discover_files(root, &exclude, &extractor)?;

    // (relative dir, package name) -> files, sorted by key
    let mut groups: BTreeMap<(PathBuf, String), Vec<File>> = BTreeMap::new();

    for file_path in &files {
        let source = std::fs::read_to_string(file_path).map_err(|e| ScanError::Io {
            path: file_path.clone(),
            source: e,
        })?;

        let rel = file_path
            .strip_prefix(root)
            .unwrap_or(file_path)
            .to_path_buf();

        let analysis = extractor
            .analyze(&source)
            .map_err(|source| ScanError::Parse {
                path: rel.clone(),
                source,
            })?;

        let Some(package) = analysis.package else {
            return Err(ScanError::MissingPackageClause { path: rel });
        };

        tracing::debug!(
            "{}:{}: package {} with {} import(s)",
            rel.display(),
            package.line,
            package.name,
            analysis.imports.len()
        );
        for import in &analysis.imports {
            tracing::trace!(
                "{}:{}:{}: import {} as {}",
                rel.display(),
                import.line,
                import.column + 1,
                import.path,
                import.alias.as_deref().unwrap_or("-")
            );
        }

        let dir = rel.parent().map(Path::to_path_buf).unwrap_or_default();
        let imports = analysis.imports.into_iter().map(|i| i.path);
        groups
            .entry((dir, package.name))
            .or_default()
            .push(File::new(rel, imports));
    }

    let packages: Vec<Package> = groups
        .into_iter()
        .map(|((dir, _name), files)| Package::new(import_path(module_path, &dir), files))
        .collect();

    tracing::info!(
        "Discovered {} package(s) in {} file(s)",
        packages.len(),
        files.len()
    );

    Ok(packages)
}

/// Joins the module path with a relative package directory using `/`.
#[must_use]
pub fn import_path(module_path: &str, rel_dir: &Path) -> String {
    let mut path = module_path.trim_end_matches('/').to_string();
    for component in rel_dir.components() {
        if let Component::Normal(part) = component {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(&part.to_string_lossy());
        }
    }
    path
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<glob::Pattern>, ScanError> {
    patterns
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|source| ScanError::Exclude {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

fn discover_files(
    root: &Path,
    exclude: &[glob::Pattern],
    extractor: &dyn LanguageExtractor,
) -> Result<Vec<PathBuf>, ScanError> {
    // Ignore files are not honoured; only --exclude skips files.
    let mut builder = ignore::WalkBuilder::new(root);
    builder.standard_filters(false);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        if !extractor.extensions().contains(&ext.as_str()) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if rel.to_str().is_none() {
            tracing::warn!("Skipping non-UTF-8 path {}", rel.display());
            continue;
        }
        if exclude.iter().any(|pattern| pattern.matches_path(rel)) {
            tracing::debug!("Excluded {}", rel.display());
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
