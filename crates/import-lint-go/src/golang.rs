//! Go language extractor using Tree-sitter.

use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, FileAnalysis, ImportInfo, LanguageExtractor, PackageClause};

/// Extracts the package clause and import specs from Go source.
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    fn extract_package(node: &Node<'_>, src: &[u8]) -> Option<PackageClause> {
        let mut cursor = node.walk();
        let name = node
            .children(&mut cursor)
            .find(|child| child.kind() == "package_identifier")?;
        Some(PackageClause {
            line: node.start_position().row + 1,
            name: Self::text(&name, src).to_owned(),
        })
    }

    /// Collect every `import_spec` under an `import_declaration`, covering
    /// both `import "x"` and the grouped `import ( ... )` form.
    fn extract_imports(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportInfo>) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "import_spec" => {
                    if let Some(imp) = Self::extract_import_spec(&child, src) {
                        out.push(imp);
                    }
                }
                "import_spec_list" => Self::extract_imports(&child, src, out),
                _ => {}
            }
        }
    }

    fn extract_import_spec(node: &Node<'_>, src: &[u8]) -> Option<ImportInfo> {
        let path = node.child_by_field_name("path")?;
        let alias = node
            .child_by_field_name("name")
            .map(|n| Self::text(&n, src).to_owned());
        Some(ImportInfo {
            line: node.start_position().row + 1,
            column: node.start_position().column,
            alias,
            path: unquote(Self::text(&path, src)).to_owned(),
        })
    }

    /// First error or missing node in document order.
    fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        children
            .into_iter()
            .filter(|c| c.has_error() || c.is_missing())
            .find_map(Self::first_error)
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|source| ExtractError::Grammar {
                language: self.language_id(),
                source,
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            let at = Self::first_error(root).unwrap_or(root).start_position();
            return Err(ExtractError::Syntax {
                line: at.row + 1,
                column: at.column + 1,
            });
        }

        let mut result = FileAnalysis::default();

        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            match node.kind() {
                "package_clause" => {
                    result.package = Self::extract_package(&node, src);
                }
                "import_declaration" => {
                    Self::extract_imports(&node, src, &mut result.imports);
                }
                _ => {}
            }
        }

        Ok(result)
    }
}

/// Strips the `"` or `` ` `` delimiters of a Go string literal.
fn unquote(literal: &str) -> &str {
    literal.trim_matches(|c| c == '"' || c == '`')
}
