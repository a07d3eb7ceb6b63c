//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::Outcome;

/// File name written by `import-lint init`.
pub const RULE_FILE_NAME: &str = "import-lint.yaml";

const RULE_FILE_TEMPLATE: &str = r#"# import-lint rules
#
# Each rule forbids packages whose import path matches any of
# `srcImportPathPatterns` from importing paths matching any of
# `forbiddenImportPathPatterns`. Patterns are regular expressions
# searched anywhere in the path; anchor them with ^ and $ for exact matches.
#
# Replace example.com/yourmodule with the module path from go.mod.

- name: domain-is-pure
  srcImportPathPatterns:
    - "^example\\.com/yourmodule/domain"
  forbiddenImportPathPatterns:
    - "^example\\.com/yourmodule/(infra|handler)"
    - "^database/sql$"

- name: handlers-use-the-app-layer
  srcImportPathPatterns:
    - "^example\\.com/yourmodule/handler"
  forbiddenImportPathPatterns:
    - "^example\\.com/yourmodule/infra"
"#;

/// Runs the init command.
pub fn run(dir: &Path, force: bool) -> Result<Outcome> {
    let rule_path = dir.join(RULE_FILE_NAME);

    if rule_path.exists() && !force {
        bail!(
            "Rule file already exists at {}. Use --force to overwrite.",
            rule_path.display()
        );
    }

    std::fs::write(&rule_path, RULE_FILE_TEMPLATE)
        .with_context(|| format!("Failed to write {}", rule_path.display()))?;

    println!("Created {}", rule_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit the rules for your module's package layout");
    println!("  2. Run: import-lint check");

    Ok(Outcome::Clean)
}
