//! End-to-end tests for the `import-lint` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get a Command for the import-lint binary.
#[allow(deprecated)]
fn import_lint() -> Command {
    let mut cmd = Command::cargo_bin("import-lint").unwrap();
    cmd.env_remove("IMPORT_LINT_RULE_FILE").env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

const RULES: &str = r#"
- name: domain-is-pure
  srcImportPathPatterns: ["^example.com/shop/domain"]
  forbiddenImportPathPatterns: ["^example.com/shop/infra", "^database/sql$"]
"#;

/// A small module whose domain package imports infra.
fn shop() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "go.mod", "module example.com/shop\n\ngo 1.22\n");
    write(
        root,
        "domain/user.go",
        "package domain\n\nimport (\n\t\"fmt\"\n\t\"example.com/shop/infra/db\"\n)\n",
    );
    write(root, "domain/order.go", "package domain\n\nimport \"time\"\n");
    write(root, "infra/db/db.go", "package db\n\nimport \"database/sql\"\n");
    tmp
}

/// The same module without the offending import.
fn clean_shop() -> TempDir {
    let tmp = shop();
    write(tmp.path(), "domain/user.go", "package domain\n\nimport \"fmt\"\n");
    tmp
}

#[test]
fn help_works() {
    import_lint().arg("--help").assert().success();
}

#[test]
fn clean_module_exits_zero_without_output() {
    let tmp = clean_shop();
    write(tmp.path(), "import-lint.yaml", RULES);

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn violations_exit_three_with_report() {
    let tmp = shop();
    write(tmp.path(), "import-lint.yaml", RULES);

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(3)
        .stdout(predicate::str::contains("## example.com/shop/domain"))
        .stdout(predicate::str::contains("- domain/user.go"))
        .stdout(predicate::str::contains(
            "import `example.com/shop/infra/db` violates rule `domain-is-pure`",
        ))
        .stdout(predicate::str::contains("domain/order.go").not());
}

#[test]
fn explicit_rule_file_in_toml() {
    let tmp = shop();
    let rules = tmp.path().join("rules.toml");
    fs::write(
        &rules,
        "[[rules]]\nname = \"no-sql\"\nsrcImportPathPatterns = [\"infra\"]\nforbiddenImportPathPatterns = [\"^database/sql$\"]\n",
    )
    .unwrap();

    import_lint()
        .args(["check", "--rule-file"])
        .arg(&rules)
        .arg("--mod-dir")
        .arg(tmp.path())
        .args(["--format", "compact"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains(
            "infra/db/db.go: example.com/shop/infra/db: import `database/sql` violates rule `no-sql`",
        ));
}

#[test]
fn json_format() {
    let tmp = shop();
    write(tmp.path(), "import-lint.yaml", RULES);

    let output = import_lint()
        .args(["check", "--format", "json", "--mod-dir"])
        .arg(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["violation_count"], 1);
    assert_eq!(json["results"][0]["src_import_path"], "example.com/shop/domain");
}

#[test]
fn exclude_skips_files() {
    let tmp = shop();
    write(tmp.path(), "import-lint.yaml", RULES);

    import_lint()
        .args(["check", "--exclude", "domain/user.go", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(0);
}

#[test]
fn invalid_pattern_is_a_configuration_error() {
    let tmp = shop();
    write(
        tmp.path(),
        "import-lint.yaml",
        "- name: broken\n  srcImportPathPatterns: [\"(domain\"]\n",
    );

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("(domain"));
}

const TWO_RULES: &str = r#"
- name: domain-is-pure
  srcImportPathPatterns: ["^example.com/shop/domain"]
  forbiddenImportPathPatterns: ["^example.com/shop/infra"]
- name: no-fmt-in-domain
  srcImportPathPatterns: ["domain"]
  forbiddenImportPathPatterns: ["^fmt$"]
"#;

fn check_two_rules(extra: &[&str]) -> (Option<i32>, String) {
    let tmp = shop();
    write(tmp.path(), "import-lint.yaml", TWO_RULES);

    let output = import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .args(extra)
        .output()
        .unwrap();
    (output.status.code(), String::from_utf8(output.stdout).unwrap())
}

#[test]
fn file_is_listed_once_per_applicable_rule() {
    let (code, stdout) = check_two_rules(&[]);

    assert_eq!(code, Some(3));
    assert_eq!(stdout.matches("- domain/user.go\n").count(), 2);
    assert!(stdout.contains(
        "- domain/user.go\n\
         \x20 - import `example.com/shop/infra/db` violates rule `domain-is-pure`\n\
         - domain/user.go\n\
         \x20 - import `fmt` violates rule `no-fmt-in-domain`\n"
    ));
    assert!(stdout.contains("Found 2 violation(s) in 1 package(s)"));
}

#[test]
fn merge_rules_lists_each_file_once() {
    let (code, stdout) = check_two_rules(&["--merge-rules"]);

    assert_eq!(code, Some(3));
    assert_eq!(stdout.matches("- domain/user.go\n").count(), 1);
    assert!(stdout.contains(
        "- domain/user.go\n\
         \x20 - import `example.com/shop/infra/db` violates rule `domain-is-pure`\n\
         \x20 - import `fmt` violates rule `no-fmt-in-domain`\n"
    ));
    assert!(stdout.contains("Found 2 violation(s) in 1 package(s)"));
}

#[test]
fn syntax_error_suggests_exclude() {
    let tmp = clean_shop();
    write(tmp.path(), "import-lint.yaml", RULES);
    write(tmp.path(), "broken/broken.go", "package broken\n\nimport (\n");

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken.go"))
        .stderr(predicate::str::contains("help: fix the source or exclude it with --exclude"));
}

#[test]
fn gitignored_package_is_still_checked() {
    let tmp = clean_shop();
    write(tmp.path(), "import-lint.yaml", RULES);
    write(tmp.path(), ".gitignore", "domain/generated/\n");
    fs::create_dir_all(tmp.path().join(".git")).unwrap();
    write(
        tmp.path(),
        "domain/generated/mocks.go",
        "package generated\n\nimport \"example.com/shop/infra/db\"\n",
    );

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(3)
        .stdout(predicate::str::contains("## example.com/shop/domain/generated"));
}

#[test]
fn malformed_rule_file_is_a_configuration_error() {
    let tmp = shop();
    write(tmp.path(), "import-lint.yaml", "name: [unclosed\n");

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("help:"));
}

#[test]
fn missing_go_mod_is_a_configuration_error() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "import-lint.yaml", RULES);

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("go.mod"));
}

#[test]
fn missing_rule_file_is_a_configuration_error() {
    let tmp = shop();

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No rule file found"));
}

#[test]
fn list_rules_prints_patterns() {
    let tmp = shop();
    write(tmp.path(), "import-lint.yaml", RULES);

    import_lint()
        .args(["list-rules", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1. domain-is-pure"))
        .stdout(predicate::str::contains("forbids:    ^database/sql$"));
}

#[test]
fn init_then_check_runs() {
    let tmp = clean_shop();

    import_lint().arg("init").arg(tmp.path()).assert().success();
    assert!(tmp.path().join("import-lint.yaml").is_file());

    import_lint()
        .arg("init")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    import_lint()
        .args(["check", "--mod-dir"])
        .arg(tmp.path())
        .assert()
        .code(0);
}
