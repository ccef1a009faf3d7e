//! Integration tests for the `appkod` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NESTED: &str = r#"
name: Nested
database:
  tables:
    - name: items
      fields:
        - { name: id, type: uuid, primary: true }
ui:
  pages:
    - path: /
      title: Home
      components:
        - type: container
          children:
            - type: container
              children:
                - type: card
api:
  endpoints:
    - { path: /items, method: GET, table: items }
"#;

/// `appkod` running in `dir`, isolated from the user's config and log settings.
fn appkod(dir: &Path) -> Command {
    let config = dir.join("appkod.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }

    let mut cmd = Command::cargo_bin("appkod").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("APPKOD_CONFIG", &config);
    cmd
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── init + validate ───────────────────────────────────────────────────────────

#[test]
fn test_init_then_validate_default_file() {
    let dir = TempDir::new().unwrap();

    appkod(dir.path())
        .args(["init", "Test App"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blueprint.yaml"));
    assert!(dir.path().join("blueprint.yaml").is_file());

    appkod(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Blueprint is valid"));
}

#[test]
fn test_crm_starter_as_json_with_summary() {
    let dir = TempDir::new().unwrap();

    appkod(dir.path())
        .args(["init", "Sales", "--template", "crm", "--format", "json"])
        .assert()
        .success();

    appkod(dir.path())
        .args(["validate", "blueprint.json", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sales (v1.0)"))
        .stdout(predicate::str::is_match(r"Tables:\s+2").unwrap())
        .stdout(predicate::str::is_match(r"Endpoints:\s+4").unwrap());
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path()).arg("init").assert().success();

    appkod(dir.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    appkod(dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_json_output_logs_json_lines() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path()).arg("init").assert().success();

    let assert = appkod(dir.path())
        .args(["-v", "--output-format", "json", "validate"])
        .assert()
        .success();

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    let lines: Vec<serde_json::Value> = stderr
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(lines.iter().any(|event| event["level"] == "INFO"));

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["valid"], true);
}

#[test]
fn test_max_depth_help_names_the_parser_bound() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .args(["validate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("YAML/JSON"));
}

// ── failures ──────────────────────────────────────────────────────────────────

#[test]
fn test_invalid_blueprint_lists_numbered_issues() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.yaml"), "name: Empty\n").unwrap();

    appkod(dir.path())
        .args(["validate", "app.yaml"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_match(r"(?m)^1\. database: Required$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^2\. ui: Required$").unwrap())
        .stdout(predicate::str::is_match(r"(?m)^3\. api: Required$").unwrap())
        .stderr(predicate::str::contains("Blueprint has 3 validation issue(s)"));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .args(["validate", "absent.yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("absent.yaml"));
}

#[test]
fn test_unsupported_extension_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.txt"), "name: x\n").unwrap();

    appkod(dir.path())
        .args(["validate", "app.txt"])
        .assert()
        .code(2);
}

#[test]
fn test_malformed_yaml_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.yaml"), "name: [unclosed\n").unwrap();

    appkod(dir.path())
        .args(["validate", "broken.yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken.yaml"));
}

#[test]
fn test_json_output_reports_issues() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.yaml"), "name: Empty\n").unwrap();

    let assert = appkod(dir.path())
        .args(["--output-format", "json", "validate", "app.yaml"])
        .assert()
        .code(2);

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["issues"][0]["path"], "database");
    assert_eq!(report["issues"][0]["message"], "Required");
    assert_eq!(report["issues"][0]["kind"], "structural");
}

#[test]
fn test_max_depth_flag_limits_nesting() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("nested.yaml"), NESTED).unwrap();

    appkod(dir.path())
        .args(["validate", "nested.yaml"])
        .assert()
        .success();

    appkod(dir.path())
        .args(["validate", "nested.yaml", "--max-depth", "1"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Maximum nesting depth exceeded"));
}

#[test]
fn test_config_file_sets_max_depth() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("nested.yaml"), NESTED).unwrap();
    fs::write(dir.path().join("appkod.toml"), "[validation]\nmax_depth = 1\n").unwrap();

    appkod(dir.path())
        .args(["validate", "nested.yaml"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Maximum nesting depth exceeded"));
}

// ── contracts ─────────────────────────────────────────────────────────────────

#[test]
fn test_contract_defaults_are_shown() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tenant.yaml"),
        "name: Acme\nslug: acme\nbillingEmail: billing@acme.se\n",
    )
    .unwrap();

    appkod(dir.path())
        .args([
            "validate",
            "tenant.yaml",
            "--contract",
            "create-tenant-request",
            "--summary",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid create-tenant-request"))
        .stdout(predicate::str::contains("plan: free"));
}

#[test]
fn test_invalid_contract_reports_issues() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("tenant.yaml"), "name: Acme\n").unwrap();

    appkod(dir.path())
        .args(["validate", "tenant.yaml", "--contract", "create-tenant-request"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("slug: Required"))
        .stderr(predicate::str::contains("Contract 'create-tenant-request'"));
}

#[test]
fn test_unknown_contract_is_rejected() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .args(["validate", "x.yaml", "--contract", "widget"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown schema entity 'widget'"));
}

// ── schema ────────────────────────────────────────────────────────────────────

#[test]
fn test_schema_lists_families() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("blueprint:"))
        .stdout(predicate::str::contains("connector:"))
        .stdout(predicate::str::contains("stripe-payment-intent"));
}

#[test]
fn test_schema_describes_endpoint() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .args(["schema", "endpoint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("endpoint (blueprint)"))
        .stdout(predicate::str::contains("exactly one of table, action"));
}

#[test]
fn test_schema_unknown_entity_is_not_found() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .args(["schema", "widget"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("appkod schema"));
}

// ── completions / config ──────────────────────────────────────────────────────

#[test]
fn test_bash_completions() {
    let dir = TempDir::new().unwrap();
    appkod(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appkod"));
}

#[test]
fn test_config_list_and_get() {
    let dir = TempDir::new().unwrap();

    appkod(dir.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[validation]"))
        .stdout(predicate::str::contains("max_depth = 64"));

    appkod(dir.path())
        .args(["config", "get", "validation.default_file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blueprint.yaml"));
}

#[test]
fn test_config_path_follows_flag() {
    let dir = TempDir::new().unwrap();
    let custom = dir.path().join("custom.toml");
    fs::write(&custom, "").unwrap();

    appkod(dir.path())
        .args(["--config"])
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_writes_defaults() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("fresh.toml");
    fs::write(&target, "").unwrap();

    appkod(dir.path())
        .arg("--config")
        .arg(&target)
        .args(["config", "init", "--force"])
        .assert()
        .success();

    let written = fs::read_to_string(&target).unwrap();
    assert!(written.contains("max_depth = 64"));
}
