//! CLI tests: run the fabric-defaults binary against model documents.

use serde_json::{json, Value};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Run the binary inside `dir` with config discovery isolated to that directory.
fn run(dir: &Path, args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_fabric-defaults");
    Command::new(bin)
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("FABRIC_DEFAULTS_LOG")
        .env_remove("FABRIC_DEFAULTS_STRICT")
        .env_remove("FABRIC_DEFAULTS_RULES")
        .args(args)
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_normalize_writes_document_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("model.json"),
        r#"{"vxlan": {"topology": {"switches": [{"name": "leaf1"}]}}}"#,
    )
    .unwrap();

    let output = run(temp_dir.path(), &["--quiet", "normalize", "--input", "model.json"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let document = stdout_json(&output);
    assert_eq!(
        document["vxlan"]["topology"]["switches"],
        json!([{"name": "leaf1", "freeforms": [], "interfaces": []}])
    );
    assert_eq!(document["vxlan"]["policy"]["groups"], json!([]));
}

#[test]
fn test_normalize_subtree_selected_by_pointer() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("results.json"),
        r#"{"changed": false, "model_extended": {"vxlan": {}}}"#,
    )
    .unwrap();

    let output = run(
        temp_dir.path(),
        &[
            "--quiet",
            "normalize",
            "--input",
            "results.json",
            "--pointer",
            "/model_extended",
        ],
    );
    assert!(output.status.success());

    let document = stdout_json(&output);
    assert_eq!(document["changed"], json!(false));
    assert_eq!(
        document["model_extended"]["vxlan"]["topology"]["vpc_peers"],
        json!([])
    );
}

#[test]
fn test_normalize_to_output_file_with_custom_rules() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("model.json"), r#"{"site": {}}"#).unwrap();
    std::fs::write(
        temp_dir.path().join("rules.toml"),
        "[[rules]]\npath = \"site.racks\"\n",
    )
    .unwrap();

    let output = run(
        temp_dir.path(),
        &[
            "--quiet",
            "normalize",
            "--input",
            "model.json",
            "--rules",
            "rules.toml",
            "--output",
            "out.json",
            "--pretty",
        ],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("1 defaulted"));

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("out.json")).unwrap())
            .unwrap();
    assert_eq!(written, json!({"site": {"racks": []}}));
}

#[test]
fn test_strict_flag_fails_on_type_mismatch() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("model.json"),
        r#"{"vxlan": {"topology": {"switches": ["leaf1"]}}}"#,
    )
    .unwrap();

    let lenient = run(temp_dir.path(), &["--quiet", "normalize", "--input", "model.json"]);
    assert!(lenient.status.success());

    let strict = run(
        temp_dir.path(),
        &["--quiet", "normalize", "--input", "model.json", "--strict"],
    );
    assert!(!strict.status.success());
    let stderr = String::from_utf8_lossy(&strict.stderr);
    assert!(stderr.contains("vxlan.topology.switches[0]"), "stderr: {}", stderr);
}

#[test]
fn test_strict_from_local_config_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("fabric-defaults.toml"), "strict = true\n").unwrap();
    std::fs::write(
        temp_dir.path().join("model.json"),
        r#"{"vxlan": {"policy": 3}}"#,
    )
    .unwrap();

    let output = run(temp_dir.path(), &["--quiet", "normalize", "--input", "model.json"]);
    assert!(!output.status.success());
}

#[test]
fn test_invalid_json_input_fails() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("model.json"), "{not json").unwrap();
    let output = run(temp_dir.path(), &["--quiet", "normalize", "--input", "model.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid model document"));
}

#[test]
fn test_rules_command_prints_builtin_table() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(temp_dir.path(), &["--quiet", "rules", "--format", "json"]);
    assert!(output.status.success());
    let rules = stdout_json(&output);
    assert_eq!(rules["rules"].as_array().unwrap().len(), 9);
    assert_eq!(rules["rules"][0]["path"], json!("vxlan.global.dns_servers"));
}

#[test]
fn test_check_command() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("good.toml"),
        "[[rules]]\npath = \"a\"\nkeys = [\"b\"]\n",
    )
    .unwrap();
    std::fs::write(
        temp_dir.path().join("bad.toml"),
        "[[rules]]\npath = \"a.b\"\n\n[[rules]]\npath = \"a\"\nkeys = [\"b\"]\n",
    )
    .unwrap();

    let good = run(temp_dir.path(), &["--quiet", "check", "--rules", "good.toml"]);
    assert!(good.status.success());
    assert!(String::from_utf8_lossy(&good.stdout).contains("1 rules, valid"));

    let bad = run(temp_dir.path(), &["--quiet", "check", "--rules", "bad.toml"]);
    assert!(!bad.status.success());
}

#[test]
fn test_logs_go_to_stderr_not_stdout() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("model.json"), r#"{"vxlan": {}}"#).unwrap();

    let output = run(
        temp_dir.path(),
        &["--log-level", "info", "normalize", "--input", "model.json"],
    );
    assert!(output.status.success());
    stdout_json(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Normalization complete"));
}

#[test]
fn test_classify_reports_path_state() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("model.json"),
        r#"{"vxlan": {"global": {"dns_servers": false}, "topology": "spine-leaf"}}"#,
    )
    .unwrap();

    let empty = run(
        temp_dir.path(),
        &["--quiet", "classify", "--input", "model.json", "--path", "vxlan.global.dns_servers"],
    );
    assert!(empty.status.success(), "stderr: {}", String::from_utf8_lossy(&empty.stderr));
    assert_eq!(
        String::from_utf8_lossy(&empty.stdout).trim(),
        "vxlan.global.dns_servers: empty"
    );

    let strict = run(
        temp_dir.path(),
        &[
            "--quiet",
            "classify",
            "--input",
            "model.json",
            "--path",
            "vxlan.topology.switches",
            "--strict",
        ],
    );
    assert!(!strict.status.success());
    assert!(String::from_utf8_lossy(&strict.stderr).contains("vxlan.topology"));
}
