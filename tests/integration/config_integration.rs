//! Integration tests for the configuration system

use fabric_defaults::config::{ConfigLoader, LOCAL_CONFIG_FILE};
use fabric_defaults::{NormalizeOptions, Strictness};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_local_config_selects_rules_and_strictness() {
    let temp_dir = TempDir::new().unwrap();
    let rules_file = temp_dir.path().join("rules.toml");
    std::fs::write(&rules_file, "[[rules]]\npath = \"site.racks\"\n").unwrap();
    std::fs::write(
        temp_dir.path().join(LOCAL_CONFIG_FILE),
        format!(
            "strict = true\nrules = {:?}\n\n[logging]\nlevel = \"warn\"\n",
            rules_file.to_string_lossy()
        ),
    )
    .unwrap();

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.normalize_options().strictness, Strictness::Strict);

    let normalizer = config.build_normalizer().unwrap();
    assert_eq!(normalizer.options(), NormalizeOptions::strict());

    let mut tree = json!({"site": {}});
    normalizer.normalize(&mut tree).unwrap();
    assert_eq!(tree, json!({"site": {"racks": []}}));
}

#[test]
fn test_missing_rule_file_fails_when_building_normalizer() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("custom.toml");
    std::fs::write(&config_file, "rules = \"does-not-exist.toml\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.build_normalizer().is_err());
}
