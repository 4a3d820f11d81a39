use super::{
    default_config, load_config, validate_config, write_config, OnboardingConfig,
    RepositoryConfig, CONFIG_SCHEMA_VERSION,
};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_config_root(name: &str) -> std::path::PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let root = std::env::temp_dir().join(format!("{name}-{}-{now}", std::process::id()));
    std::fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn fresh_config_names_every_editable_field() {
    let root = temp_config_root("rigup-config-stub");
    let path = root.join("config.json");
    write_config(&path, &default_config()).expect("write config");

    let text = std::fs::read_to_string(&path).expect("read config");
    for field in [
        "git_user_name",
        "git_user_email",
        "git_credential_helper",
        "repository",
        "vscode_extensions",
        "vscode_settings",
        "install_overrides",
    ] {
        assert!(text.contains(field), "fresh config missing field {field}");
    }

    let parsed = load_config(&path).expect("parse fresh config");
    assert_eq!(parsed.schema_version, CONFIG_SCHEMA_VERSION);
    validate_config(&parsed).expect("fresh config validates");

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn minimal_json_parses_with_defaults() {
    let parsed: OnboardingConfig =
        serde_json::from_str(r#"{"schema_version": 1}"#).expect("parse minimal config");
    assert!(parsed.git_user_name.is_none());
    assert!(parsed.repository.is_none());
    assert!(parsed.vscode_extensions.is_empty());
    assert!(parsed.install_overrides.is_empty());
    validate_config(&parsed).expect("minimal config validates");
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let mut config = default_config();
    config.schema_version = 99;
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("schema_version"));
}

#[test]
fn malformed_values_are_rejected() {
    let mut config = default_config();
    config.git_user_name = Some("   ".to_string());
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.git_user_email = Some("not-an-email".to_string());
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.repository = Some(RepositoryConfig {
        url: "   ".to_string(),
        destination: None,
    });
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config.git_credential_helper = Some("   ".to_string());
    assert!(validate_config(&config).is_err());

    let mut config = default_config();
    config
        .install_overrides
        .insert("git".to_string(), "unbalanced 'quote".to_string());
    assert!(validate_config(&config).is_err());
}

#[test]
fn unknown_fields_are_rejected() {
    let err = serde_json::from_str::<OnboardingConfig>(
        r#"{"schema_version": 1, "git_username": "ada"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("git_username"));
}

#[test]
fn write_then_load_round_trips() {
    let root = temp_config_root("rigup-config-roundtrip");
    let path = root.join("nested").join("config.json");

    let mut config = default_config();
    config.git_user_name = Some("Ada Lovelace".to_string());
    config.git_user_email = Some("ada@example.com".to_string());
    config.repository = Some(RepositoryConfig {
        url: "https://example.com/team/app.git".to_string(),
        destination: Some("~/src/app".to_string()),
    });
    config
        .vscode_extensions
        .push("rust-lang.rust-analyzer".to_string());

    write_config(&path, &config).expect("write config");
    let loaded = load_config(&path).expect("load config");
    assert_eq!(loaded.git_user_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(
        loaded.repository.as_ref().map(|repo| repo.url.as_str()),
        Some("https://example.com/team/app.git")
    );

    let _ = std::fs::remove_dir_all(root);
}

#[test]
fn load_missing_config_mentions_init() {
    let root = temp_config_root("rigup-config-missing");
    let err = load_config(&root.join("config.json")).unwrap_err();
    assert!(format!("{err:#}").contains("rigup init"));
    let _ = std::fs::remove_dir_all(root);
}
