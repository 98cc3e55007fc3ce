//! CLI TOML configuration tests
//!
//! Configuration file loading and command line overrides.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use scangate::app::cli::{Args, ConfigError};
use toml::Table;

#[test]
fn test_cli_overrides_toml() {
    let mut args = Args::default();
    let config: Table = toml::from_str(
        r#"
        interval-ms = 500
        cooldown-ms = 2000
        output-format = "json"
        export = "from-config.csv"
        "#,
    )
    .unwrap();
    Args::apply_toml_values(&mut args, &config).unwrap();

    let cli = Args::try_parse_from(["scangate", "--cooldown-ms", "0", "-O", "text"]).unwrap();
    args.merge_cli(cli);

    assert_eq!(args.interval_ms, Some(500));
    assert_eq!(args.cooldown_ms, Some(0));
    assert_eq!(args.output_format.as_deref(), Some("text"));
    assert_eq!(args.export, Some(PathBuf::from("from-config.csv")));
}

#[test]
fn test_toml_color_preference() {
    let mut args = Args::default();
    let config: Table = toml::from_str("color = true").unwrap();
    Args::apply_toml_values(&mut args, &config).unwrap();
    assert!(args.use_color(false));

    let cli = Args::try_parse_from(["scangate", "--no-color"]).unwrap();
    args.merge_cli(cli);
    assert!(!args.use_color(true));
}

#[test]
fn test_toml_type_errors() {
    let mut args = Args::default();
    let config: Table = toml::from_str("cooldown-ms = \"soon\"").unwrap();
    let err = Args::apply_toml_values(&mut args, &config).unwrap_err();
    assert!(err.message().contains("cooldown-ms"));
}

#[tokio::test]
async fn test_config_file_feeds_settings() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "interval-ms = 40\ncooldown-ms = 300").unwrap();

    let args = Args::load_config_file(Some(file.path())).await.unwrap();
    let settings = args.validate().unwrap();

    assert_eq!(settings.interval, Duration::from_millis(40));
    assert_eq!(settings.cooldown, Duration::from_millis(300));
}

#[tokio::test]
async fn test_missing_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Args::load_config_file(Some(&dir.path().join("absent.toml"))).await;
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}
