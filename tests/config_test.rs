// tests/config_test.rs
use check_release::config::{env_cflags, load_config, BuildConfig, Config, ValidatorOptions};
use check_release::domain::{Phase, PhaseSelection};
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_from_file() {
    let temp_file = write_config(
        r#"
[project]
name = "widget"
version_header = "include/widget_version.h"
tag_pattern = "^release-v[0-9]+"

[build]
extra_cflags = "-Werror -Wall"
configure_options = "--enable-debug"
"#,
    );

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.project.name, "widget");
    assert_eq!(config.project.version_header, "include/widget_version.h");
    assert!(config
        .project
        .tag_pattern()
        .unwrap()
        .matches("release-v1.0.0"));
    assert_eq!(config.build.extra_cflags, "-Werror -Wall");
    assert_eq!(config.build.configure_options, "--enable-debug");
    // Unset keys keep their defaults
    assert_eq!(config.build.valgrind_flag, "--enable-valgrind");
}

#[test]
fn test_empty_file_gives_defaults() {
    let temp_file = write_config("");
    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_toml_is_config_error() {
    let temp_file = write_config("[project\nname = ");
    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let err = load_config(Some("/nonexistent/checkrelease.toml")).unwrap_err();
    assert!(err.to_string().contains("Cannot read"));
}

#[test]
#[serial]
fn test_env_cflags_appended_after_configured_flags() {
    std::env::set_var("CFLAGS", "-O0 -g");
    let options = ValidatorOptions::new(
        &BuildConfig::default(),
        PhaseSelection::Only(Phase::Test),
        false,
        env_cflags().as_deref(),
    );
    std::env::remove_var("CFLAGS");

    assert_eq!(options.cflags, "-Werror -O0 -g");
    assert_eq!(options.phases.phases(), vec![Phase::Test]);
}

#[test]
#[serial]
fn test_env_cflags_unset() {
    std::env::remove_var("CFLAGS");
    assert!(env_cflags().is_none());

    let options =
        ValidatorOptions::new(&BuildConfig::default(), PhaseSelection::All, true, None);
    assert_eq!(options.cflags, "-Werror");
}
