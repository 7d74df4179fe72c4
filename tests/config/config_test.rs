//! Tests for configuration loading, defaults, and validation.

use std::io::Write;

use tbvaccine::config::{load_config, Config};

fn write_config(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    let mut f = std::fs::File::create(&path).expect("create file");
    f.write_all(contents.as_bytes()).expect("write");
    path
}

#[test]
fn parse_complete_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        &dir,
        r#"
[processor]
code_dir = "/home/dev/project"
isolate = false
show_variables = false
max_variable_line_length = 120
relative_paths_of_interest = false

[highlight]
enabled = false
theme = "Solarized (dark)"
"#,
    );

    let config = load_config(&path).expect("parse config");
    assert_eq!(config.processor.code_dir, "/home/dev/project");
    assert!(!config.processor.isolate);
    assert!(!config.processor.show_variables);
    assert_eq!(config.processor.max_variable_line_length, 120);
    assert!(!config.processor.relative_paths_of_interest);
    assert!(!config.highlight.enabled);
    assert_eq!(config.highlight.theme, "Solarized (dark)");
}

#[test]
fn partial_section_keeps_other_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "[processor]\nisolate = false\n");

    let config = load_config(&path).expect("parse config");
    let defaults = Config::default();
    assert!(!config.processor.isolate);
    assert!(config.processor.show_variables);
    assert_eq!(
        config.processor.max_variable_line_length,
        defaults.processor.max_variable_line_length
    );
    assert_eq!(config.highlight.theme, defaults.highlight.theme);
}

#[test]
fn zero_max_length_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "[processor]\nmax_variable_line_length = 0\n");

    let err = load_config(&path).expect_err("validation should fail");
    assert!(err.to_string().contains("max_variable_line_length"));
}

#[test]
fn malformed_toml_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "[processor\nisolate = ");

    let err = load_config(&path).expect_err("parse should fail");
    assert!(format!("{err:#}").contains("config.toml"));
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = load_config(&dir.path().join("absent.toml"));
    assert!(result.is_err());
}
