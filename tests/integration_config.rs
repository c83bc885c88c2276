// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use vsmetrics::config::Config;
use vsmetrics::config::loader::ConfigLoader;
use vsmetrics::logging::LogLevel;
use vsmetrics::tool::metrics::settings::ToolVersion;

fn toml_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    write!(file, "{content}").expect("failed to write");
    file
}

#[test]
fn config_cli_overrides_beat_files() {
    let file = toml_file("[global]\nlog_level = 1\nfile_log_level = 1\n");

    let config = ConfigLoader::new()
        .add_toml_file(file.path())
        .set("global.log_level", 4_i64)
        .expect("valid key")
        .build()
        .expect("valid config");

    assert_eq!(config.global.log_level, LogLevel::DEBUG);
    assert_eq!(config.global.file_log_level, LogLevel::ERROR);
}

#[test]
fn config_metrics_section_feeds_settings() {
    let file = toml_file(
        r#"
[metrics]
assembly_references = ["lib/a.dll", "lib/b.dll"]
ignore_generated_code = true
tool_version = "vs2015"

[metrics.tool]
working_directory = "out"
"#,
    );

    let config = Config::from_file(file.path()).expect("valid config");

    assert_eq!(
        config.metrics.assembly_references,
        vec![PathBuf::from("lib/a.dll"), PathBuf::from("lib/b.dll")]
    );
    assert!(config.metrics.ignore_generated_code);
    assert_eq!(config.metrics.tool_version, ToolVersion::Vs2015);
    assert_eq!(config.metrics.tool.working_directory, Some(PathBuf::from("out")));
}

#[test]
fn config_unknown_tool_version_is_rejected() {
    let result = Config::parse("[metrics]\ntool_version = \"vs2019\"");
    assert!(result.is_err());
}

#[test]
fn config_loaded_files_are_listed_in_order() {
    let first = toml_file("");
    let second = toml_file("");

    let loader = ConfigLoader::new()
        .add_toml_file(first.path())
        .add_toml_file(second.path());

    let listed = loader.format_loaded_files();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], format!("1. [file] {}", first.path().display()));
    assert_eq!(listed[1], format!("2. [file] {}", second.path().display()));
}
