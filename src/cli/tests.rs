// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::{Cli, Command};
use crate::core::process::encoding::Encoding;
use crate::tool::metrics::settings::{MetricsSettings, ToolVersion};
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap_or_else(|e| panic!("{args:?} should parse: {e}"))
}

#[test]
fn test_parse_version() {
    let cli = parse(&["vsmetrics", "version"]);
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_global_options_after_command() {
    let cli = parse(&[
        "vsmetrics",
        "-l",
        "5",
        "locate",
        "--dry",
        "--config",
        "a.toml",
        "-c",
        "b.toml",
    ]);

    assert_eq!(cli.global.log_level, Some(5));
    assert!(cli.global.dry);
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    let overrides: Vec<_> = cli
        .global
        .to_config_overrides()
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    insta::assert_snapshot!(overrides.join("\n"), @r"
    global.log_level=5
    global.file_log_level=5
    ");
}

#[test]
fn test_parse_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["vsmetrics", "-l", "7", "version"]).is_err());
}

#[test]
fn test_parse_run() {
    let cli = parse(&[
        "vsmetrics",
        "run",
        "a.dll",
        "b.dll",
        "-o",
        "report.xml",
        "-d",
        "deps",
        "--platform",
        "v4.0",
        "--search-gac",
        "-q",
        "--tool-version",
        "vs2013",
        "--timeout",
        "30",
        "--env",
        "KEY=a=b",
        "--extra-arg",
        "/custom",
    ]);

    let Some(Command::Run(run)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(run.inputs, vec![PathBuf::from("a.dll"), PathBuf::from("b.dll")]);
    assert_eq!(run.output, PathBuf::from("report.xml"));
    assert_eq!(run.metrics.tool.tool_version, Some(ToolVersion::Vs2013));
    assert_eq!(
        run.metrics.tool.environment,
        vec![("KEY".to_string(), "a=b".to_string())]
    );

    let settings = run.metrics.apply(&MetricsSettings::default());
    assert_eq!(settings.assembly_directories, vec![PathBuf::from("deps")]);
    assert_eq!(settings.assembly_platforms, vec!["v4.0"]);
    assert!(settings.search_gac);
    assert!(settings.quiet);
    assert!(!settings.success_file);
    assert_eq!(settings.tool_version, ToolVersion::Vs2013);
    assert_eq!(settings.tool.timeout, Some(Duration::from_secs(30)));
    assert_eq!(settings.tool.extra_arguments, vec!["/custom"]);
}

#[test]
fn test_parse_run_requires_input_and_output() {
    assert!(Cli::try_parse_from(["vsmetrics", "run", "-o", "report.xml"]).is_err());
    assert!(Cli::try_parse_from(["vsmetrics", "run", "a.dll"]).is_err());
}

#[test]
fn test_parse_rejects_bad_env() {
    let result = Cli::try_parse_from(["vsmetrics", "locate", "--env", "=x"]);
    assert!(result.is_err());
}

#[test]
fn test_flags_extend_config_settings() {
    let cli = parse(&[
        "vsmetrics",
        "args",
        "a.dll",
        "-o",
        "o.xml",
        "-r",
        "cli.dll",
        "--json",
    ]);
    let Some(Command::Args(args)) = cli.command else {
        panic!("expected args command");
    };
    assert!(args.json);

    let base = MetricsSettings::builder()
        .assembly_references(vec![PathBuf::from("config.dll")])
        .quiet(true)
        .tool_version(ToolVersion::Vs2015)
        .build();
    let settings = args.run.metrics.apply(&base);

    assert_eq!(
        settings.assembly_references,
        vec![PathBuf::from("config.dll"), PathBuf::from("cli.dll")]
    );
    assert!(settings.quiet, "a config switch stays on without the CLI flag");
    assert_eq!(settings.tool_version, ToolVersion::Vs2015);
}

#[test]
fn test_parse_locate() {
    let cli = parse(&["vsmetrics", "locate", "--tool-path", "D:/metrics.exe"]);
    let Some(Command::Locate(locate)) = cli.command else {
        panic!("expected locate command");
    };

    let settings = locate.tool.apply(&MetricsSettings::default());
    assert_eq!(settings.tool.tool_path, Some(PathBuf::from("D:/metrics.exe")));
}

fn run_settings(args: &[&str], base: &MetricsSettings) -> MetricsSettings {
    let Some(Command::Run(run)) = parse(args).command else {
        panic!("expected run command");
    };
    run.metrics.apply(base)
}

#[test]
fn test_negated_switches_override_config() {
    let base = MetricsSettings::builder()
        .search_gac(true)
        .success_file(true)
        .quiet(true)
        .build();

    let settings = run_settings(
        &["vsmetrics", "run", "a.dll", "-o", "o.xml", "--no-quiet", "--no-search-gac"],
        &base,
    );

    assert!(!settings.quiet);
    assert!(!settings.search_gac);
    assert!(settings.success_file, "switches without a flag keep the config value");
}

#[test]
fn test_last_switch_form_wins() {
    let base = MetricsSettings::default();

    let off = run_settings(&["vsmetrics", "run", "a.dll", "-o", "o.xml", "-q", "--no-quiet"], &base);
    let on = run_settings(&["vsmetrics", "run", "a.dll", "-o", "o.xml", "--no-quiet", "-q"], &base);

    assert!(!off.quiet);
    assert!(on.quiet);
}

#[test]
fn test_parse_output_encoding() {
    let cli = parse(&["vsmetrics", "locate", "--output-encoding", "oem"]);
    let Some(Command::Locate(locate)) = cli.command else {
        panic!("expected locate command");
    };

    let settings = locate.tool.apply(&MetricsSettings::default());
    assert_eq!(settings.tool.output_encoding, Encoding::Oem);
    assert!(Cli::try_parse_from(["vsmetrics", "locate", "--output-encoding", "latin9"]).is_err());
}
