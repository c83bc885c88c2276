// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! metrics.exe argument grammar.
//!
//! ```text
//! /f:"<abs>"...  /o:"<abs>"  /d:"<abs>"...  /plat:"<v>"...  /ref:"<abs>"...
//! /gac  /iit  /igc  /sf  /q
//! ```
//!
//! Only the bare-switch grammar is produced; the older `/gac:`-style
//! switches and `/dir:` are not.

use std::path::{Path, PathBuf};

use super::settings::MetricsSettings;
use crate::core::host::Environment;
use crate::tool::arguments::ArgumentBuilder;

pub const INPUT: &str = "/f:";
pub const OUTPUT: &str = "/o:";
pub const DIRECTORY: &str = "/d:";
pub const PLATFORM: &str = "/plat:";
pub const REFERENCE: &str = "/ref:";
pub const SEARCH_GAC: &str = "/gac";
pub const IGNORE_INVALID_TARGETS: &str = "/iit";
pub const IGNORE_GENERATED_CODE: &str = "/igc";
pub const SUCCESS_FILE: &str = "/sf";
pub const QUIET: &str = "/q";

/// Builds the metrics.exe tokens in their fixed order.
///
/// Inputs are expected to be validated already.
#[must_use]
pub fn build_arguments(
    inputs: &[PathBuf],
    output: &Path,
    settings: &MetricsSettings,
    env: &dyn Environment,
) -> ArgumentBuilder {
    let mut args = ArgumentBuilder::new();

    args.append_paths(INPUT, inputs, env)
        .append_path(OUTPUT, output, env)
        .append_paths(DIRECTORY, &settings.assembly_directories, env);

    for platform in &settings.assembly_platforms {
        args.append_quoted(PLATFORM, platform);
    }

    args.append_paths(REFERENCE, &settings.assembly_references, env)
        .append_switch(SEARCH_GAC, settings.search_gac)
        .append_switch(IGNORE_INVALID_TARGETS, settings.ignore_invalid_targets)
        .append_switch(IGNORE_GENERATED_CODE, settings.ignore_generated_code)
        .append_switch(SUCCESS_FILE, settings.success_file)
        .append_switch(QUIET, settings.quiet);

    args
}
