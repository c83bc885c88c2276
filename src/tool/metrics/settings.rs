// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings mapped onto metrics.exe flags.

use std::path::PathBuf;

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::tool::ToolSettings;

/// Which installed metrics.exe to fall back to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ToolVersion {
    /// Newest installation first (VS2015, then VS2013).
    #[default]
    Default,
    /// Visual Studio 2013 (12.0).
    Vs2013,
    /// Visual Studio 2015 (14.0).
    Vs2015,
}

impl std::fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Vs2013 => write!(f, "vs2013"),
            Self::Vs2015 => write!(f, "vs2015"),
        }
    }
}

/// Options for one metrics.exe run.
///
/// An empty list means the flag is not emitted at all.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MetricsSettings {
    /// Directories searched for assembly dependencies (`/d:`).
    #[builder(default)]
    pub assembly_directories: Vec<PathBuf>,
    /// Search the global assembly cache (`/gac`).
    #[builder(default)]
    pub search_gac: bool,
    /// Target platforms (`/plat:`).
    #[builder(default)]
    pub assembly_platforms: Vec<String>,
    /// Assembly references (`/ref:`).
    #[builder(default)]
    pub assembly_references: Vec<PathBuf>,
    /// Ignore invalid targets (`/iit`).
    #[builder(default)]
    pub ignore_invalid_targets: bool,
    /// Ignore generated code (`/igc`).
    #[builder(default)]
    pub ignore_generated_code: bool,
    /// Write a success marker file (`/sf`).
    #[builder(default)]
    pub success_file: bool,
    /// Suppress console output of the tool (`/q`).
    #[builder(default)]
    pub quiet: bool,
    #[builder(default)]
    pub tool_version: ToolVersion,
    #[builder(default)]
    pub tool: ToolSettings,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
