// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Known metrics.exe installation directories.
//!
//! ```text
//! Program Files (x86)/
//!   Microsoft Visual Studio 14.0/Team Tools/Static Analysis Tools/FxCop/metrics.exe  Vs2015
//!   Microsoft Visual Studio 12.0/Team Tools/Static Analysis Tools/FxCop/metrics.exe  Vs2013
//!
//! selector Default --> every candidate, list order (newest first)
//! selector VsXXXX  --> candidates tagged VsXXXX
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::METRICS_EXE;
use super::settings::ToolVersion;

/// One place metrics.exe may be installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Installation {
    pub version: ToolVersion,
    /// Full path of the executable.
    pub path: PathBuf,
}

/// Ordered candidate list probed when the locator finds nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsInstallations {
    candidates: Vec<Installation>,
}

impl MetricsInstallations {
    #[must_use]
    pub const fn new(candidates: Vec<Installation>) -> Self {
        Self { candidates }
    }

    /// The Visual Studio 2015 and 2013 installations under `program_files_x86`, newest first.
    #[must_use]
    pub fn well_known(program_files_x86: &Path) -> Self {
        let fxcop = |vs_dir: &str| {
            program_files_x86
                .join(vs_dir)
                .join("Team Tools")
                .join("Static Analysis Tools")
                .join("FxCop")
                .join(METRICS_EXE)
        };
        Self::new(vec![
            Installation {
                version: ToolVersion::Vs2015,
                path: fxcop("Microsoft Visual Studio 14.0"),
            },
            Installation {
                version: ToolVersion::Vs2013,
                path: fxcop("Microsoft Visual Studio 12.0"),
            },
        ])
    }

    #[must_use]
    pub fn candidates(&self) -> &[Installation] {
        &self.candidates
    }

    /// Candidate paths allowed by `selector`, in list order.
    #[must_use]
    pub fn paths_for(&self, selector: ToolVersion) -> Vec<PathBuf> {
        self.candidates
            .iter()
            .filter(|candidate| selector == ToolVersion::Default || candidate.version == selector)
            .map(|candidate| candidate.path.clone())
            .collect()
    }
}
