// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decoding of console output written in legacy Windows code pages.
//!
//! ```text
//! child bytes --(Encoding::decode)--> UTF-8 line
//!   utf8  lossy, invalid sequences --> U+FFFD
//!   acp   Windows-1252
//!   oem   IBM866
//! ```

use std::borrow::Cow;

use encoding_rs::{IBM866, WINDOWS_1252};
use serde::{Deserialize, Serialize};

/// Encoding of a child's stdout and stderr.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8; malformed bytes are replaced, never rejected.
    #[default]
    Utf8,
    /// Active code page (Windows-1252).
    Acp,
    /// OEM code page used by console programs.
    Oem,
}

impl Encoding {
    /// Converts one line of raw output to UTF-8.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Acp => WINDOWS_1252.decode_without_bom_handling(bytes).0,
            Self::Oem => IBM866.decode_without_bom_handling(bytes).0,
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Utf8 => "utf8",
            Self::Acp => "acp",
            Self::Oem => "oem",
        })
    }
}
