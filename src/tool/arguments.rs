// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordered command-line token list.

use std::path::Path;

use crate::core::host::Environment;

/// Builds an ordered list of argument tokens.
///
/// Tokens are kept exactly as appended; quoting is part of the token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentBuilder {
    tokens: Vec<String>,
}

impl ArgumentBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Appends a token unchanged.
    pub fn append(&mut self, token: impl Into<String>) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    /// Appends `{prefix}"{value}"`.
    pub fn append_quoted(&mut self, prefix: &str, value: &str) -> &mut Self {
        self.append(format!("{prefix}\"{value}\""))
    }

    /// Appends `{prefix}"{absolute path}"`, resolving against the environment.
    pub fn append_path(&mut self, prefix: &str, path: &Path, env: &dyn Environment) -> &mut Self {
        let absolute = env.make_absolute(path);
        self.append_quoted(prefix, &absolute.to_string_lossy())
    }

    /// Appends one quoted path token per entry, in order.
    pub fn append_paths<P>(&mut self, prefix: &str, paths: &[P], env: &dyn Environment) -> &mut Self
    where
        P: AsRef<Path>,
    {
        for path in paths {
            self.append_path(prefix, path.as_ref(), env);
        }
        self
    }

    /// Appends `flag` only when `enabled`.
    pub fn append_switch(&mut self, flag: &str, enabled: bool) -> &mut Self {
        if enabled {
            self.append(flag);
        }
        self
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Joins the tokens with single spaces, as they would appear on a command line.
    #[must_use]
    pub fn render(&self) -> String {
        self.tokens.join(" ")
    }
}
