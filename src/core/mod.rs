// vsmetrics: Code Metrics Power Tool runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process execution and host access.
//!
//! ```text
//!              core
//!               |
//!        +------+------+
//!        v             v
//!      host         process
//!        |             |
//!   FileSystem     ProcessBuilder
//!   Environment    ProcessOutput
//!   ProcessRunner  timeout/cancel
//!   ToolLocator
//! ```

pub mod host;
pub mod process;
