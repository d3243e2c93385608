// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line host replaying scheduling grid edits into Dataverse bookings.

mod cli;
mod cmd_replay;
mod config;
mod dry_run;
mod script;

pub use crate::cli::{Cli, Commands, run};
pub use crate::cmd_replay::CmdReplay;
pub use crate::config::{Config, parse_config};
pub use crate::dry_run::DryRunService;
pub use crate::script::{Step, parse_script};
