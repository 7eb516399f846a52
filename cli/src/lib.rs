// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front end for converting weekly schedule notation into
//! iCalendar and JSCalendar recurrences.

mod arg;
mod cli;
mod cmd_generate_completion;
mod cmd_ical;
mod cmd_jscal;
mod config;
mod util;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::{APP_NAME, Config, OutputConfig, PeriodConfig, parse_config};
