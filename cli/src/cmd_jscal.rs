// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use schedcal_core::{RecurringEvent, parse_to_8984};

use crate::arg::ConvertArgs;
use crate::config::Config;
use crate::util::{convert_all, print_skipped};

#[derive(Debug, Clone)]
pub struct CmdJscal {
    pub convert: ConvertArgs,
    pub compact: bool,
}

impl CmdJscal {
    pub const NAME: &str = "jscal";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("8984")
            .about("Convert recurrence strings to JSCalendar (RFC 8984) recurrences")
            .args(ConvertArgs::args())
            .arg(arg!(--compact "Print JSON on a single line"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            convert: ConvertArgs::from(matches),
            compact: matches.get_flag("compact"),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "converting to JSCalendar...");
        let (start, end) = self.convert.period(&config.period)?;
        let recurrences = self.convert.recurrences().await?;

        let converted = convert_all(&recurrences, self.convert.strict, |recurrence| {
            parse_to_8984(&start, &end, recurrence)
        })?;
        print_skipped(&converted.skipped);

        let pretty = !self.compact && config.output.pretty;
        println!("{}", Self::render(&converted.outputs, pretty)?);
        Ok(())
    }

    fn render(events: &[RecurringEvent], pretty: bool) -> Result<String, Box<dyn Error>> {
        let json = if pretty {
            serde_json::to_string_pretty(events)?
        } else {
            serde_json::to_string(events)?
        };
        Ok(json)
    }
}
