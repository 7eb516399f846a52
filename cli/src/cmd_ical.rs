// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use schedcal_core::{parse_to_5545, wrap_calendar};

use crate::arg::ConvertArgs;
use crate::config::Config;
use crate::util::{convert_all, print_skipped};

#[derive(Debug, Clone)]
pub struct CmdIcal {
    pub convert: ConvertArgs,
    pub calendar: bool,
}

impl CmdIcal {
    pub const NAME: &str = "ical";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("5545")
            .about("Convert recurrence strings to iCalendar (RFC 5545) events")
            .args(ConvertArgs::args())
            .arg(arg!(--calendar "Wrap the events in a VCALENDAR"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            convert: ConvertArgs::from(matches),
            calendar: matches.get_flag("calendar"),
        }
    }

    pub async fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "converting to iCalendar...");
        let (start, end) = self.convert.period(&config.period)?;
        let recurrences = self.convert.recurrences().await?;

        let converted = convert_all(&recurrences, self.convert.strict, |recurrence| {
            parse_to_5545(&start, &end, recurrence)
        })?;
        print_skipped(&converted.skipped);

        let calendar = self.calendar || config.output.calendar;
        println!("{}", Self::render(&converted.outputs, calendar));
        Ok(())
    }

    fn render(events: &[String], calendar: bool) -> String {
        if calendar {
            wrap_calendar(events)
        } else {
            events.join("\n")
        }
    }
}
