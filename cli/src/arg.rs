// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Arg, ArgMatches, ValueHint, arg, value_parser};

use crate::config::PeriodConfig;
use crate::util::{collect_recurrences, resolve_period};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show debug logs").global(true)
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }
}

/// Inputs shared by every conversion command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertArgs {
    pub start: Option<String>,
    pub end: Option<String>,
    pub file: Option<PathBuf>,
    pub strict: bool,
    pub recurrences: Vec<String>,
}

impl ConvertArgs {
    pub fn args() -> [Arg; 5] {
        [
            arg!(--start <START> "Start of the period, e.g. 2025-03-10"),
            arg!(--end <END> "End of the period, e.g. 2025-06-10"),
            arg!(-f --file <FILE> "Read recurrence strings from a file, one per line ('-' for stdin)")
                .value_parser(value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
            arg!(--strict "Fail on the first malformed recurrence string instead of skipping it"),
            arg!(recurrence: [RECURRENCE] "Recurrence strings, e.g. \"TR 11am-12:15pm\"")
                .num_args(0..),
        ]
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            start: matches.get_one("start").cloned(),
            end: matches.get_one("end").cloned(),
            file: matches.get_one("file").cloned(),
            strict: matches.get_flag("strict"),
            recurrences: matches
                .get_many::<String>("recurrence")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
        }
    }

    pub fn period(
        &self,
        config: &PeriodConfig,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), Box<dyn Error>> {
        resolve_period(self.start.as_deref(), self.end.as_deref(), config)
    }

    pub async fn recurrences(&self) -> Result<Vec<String>, Box<dyn Error>> {
        collect_recurrences(self.recurrences.clone(), self.file.as_deref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    fn matches(args: &[&str]) -> ArgMatches {
        Command::new("test")
            .args(ConvertArgs::args())
            .try_get_matches_from(args)
            .unwrap()
    }

    #[test]
    fn test_parse_convert_args() {
        let args = ConvertArgs::from(&matches(&[
            "test",
            "--start",
            "2025-03-10",
            "--end",
            "2025-06-10",
            "--strict",
            "TR 11am-12:15pm",
            "M 8am-9:40am",
        ]));
        assert_eq!(args.start.as_deref(), Some("2025-03-10"));
        assert_eq!(args.end.as_deref(), Some("2025-06-10"));
        assert!(args.strict);
        assert_eq!(args.file, None);
        assert_eq!(args.recurrences, ["TR 11am-12:15pm", "M 8am-9:40am"]);
    }

    #[test]
    fn test_parse_file_without_recurrences() {
        let args = ConvertArgs::from(&matches(&["test", "-f", "schedule.txt"]));
        assert_eq!(args.file, Some(PathBuf::from("schedule.txt")));
        assert!(args.recurrences.is_empty());
        assert!(!args.strict);
    }
}
