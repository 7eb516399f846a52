// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use colored::Colorize;
use schedcal_core::ParseError;
use tokio::io::AsyncReadExt;

use crate::config::PeriodConfig;

/// Which end of the period a date-only value stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Date-only values start at 00:00:00
    Start,

    /// Date-only values end at 23:59:59
    End,
}

/// Parses a period bound into a UTC instant.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM:SS` (all taken
/// as UTC) and RFC 3339 with an offset.
pub fn parse_period_bound(s: &str, bound: Bound) -> Result<DateTime<Utc>, Box<dyn Error>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        Ok(dt.with_timezone(&Utc))
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt.and_utc())
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        Ok(dt.and_utc())
    } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => NaiveTime::MIN,
            Bound::End => NaiveTime::from_hms_opt(23, 59, 59).ok_or("Invalid end of day")?,
        };
        Ok(NaiveDateTime::new(date, time).and_utc())
    } else {
        Err(format!(
            "Invalid date format: {s}. Expected format: YYYY-MM-DD, YYYY-MM-DD HH:MM, YYYY-MM-DDTHH:MM:SS or RFC 3339"
        )
        .into())
    }
}

/// Resolves the period from command-line values, falling back to the configuration.
///
/// NOTE: Don't assert that the start is before the end, the period is passed through as given.
pub fn resolve_period(
    start: Option<&str>,
    end: Option<&str>,
    config: &PeriodConfig,
) -> Result<(DateTime<Utc>, DateTime<Utc>), Box<dyn Error>> {
    let start = start
        .or(config.start.as_deref())
        .ok_or("Period start is required, use --start or set period.start in the config")?;
    let end = end
        .or(config.end.as_deref())
        .ok_or("Period end is required, use --end or set period.end in the config")?;

    Ok((
        parse_period_bound(start, Bound::Start)?,
        parse_period_bound(end, Bound::End)?,
    ))
}

/// Collects recurrence strings from the arguments, then from `file` (`-` for stdin).
pub async fn collect_recurrences(
    mut recurrences: Vec<String>,
    file: Option<&Path>,
) -> Result<Vec<String>, Box<dyn Error>> {
    if let Some(path) = file {
        let content = if path == Path::new("-") {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            buf
        } else {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| format!("Failed to read file {}: {}", path.display(), e))?
        };
        recurrences.extend(recurrence_lines(&content));
    }

    if recurrences.is_empty() {
        return Err("No recurrence strings given".into());
    }
    Ok(recurrences)
}

/// Non-empty lines that are not `#` comments.
pub fn recurrence_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
}

/// The result of converting a batch of recurrence strings.
#[derive(Debug)]
pub struct Converted<T> {
    pub outputs: Vec<T>,
    pub skipped: Vec<(String, ParseError)>,
}

/// Converts every recurrence string, skipping malformed ones unless `strict`.
pub fn convert_all<T, F>(
    recurrences: &[String],
    strict: bool,
    convert: F,
) -> Result<Converted<T>, Box<dyn Error>>
where
    F: Fn(&str) -> Result<T, ParseError>,
{
    let mut outputs = Vec::with_capacity(recurrences.len());
    let mut skipped = Vec::new();
    for recurrence in recurrences {
        match convert(recurrence) {
            Ok(output) => outputs.push(output),
            Err(e) if strict => return Err(format!("Failed to parse \"{recurrence}\": {e}").into()),
            Err(e) => {
                tracing::warn!(recurrence = recurrence.as_str(), error = %e, "skipping malformed recurrence");
                skipped.push((recurrence.clone(), e));
            }
        }
    }

    if outputs.is_empty() {
        return Err("None of the recurrence strings could be converted".into());
    }
    Ok(Converted { outputs, skipped })
}

pub fn print_skipped(skipped: &[(String, ParseError)]) {
    for (recurrence, e) in skipped {
        eprintln!("{} \"{}\": {}", "Skipped:".yellow(), recurrence, e);
    }
}
