// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::weekday::WeekDay;

/// Errors raised while reading a recurrence string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The string does not start with a run of day letters followed by whitespace.
    #[error("days not found")]
    DaysNotFound,

    /// A day letter has no weekday code.
    #[error("unsupported day letter: {0}")]
    UnsupportedDayLetter(char),

    /// No `start-end` time range was found.
    #[error("times not found")]
    TimesNotFound,
}

/// A naive wall-clock time in 24-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    /// Hour of the day
    pub hour: u8,

    /// Minute of the hour
    pub minute: u8,
}

impl ClockTime {
    /// Creates a clock time from its components.
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    /// Normalizes one side of a time range, e.g. `9`, `9:15am`, `12 PM`.
    ///
    /// A token without `am`/`pm` is taken as 24-hour time as-is.
    fn from_token(token: &str) -> Option<Self> {
        let token = token.trim().to_lowercase();
        let (clock, meridiem) = if let Some(rest) = token.strip_suffix("am") {
            (rest.trim_end(), Some(Meridiem::Am))
        } else if let Some(rest) = token.strip_suffix("pm") {
            (rest.trim_end(), Some(Meridiem::Pm))
        } else {
            (token.as_str(), None)
        };

        let (hour, minute) = match clock.split_once(':') {
            Some((h, m)) => (h.parse::<u8>().ok()?, m.parse::<u8>().ok()?),
            None => (clock.parse::<u8>().ok()?, 0),
        };

        let hour = match meridiem {
            Some(Meridiem::Pm) if hour < 12 => hour + 12,
            Some(Meridiem::Am) if hour == 12 => 0,
            _ => hour,
        };
        Some(Self { hour, minute })
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy)]
enum Meridiem {
    Am,
    Pm,
}

/// The weekly schedule described by a recurrence string such as `TR 11am-12:15pm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrencePattern {
    /// Weekdays in the order they were written, duplicates kept.
    pub days: Vec<WeekDay>,

    /// Start of each occurrence
    pub start_time: ClockTime,

    /// End of each occurrence, not checked against `start_time`
    pub end_time: ClockTime,
}

impl FromStr for RecurrencePattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a recurrence string into its weekdays and time range.
///
/// ## Errors
///
/// Returns [`ParseError::DaysNotFound`] when the string does not begin with day
/// letters (`M`, `T`, `W`, `R`, `F`, `S`, `U`) followed by whitespace,
/// [`ParseError::UnsupportedDayLetter`] when a letter has no weekday, and
/// [`ParseError::TimesNotFound`] when no time range is present.
///
/// ## Examples
///
/// ```
/// # use schedcal_core::{ClockTime, WeekDay, parse};
/// let pattern = parse("TR 11am-12:15pm").unwrap();
/// assert_eq!(pattern.days, vec![WeekDay::Tuesday, WeekDay::Thursday]);
/// assert_eq!(pattern.start_time, ClockTime::new(11, 0));
/// assert_eq!(pattern.end_time, ClockTime::new(12, 15));
/// ```
pub fn parse(recurrence: &str) -> Result<RecurrencePattern, ParseError> {
    let letters = day_letters(recurrence).ok_or(ParseError::DaysNotFound)?;
    let days = translate_days(letters)?;
    let (start_time, end_time) = time_range(recurrence)?;

    tracing::debug!(recurrence, ?days, %start_time, %end_time, "parsed recurrence");
    Ok(RecurrencePattern {
        days,
        start_time,
        end_time,
    })
}

fn day_letters(s: &str) -> Option<&str> {
    const RE: &str = r"^([MTWRFSU]+)\s";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());
    re.captures(s)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

fn translate_days(letters: &str) -> Result<Vec<WeekDay>, ParseError> {
    letters
        .chars()
        .map(|c| WeekDay::from_letter(c).ok_or(ParseError::UnsupportedDayLetter(c)))
        .collect()
}

fn time_range(s: &str) -> Result<(ClockTime, ClockTime), ParseError> {
    // Hyphen or en-dash between two `H[:MM][am|pm]` tokens
    const RE: &str =
        r"(?i)([0-9]{1,2}(?::[0-9]{2})?\s*(?:am|pm)?)\s*[-\u{2013}]\s*([0-9]{1,2}(?::[0-9]{2})?\s*(?:am|pm)?)";
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(RE).unwrap());

    let captures = re.captures(s).ok_or(ParseError::TimesNotFound)?;
    let start = captures
        .get(1)
        .and_then(|m| ClockTime::from_token(m.as_str()))
        .ok_or(ParseError::TimesNotFound)?;
    let end = captures
        .get(2)
        .and_then(|m| ClockTime::from_token(m.as_str()))
        .ok_or(ParseError::TimesNotFound)?;
    Ok((start, end))
}
