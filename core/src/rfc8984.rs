// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! JSCalendar (RFC 8984) output.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::datetime::{apply_time_of_day_in, format_iso};
use crate::parser::{ParseError, parse};
use crate::weekday::{RecurrenceFrequency, WeekDay};

/// A weekly event with its recurrence, serialized as
/// `{"dtstart", "dtend", "recurrence": {"frequency", "byDay", "until"}}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecurringEvent {
    /// ISO-8601 UTC start of the first occurrence
    pub dtstart: String,

    /// ISO-8601 UTC end of the first occurrence
    pub dtend: String,

    /// How the event repeats
    pub recurrence: Recurrence,
}

/// The recurrence rule of a [`RecurringEvent`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    /// Always weekly
    pub frequency: RecurrenceFrequency,

    /// Weekdays in the order they were written
    pub by_day: Vec<WeekDay>,

    /// ISO-8601 UTC end of the period
    pub until: String,
}

/// Converts a recurrence string into a JSCalendar-style recurring event.
///
/// Event times are anchored on the date of `period_start` in the system time
/// zone, the same way as [`parse_to_5545`](crate::parse_to_5545).
///
/// ## Errors
///
/// Returns the [`ParseError`] of the recurrence string unchanged.
pub fn parse_to_8984(
    period_start: &DateTime<Utc>,
    period_end: &DateTime<Utc>,
    recurrence: &str,
) -> Result<RecurringEvent, ParseError> {
    parse_to_8984_in(&Local, period_start, period_end, recurrence)
}

/// Same as [`parse_to_8984`], anchoring the event times in `tz`.
///
/// ## Errors
///
/// Returns the [`ParseError`] of the recurrence string unchanged.
pub fn parse_to_8984_in<Tz: TimeZone>(
    tz: &Tz,
    period_start: &DateTime<Utc>,
    period_end: &DateTime<Utc>,
    recurrence: &str,
) -> Result<RecurringEvent, ParseError> {
    let pattern = parse(recurrence)?;
    let event_start = apply_time_of_day_in(tz, period_start, pattern.start_time);
    let event_end = apply_time_of_day_in(tz, period_start, pattern.end_time);

    Ok(RecurringEvent {
        dtstart: format_iso(&event_start),
        dtend: format_iso(&event_end),
        recurrence: Recurrence {
            frequency: RecurrenceFrequency::Weekly,
            by_day: pattern.days,
            until: format_iso(period_end),
        },
    })
}
