// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) output.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::datetime::{apply_time_of_day_in, format_compact};
use crate::parser::{ParseError, parse};
use crate::weekday::RecurrenceFrequency;

const KW_BEGIN: &str = "BEGIN";
const KW_END: &str = "END";
const KW_VCALENDAR: &str = "VCALENDAR";
const KW_VEVENT: &str = "VEVENT";
const KW_VERSION: &str = "VERSION";
const KW_PRODID: &str = "PRODID";
const KW_DTSTART: &str = "DTSTART";
const KW_DTEND: &str = "DTEND";
const KW_RRULE: &str = "RRULE";
const KW_RRULE_FREQ: &str = "FREQ";
const KW_RRULE_BYDAY: &str = "BYDAY";
const KW_RRULE_UNTIL: &str = "UNTIL";

/// Product identifier written into wrapped calendars.
pub const PRODID: &str = "-//schedcal//EN";

/// Converts a recurrence string into a `VEVENT` block with a weekly `RRULE`.
///
/// The event start and end take their date from `period_start` as seen in the
/// system time zone, and `period_end` becomes the rule's `UNTIL`. Lines are
/// joined by `\n` without a trailing newline.
///
/// ## Errors
///
/// Returns the [`ParseError`] of the recurrence string unchanged.
pub fn parse_to_5545(
    period_start: &DateTime<Utc>,
    period_end: &DateTime<Utc>,
    recurrence: &str,
) -> Result<String, ParseError> {
    parse_to_5545_in(&Local, period_start, period_end, recurrence)
}

/// Same as [`parse_to_5545`], anchoring the event times in `tz` instead of the
/// system time zone.
///
/// ## Errors
///
/// Returns the [`ParseError`] of the recurrence string unchanged.
///
/// ## Examples
///
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use schedcal_core::parse_to_5545_in;
/// let start = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2025, 6, 10, 23, 59, 59).unwrap();
/// let event = parse_to_5545_in(&Utc, &start, &end, "TR 11am-12:15pm").unwrap();
/// assert_eq!(
///     event,
///     "BEGIN:VEVENT\n\
///      DTSTART:20250310T110000Z\n\
///      DTEND:20250310T121500Z\n\
///      RRULE:FREQ=WEEKLY;BYDAY=TU,TH;UNTIL=20250610T235959Z\n\
///      END:VEVENT"
/// );
/// ```
pub fn parse_to_5545_in<Tz: TimeZone>(
    tz: &Tz,
    period_start: &DateTime<Utc>,
    period_end: &DateTime<Utc>,
    recurrence: &str,
) -> Result<String, ParseError> {
    let pattern = parse(recurrence)?;
    let dt_start = apply_time_of_day_in(tz, period_start, pattern.start_time);
    let dt_end = apply_time_of_day_in(tz, period_start, pattern.end_time);

    let by_day = pattern
        .days
        .iter()
        .map(|day| day.code())
        .collect::<Vec<_>>()
        .join(",");

    let lines = [
        format!("{KW_BEGIN}:{KW_VEVENT}"),
        format!("{KW_DTSTART}:{}", format_compact(&dt_start)),
        format!("{KW_DTEND}:{}", format_compact(&dt_end)),
        format!(
            "{KW_RRULE}:{KW_RRULE_FREQ}={};{KW_RRULE_BYDAY}={by_day};{KW_RRULE_UNTIL}={}",
            RecurrenceFrequency::Weekly,
            format_compact(period_end),
        ),
        format!("{KW_END}:{KW_VEVENT}"),
    ];
    Ok(lines.join("\n"))
}

/// Wraps event blocks in a `VCALENDAR` so the output is a complete calendar.
pub fn wrap_calendar<S: AsRef<str>>(events: &[S]) -> String {
    let mut lines = vec![
        format!("{KW_BEGIN}:{KW_VCALENDAR}"),
        format!("{KW_VERSION}:2.0"),
        format!("{KW_PRODID}:{PRODID}"),
    ];
    lines.extend(events.iter().map(|e| e.as_ref().to_string()));
    lines.push(format!("{KW_END}:{KW_VCALENDAR}"));
    lines.join("\n")
}
