// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Convert compact weekly schedule notation such as `TR 11am-12:15pm` into an
//! iCalendar (RFC 5545) event with a recurrence rule, or a JSCalendar
//! (RFC 8984) recurring event.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro
)]

mod datetime;
mod parser;
mod rfc5545;
mod rfc8984;
mod weekday;

pub use crate::datetime::{
    COMPACT_FORMAT_UTC, apply_time_of_day, apply_time_of_day_in, format_compact, format_iso,
    from_local_datetime,
};
pub use crate::parser::{ClockTime, ParseError, RecurrencePattern, parse};
pub use crate::rfc5545::{PRODID, parse_to_5545, parse_to_5545_in, wrap_calendar};
pub use crate::rfc8984::{Recurrence, RecurringEvent, parse_to_8984, parse_to_8984_in};
pub use crate::weekday::{RecurrenceFrequency, WeekDay};
