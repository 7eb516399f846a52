// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display};

const KW_DAY_MO: &str = "MO";
const KW_DAY_TU: &str = "TU";
const KW_DAY_WE: &str = "WE";
const KW_DAY_TH: &str = "TH";
const KW_DAY_FR: &str = "FR";
const KW_DAY_SA: &str = "SA";
const KW_DAY_SU: &str = "SU";

/// Day of the week, rendered as its two-letter RFC 5545 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum WeekDay {
    /// Monday, `M`
    #[serde(rename = "MO")]
    Monday,

    /// Tuesday, `T`
    #[serde(rename = "TU")]
    Tuesday,

    /// Wednesday, `W`
    #[serde(rename = "WE")]
    Wednesday,

    /// Thursday, `R`
    #[serde(rename = "TH")]
    Thursday,

    /// Friday, `F`
    #[serde(rename = "FR")]
    Friday,

    /// Saturday, `S`
    #[serde(rename = "SA")]
    Saturday,

    /// Sunday, `U`
    #[serde(rename = "SU")]
    Sunday,
}

impl WeekDay {
    /// Looks up the single-letter abbreviation used in schedule notation.
    ///
    /// `T` is always Tuesday and `R` is always Thursday.
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(WeekDay::Monday),
            'T' => Some(WeekDay::Tuesday),
            'W' => Some(WeekDay::Wednesday),
            'R' => Some(WeekDay::Thursday),
            'F' => Some(WeekDay::Friday),
            'S' => Some(WeekDay::Saturday),
            'U' => Some(WeekDay::Sunday),
            _ => None,
        }
    }

    /// The two-letter weekday code.
    pub const fn code(self) -> &'static str {
        match self {
            WeekDay::Monday => KW_DAY_MO,
            WeekDay::Tuesday => KW_DAY_TU,
            WeekDay::Wednesday => KW_DAY_WE,
            WeekDay::Thursday => KW_DAY_TH,
            WeekDay::Friday => KW_DAY_FR,
            WeekDay::Saturday => KW_DAY_SA,
            WeekDay::Sunday => KW_DAY_SU,
        }
    }
}

impl Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Frequency of a recurrence rule. Only weekly schedules are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum RecurrenceFrequency {
    /// Repeats every week
    #[default]
    #[serde(rename = "WEEKLY")]
    Weekly,
}

impl Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceFrequency::Weekly => write!(f, "WEEKLY"),
        }
    }
}
