// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{
    DateTime, Local, NaiveDateTime, NaiveTime, Offset, SecondsFormat, TimeDelta, TimeZone, Utc,
    offset::LocalResult,
};

use crate::ClockTime;

/// RFC 5545 DATE-TIME in UTC form, e.g. `20250610T235959Z`.
pub const COMPACT_FORMAT_UTC: &str = "%Y%m%dT%H%M%SZ";

/// Formats an instant as `YYYYMMDDTHHMMSSZ` in UTC.
pub fn format_compact<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc).format(COMPACT_FORMAT_UTC).to_string()
}

/// Formats an instant as an ISO-8601 UTC string, e.g. `2025-06-10T23:59:59Z`.
pub fn format_iso<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Moves `base` to the given clock time on its calendar date in the system time zone.
///
/// See [`apply_time_of_day_in`].
pub fn apply_time_of_day(base: &DateTime<Utc>, time: ClockTime) -> DateTime<Utc> {
    apply_time_of_day_in(&Local, base, time)
}

/// Moves `base` to the given clock time on its calendar date as seen in `tz`.
///
/// Seconds and sub-seconds are zeroed. Hours or minutes beyond the clock range
/// roll over into the following day(s), so `25:00` lands at 01:00 the next day.
/// A time skipped by a DST transition moves forward by the length of the gap,
/// e.g. 02:30 on a spring-forward night becomes 03:30. Results past the end of
/// the representable range saturate at [`NaiveDateTime::MAX`].
pub fn apply_time_of_day_in<Tz: TimeZone>(
    tz: &Tz,
    base: &DateTime<Utc>,
    time: ClockTime,
) -> DateTime<Utc> {
    let date = base.with_timezone(tz).date_naive();
    let delta = TimeDelta::hours(i64::from(time.hour)) + TimeDelta::minutes(i64::from(time.minute));
    let naive = NaiveDateTime::new(date, NaiveTime::MIN)
        .checked_add_signed(delta)
        .unwrap_or_else(|| {
            tracing::warn!(%date, %time, "time of day out of range, saturating");
            NaiveDateTime::MAX
        });
    from_local_datetime(tz, naive).with_timezone(&Utc)
}

/// Convert the `NaiveDateTime` to the given timezone, handles local time ambiguities:
/// - `Single(dt)` returns directly;
/// - `Ambiguous(a, b)` takes the earlier one;
/// - `None` (local time does not exist, e.g., skipped by a DST transition): reads it
///   with the offset in effect a day earlier, which moves it forward past the gap. Falls
///   back to a UTC combination when no such offset can be found.
pub fn from_local_datetime<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(x) => x,
        LocalResult::Ambiguous(a, b) => {
            tracing::warn!(%naive, "ambiguous local time, picking earliest");
            if a <= b { a } else { b }
        }
        LocalResult::None => match skip_gap(tz, naive) {
            Some(dt) => {
                tracing::warn!(%naive, "local time skipped by a transition, moving forward");
                dt
            }
            None => {
                tracing::warn!(%naive, "invalid local time, falling back to UTC");
                Utc.from_utc_datetime(&naive).with_timezone(tz)
            }
        },
    }
}

fn skip_gap<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    let before = naive.checked_sub_signed(TimeDelta::days(1))?;
    let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
    let utc = naive.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
    Some(tz.from_utc_datetime(&utc))
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn formats_compact_utc() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 10, 23, 59, 59).unwrap();
        assert_eq!(format_compact(&dt), "20250610T235959Z");

        let dt = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_compact(&dt), "20250102T030405Z");
    }

    #[test]
    fn formats_compact_from_other_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = tz.with_ymd_and_hms(2025, 3, 10, 1, 0, 0).unwrap();
        assert_eq!(format_compact(&dt), "20250309T230000Z");
    }

    #[test]
    fn formats_iso_utc() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 10, 23, 59, 59).unwrap();
        assert_eq!(format_iso(&dt), "2025-06-10T23:59:59Z");
    }

    #[test]
    fn applies_time_in_utc() {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 17, 42, 13).unwrap();
        let applied = apply_time_of_day_in(&Utc, &base, ClockTime::new(11, 0));
        assert_eq!(applied, Utc.with_ymd_and_hms(2025, 3, 10, 11, 0, 0).unwrap());
    }

    #[test]
    fn drops_subseconds() {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap() + TimeDelta::milliseconds(750);
        let applied = apply_time_of_day_in(&Utc, &base, ClockTime::new(12, 15));
        assert_eq!(applied, Utc.with_ymd_and_hms(2025, 3, 10, 12, 15, 0).unwrap());
    }

    #[test]
    fn anchors_on_local_date_west_of_utc() {
        // 2025-03-10T00:00Z is still March 9 at UTC-5
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let applied = apply_time_of_day_in(&tz, &base, ClockTime::new(11, 0));
        assert_eq!(applied, Utc.with_ymd_and_hms(2025, 3, 9, 16, 0, 0).unwrap());
    }

    #[test]
    fn anchors_on_local_date_east_of_utc() {
        // 2025-03-10T22:00Z is already March 11 at UTC+9
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 22, 0, 0).unwrap();
        let applied = apply_time_of_day_in(&tz, &base, ClockTime::new(8, 0));
        assert_eq!(applied, Utc.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap());
    }

    #[test]
    fn rolls_over_out_of_range_hours() {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let applied = apply_time_of_day_in(&Utc, &base, ClockTime::new(25, 30));
        assert_eq!(applied, Utc.with_ymd_and_hms(2025, 3, 11, 1, 30, 0).unwrap());
    }

    #[test]
    fn moves_gap_time_forward_on_same_local_date() {
        // New York springs forward at 02:00 on 2025-03-09
        let tz = chrono_tz::America::New_York;
        let base = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();

        let applied = apply_time_of_day_in(&tz, &base, ClockTime::new(2, 30));
        assert_eq!(applied, Utc.with_ymd_and_hms(2025, 3, 9, 7, 30, 0).unwrap());

        let local = applied.with_timezone(&tz);
        assert_eq!(local.date_naive(), base.with_timezone(&tz).date_naive());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(3, 30, 0).unwrap());
    }

    #[test]
    fn picks_earlier_of_repeated_time() {
        // New York falls back at 02:00 on 2025-11-02, 01:30 happens twice
        let tz = chrono_tz::America::New_York;
        let base = Utc.with_ymd_and_hms(2025, 11, 2, 12, 0, 0).unwrap();
        let applied = apply_time_of_day_in(&tz, &base, ClockTime::new(1, 30));
        assert_eq!(applied, Utc.with_ymd_and_hms(2025, 11, 2, 5, 30, 0).unwrap());
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let base = DateTime::<Utc>::MAX_UTC;
        let applied = apply_time_of_day_in(&Utc, &base, ClockTime::new(99, 99));
        assert_eq!(applied, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn does_not_mutate_base() {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let _ = apply_time_of_day(&base, ClockTime::new(11, 0));
        assert_eq!(base, Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap());
    }

    #[test]
    fn converts_naive_to_datetime_in_timezone() {
        let dt = DateTime::from_timestamp(1_609_459_200, 0).unwrap(); // 2021-01-01 00:00:00 UTC
        let result = from_local_datetime(&Utc, dt.naive_utc());
        assert_eq!(result.timestamp(), 1_609_459_200);
    }
}
