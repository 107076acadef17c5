use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike, Utc, Weekday};

use crate::config::{draw_cutoffs, HOME_UTC_OFFSET_SECS};

pub fn home_tz() -> FixedOffset {
    FixedOffset::east_opt(HOME_UTC_OFFSET_SECS).expect("valid home UTC offset")
}

/// Current wall-clock time in the lottery's home timezone.
pub fn home_now() -> DateTime<FixedOffset> {
    to_home(Utc::now())
}

pub fn to_home<Tz: TimeZone>(t: DateTime<Tz>) -> DateTime<FixedOffset> {
    t.with_timezone(&home_tz())
}

fn at_or_after(now: &DateTime<FixedOffset>, (hour, minute): (u32, u32)) -> bool {
    now.hour() > hour || (now.hour() == hour && now.minute() >= minute)
}

/// Whether results on the page can be treated as final right now.
///
/// Monday and Thursday pass from the cutoff onwards; Friday passes from
/// 21:30 only when a cascade draw is expected. Every other day fails.
/// `now` is converted to home time first, whatever offset it carries.
pub fn is_draw_day_and_time(now: DateTime<FixedOffset>, cascade_predicted: bool) -> bool {
    let now = to_home(now);
    let weekday = now.weekday();

    let mut cutoff = draw_cutoffs::NORMAL;
    // Never consulted: Wednesday is not a gated day below. Kept until the
    // first-Wednesday draw schedule is confirmed.
    if weekday == Weekday::Wed && now.day() <= 7 {
        cutoff = draw_cutoffs::FIRST_WEDNESDAY;
    }

    match weekday {
        Weekday::Mon | Weekday::Thu => at_or_after(&now, cutoff),
        Weekday::Fri if cascade_predicted => at_or_after(&now, draw_cutoffs::CASCADE_FRIDAY),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-09-01 is a Monday.
    fn at(day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
        home_tz()
            .with_ymd_and_hms(2025, 9, day, hour, minute, 0)
            .single()
            .expect("valid local time")
    }

    #[test]
    fn monday_cutoff_is_inclusive() {
        assert!(is_draw_day_and_time(at(1, 18, 40), false));
        assert!(!is_draw_day_and_time(at(1, 18, 39), false));
        assert!(is_draw_day_and_time(at(1, 19, 5), false));
        assert!(is_draw_day_and_time(at(1, 23, 59), false));
    }

    #[test]
    fn thursday_uses_normal_cutoff() {
        assert!(is_draw_day_and_time(at(4, 18, 40), false));
        assert!(!is_draw_day_and_time(at(4, 17, 59), true));
    }

    #[test]
    fn friday_only_with_cascade() {
        assert!(is_draw_day_and_time(at(5, 21, 30), true));
        assert!(!is_draw_day_and_time(at(5, 21, 30), false));
        assert!(!is_draw_day_and_time(at(5, 21, 29), true));
        assert!(!is_draw_day_and_time(at(5, 18, 40), true));
    }

    #[test]
    fn other_days_never_pass() {
        // Tue, first Wed, Sat, Sun
        for day in [2, 3, 6, 7] {
            assert!(!is_draw_day_and_time(at(day, 22, 0), false), "day {day}");
            assert!(!is_draw_day_and_time(at(day, 22, 0), true), "day {day}");
        }
    }

    #[test]
    fn evaluates_in_home_timezone() {
        // 10:40 UTC on Monday is 18:40 in Singapore.
        let utc = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 9, 1, 10, 40, 0)
            .single()
            .unwrap();
        assert!(is_draw_day_and_time(utc, false));

        // 23:00 UTC Sunday is already Monday 07:00 at home: too early.
        let sunday_night = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 8, 31, 23, 0, 0)
            .single()
            .unwrap();
        assert!(!is_draw_day_and_time(sunday_night, false));
    }
}
