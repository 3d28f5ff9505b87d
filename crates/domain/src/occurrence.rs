use crate::reminder::{Reminder, ReminderSchedule};
use crate::shared::recurrence::{parse_weekdays, RecurrenceType, TimeOfDay};
use chrono::{prelude::*, Duration, LocalResult};
use chrono_tz::Tz;

/// Daily occurrences are searched for at most this many days ahead
const DAILY_SEARCH_DAYS: i64 = 365;
/// Weekly occurrences are searched for at most two weeks ahead
const WEEKLY_SEARCH_DAYS: i64 = 14;

/// Computes the next instant (timestamp millis) at or after `from` at which
/// the `Reminder` is due, or `None` if it will not fire again according to its
/// schedule.
///
/// All calendar arithmetic is done in the timezone `tz`. This function is
/// pure, and both the preview of the next dose and the job scheduler rely
/// on it so that they always agree.
pub fn next_occurrence(reminder: &Reminder, from: i64, tz: &Tz) -> Option<i64> {
    match &reminder.schedule {
        ReminderSchedule::Once { scheduled_at } => {
            if !reminder.sent && *scheduled_at >= from {
                Some(*scheduled_at)
            } else {
                None
            }
        }
        ReminderSchedule::Recurring(rule) => {
            let time = rule.time.parse::<TimeOfDay>().ok()?;
            match rule.recurrence_type {
                RecurrenceType::Daily => next_daily(time, from, tz),
                RecurrenceType::Weekly => {
                    next_weekly(&parse_weekdays(&rule.days_of_week), time, from, tz)
                }
                RecurrenceType::EveryX => {
                    let anchor = reminder.last_run.unwrap_or(reminder.created);
                    next_every_x(rule.every_x_days?, anchor, time, from, tz)
                }
            }
        }
    }
}

/// `None` when the result does not fit in a `NaiveDate`. Far more days than
/// the calendar spans are rejected up front since `Duration::days` panics
/// on overflow.
fn add_days(day: NaiveDate, days: i64) -> Option<NaiveDate> {
    let limit = i64::from(i32::MAX);
    if !(-limit..=limit).contains(&days) {
        return None;
    }
    day.checked_add_signed(Duration::days(days))
}

fn local_day(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(ts)
        .single()
        .map(|dt| dt.naive_local().date())
}

/// The instant of `time` on the local calendar `day`.
/// Ambiguous local times resolve to the earliest instant and local times
/// that do not exist (skipped by a DST transition) are pushed one hour forward.
fn at_time_of_day(day: NaiveDate, time: TimeOfDay, tz: &Tz) -> Option<i64> {
    let naive = day.and_hms_opt(time.hour(), time.minute(), 0)?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        LocalResult::None => tz
            .from_local_datetime(&naive.checked_add_signed(Duration::hours(1))?)
            .earliest()
            .map(|dt| dt.timestamp_millis()),
    }
}

fn next_daily(time: TimeOfDay, from: i64, tz: &Tz) -> Option<i64> {
    let start = local_day(from, tz)?;
    (0..DAILY_SEARCH_DAYS)
        .filter_map(|offset| add_days(start, offset))
        .filter_map(|day| at_time_of_day(day, time, tz))
        .find(|candidate| *candidate >= from)
}

fn next_weekly(weekdays: &[u32], time: TimeOfDay, from: i64, tz: &Tz) -> Option<i64> {
    if weekdays.is_empty() {
        return None;
    }
    let start = local_day(from, tz)?;
    (0..WEEKLY_SEARCH_DAYS)
        .filter_map(|offset| add_days(start, offset))
        .filter(|day| weekdays.contains(&day.weekday().num_days_from_sunday()))
        .filter_map(|day| at_time_of_day(day, time, tz))
        .find(|candidate| *candidate >= from)
}

fn next_every_x(
    every_x_days: i64,
    anchor: i64,
    time: TimeOfDay,
    from: i64,
    tz: &Tz,
) -> Option<i64> {
    if every_x_days < 1 {
        return None;
    }
    let mut day = local_day(anchor, tz)?;

    // Skip whole periods that are known to lie before the day of `from`.
    // Keeps the result aligned to the anchor while avoiding a long walk
    // for reminders with an old anchor.
    let days_behind = (local_day(from, tz)? - day).num_days();
    if days_behind > 1 {
        let periods = (days_behind - 1) / every_x_days;
        day = add_days(day, periods.checked_mul(every_x_days)?)?;
    }

    for _ in 0..=DAILY_SEARCH_DAYS {
        if let Some(candidate) = at_time_of_day(day, time, tz) {
            if candidate >= from {
                return Some(candidate);
            }
        }
        day = add_days(day, every_x_days)?;
    }
    None
}
