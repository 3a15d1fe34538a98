//! The availability resolver.
//!
//! A pure function from (rules, reserved slots, "now", horizon) to the
//! ordered list of bookable days. No I/O, no retained state, inputs never
//! mutated: the same input tuple always yields the same output, so the
//! function is safe to call concurrently with no coordination.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::rules::AvailabilityRules;
use crate::slots::{format_hhmm, parse_hhmm};

/// Horizon used when neither the caller nor the rules supply one.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Upper bound on the horizon, roughly ten years. Keeps a nonsensical
/// `maxDaysAhead` from turning the day loop into a multi-billion-iteration
/// walk.
const MAX_HORIZON_DAYS: u32 = 3660;

/// One day with at least one bookable slot.
///
/// Serialized field names (`fecha`/`horas`) are the booking frontend's wire
/// contract. `times` is deduplicated and ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "horas")]
    pub times: Vec<String>,
}

/// Build the `"YYYY-MM-DD HH:mm"` key a reserved slot is matched under.
/// Membership is exact string equality, nothing more.
pub fn reservation_key(date: &str, time: &str) -> String {
    format!("{} {}", date, time)
}

/// Resolve the bookable slots for one instructor over a horizon of
/// consecutive calendar days starting at `from`'s date.
///
/// Per day: a closed date-range exception suppresses the day outright; the
/// weekly pattern (explicit slots plus range-generated slots) supplies the
/// base set, and a day with no base slots is skipped before its date
/// exception is consulted, so an exception can modify a day's slots but
/// never originate them; a matching date exception then closes the day or
/// removes/adds individual slots; finally, slots starting before
/// `from + leadTimeHours` and slots present in `reserved` are dropped. Days
/// left with no slots are omitted from the output entirely.
///
/// # Arguments
///
/// * `rules` -- The instructor's availability configuration.
/// * `reserved` -- Already-taken `"YYYY-MM-DD HH:mm"` keys (the UI merges its
///   in-progress cart with the remotely fetched occupied list).
/// * `from` -- The concrete "now": day 0 of the horizon and the lead-time
///   anchor. Callers pass the real clock in production and a fixed instant
///   in tests.
/// * `horizon_days` -- Days to evaluate; falls back to `rules.max_days_ahead`,
///   then [`DEFAULT_HORIZON_DAYS`].
pub fn resolve_availability(
    rules: &AvailabilityRules,
    reserved: &HashSet<String>,
    from: NaiveDateTime,
    horizon_days: Option<u32>,
) -> Vec<DayAvailability> {
    let horizon = horizon_days
        .or(rules.max_days_ahead)
        .unwrap_or(DEFAULT_HORIZON_DAYS)
        .min(MAX_HORIZON_DAYS);

    // Saturate absurd lead times instead of overflowing.
    let bookable_after = Duration::try_hours(rules.lead_time_hours)
        .and_then(|lead| from.checked_add_signed(lead))
        .unwrap_or(if rules.lead_time_hours > 0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        });

    let mut days = Vec::new();
    for offset in 0..horizon {
        let Some(day) = from.date().checked_add_signed(Duration::days(i64::from(offset))) else {
            break;
        };
        let date = day.format("%Y-%m-%d").to_string();

        if rules.exceptions.range_closed(&date) {
            continue;
        }

        let weekday = day.weekday().num_days_from_sunday() as u8;
        let mut slots = rules.weekly.slots_for(weekday);
        if slots.is_empty() {
            continue;
        }

        if let Some(exception) = rules.exceptions.for_date(&date) {
            if exception.closed {
                continue;
            }
            for time in &exception.remove_slots {
                if let Some(minute) = parse_hhmm(time) {
                    slots.remove(&minute);
                }
            }
            slots.extend(exception.add_slots.iter().filter_map(|t| parse_hhmm(t)));
        }

        let times: Vec<String> = slots
            .into_iter()
            .filter(|&minute| starts_on_or_after(day, minute, bookable_after))
            .map(format_hhmm)
            .filter(|time| !reserved.contains(&reservation_key(&date, time)))
            .collect();

        if !times.is_empty() {
            days.push(DayAvailability { date, times });
        }
    }
    days
}

fn starts_on_or_after(day: NaiveDate, minute: u32, cutoff: NaiveDateTime) -> bool {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0)
        .is_some_and(|time| day.and_time(time) >= cutoff)
}
