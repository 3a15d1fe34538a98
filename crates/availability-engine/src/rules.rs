//! Per-instructor availability configuration.
//!
//! The rules objects are JSON-shaped data bundled alongside the booking
//! frontend: field names serialize in camelCase and every field is defaulted
//! so partial configuration deserializes. Weekday keys run
//! 0=Sunday .. 6=Saturday; a key outside that range simply never matches.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};
use crate::slots::{expand_steps, parse_hhmm};

/// Everything the resolver needs to know about one instructor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityRules {
    /// IANA identifier, informational only. Every comparison the engine
    /// makes is local-naive.
    pub timezone: String,
    /// Minimum advance notice, in hours, before a slot becomes bookable.
    pub lead_time_hours: i64,
    /// Reserved for future use; carried through (de)serialization but never
    /// enforced by the resolver.
    pub buffer_min_between_sessions: i64,
    /// Horizon fallback when the caller does not pass one.
    pub max_days_ahead: Option<u32>,
    pub weekly: WeeklyPattern,
    pub exceptions: Exceptions,
}

/// Recurring by-weekday definition of offerable time slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyPattern {
    /// Explicit "HH:mm" slots per weekday.
    pub slots_by_weekday: BTreeMap<u8, Vec<String>>,
    /// Generator-based slots per weekday; unioned with the explicit ones.
    pub ranges_by_weekday: BTreeMap<u8, Vec<SlotRange>>,
}

/// Generates equally spaced "HH:mm" slots from `start`, stepping by
/// `every_min`, while the nominal session fits before `end`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlotRange {
    pub start: String,
    pub end: String,
    pub every_min: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Exceptions {
    pub dates: Vec<DateException>,
    pub ranges: Vec<DateRangeException>,
}

/// A single calendar date's override of the weekly-derived slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateException {
    /// "YYYY-MM-DD" this override applies to.
    pub date: String,
    pub closed: bool,
    pub add_slots: Vec<String>,
    pub remove_slots: Vec<String>,
}

/// An inclusive window of calendar dates that, when `closed`, fully
/// suppresses availability for every day it covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateRangeException {
    pub start: String,
    pub end: String,
    pub closed: bool,
}

impl WeeklyPattern {
    /// Derive the offerable minute-of-day set for one weekday: the union of
    /// the explicit slots and every range-generated slot. Malformed entries
    /// contribute nothing.
    pub fn slots_for(&self, weekday: u8) -> BTreeSet<u32> {
        let mut slots = BTreeSet::new();
        if let Some(explicit) = self.slots_by_weekday.get(&weekday) {
            slots.extend(explicit.iter().filter_map(|s| parse_hhmm(s)));
        }
        if let Some(ranges) = self.ranges_by_weekday.get(&weekday) {
            for range in ranges {
                if let (Some(start), Some(end)) = (parse_hhmm(&range.start), parse_hhmm(&range.end))
                {
                    expand_steps(start, end, range.every_min, &mut slots);
                }
            }
        }
        slots
    }
}

impl Exceptions {
    /// Whether any closed date-range covers `date`. Bounds are inclusive;
    /// lexical comparison is chronological for zero-padded ISO dates.
    pub fn range_closed(&self, date: &str) -> bool {
        self.ranges
            .iter()
            .any(|r| r.closed && r.start.as_str() <= date && date <= r.end.as_str())
    }

    /// The single-date override for `date`, if one exists.
    pub fn for_date(&self, date: &str) -> Option<&DateException> {
        self.dates.iter().find(|e| e.date == date)
    }
}

impl AvailabilityRules {
    /// Check the configuration for malformed times, dates, and degenerate
    /// ranges, reporting the first problem found.
    ///
    /// Advisory: the resolver never calls this and stays total over
    /// malformed input (bad entries contribute zero slots). Shells run it at
    /// config load so authoring mistakes surface as errors instead of
    /// silently missing availability.
    pub fn validate(&self) -> Result<()> {
        for times in self.weekly.slots_by_weekday.values() {
            for time in times {
                check_time(time)?;
            }
        }
        for ranges in self.weekly.ranges_by_weekday.values() {
            for range in ranges {
                let start = check_time(&range.start)?;
                let end = check_time(&range.end)?;
                if range.every_min <= 0 {
                    return Err(RulesError::NonPositiveStep(range.every_min));
                }
                if start >= end {
                    return Err(RulesError::EmptyRange {
                        start: range.start.clone(),
                        end: range.end.clone(),
                    });
                }
            }
        }
        for exception in &self.exceptions.dates {
            check_date(&exception.date)?;
            for time in exception.add_slots.iter().chain(&exception.remove_slots) {
                check_time(time)?;
            }
        }
        for range in &self.exceptions.ranges {
            check_date(&range.start)?;
            check_date(&range.end)?;
        }
        Ok(())
    }
}

fn check_time(s: &str) -> Result<u32> {
    parse_hhmm(s).ok_or_else(|| RulesError::InvalidTime(s.to_string()))
}

/// Dates must be zero-padded "YYYY-MM-DD": exact matching and lexical range
/// containment both depend on the padding, so the lenient forms chrono would
/// otherwise accept are rejected here.
fn check_date(s: &str) -> Result<NaiveDate> {
    if s.len() != 10 {
        return Err(RulesError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RulesError::InvalidDate(s.to_string()))
}
