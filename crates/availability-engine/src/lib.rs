//! # availability-engine
//!
//! Deterministic rule-based slot resolution for instructor booking calendars.
//!
//! Given a per-instructor weekly recurrence pattern, date and date-range
//! exceptions, a lead-time constraint, and the set of already-reserved
//! slots, [`resolve_availability`] computes the ordered list of bookable
//! `(date, time)` slots over a future horizon. The engine is a pure
//! function: no I/O, no retained state, inputs never mutated.
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::HashSet;
//! use availability_engine::{resolve_availability, AvailabilityRules};
//!
//! // Mondays at 10:00 and 12:00, nothing else configured.
//! let rules: AvailabilityRules = serde_json::from_str(
//!     r#"{ "weekly": { "slotsByWeekday": { "1": ["10:00", "12:00"] } } }"#,
//! )
//! .unwrap();
//!
//! let reserved: HashSet<String> = ["2025-01-06 12:00".to_string()].into();
//! let from = "2025-01-05T08:00:00".parse().unwrap();
//!
//! let days = resolve_availability(&rules, &reserved, from, Some(7));
//! assert_eq!(days.len(), 1);
//! assert_eq!(days[0].date, "2025-01-06");
//! assert_eq!(days[0].times, ["10:00"]);
//! ```
//!
//! ## Modules
//!
//! - [`rules`] -- per-instructor configuration (weekly pattern, exceptions)
//! - [`slots`] -- minute-of-day parsing and slot-set mechanics
//! - [`resolver`] -- the per-day resolution pipeline
//! - [`error`] -- configuration validation errors

pub mod error;
pub mod resolver;
pub mod rules;
pub mod slots;

pub use error::RulesError;
pub use resolver::{resolve_availability, reservation_key, DayAvailability, DEFAULT_HORIZON_DAYS};
pub use rules::{
    AvailabilityRules, DateException, DateRangeException, Exceptions, SlotRange, WeeklyPattern,
};
