//! WASM bindings for availability-engine.
//!
//! Exposes the availability resolver to the JavaScript booking UI via
//! `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p availability-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/availability-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/availability_engine_wasm.wasm
//! ```

use std::collections::HashSet;

use availability_engine::AvailabilityRules;
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly inputs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// One already-reserved slot as the UI supplies it: either a bare
/// `"YYYY-MM-DD HH:mm"` key (the cart's locally-selected slots) or a
/// `{fecha, hora}` row from the remote occupied-slot endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReservedInput {
    Key(String),
    Row { fecha: String, hora: String },
}

impl ReservedInput {
    fn into_key(self) -> String {
        match self {
            ReservedInput::Key(key) => key,
            ReservedInput::Row { fecha, hora } => {
                availability_engine::reservation_key(&fecha, &hora)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helper: parse the "now" instant the UI passes
// ---------------------------------------------------------------------------

/// Parse a datetime string into a `NaiveDateTime`.
///
/// Accepts naive local datetimes ("2025-01-05T08:00:00", seconds optional)
/// and RFC 3339. An RFC 3339 offset is dropped, since every comparison in
/// the engine is local-naive.
fn parse_from(s: &str) -> Result<NaiveDateTime, JsValue> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_local())
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Resolve the bookable slots for one instructor.
///
/// `rules_json` is the instructor's availability-rules object. `reserved_json`
/// is a JSON array mixing bare `"YYYY-MM-DD HH:mm"` strings and
/// `{fecha, hora}` rows; both forms are merged into one reserved set.
/// Returns a JSON string containing the day rows, `[{fecha, horas: [...]}]`,
/// ascending by date.
///
/// # Arguments
/// - `rules_json` -- Availability rules as JSON (camelCase field names)
/// - `reserved_json` -- JSON array of reserved slots, strings or rows
/// - `from` -- The concrete "now" (naive local datetime or RFC 3339)
/// - `horizon_days` -- Optional horizon; falls back to the rules'
///   `maxDaysAhead`, then the engine default of 30
#[wasm_bindgen(js_name = "resolveAvailability")]
pub fn resolve_availability(
    rules_json: &str,
    reserved_json: &str,
    from: &str,
    horizon_days: Option<u32>,
) -> Result<String, JsValue> {
    let rules: AvailabilityRules = serde_json::from_str(rules_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid rules JSON: {}", e)))?;
    let inputs: Vec<ReservedInput> = serde_json::from_str(reserved_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid reserved-slots JSON: {}", e)))?;
    let reserved: HashSet<String> = inputs.into_iter().map(ReservedInput::into_key).collect();
    let from = parse_from(from)?;

    let days = availability_engine::resolve_availability(&rules, &reserved, from, horizon_days);

    serde_json::to_string(&days)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Check an availability-rules object for malformed times, dates, and
/// degenerate slot ranges.
///
/// Resolution never needs this (malformed entries simply contribute no
/// slots); config tooling calls it so authoring mistakes surface as errors
/// instead of silently missing availability.
#[wasm_bindgen(js_name = "validateRules")]
pub fn validate_rules(rules_json: &str) -> Result<(), JsValue> {
    let rules: AvailabilityRules = serde_json::from_str(rules_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid rules JSON: {}", e)))?;
    rules
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
