use serde_json::Value;
use std::error::Error;
use std::fmt;

use crate::models::travel_plan::TravelPlan;

#[derive(Debug)]
pub enum PlanParseError {
    NoJsonObject,
    InvalidJson(serde_json::Error),
    MissingTravelPlan,
    InvalidShape(serde_json::Error),
}

impl fmt::Display for PlanParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanParseError::NoJsonObject => {
                write!(f, "No balanced JSON object found in model output")
            }
            PlanParseError::InvalidJson(err) => write!(f, "Model output is not valid JSON: {}", err),
            PlanParseError::MissingTravelPlan => {
                write!(f, "Model output has no top-level \"travelPlan\" key")
            }
            PlanParseError::InvalidShape(err) => {
                write!(f, "travelPlan object has an unusable shape: {}", err)
            }
        }
    }
}

impl Error for PlanParseError {}

/// Cut the raw model output down to the last balanced `{ ... }` region and
/// parse it. The model sometimes appends stray closing braces or commentary
/// after the object; everything past the balance point is dropped. Braces
/// inside string literals (including escaped quotes) do not count toward the
/// depth, so a value like "}" cannot truncate the scan early. Leading prose
/// before the first brace is NOT stripped and will fail the parse.
pub fn extract_json(raw: &str) -> Result<Value, PlanParseError> {
    let trimmed = raw.trim();

    let mut depth: i64 = 0;
    let mut opened = false;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;

    for (idx, ch) in trimmed.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => {
                depth += 1;
                opened = true;
            }
            '}' => {
                depth -= 1;
                if opened && depth == 0 {
                    end = Some(idx);
                }
            }
            _ => {}
        }
    }

    let end = end.ok_or(PlanParseError::NoJsonObject)?;
    serde_json::from_str(&trimmed[..=end]).map_err(PlanParseError::InvalidJson)
}

/// Reduce raw model output to a TravelPlan. The top-level `travelPlan` key is
/// mandatory; its absence is the same failure class as unparseable output.
pub fn parse_travel_plan(raw: &str) -> Result<TravelPlan, PlanParseError> {
    let value = extract_json(raw)?;
    let plan = value
        .get("travelPlan")
        .ok_or(PlanParseError::MissingTravelPlan)?;
    serde_json::from_value(plan.clone()).map_err(PlanParseError::InvalidShape)
}
