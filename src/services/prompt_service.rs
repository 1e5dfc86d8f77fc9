use crate::models::trip::{Destination, TripParameters};

/// Template used when the traveler picked a concrete place.
pub const PLACE_TEMPLATE: &str = "Generate a travel plan for location: {destination}, \
for {totalDays} days and {totalNights} nights, for {party} with a {budget} budget. \
Give me flight details with the airline name, price and booking url. \
Give me a list of hotel options with the hotel name, address, price per night, rating, \
geo coordinates, description and booking url. \
Give me a day-by-day itinerary of places to visit near {destination} with the place name, \
details, ticket price, geo coordinates and url, with the best time to visit each day, \
for {totalDays} days and {totalNights} nights.{lodging}{pace} \
Respond with a single JSON object with a top-level \"travelPlan\" key.";

/// Template used when the traveler only picked a destination category.
pub const CATEGORY_TEMPLATE: &str = "Suggest a destination matching \"{destination}\" and \
generate a travel plan for it, for {totalDays} days and {totalNights} nights, \
for {party} with a {budget} budget. \
Give me flight details with the airline name, price and booking url. \
Give me a list of hotel options with the hotel name, address, price per night, rating, \
geo coordinates, description and booking url. \
Give me a day-by-day itinerary of places to visit with the place name, details, \
ticket price, geo coordinates and url, with the best time to visit each day, \
for {totalDays} days and {totalNights} nights.{lodging}{pace} \
Respond with a single JSON object with a top-level \"travelPlan\" key.";

/// Every placeholder the two templates are allowed to use.
pub const KNOWN_TOKENS: &[&str] = &[
    "destination",
    "totalDays",
    "totalNights",
    "party",
    "budget",
    "lodging",
    "pace",
];

pub fn select_template(params: &TripParameters) -> &'static str {
    match params.destination {
        Destination::Place(_) => PLACE_TEMPLATE,
        Destination::Category(_) => CATEGORY_TEMPLATE,
    }
}

/// Substitute every known placeholder with its string form. Missing optional
/// parameters become the empty string rather than an error; this is a
/// deliberate lenient-substitution policy.
pub fn render(template: &str, params: &TripParameters) -> String {
    let mut rendered = template.to_string();
    for (token, value) in placeholder_values(params) {
        rendered = rendered.replace(&format!("{{{}}}", token), &value);
    }
    rendered
}

fn placeholder_values(params: &TripParameters) -> Vec<(&'static str, String)> {
    vec![
        ("destination", params.destination.name().to_string()),
        ("totalDays", params.total_days().to_string()),
        ("totalNights", params.total_nights().to_string()),
        ("party", params.party.label()),
        ("budget", params.budget.label().to_string()),
        (
            "lodging",
            params
                .lodging
                .as_ref()
                .map(|lodging| format!(" Preferred lodging: {}.", lodging))
                .unwrap_or_default(),
        ),
        (
            "pace",
            params
                .trip_pace
                .as_ref()
                .map(|pace| {
                    format!(
                        " Keep the pace {}, with about {} places per day.",
                        pace.label(),
                        pace.places_per_day()
                    )
                })
                .unwrap_or_default(),
        ),
    ]
}
