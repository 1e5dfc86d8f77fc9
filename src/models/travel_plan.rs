use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Itinerary synthesized by the text model. The model is prompted for this
/// shape but not trusted to honor it, so every field is best-effort and
/// unknown keys are carried through `extra` instead of being dropped.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct TravelPlan {
    pub destination: Option<String>,
    pub budget: Option<String>,
    #[serde(alias = "flightDetails")]
    pub flight: Option<FlightDetails>,
    #[serde(alias = "hotelOptions")]
    pub hotels: Vec<Hotel>,
    #[serde(alias = "dailyItinerary")]
    pub itinerary: Vec<DayPlan>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FlightDetails {
    #[serde(alias = "airlineName")]
    pub airline: Option<String>,
    pub price: Option<NumberOrText>,
    pub booking_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    #[serde(alias = "hotelName")]
    pub name: Option<String>,
    #[serde(alias = "hotelAddress")]
    pub address: Option<String>,
    pub price_per_night: Option<NumberOrText>,
    pub rating: Option<NumberOrText>,
    #[serde(alias = "geoCoordinates")]
    pub coordinates: Option<GeoCoordinates>,
    pub description: Option<String>,
    pub booking_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DayPlan {
    pub day: Option<u32>,
    pub best_time_to_visit: Option<String>,
    #[serde(alias = "plan")]
    pub places: Vec<Place>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
    #[serde(alias = "placeName")]
    pub name: Option<String>,
    #[serde(alias = "placeDetails")]
    pub details: Option<String>,
    pub ticket_price: Option<NumberOrText>,
    #[serde(alias = "geoCoordinates")]
    pub coordinates: Option<GeoCoordinates>,
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct GeoCoordinates {
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
}

/// The model sometimes quotes numeric fields ("$120" instead of 120).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}
