use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::travel_plan::TravelPlan;

/// What the traveler asked for, as collected by the client app before it
/// calls `/api/trips/generate`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TripParameters {
    pub destination: Destination,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub party: PartyComposition,
    pub budget: BudgetTier,
    pub lodging: Option<String>,
    pub trip_pace: Option<TripPace>,
}

/// Either a concrete place the traveler picked from autocomplete, or an
/// abstract category ("beach", "mountains") they want suggestions for.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "name", rename_all = "lowercase")]
pub enum Destination {
    Place(String),
    Category(String),
}

impl Destination {
    pub fn name(&self) -> &str {
        match self {
            Destination::Place(name) => name,
            Destination::Category(name) => name,
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, Destination::Category(_))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum PartyComposition {
    Named(PartyType),
    Headcount(u32),
}

impl PartyComposition {
    pub fn label(&self) -> String {
        match self {
            PartyComposition::Named(PartyType::Solo) => "a solo traveler".to_string(),
            PartyComposition::Named(PartyType::Couple) => "a couple".to_string(),
            PartyComposition::Named(PartyType::Group) => "a group".to_string(),
            PartyComposition::Headcount(n) => format!("a group of {}", n),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PartyType {
    Solo,
    Couple,
    Group,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Low,
    Average,
    Luxury,
}

impl BudgetTier {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Average => "average",
            BudgetTier::Luxury => "luxury",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TripPace {
    Relaxed,
    Moderate,
    Adventure,
}

impl TripPace {
    pub fn label(&self) -> &'static str {
        match self {
            TripPace::Relaxed => "relaxed",
            TripPace::Moderate => "moderate",
            TripPace::Adventure => "adventure",
        }
    }

    /// Typical number of places to schedule per day for this pace
    pub fn places_per_day(&self) -> usize {
        match self {
            TripPace::Relaxed => 2,
            TripPace::Moderate => 3,
            TripPace::Adventure => 5,
        }
    }
}

impl TripParameters {
    /// Inclusive day count of the trip (arrival and departure day both count).
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn total_nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.end_date < self.start_date {
            return Err("End date must not precede start date".to_string());
        }
        Ok(())
    }

    /// Snapshot of the parameters as they are stored alongside the plan,
    /// with dates pinned down to calendar-date strings.
    pub fn normalized(&self) -> StoredTripData {
        StoredTripData {
            destination: self.destination.clone(),
            start_date: self.start_date.format("%Y-%m-%d").to_string(),
            end_date: self.end_date.format("%Y-%m-%d").to_string(),
            total_days: self.total_days(),
            total_nights: self.total_nights(),
            party: self.party.clone(),
            budget: self.budget.clone(),
            lodging: self.lodging.clone(),
            trip_pace: self.trip_pace.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredTripData {
    pub destination: Destination,
    pub start_date: String,
    pub end_date: String,
    pub total_days: i64,
    pub total_nights: i64,
    pub party: PartyComposition,
    pub budget: BudgetTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lodging: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_pace: Option<TripPace>,
}

/// One generated trip, written once and never partially updated. A
/// regeneration inserts a brand-new document instead of mutating this one.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PersistedTrip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub doc_id: String,
    pub user_email: String,
    pub trip_data: StoredTripData,
    pub trip_plan: TravelPlan,
    pub created_at: Option<DateTime<Utc>>,
}
