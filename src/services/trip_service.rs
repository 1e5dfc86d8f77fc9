use chrono::Utc;
use mongodb::{Client, Collection};
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::travel_plan::TravelPlan;
use crate::models::trip::{PersistedTrip, TripParameters};

pub const TRIP_DATABASE: &str = "Travelers";
pub const TRIP_COLLECTION: &str = "Trips";

static DOC_ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug)]
pub enum TripStoreError {
    WriteFailed(mongodb::error::Error),
}

impl fmt::Display for TripStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripStoreError::WriteFailed(err) => write!(f, "Failed to write trip: {}", err),
        }
    }
}

impl Error for TripStoreError {}

impl From<mongodb::error::Error> for TripStoreError {
    fn from(err: mongodb::error::Error) -> Self {
        TripStoreError::WriteFailed(err)
    }
}

/// Timestamp-based document id. Uniqueness only needs to hold per user; the
/// sequence suffix keeps same-millisecond writes apart.
pub fn new_doc_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let seq = DOC_ID_SEQUENCE.fetch_add(1, Ordering::Relaxed) % 10_000;
    format!("{}{:04}", millis, seq)
}

/// Insert one brand-new trip document for this user. Regenerating a trip
/// inserts again under a fresh id; nothing here ever updates in place.
pub async fn save_trip(
    client: &Client,
    user_email: &str,
    plan: TravelPlan,
    params: &TripParameters,
) -> Result<String, TripStoreError> {
    let collection: Collection<PersistedTrip> =
        client.database(TRIP_DATABASE).collection(TRIP_COLLECTION);

    let doc_id = new_doc_id();
    let trip = PersistedTrip {
        id: None,
        doc_id: doc_id.clone(),
        user_email: user_email.to_string(),
        trip_data: params.normalized(),
        trip_plan: plan,
        created_at: Some(Utc::now()),
    };

    collection.insert_one(&trip).await?;

    println!("Saved trip {} for {}", doc_id, user_email);
    Ok(doc_id)
}
