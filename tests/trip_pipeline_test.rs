use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use serial_test::serial;

use wanderplan_api::models::trip::{
    BudgetTier, Destination, PartyComposition, PartyType, TripParameters,
};
use wanderplan_api::services::gemini_service::GeminiError;
use wanderplan_api::services::prompt_service;
use wanderplan_api::services::trip_generation_service::{
    CancellationFlag, GenerationConfig, TextModel, TripGenerator,
};

// Raw model output with the duplicated trailing brace the model is observed
// to emit.
const PARIS_RESPONSE: &str = r#"{"travelPlan":{
    "destination":"Paris, France",
    "budget":"average",
    "flightDetails":{"airlineName":"Air France","price":"$430","bookingUrl":"https://www.airfrance.com"},
    "hotels":[
        {"hotelName":"Hotel Lutece","hotelAddress":"65 Rue Saint-Louis en l'Ile","pricePerNight":190,
         "rating":4.4,"geoCoordinates":{"latitude":48.8515,"longitude":2.3572},
         "description":"Small hotel on the Ile Saint-Louis","bookingUrl":"https://example.com/lutece"}
    ],
    "itinerary":[
        {"day":1,"bestTimeToVisit":"morning","plan":[
            {"placeName":"Louvre","placeDetails":"World's largest art museum","ticketPrice":22,
             "geoCoordinates":{"latitude":48.8606,"longitude":2.3376},"url":"https://www.louvre.fr"}
        ]},
        {"day":2,"bestTimeToVisit":"afternoon","plan":[
            {"placeName":"Eiffel Tower","ticketPrice":"29.40"}
        ]}
    ]
}}}"#;

fn paris_params() -> TripParameters {
    TripParameters {
        destination: Destination::Place("Paris, France".to_string()),
        start_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 9, 3).unwrap(),
        party: PartyComposition::Named(PartyType::Couple),
        budget: BudgetTier::Average,
        lodging: None,
        trip_pace: None,
    }
}

/// Fails with an overload error until the scripted success call.
struct FlakyModel {
    calls: AtomicU32,
    succeed_on: u32,
    payload: &'static str,
}

impl TextModel for &FlakyModel {
    async fn invoke(&self, _prompt: &str) -> Result<String, GeminiError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call < self.succeed_on {
            Err(GeminiError::ApiError {
                status: 503,
                message: "The model is overloaded".to_string(),
            })
        } else {
            Ok(self.payload.to_string())
        }
    }
}

#[actix_rt::test]
#[serial]
async fn test_render_then_generate_end_to_end() {
    let params = paris_params();
    let prompt = prompt_service::render(prompt_service::select_template(&params), &params);
    assert!(prompt.contains("Paris, France"));
    assert!(prompt.contains("3 days and 2 nights"));

    let model = FlakyModel {
        calls: AtomicU32::new(0),
        succeed_on: 1,
        payload: PARIS_RESPONSE,
    };
    let generator = TripGenerator::new(&model);

    let plan = generator
        .generate_plan(&prompt, &CancellationFlag::new())
        .await
        .unwrap();

    assert_eq!(plan.destination.as_deref(), Some("Paris, France"));
    assert_eq!(plan.hotels.len(), 1);
    assert_eq!(plan.hotels[0].name.as_deref(), Some("Hotel Lutece"));
    assert_eq!(plan.itinerary.len(), 2);
    assert_eq!(
        plan.itinerary[0].places[0].name.as_deref(),
        Some("Louvre")
    );
    assert_eq!(
        plan.flight.as_ref().and_then(|f| f.airline.as_deref()),
        Some("Air France")
    );
}

#[actix_rt::test]
#[serial]
async fn test_transient_overload_is_retried_until_success() {
    let params = paris_params();
    let prompt = prompt_service::render(prompt_service::select_template(&params), &params);

    let model = FlakyModel {
        calls: AtomicU32::new(0),
        succeed_on: 3,
        payload: PARIS_RESPONSE,
    };
    let config = GenerationConfig {
        max_attempts: 4,
        base_delay: Duration::from_millis(10),
    };
    let generator = TripGenerator::with_config(&model, config);

    let plan = generator
        .generate_plan(&prompt, &CancellationFlag::new())
        .await
        .unwrap();

    assert_eq!(model.calls.load(Ordering::SeqCst), 3);
    assert_eq!(plan.destination.as_deref(), Some("Paris, France"));
}

#[actix_rt::test]
#[serial]
async fn test_generated_plan_survives_persistence_shape() {
    use wanderplan_api::models::trip::PersistedTrip;
    use wanderplan_api::services::json_repair;

    let params = paris_params();
    let plan = json_repair::parse_travel_plan(PARIS_RESPONSE).unwrap();

    let trip = PersistedTrip {
        id: None,
        doc_id: "17550000000000001".to_string(),
        user_email: "traveler@example.com".to_string(),
        trip_data: params.normalized(),
        trip_plan: plan,
        created_at: None,
    };

    // The stored document and the one read back must describe the same trip.
    let stored = serde_json::to_value(&trip).unwrap();
    let reloaded: PersistedTrip = serde_json::from_value(stored.clone()).unwrap();

    assert_eq!(stored["tripPlan"]["destination"], "Paris, France");
    assert_eq!(stored["tripData"]["totalNights"], 2);
    assert_eq!(reloaded.doc_id, trip.doc_id);
    assert_eq!(
        reloaded.trip_plan.hotels[0].name.as_deref(),
        Some("Hotel Lutece")
    );
}
