use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use futures::TryStreamExt;
use mongodb::Client;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::trip::{PersistedTrip, TripParameters};
use crate::services::gemini_service::GeminiClient;
use crate::services::prompt_service;
use crate::services::trip_generation_service::{CancellationFlag, TripGenerator};
use crate::services::trip_service::{self, TRIP_COLLECTION, TRIP_DATABASE};

/*
    /api/trips/generate
*/
pub async fn generate(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    model: web::Data<GeminiClient>,
    input: web::Json<TripParameters>,
) -> impl Responder {
    let client = data.into_inner();
    let params = input.into_inner();

    if let Err(reason) = params.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": reason }));
    }

    let template = prompt_service::select_template(&params);
    let prompt = prompt_service::render(template, &params);
    println!(
        "Generating trip to {} for {}",
        params.destination.name(),
        claims.sub
    );

    let generator = TripGenerator::new(model.get_ref().clone());
    let cancel = CancellationFlag::new();

    let plan = match generator.generate_plan(&prompt, &cancel).await {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("Trip generation failed: {}", err);
            return HttpResponse::BadGateway()
                .json(serde_json::json!({ "error": err.to_string() }));
        }
    };

    match trip_service::save_trip(&client, &claims.sub, plan.clone(), &params).await {
        Ok(doc_id) => HttpResponse::Ok().json(serde_json::json!({
            "docId": doc_id,
            "tripPlan": plan,
        })),
        Err(err) => {
            eprintln!("Failed to persist trip: {}", err);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Failed to save the generated trip." }))
        }
    }
}

/*
    /api/trips
*/
pub async fn get_all(claims: web::ReqData<Claims>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<PersistedTrip> =
        client.database(TRIP_DATABASE).collection(TRIP_COLLECTION);

    let cursor = collection
        .find(doc! { "userEmail": &claims.sub })
        .sort(doc! { "createdAt": -1 })
        .await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<PersistedTrip>>().await {
            Ok(trips) => HttpResponse::Ok().json(trips),
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to retrieve trips")
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trips")
        }
    }
}

/*
    /api/trips/{doc_id}
*/
pub async fn get_by_id(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<PersistedTrip> =
        client.database(TRIP_DATABASE).collection(TRIP_COLLECTION);

    let doc_id = path.into_inner();
    let filter = doc! { "docId": &doc_id, "userEmail": &claims.sub };

    match collection.find_one(filter).await {
        Ok(Some(trip)) => HttpResponse::Ok().json(trip),
        Ok(None) => HttpResponse::NotFound().body("Trip not found"),
        Err(err) => {
            eprintln!("Failed to retrieve trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve trip")
        }
    }
}

/*
    /api/trips/{doc_id} (DELETE)
*/
pub async fn delete(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<PersistedTrip> =
        client.database(TRIP_DATABASE).collection(TRIP_COLLECTION);

    let doc_id = path.into_inner();
    let filter = doc! { "docId": &doc_id, "userEmail": &claims.sub };

    match collection.delete_one(filter).await {
        Ok(result) => {
            if result.deleted_count == 0 {
                HttpResponse::NotFound().body("Trip not found")
            } else {
                HttpResponse::Ok().body("Trip deleted")
            }
        }
        Err(err) => {
            eprintln!("Failed to delete trip: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete trip")
        }
    }
}
