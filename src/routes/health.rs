use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(client: web::Data<Arc<Client>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&client).await;
    health
        .services
        .insert("mongodb".to_string(), mongo_result.clone());

    let gemini_result = check_gemini();
    health
        .services
        .insert("gemini".to_string(), gemini_result.clone());

    let jwt_result = check_jwt();
    health.services.insert("jwt".to_string(), jwt_result.clone());

    // If any service is not ok, the overall status is degraded
    if mongo_result.status != "ok" || gemini_result.status != "ok" || jwt_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(client: &web::Data<Arc<Client>>) -> ServiceStatus {
    match client
        .database("Travelers")
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            eprintln!("MongoDB health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

fn check_gemini() -> ServiceStatus {
    // Just validate key existence for the basic check
    match env::var("GEMINI_API_KEY") {
        Ok(key) => {
            let masked_key = if key.len() > 8 {
                format!("{}***{}", &key[0..4], &key[key.len() - 4..])
            } else {
                "***".to_string()
            };

            ServiceStatus {
                status: "ok".to_string(),
                details: Some(format!("Gemini API key configured ({})", masked_key)),
            }
        }
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some("GEMINI_API_KEY not configured".to_string()),
        },
    }
}

fn check_jwt() -> ServiceStatus {
    match env::var("JWT_SECRET") {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("JWT secret configured".to_string()),
        },
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some("JWT_SECRET not configured".to_string()),
        },
    }
}
