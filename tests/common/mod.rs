use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, Responder};

/// Builds the route tree with mock handlers so the suite can assert on the
/// public contract without a database or a model key.
pub struct TestApp;

impl TestApp {
    pub fn new() -> Self {
        Self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .route("/", web::get().to(|| async { "Wanderplan API is running" }))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(signup))
                            .route("/signin", web::post().to(signin))
                            .route("/session", web::get().to(unauthorized_handler)),
                    )
                    .service(
                        web::scope("/trips")
                            .route("/generate", web::post().to(unauthorized_handler))
                            .route("", web::get().to(unauthorized_handler))
                            .route("/{doc_id}", web::get().to(unauthorized_handler))
                            .route("/{doc_id}", web::delete().to(unauthorized_handler)),
                    ),
            )
    }
}

// Mock handler functions for testing
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

async fn signup() -> impl Responder {
    HttpResponse::BadRequest().json(serde_json::json!({"error": "Invalid input"}))
}

async fn signin() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Invalid credentials"}))
}

async fn unauthorized_handler() -> impl Responder {
    HttpResponse::Unauthorized().json(serde_json::json!({"error": "Unauthorized"}))
}

pub fn get_test_email() -> String {
    "test@example.com".to_string()
}
