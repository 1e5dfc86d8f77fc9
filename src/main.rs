use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use wanderplan_api::db;
use wanderplan_api::middleware;
use wanderplan_api::routes;
use wanderplan_api::services::gemini_service::GeminiClient;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    let gemini = GeminiClient::from_env().expect("GEMINI_API_KEY must be set");
    println!("Gemini client ready (model: {})", gemini.model_name());

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .app_data(web::Data::new(gemini.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    // Public routes
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::account::auth::signup))
                            .route("/signin", web::post().to(routes::account::auth::signin))
                            .service(
                                web::scope("").wrap(middleware::auth::AuthMiddleware).route(
                                    "/session",
                                    web::get().to(routes::account::auth::user_session),
                                ),
                            ),
                    )
                    // Protected routes
                    .service(
                        web::scope("/trips")
                            .wrap(middleware::auth::AuthMiddleware)
                            .route("/generate", web::post().to(routes::trip::generate))
                            .route("", web::get().to(routes::trip::get_all))
                            .route("/{doc_id}", web::get().to(routes::trip::get_by_id))
                            .route("/{doc_id}", web::delete().to(routes::trip::delete)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
