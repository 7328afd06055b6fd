use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use property_api::database::DatabaseManager;
use property_api::handlers::properties;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = property_api::config::config();
    tracing::info!("Starting Property API in {:?} mode", config.environment);

    if let Err(e) = DatabaseManager::migrate().await {
        panic!("failed to run database migrations: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("PROPERTY_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Property API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(property_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn property_routes() -> Router {
    Router::new()
        .route("/properties", get(properties::list).post(properties::create))
        .route(
            "/properties/:id",
            get(properties::get)
                .put(properties::update)
                .delete(properties::delete),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Property API",
        "version": version,
        "description": "Property listings CRUD API built with Rust (Axum + SQLx)",
        "endpoints": {
            "home": "/",
            "health": "/health",
            "properties": "/properties?skip&take&address&priceMin&priceMax&bedrooms&bathrooms&type&orderBy&order",
            "property": "/properties/:id",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
