//! Inventory API server
//!
//! Serves the register/login and item endpoints over PostgreSQL, or over an
//! in-memory store when no `DATABASE_URL` is configured.

use std::sync::Arc;

use axum::http::{header, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use inventory_api::cache::MokaItemCache;
use inventory_api::store::{ItemStore, MemoryStore, PgStore, UserStore};
use inventory_api::token::TokenIssuer;
use inventory_api::{create_router, AppState, Config, StartupError};

const DEV_JWT_SECRET: &str = "insecure-development-secret-change-me";

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("inventory_api=info".parse()?);

    // Use JSON format for Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    let config = Config::from_env();
    info!(port = config.port, "Starting inventory-api");

    let (users, items): (Arc<dyn UserStore>, Arc<dyn ItemStore>) = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .connect(database_url)
                .await?;
            inventory_db::schema::ensure_tables(&pool).await?;
            info!("Database connection established");

            let store = Arc::new(PgStore::new(pool));
            let users: Arc<dyn UserStore> = store.clone();
            let items: Arc<dyn ItemStore> = store;
            (users, items)
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            let store = Arc::new(MemoryStore::new());
            let users: Arc<dyn UserStore> = store.clone();
            let items: Arc<dyn ItemStore> = store;
            (users, items)
        }
    };

    let secret = match &config.jwt_secret {
        Some(secret) => secret.clone(),
        None => {
            warn!("JWT_SECRET not set, using a development secret");
            DEV_JWT_SECRET.to_string()
        }
    };
    let tokens = TokenIssuer::new(secret.as_bytes(), config.access_token_ttl);

    let cache = Arc::new(MokaItemCache::new(
        config.item_cache_capacity,
        config.item_cache_ttl,
    ));
    info!(
        ttl_secs = config.item_cache_ttl.as_secs(),
        capacity = config.item_cache_capacity,
        "Item cache ready"
    );

    let state = AppState::new(users, items, cache, tokens);

    // CORS
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let app = create_router(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
