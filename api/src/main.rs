//! Kitchen & Menu API Server
//!
//! Transactional command layer for a restaurant: the kitchen advances
//! orders through their preparation lifecycle, the menu side manages
//! dishes and promotions.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;

use adapters::{
    ensure_schema, PostgresDishRepository, PostgresOrderRepository, PostgresPromotionRepository,
    PostgresTransactor,
};
use app::{KitchenService, MenuService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub kitchen_service: Arc<KitchenService<PostgresOrderRepository, PostgresTransactor>>,
    pub menu_service: Arc<
        MenuService<PostgresDishRepository, PostgresPromotionRepository, PostgresTransactor>,
    >,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Menu
        .route(
            "/dishes",
            post(handlers::create_dish).get(handlers::list_dishes),
        )
        .route(
            "/dishes/:id",
            get(handlers::get_dish)
                .put(handlers::update_dish)
                .patch(handlers::update_dish)
                .delete(handlers::delete_dish),
        )
        .route(
            "/promotions",
            post(handlers::create_promotion).get(handlers::list_promotions),
        )
        .route("/promotions/:id", get(handlers::get_promotion))
        .route(
            "/promotions/:id/activate",
            post(handlers::activate_promotion),
        )
        // Kitchen
        .route("/orders", post(handlers::accept_order))
        .route("/orders/:id", get(handlers::get_order))
        .route(
            "/orders/:id/start-preparing",
            post(handlers::start_preparing),
        )
        .route(
            "/orders/:id/complete-preparing",
            post(handlers::complete_preparing),
        )
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_state(db: sea_orm::DatabaseConnection) -> AppState {
    let transactor = Arc::new(PostgresTransactor::new(db.clone()));

    let kitchen_service = Arc::new(KitchenService::new(
        Arc::new(PostgresOrderRepository::new(db.clone())),
        transactor.clone(),
    ));
    let menu_service = Arc::new(MenuService::new(
        Arc::new(PostgresDishRepository::new(db.clone())),
        Arc::new(PostgresPromotionRepository::new(db)),
        transactor,
    ));

    AppState {
        kitchen_service,
        menu_service,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{},kitchen_menu_api=debug", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Kitchen & Menu API...");

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    if config.auto_migrate {
        ensure_schema(&db)
            .await
            .context("Failed to create database schema")?;
    }

    let app = router(build_state(db));

    // Start server
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
