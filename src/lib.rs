//! Plant floor API library
//!
//! Storage tracking, production reporting, defect tracking and work order
//! lookup for a manufacturing operations backend.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware_helpers;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, put},
    Router,
};
use sea_orm::DatabaseConnection;
use slog::Logger;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

use crate::logging::LoggingState;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config);
        Self {
            db,
            config,
            services,
        }
    }
}

/// Routes served under `/api/v1`.
pub fn api_v1_routes() -> Router<AppState> {
    let storages = Router::new()
        .route(
            "/stocks/storages",
            get(handlers::storages::search_storages).post(handlers::storages::create_storage),
        )
        .route(
            "/stocks/storages/:storage_code/destroy",
            put(handlers::storages::destroy_storage),
        )
        .route(
            "/stocks/storages/:storage_code",
            axum::routing::delete(handlers::storages::delete_storage),
        );

    let production = Router::new()
        .route(
            "/production/reports",
            get(handlers::production::get_production_reports)
                .post(handlers::production::create_report),
        )
        .route(
            "/production/reports/:code/detail",
            get(handlers::production::get_production_details),
        )
        .route(
            "/production/reports/:code/defects",
            get(handlers::production::get_defect_details),
        )
        .route(
            "/production/total-quantity",
            get(handlers::production::get_total_production_quantity),
        );

    let work_orders = Router::new().route(
        "/work-orders/:work_order_code",
        get(handlers::work_orders::get_work_order),
    );

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(storages)
        .merge(production)
        .merge(work_orders)
}

/// Build the CORS layer from configuration.
///
/// Returns `None` when no origins are configured and permissive CORS is not
/// allowed for the current environment.
pub fn cors_layer(cfg: &config::AppConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    if !origins.is_empty() {
        Some(
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else if cfg.should_allow_permissive_cors() {
        Some(CorsLayer::permissive())
    } else {
        None
    }
}

/// Full application router: v1 API, Swagger UI and the middleware stack.
pub fn build_router(state: AppState, logger: Logger) -> Router {
    let cors = cors_layer(&state.config).unwrap_or_else(CorsLayer::new);
    let timeout = state.config.request_timeout();
    let logging_state = Arc::new(LoggingState::new(logger));

    Router::<AppState>::new()
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .layer(middleware::from_fn_with_state(
            logging_state,
            logging::logging_middleware,
        ))
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(cors)
        // Outermost so every layer above sees the request id
        .layer(middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
