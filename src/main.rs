mod config;
mod errors;
mod extractors;
mod handlers;
mod middleware;
mod models;
mod services;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    config::Config,
    services::{JwtService, RedisService},
};

// Shared application state: the document store and the token service.
pub type AppState = (RedisService, JwtService);

#[tokio::main]
async fn main() {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().expect("Failed to load configuration");

    // Initialize Redis client
    let redis_client = Arc::new(
        redis::Client::open(config.redis.url.clone()).expect("Failed to connect to Redis"),
    );
    let redis_service = RedisService::new(redis_client);

    let jwt_service = JwtService::new(&config.auth.jwt_secret, config.auth.token_ttl_days);
    let state: AppState = (redis_service, jwt_service);

    // Create router with all routes
    let app = Router::new()
        // Auth routes
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        // Task routes
        .route(
            "/api/tasks",
            post(handlers::create_task).get(handlers::get_tasks),
        )
        .route("/api/tasks/filter", get(handlers::filter_tasks))
        .route("/api/tasks/search", get(handlers::search_tasks))
        .route(
            "/api/tasks/:id",
            get(handlers::get_task_by_id)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        // Add middleware; layers added later run first, so the error envelope
        // wraps the auth guard and sees every rejection.
        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .layer(from_fn(errors::error_envelope))
        .layer(TraceLayer::new_for_http())
        // JSON body limit from config
        .layer(RequestBodyLimitLayer::new(config.server.max_body_size))
        .with_state(state);

    tracing::info!(
        "Server running on {}:{}",
        config.server.host,
        config.server.port
    );
    let listener = tokio::net::TcpListener::bind(format!(
        "{}:{}",
        config.server.host, config.server.port
    ))
    .await
    .expect("Failed to bind server");

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Failed to start server");
}
