//! Route definitions for the Eventbook web server

use crate::{handlers, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Authentication
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        // Users and membership
        .route("/users", post(handlers::create_user))
        .route("/users/{user_id}", get(handlers::get_user))
        .route("/users/{user_id}/events", get(handlers::get_user_events))
        .route("/users/{user_id}/events", put(handlers::update_user_events))
        // Events
        .route("/events", post(handlers::create_event))
        .route("/events/{event_id}", get(handlers::get_event))
}
