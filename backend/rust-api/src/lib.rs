use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health_check))
        // Metrics endpoint with Basic Auth protection
        .route(
            "/metrics",
            get(handlers::metrics_handler)
                .layer(middleware::from_fn(handlers::metrics_auth_middleware)),
        )
        .merge(session_routes(app_state.clone()))
        .with_state(app_state)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Pages backed by the server-side session; each request gets a `SessionContext`
fn session_routes(app_state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        // JSON file storage
        .route("/json", get(handlers::characters::list_characters))
        .route("/json/create", post(handlers::characters::create_character))
        .route(
            "/json/delete/{id}",
            post(handlers::characters::delete_character),
        )
        // Session profile
        .route("/session", get(handlers::profile::get_profile))
        .route("/session/profile", post(handlers::profile::save_profile))
        // Quiz
        .route("/quiz", get(handlers::quiz::get_quiz))
        .route("/quiz/start", get(handlers::quiz::start_quiz))
        .route("/quiz/submit", post(handlers::quiz::submit_answer))
        .route("/quiz/previous", get(handlers::quiz::previous_question))
        .route("/quiz/restart", get(handlers::quiz::start_quiz))
        .route_layer(middleware::from_fn_with_state(
            app_state,
            middlewares::session::session_middleware,
        ))
}
