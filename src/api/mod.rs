pub mod handlers;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // API routes
        .nest("/api", api_routes())
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/announcements", announcement_routes())
        .nest("/responses", response_routes())
        .nest("/users", user_routes())
        .nest("/access", access_routes())
}

fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::announcements::list))
        .route("/", post(handlers::announcements::create))
        .route("/:id", get(handlers::announcements::get))
        .route("/:id", put(handlers::announcements::update))
        .route("/:id/close", post(handlers::announcements::close))
        .route("/:id/renew", post(handlers::announcements::renew))
        .route("/:id/responses", get(handlers::announcements::list_responses))
        .route("/:id/responses", post(handlers::announcements::respond))
        .route(
            "/:id/responses/pending",
            get(handlers::announcements::list_pending_responses),
        )
}

fn response_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/status", put(handlers::responses::change_status))
        .route("/:id/read", post(handlers::responses::mark_read))
        .route("/:id/unread", post(handlers::responses::mark_unread))
        .route("/:id", delete(handlers::responses::delete))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::users::create))
        .route("/:id", get(handlers::users::get))
        .route("/:user_id/responses", get(handlers::responses::list_for_user))
        .route(
            "/:user_id/responses/count",
            get(handlers::responses::count_for_user),
        )
        .route("/:user_id/favorites", get(handlers::favorites::list))
        .route("/:user_id/favorites", post(handlers::favorites::save))
        .route("/:user_id/favorites", delete(handlers::favorites::clear_all))
        .route(
            "/:user_id/favorites/entries",
            get(handlers::favorites::list_entries),
        )
        .route(
            "/:user_id/favorites/count",
            get(handlers::favorites::count),
        )
        .route(
            "/:user_id/favorites/:announcement_id",
            delete(handlers::favorites::remove),
        )
        .route(
            "/:user_id/favorites/:announcement_id",
            put(handlers::favorites::update_notes),
        )
        .route("/:user_id/notifications", get(handlers::users::notifications))
        .route(
            "/:user_id/notifications/read-all",
            post(handlers::users::mark_notifications_read),
        )
        .route(
            "/:user_id/notifications/:id/read",
            post(handlers::users::mark_notification_read),
        )
}

fn access_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", get(handlers::access::rules))
        .route("/check", get(handlers::access::check))
}
