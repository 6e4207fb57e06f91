use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use common::auth::AuthTokenProvider;
use tower_http::trace::TraceLayer;

use crate::domain::{DeviceService, UserService};
use crate::http::{device_handlers, pages, user_handlers};

/// Shared handler state: domain services plus what the transport needs to
/// authenticate callers and issue session cookies
#[derive(Clone)]
pub struct AppState {
    pub device_service: Arc<DeviceService>,
    pub user_service: Arc<UserService>,
    pub auth_token_provider: Arc<dyn AuthTokenProvider>,
    pub session_expiration_hours: u64,
    pub secure_cookies: bool,
}

/// Assemble the full route table: JSON API, identity routes, HTML pages
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_page))
        .route("/devices", get(pages::devices_page))
        .route("/devices/{device_id}", get(pages::device_page))
        .route("/compare", get(pages::compare_page))
        .route("/api/auth/register", post(user_handlers::register))
        .route("/api/auth/jwt/login", post(user_handlers::login))
        .route("/api/auth/jwt/logout", post(user_handlers::logout))
        .route(
            "/api/users/me",
            get(user_handlers::me).patch(user_handlers::update_me),
        )
        .route(
            "/api/devices",
            get(device_handlers::list_devices).post(device_handlers::create_device),
        )
        .route(
            "/api/devices/{device_id}",
            axum::routing::patch(device_handlers::update_device)
                .delete(device_handlers::delete_device),
        )
        .route(
            "/api/devices/{device_id}/upload_config",
            post(device_handlers::upload_config),
        )
        .route(
            "/api/devices/{device_id}/get_config",
            get(device_handlers::get_config),
        )
        .route(
            "/api/devices/{device_id}/download_config",
            get(device_handlers::download_config),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
