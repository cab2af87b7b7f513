use std::sync::Arc;
use std::time::Duration;

use auth::TokenManager;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::activity_logs::activity_logs;
use super::handlers::dashboard::dashboard;
use super::handlers::list_roles::list_roles;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::request_password_reset::request_password_reset;
use super::handlers::request_two_factor::request_two_factor;
use super::handlers::reset_password::reset_password;
use super::handlers::update_profile::update_profile;
use super::handlers::verify_two_factor::verify_two_factor;
use super::middleware::authenticate as auth_middleware;
use crate::domain::superuser::ports::SuperuserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub superuser_service: Arc<dyn SuperuserServicePort>,
    pub token_manager: Arc<TokenManager>,
}

pub fn create_router(
    superuser_service: Arc<dyn SuperuserServicePort>,
    token_manager: Arc<TokenManager>,
) -> Router {
    let state = AppState {
        superuser_service,
        token_manager,
    };

    let public_routes = Router::new()
        .route("/superuser/register", post(register))
        .route("/superuser/login", post(login))
        .route("/superuser/password-reset/request", post(request_password_reset))
        .route("/superuser/password-reset/confirm", post(reset_password));

    let protected_routes = Router::new()
        .route("/superuser/dashboard", get(dashboard))
        .route("/superuser/logout", get(logout))
        .route("/superuser/profile", patch(update_profile))
        .route("/superuser/2fa/request", post(request_two_factor))
        .route("/superuser/2fa/verify", post(verify_two_factor))
        .route("/superuser/roles", get(list_roles))
        .route("/superuser/activity", get(activity_logs))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
