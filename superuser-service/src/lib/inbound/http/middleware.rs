use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::superuser::models::SuperuserId;
use crate::inbound::http::router::AppState;

/// Name of the session cookie carrying the access token.
pub const AUTH_COOKIE: &str = "SuperUserAuthorization";

/// Identity attached to request extensions after the gate passes.
#[derive(Debug, Clone)]
pub struct AuthenticatedSuperuser {
    pub superuser_id: SuperuserId,
}

/// Authorization gate for protected routes.
///
/// Reads the bearer token from the session cookie and verifies it with
/// the token manager. Missing, malformed, tampered, and expired tokens
/// all get the same 401 body; the handler chain is never reached.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = cookie_value(req.headers(), AUTH_COOKIE).ok_or_else(unauthorized)?;

    let claims = state.token_manager.verify(&token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        unauthorized()
    })?;

    let superuser_id = SuperuserId::from_string(&claims.user_id).map_err(|e| {
        tracing::error!("Token carried an unparseable user ID: {}", e);
        unauthorized()
    })?;

    req.extensions_mut()
        .insert(AuthenticatedSuperuser { superuser_id });

    Ok(next.run(req).await)
}

/// Build the Set-Cookie value for a freshly issued session token.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        AUTH_COOKIE, token, max_age_secs
    )
}

/// Build the Set-Cookie value that clears the session on logout.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", AUTH_COOKIE)
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

fn unauthorized() -> Response {
    // One body for every failure mode: never reveal whether a token
    // was absent, expired, or tampered
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Unauthorized"
        })),
    )
        .into_response()
}
