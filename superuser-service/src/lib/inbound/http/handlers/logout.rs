use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::clear_session_cookie;

pub async fn logout() -> Result<Response, ApiError> {
    let cookie_value = HeaderValue::from_str(&clear_session_cookie())
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    let mut response = ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            message: "Logged out".to_string(),
        },
    )
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie_value);

    Ok(response)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
