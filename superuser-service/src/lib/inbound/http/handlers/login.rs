use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::superuser::models::Superuser;
use crate::inbound::http::middleware::session_cookie;
use crate::inbound::http::router::AppState;
use crate::superuser::errors::SuperuserError;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let superuser = state
        .superuser_service
        .authenticate(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            // One message for unknown email and wrong password alike,
            // so login cannot be used to enumerate accounts
            SuperuserError::NotFound(_) | SuperuserError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            other => ApiError::from(other),
        })?;

    let token = state
        .token_manager
        .issue(&superuser.id.to_string())
        .map_err(|e| ApiError::InternalServerError(format!("Token issuance failed: {}", e)))?;

    let cookie = session_cookie(&token, state.token_manager.lifetime().num_seconds());
    let cookie_value = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    let mut response = ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            superuser: (&superuser).into(),
            token,
        },
    )
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie_value);

    Ok(response)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub superuser: SuperuserData,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuperuserData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl From<&Superuser> for SuperuserData {
    fn from(superuser: &Superuser) -> Self {
        Self {
            id: superuser.id.to_string(),
            username: superuser.username.as_str().to_string(),
            email: superuser.email.as_str().to_string(),
            role: superuser.role.clone(),
        }
    }
}
