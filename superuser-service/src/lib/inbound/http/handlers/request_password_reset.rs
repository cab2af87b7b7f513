use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::superuser::errors::SuperuserError;

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestPasswordResetRequest>,
) -> Result<ApiSuccess<RequestPasswordResetResponseData>, ApiError> {
    match state
        .superuser_service
        .request_password_reset(&body.email)
        .await
    {
        // Unknown addresses get the same answer as known ones, so the
        // endpoint cannot be used to enumerate accounts
        Ok(_) | Err(SuperuserError::NotFound(_)) => Ok(ApiSuccess::new(
            StatusCode::OK,
            RequestPasswordResetResponseData {
                message: "If the address is registered, a reset token has been issued".to_string(),
            },
        )),
        Err(e) => Err(ApiError::from(e)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestPasswordResetRequest {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPasswordResetResponseData {
    pub message: String,
}
