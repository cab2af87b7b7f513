use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSuperuser;
use crate::inbound::http::router::AppState;

pub async fn verify_two_factor(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedSuperuser>,
    Json(body): Json<VerifyTwoFactorRequest>,
) -> Result<ApiSuccess<VerifyTwoFactorResponseData>, ApiError> {
    state
        .superuser_service
        .verify_two_factor(&identity.superuser_id, &body.code)
        .await
        .map_err(ApiError::from)
        .map(|()| {
            ApiSuccess::new(
                StatusCode::OK,
                VerifyTwoFactorResponseData {
                    message: "Two-factor authentication enabled".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyTwoFactorRequest {
    code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyTwoFactorResponseData {
    pub message: String,
}
