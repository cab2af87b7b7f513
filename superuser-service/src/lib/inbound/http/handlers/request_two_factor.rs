use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSuperuser;
use crate::inbound::http::router::AppState;

pub async fn request_two_factor(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedSuperuser>,
) -> Result<ApiSuccess<RequestTwoFactorResponseData>, ApiError> {
    state
        .superuser_service
        .request_two_factor_code(&identity.superuser_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                RequestTwoFactorResponseData {
                    message: "Two-factor code issued".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestTwoFactorResponseData {
    pub message: String,
}
