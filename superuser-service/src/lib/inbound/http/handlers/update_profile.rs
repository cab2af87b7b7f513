use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::dashboard::DashboardResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::superuser::models::UpdateProfileCommand;
use crate::domain::superuser::models::Username;
use crate::inbound::http::middleware::AuthenticatedSuperuser;
use crate::inbound::http::router::AppState;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedSuperuser>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<DashboardResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .superuser_service
        .update_profile(&identity.superuser_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref superuser| ApiSuccess::new(StatusCode::OK, superuser.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    username: Option<String>,
    password: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ApiError> {
        let username = self
            .username
            .map(Username::new)
            .transpose()
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid username: {}", e)))?;

        Ok(UpdateProfileCommand {
            username,
            password: self.password,
        })
    }
}
