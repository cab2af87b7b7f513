use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<RolesResponseData>, ApiError> {
    state
        .superuser_service
        .list_roles()
        .await
        .map_err(ApiError::from)
        .map(|roles| ApiSuccess::new(StatusCode::OK, RolesResponseData { roles }))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolesResponseData {
    pub roles: Vec<String>,
}
