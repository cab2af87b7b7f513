use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::superuser::models::Superuser;
use crate::inbound::http::middleware::AuthenticatedSuperuser;
use crate::inbound::http::router::AppState;

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedSuperuser>,
) -> Result<ApiSuccess<DashboardResponseData>, ApiError> {
    state
        .superuser_service
        .get_superuser(&identity.superuser_id)
        .await
        .map_err(ApiError::from)
        .map(|ref superuser| ApiSuccess::new(StatusCode::OK, superuser.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Superuser> for DashboardResponseData {
    fn from(superuser: &Superuser) -> Self {
        Self {
            id: superuser.id.to_string(),
            username: superuser.username.as_str().to_string(),
            email: superuser.email.as_str().to_string(),
            role: superuser.role.clone(),
            two_factor_enabled: superuser.two_factor_enabled,
            created_at: superuser.created_at,
            updated_at: superuser.updated_at,
        }
    }
}
