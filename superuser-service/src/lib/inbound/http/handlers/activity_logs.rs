use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::superuser::models::ActivityLog;
use crate::inbound::http::middleware::AuthenticatedSuperuser;
use crate::inbound::http::router::AppState;

pub async fn activity_logs(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthenticatedSuperuser>,
) -> Result<ApiSuccess<Vec<ActivityLogData>>, ApiError> {
    state
        .superuser_service
        .activity_logs(&identity.superuser_id)
        .await
        .map_err(ApiError::from)
        .map(|entries| {
            ApiSuccess::new(
                StatusCode::OK,
                entries.iter().map(ActivityLogData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityLogData {
    pub id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
}

impl From<&ActivityLog> for ActivityLogData {
    fn from(entry: &ActivityLog) -> Self {
        Self {
            id: entry.id.to_string(),
            action: entry.action.clone(),
            timestamp: entry.timestamp,
            ip_address: entry.ip_address.clone(),
        }
    }
}
