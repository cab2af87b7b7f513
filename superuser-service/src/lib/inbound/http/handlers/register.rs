use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::superuser::models::EmailAddress;
use crate::domain::superuser::models::RegisterSuperuserCommand;
use crate::domain::superuser::models::Superuser;
use crate::domain::superuser::models::Username;
use crate::inbound::http::router::AppState;
use crate::superuser::errors::EmailError;
use crate::superuser::errors::UsernameError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .superuser_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref superuser| ApiSuccess::new(StatusCode::CREATED, superuser.into()))
}

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterSuperuserCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = self.password;
        Ok(RegisterSuperuserCommand::new(username, email, password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Superuser> for RegisterResponseData {
    fn from(superuser: &Superuser) -> Self {
        Self {
            id: superuser.id.to_string(),
            username: superuser.username.as_str().to_string(),
            email: superuser.email.as_str().to_string(),
            role: superuser.role.clone(),
            created_at: superuser.created_at,
        }
    }
}
