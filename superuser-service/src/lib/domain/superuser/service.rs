use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::superuser::errors::SuperuserError;
use crate::domain::superuser::models::ActivityLog;
use crate::domain::superuser::models::RegisterSuperuserCommand;
use crate::domain::superuser::models::Superuser;
use crate::domain::superuser::models::SuperuserId;
use crate::domain::superuser::models::UpdateProfileCommand;
use crate::domain::superuser::ports::SuperuserRepository;
use crate::domain::superuser::ports::SuperuserServicePort;

/// Domain service implementation for superuser operations.
///
/// Owns credential verification and the account lifecycle; token
/// issuance stays with the token manager so that not every
/// authentication results in a token.
pub struct SuperuserService<R>
where
    R: SuperuserRepository,
{
    repository: Arc<R>,
    password_hasher: auth::PasswordHasher,
}

impl<R> SuperuserService<R>
where
    R: SuperuserRepository,
{
    /// Create a new service with an injected repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    /// Record an activity entry without failing the parent operation.
    async fn record_activity(&self, superuser_id: SuperuserId, action: &str) {
        let entry = ActivityLog::new(superuser_id, action);
        if let Err(e) = self.repository.record_activity(entry).await {
            tracing::error!(
                "Failed to record '{}' activity for superuser {}: {}",
                action,
                superuser_id,
                e
            );
        }
    }
}

#[async_trait]
impl<R> SuperuserServicePort for SuperuserService<R>
where
    R: SuperuserRepository,
{
    async fn register(
        &self,
        command: RegisterSuperuserCommand,
    ) -> Result<Superuser, SuperuserError> {
        // Pre-flight existence check; the store's uniqueness constraint
        // remains the authority if two registrations race.
        if let Some(existing) = self.repository.find_by_email(command.email.as_str()).await? {
            return Err(SuperuserError::EmailInUse(
                existing.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let superuser = Superuser {
            id: SuperuserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: Superuser::DEFAULT_ROLE.to_string(),
            reset_token: None,
            two_factor_code: None,
            two_factor_enabled: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(superuser).await?;
        self.record_activity(created.id, "registered").await;

        Ok(created)
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Superuser, SuperuserError> {
        let superuser = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| SuperuserError::NotFound(email.to_string()))?;

        let is_valid = self
            .password_hasher
            .verify(password, &superuser.password_hash)?;

        if !is_valid {
            return Err(SuperuserError::InvalidCredentials);
        }

        self.record_activity(superuser.id, "logged_in").await;

        Ok(superuser)
    }

    async fn get_superuser(&self, id: &SuperuserId) -> Result<Superuser, SuperuserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SuperuserError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: &SuperuserId,
        command: UpdateProfileCommand,
    ) -> Result<Superuser, SuperuserError> {
        let mut superuser = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SuperuserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            superuser.username = new_username;
        }

        if let Some(new_password) = command.password {
            superuser.password_hash = self.password_hasher.hash(&new_password)?;
        }

        superuser.updated_at = Utc::now();

        let updated = self.repository.update(superuser).await?;
        self.record_activity(updated.id, "profile_updated").await;

        Ok(updated)
    }

    async fn request_password_reset(&self, email: &str) -> Result<String, SuperuserError> {
        let superuser = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| SuperuserError::NotFound(email.to_string()))?;

        let token = Uuid::new_v4().to_string();
        self.repository
            .update_reset_token(&superuser.id, Some(&token))
            .await?;

        // Delivery is the mailer collaborator's job
        tracing::info!(
            superuser_id = %superuser.id,
            "Password reset token generated"
        );

        Ok(token)
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<(), SuperuserError> {
        let superuser = self
            .repository
            .find_by_reset_token(token)
            .await?
            .ok_or(SuperuserError::InvalidResetToken)?;

        let password_hash = self.password_hasher.hash(password)?;
        self.repository
            .update_password_hash(&superuser.id, &password_hash)
            .await?;

        // Single use: consume the token so it cannot be replayed
        self.repository
            .update_reset_token(&superuser.id, None)
            .await?;

        self.record_activity(superuser.id, "password_reset").await;

        Ok(())
    }

    async fn request_two_factor_code(&self, id: &SuperuserId) -> Result<String, SuperuserError> {
        let superuser = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SuperuserError::NotFound(id.to_string()))?;

        let code = format!("{:06}", Uuid::new_v4().as_u128() % 1_000_000);
        self.repository
            .update_two_factor_code(&superuser.id, Some(&code))
            .await?;

        tracing::info!(superuser_id = %superuser.id, "Two-factor code generated");

        Ok(code)
    }

    async fn verify_two_factor(
        &self,
        id: &SuperuserId,
        code: &str,
    ) -> Result<(), SuperuserError> {
        let superuser = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(SuperuserError::NotFound(id.to_string()))?;

        match superuser.two_factor_code.as_deref() {
            Some(pending) if pending == code => {}
            _ => return Err(SuperuserError::InvalidTwoFactorCode),
        }

        self.repository.set_two_factor_enabled(id, true).await?;
        self.repository.update_two_factor_code(id, None).await?;

        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<String>, SuperuserError> {
        self.repository.list_roles().await
    }

    async fn activity_logs(&self, id: &SuperuserId) -> Result<Vec<ActivityLog>, SuperuserError> {
        self.repository.find_activity_by_superuser(id).await
    }
}
