use async_trait::async_trait;

use crate::domain::superuser::errors::SuperuserError;
use crate::domain::superuser::models::ActivityLog;
use crate::domain::superuser::models::RegisterSuperuserCommand;
use crate::domain::superuser::models::Superuser;
use crate::domain::superuser::models::SuperuserId;
use crate::domain::superuser::models::UpdateProfileCommand;

/// Port for superuser domain service operations.
#[async_trait]
pub trait SuperuserServicePort: Send + Sync + 'static {
    /// Register a new superuser.
    ///
    /// # Errors
    /// * `EmailInUse` - A record with this email already exists
    /// * `Password` - Hashing the password failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterSuperuserCommand)
        -> Result<Superuser, SuperuserError>;

    /// Verify credentials and return the matching record.
    ///
    /// Deliberately does not issue a token; callers that need one ask
    /// the token manager afterwards.
    ///
    /// # Errors
    /// * `NotFound` - No record with this email
    /// * `InvalidCredentials` - Password does not match the stored hash
    async fn authenticate(&self, email: &str, password: &str)
        -> Result<Superuser, SuperuserError>;

    /// Retrieve a superuser by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Superuser does not exist
    async fn get_superuser(&self, id: &SuperuserId) -> Result<Superuser, SuperuserError>;

    /// Update username and/or password for an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Superuser does not exist
    /// * `Password` - Re-hashing the new password failed
    async fn update_profile(
        &self,
        id: &SuperuserId,
        command: UpdateProfileCommand,
    ) -> Result<Superuser, SuperuserError>;

    /// Generate and persist a single-use password reset token.
    ///
    /// Delivery of the token (email) is an external concern; the token
    /// is returned so the transport collaborator can send it.
    ///
    /// # Errors
    /// * `NotFound` - No record with this email
    async fn request_password_reset(&self, email: &str) -> Result<String, SuperuserError>;

    /// Redeem a reset token: set a new password and invalidate the token.
    ///
    /// # Errors
    /// * `InvalidResetToken` - Token unknown or already consumed
    /// * `Password` - Hashing the new password failed
    async fn reset_password(&self, token: &str, password: &str) -> Result<(), SuperuserError>;

    /// Generate and persist a single-use two-factor code.
    ///
    /// # Errors
    /// * `NotFound` - Superuser does not exist
    async fn request_two_factor_code(&self, id: &SuperuserId) -> Result<String, SuperuserError>;

    /// Verify a two-factor code, enable the flag, consume the code.
    ///
    /// # Errors
    /// * `NotFound` - Superuser does not exist
    /// * `InvalidTwoFactorCode` - Code mismatch or no code pending
    async fn verify_two_factor(
        &self,
        id: &SuperuserId,
        code: &str,
    ) -> Result<(), SuperuserError>;

    /// List the distinct roles known to the store.
    async fn list_roles(&self) -> Result<Vec<String>, SuperuserError>;

    /// Retrieve the activity log entries for one account.
    async fn activity_logs(&self, id: &SuperuserId) -> Result<Vec<ActivityLog>, SuperuserError>;
}

/// Persistence operations for the superuser aggregate.
///
/// The store is the authority on email uniqueness: `create` must fail
/// with `EmailInUse` on a duplicate even if the service's existence
/// check raced another registration.
#[async_trait]
pub trait SuperuserRepository: Send + Sync + 'static {
    /// Persist a new superuser.
    ///
    /// # Errors
    /// * `EmailInUse` - Email uniqueness violated
    /// * `DatabaseError` - Store operation failed
    async fn create(&self, superuser: Superuser) -> Result<Superuser, SuperuserError>;

    /// Retrieve by identifier (`None` if not found).
    async fn find_by_id(&self, id: &SuperuserId) -> Result<Option<Superuser>, SuperuserError>;

    /// Retrieve by email address (`None` if not found).
    async fn find_by_email(&self, email: &str) -> Result<Option<Superuser>, SuperuserError>;

    /// Retrieve by pending reset token (`None` if not found).
    async fn find_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Superuser>, SuperuserError>;

    /// Persist updated profile fields (username, password hash).
    ///
    /// # Errors
    /// * `NotFound` - Superuser does not exist
    async fn update(&self, superuser: Superuser) -> Result<Superuser, SuperuserError>;

    /// Persist an updated credential hash.
    async fn update_password_hash(
        &self,
        id: &SuperuserId,
        password_hash: &str,
    ) -> Result<(), SuperuserError>;

    /// Set or clear the pending reset token.
    async fn update_reset_token(
        &self,
        id: &SuperuserId,
        token: Option<&str>,
    ) -> Result<(), SuperuserError>;

    /// Set or clear the pending two-factor code.
    async fn update_two_factor_code(
        &self,
        id: &SuperuserId,
        code: Option<&str>,
    ) -> Result<(), SuperuserError>;

    /// Set the two-factor enabled flag.
    async fn set_two_factor_enabled(
        &self,
        id: &SuperuserId,
        enabled: bool,
    ) -> Result<(), SuperuserError>;

    /// Distinct roles across all records.
    async fn list_roles(&self) -> Result<Vec<String>, SuperuserError>;

    /// Append one activity log entry.
    async fn record_activity(&self, entry: ActivityLog) -> Result<(), SuperuserError>;

    /// Activity log entries for one account, newest first.
    async fn find_activity_by_superuser(
        &self,
        id: &SuperuserId,
    ) -> Result<Vec<ActivityLog>, SuperuserError>;
}
