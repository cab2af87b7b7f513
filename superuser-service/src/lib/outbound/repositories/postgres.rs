use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::superuser::errors::SuperuserError;
use crate::domain::superuser::models::ActivityLog;
use crate::domain::superuser::models::EmailAddress;
use crate::domain::superuser::models::Superuser;
use crate::domain::superuser::models::SuperuserId;
use crate::domain::superuser::models::Username;
use crate::domain::superuser::ports::SuperuserRepository;

/// Postgres-backed superuser store.
///
/// Email uniqueness is enforced by the `superusers_email_key`
/// constraint, which stays authoritative when two registrations race
/// past the service's existence check.
pub struct PostgresSuperuserRepository {
    pool: PgPool,
}

impl PostgresSuperuserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SUPERUSER_COLUMNS: &str = "id, username, email, password_hash, role, reset_token, \
                                 two_factor_code, two_factor_enabled, created_at, updated_at";

fn db_error(e: sqlx::Error) -> SuperuserError {
    SuperuserError::DatabaseError(e.to_string())
}

fn superuser_from_row(row: &PgRow) -> Result<Superuser, SuperuserError> {
    Ok(Superuser {
        id: SuperuserId(row.try_get("id").map_err(db_error)?),
        username: Username::new(row.try_get("username").map_err(db_error)?)?,
        email: EmailAddress::new(row.try_get("email").map_err(db_error)?)?,
        password_hash: row.try_get("password_hash").map_err(db_error)?,
        role: row.try_get("role").map_err(db_error)?,
        reset_token: row.try_get("reset_token").map_err(db_error)?,
        two_factor_code: row.try_get("two_factor_code").map_err(db_error)?,
        two_factor_enabled: row.try_get("two_factor_enabled").map_err(db_error)?,
        created_at: row.try_get("created_at").map_err(db_error)?,
        updated_at: row.try_get("updated_at").map_err(db_error)?,
    })
}

#[async_trait]
impl SuperuserRepository for PostgresSuperuserRepository {
    async fn create(&self, superuser: Superuser) -> Result<Superuser, SuperuserError> {
        sqlx::query(
            "INSERT INTO superusers (id, username, email, password_hash, role, reset_token, \
             two_factor_code, two_factor_enabled, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(superuser.id.0)
        .bind(superuser.username.as_str())
        .bind(superuser.email.as_str())
        .bind(&superuser.password_hash)
        .bind(&superuser.role)
        .bind(&superuser.reset_token)
        .bind(&superuser.two_factor_code)
        .bind(superuser.two_factor_enabled)
        .bind(superuser.created_at)
        .bind(superuser.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return SuperuserError::EmailInUse(superuser.email.as_str().to_string());
                }
            }
            db_error(e)
        })?;

        Ok(superuser)
    }

    async fn find_by_id(&self, id: &SuperuserId) -> Result<Option<Superuser>, SuperuserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM superusers WHERE id = $1",
            SUPERUSER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(superuser_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Superuser>, SuperuserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM superusers WHERE email = $1",
            SUPERUSER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(superuser_from_row).transpose()
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Superuser>, SuperuserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM superusers WHERE reset_token = $1",
            SUPERUSER_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(superuser_from_row).transpose()
    }

    async fn update(&self, superuser: Superuser) -> Result<Superuser, SuperuserError> {
        let result = sqlx::query(
            "UPDATE superusers SET username = $2, password_hash = $3, updated_at = $4 \
             WHERE id = $1",
        )
        .bind(superuser.id.0)
        .bind(superuser.username.as_str())
        .bind(&superuser.password_hash)
        .bind(superuser.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(SuperuserError::NotFound(superuser.id.to_string()));
        }

        Ok(superuser)
    }

    async fn update_password_hash(
        &self,
        id: &SuperuserId,
        password_hash: &str,
    ) -> Result<(), SuperuserError> {
        let result = sqlx::query(
            "UPDATE superusers SET password_hash = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id.0)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(SuperuserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_reset_token(
        &self,
        id: &SuperuserId,
        token: Option<&str>,
    ) -> Result<(), SuperuserError> {
        let result =
            sqlx::query("UPDATE superusers SET reset_token = $2, updated_at = $3 WHERE id = $1")
                .bind(id.0)
                .bind(token)
                .bind(Utc::now())
                .execute(&self.pool)
                .await
                .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(SuperuserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_two_factor_code(
        &self,
        id: &SuperuserId,
        code: Option<&str>,
    ) -> Result<(), SuperuserError> {
        let result = sqlx::query(
            "UPDATE superusers SET two_factor_code = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id.0)
        .bind(code)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(SuperuserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn set_two_factor_enabled(
        &self,
        id: &SuperuserId,
        enabled: bool,
    ) -> Result<(), SuperuserError> {
        let result = sqlx::query(
            "UPDATE superusers SET two_factor_enabled = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(id.0)
        .bind(enabled)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(SuperuserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn list_roles(&self) -> Result<Vec<String>, SuperuserError> {
        let rows = sqlx::query("SELECT DISTINCT role FROM superusers ORDER BY role")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.iter()
            .map(|row| row.try_get("role").map_err(db_error))
            .collect()
    }

    async fn record_activity(&self, entry: ActivityLog) -> Result<(), SuperuserError> {
        sqlx::query(
            "INSERT INTO superuser_activity (id, superuser_id, action, timestamp, ip_address) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(entry.id)
        .bind(entry.superuser_id.0)
        .bind(&entry.action)
        .bind(entry.timestamp)
        .bind(&entry.ip_address)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    async fn find_activity_by_superuser(
        &self,
        id: &SuperuserId,
    ) -> Result<Vec<ActivityLog>, SuperuserError> {
        let rows = sqlx::query(
            "SELECT id, superuser_id, action, timestamp, ip_address \
             FROM superuser_activity WHERE superuser_id = $1 ORDER BY timestamp DESC",
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter()
            .map(|row| {
                Ok(ActivityLog {
                    id: row.try_get::<Uuid, _>("id").map_err(db_error)?,
                    superuser_id: SuperuserId(row.try_get("superuser_id").map_err(db_error)?),
                    action: row.try_get("action").map_err(db_error)?,
                    timestamp: row.try_get("timestamp").map_err(db_error)?,
                    ip_address: row.try_get("ip_address").map_err(db_error)?,
                })
            })
            .collect()
    }
}
