use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::superuser::errors::SuperuserError;
use crate::domain::superuser::models::ActivityLog;
use crate::domain::superuser::models::Superuser;
use crate::domain::superuser::models::SuperuserId;
use crate::domain::superuser::ports::SuperuserRepository;

/// In-memory superuser store.
///
/// Backs integration tests and local development without a database.
/// Enforces the same email uniqueness invariant as the Postgres store.
#[derive(Default)]
pub struct InMemorySuperuserRepository {
    superusers: RwLock<HashMap<Uuid, Superuser>>,
    activity: RwLock<Vec<ActivityLog>>,
}

impl InMemorySuperuserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_superusers(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Superuser>> {
        self.superusers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_superusers(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Superuser>> {
        self.superusers.write().unwrap_or_else(|e| e.into_inner())
    }

    fn with_superuser<F>(&self, id: &SuperuserId, mutate: F) -> Result<(), SuperuserError>
    where
        F: FnOnce(&mut Superuser),
    {
        let mut superusers = self.write_superusers();
        let superuser = superusers
            .get_mut(&id.0)
            .ok_or(SuperuserError::NotFound(id.to_string()))?;
        mutate(superuser);
        superuser.updated_at = chrono::Utc::now();
        Ok(())
    }
}

#[async_trait]
impl SuperuserRepository for InMemorySuperuserRepository {
    async fn create(&self, superuser: Superuser) -> Result<Superuser, SuperuserError> {
        let mut superusers = self.write_superusers();

        if superusers
            .values()
            .any(|existing| existing.email == superuser.email)
        {
            return Err(SuperuserError::EmailInUse(
                superuser.email.as_str().to_string(),
            ));
        }

        superusers.insert(superuser.id.0, superuser.clone());
        Ok(superuser)
    }

    async fn find_by_id(&self, id: &SuperuserId) -> Result<Option<Superuser>, SuperuserError> {
        Ok(self.read_superusers().get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Superuser>, SuperuserError> {
        Ok(self
            .read_superusers()
            .values()
            .find(|superuser| superuser.email.as_str() == email)
            .cloned())
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
    ) -> Result<Option<Superuser>, SuperuserError> {
        Ok(self
            .read_superusers()
            .values()
            .find(|superuser| superuser.reset_token.as_deref() == Some(token))
            .cloned())
    }

    async fn update(&self, superuser: Superuser) -> Result<Superuser, SuperuserError> {
        let mut superusers = self.write_superusers();

        if !superusers.contains_key(&superuser.id.0) {
            return Err(SuperuserError::NotFound(superuser.id.to_string()));
        }

        superusers.insert(superuser.id.0, superuser.clone());
        Ok(superuser)
    }

    async fn update_password_hash(
        &self,
        id: &SuperuserId,
        password_hash: &str,
    ) -> Result<(), SuperuserError> {
        self.with_superuser(id, |superuser| {
            superuser.password_hash = password_hash.to_string();
        })
    }

    async fn update_reset_token(
        &self,
        id: &SuperuserId,
        token: Option<&str>,
    ) -> Result<(), SuperuserError> {
        self.with_superuser(id, |superuser| {
            superuser.reset_token = token.map(str::to_string);
        })
    }

    async fn update_two_factor_code(
        &self,
        id: &SuperuserId,
        code: Option<&str>,
    ) -> Result<(), SuperuserError> {
        self.with_superuser(id, |superuser| {
            superuser.two_factor_code = code.map(str::to_string);
        })
    }

    async fn set_two_factor_enabled(
        &self,
        id: &SuperuserId,
        enabled: bool,
    ) -> Result<(), SuperuserError> {
        self.with_superuser(id, |superuser| {
            superuser.two_factor_enabled = enabled;
        })
    }

    async fn list_roles(&self) -> Result<Vec<String>, SuperuserError> {
        let mut roles: Vec<String> = self
            .read_superusers()
            .values()
            .map(|superuser| superuser.role.clone())
            .collect();
        roles.sort();
        roles.dedup();
        Ok(roles)
    }

    async fn record_activity(&self, entry: ActivityLog) -> Result<(), SuperuserError> {
        self.activity
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(entry);
        Ok(())
    }

    async fn find_activity_by_superuser(
        &self,
        id: &SuperuserId,
    ) -> Result<Vec<ActivityLog>, SuperuserError> {
        let mut entries: Vec<ActivityLog> = self
            .activity
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|entry| entry.superuser_id == *id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::superuser::models::EmailAddress;
    use crate::domain::superuser::models::Username;

    fn fixture(email: &str) -> Superuser {
        let now = Utc::now();
        Superuser {
            id: SuperuserId::new(),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            role: Superuser::DEFAULT_ROLE.to_string(),
            reset_token: None,
            two_factor_code: None,
            two_factor_enabled: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_enforces_email_uniqueness() {
        let repository = InMemorySuperuserRepository::new();

        repository
            .create(fixture("alice@example.com"))
            .await
            .expect("Failed to create");

        let result = repository.create(fixture("alice@example.com")).await;
        assert!(matches!(result, Err(SuperuserError::EmailInUse(_))));
    }

    #[tokio::test]
    async fn test_reset_token_lookup_and_clear() {
        let repository = InMemorySuperuserRepository::new();
        let superuser = repository
            .create(fixture("alice@example.com"))
            .await
            .unwrap();

        repository
            .update_reset_token(&superuser.id, Some("token-1"))
            .await
            .unwrap();
        assert!(repository
            .find_by_reset_token("token-1")
            .await
            .unwrap()
            .is_some());

        repository
            .update_reset_token(&superuser.id, None)
            .await
            .unwrap();
        assert!(repository
            .find_by_reset_token("token-1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_activity_log_round_trip() {
        let repository = InMemorySuperuserRepository::new();
        let superuser = repository
            .create(fixture("alice@example.com"))
            .await
            .unwrap();

        repository
            .record_activity(ActivityLog::new(superuser.id, "logged_in"))
            .await
            .unwrap();

        let entries = repository
            .find_activity_by_superuser(&superuser.id)
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "logged_in");

        let other = SuperuserId::new();
        assert!(repository
            .find_activity_by_superuser(&other)
            .await
            .unwrap()
            .is_empty());
    }
}
