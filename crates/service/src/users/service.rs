use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::User;
use crate::errors::ServiceError;
use crate::users::repository::UserRepository;
use crate::validation::NAME_MAX_LEN;

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub role: String,
}

/// Credential checks and role management.
pub struct UsersService<R: UserRepository + ?Sized> {
    repo: Arc<R>,
}

/// Hash verified for unknown user names so both rejection paths pay the same argon2 cost.
static UNKNOWN_USER_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("unknown-user-placeholder").ok());

fn burn_verify(password: &str) {
    if let Some(parsed) = UNKNOWN_USER_HASH.as_deref().and_then(|h| PasswordHash::new(h).ok()) {
        let _ = Argon2::default().verify_password(password.as_bytes(), &parsed);
    }
}

fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Hash(e.to_string()))
}

fn validate_new_user(input: &NewUser) -> Result<(), ServiceError> {
    let len = input.name.chars().count();
    if len == 0 || len > NAME_MAX_LEN {
        return Err(ServiceError::InvalidInput(format!(
            "user name length must be between 1 and {NAME_MAX_LEN}, but got: {len}"
        )));
    }
    if input.password.is_empty() {
        return Err(ServiceError::InvalidInput("password is empty".into()));
    }
    if input.role.trim().is_empty() {
        return Err(ServiceError::InvalidInput("role is empty".into()));
    }
    Ok(())
}

impl<R: UserRepository + ?Sized> UsersService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Resolve basic-auth credentials to a user.
    ///
    /// # Examples
    /// ```
    /// use service::users::{UsersService, repository::mock::MockUserRepository, service::NewUser};
    /// use std::sync::Arc;
    /// let svc = UsersService::new(Arc::new(MockUserRepository::default()));
    /// let input = NewUser { name: "admin".into(), password: "Passw0rd".into(), role: "администратор".into() };
    /// tokio_test::block_on(svc.create_user(input)).unwrap();
    /// let user = tokio_test::block_on(svc.authenticate("admin", "Passw0rd")).unwrap();
    /// assert!(user.is_admin());
    /// assert!(tokio_test::block_on(svc.authenticate("admin", "wrong")).is_err());
    /// ```
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, name: &str, password: &str) -> Result<User, ServiceError> {
        let Some(record) = self.repo.find_by_name(name).await? else {
            burn_verify(password);
            debug!("unknown user");
            return Err(ServiceError::Unauthorized);
        };
        let parsed = PasswordHash::new(&record.password_hash).map_err(|e| ServiceError::Hash(e.to_string()))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            debug!("password mismatch");
            return Err(ServiceError::Unauthorized);
        }
        Ok(record.user)
    }

    #[instrument(skip(self, input), fields(name = %input.name, role = %input.role))]
    pub async fn create_user(&self, input: NewUser) -> Result<User, ServiceError> {
        validate_new_user(&input)?;
        let hash = hash_password(&input.password)?;
        let user = self.repo.create(&input.name, &hash, &input.role).await?;
        info!(user_id = %user.id, "user_created");
        Ok(user)
    }

    /// Create the user unless one with the same name already exists.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn ensure_user(&self, input: NewUser) -> Result<User, ServiceError> {
        if let Some(existing) = self.repo.find_by_name(&input.name).await? {
            debug!(user_id = %existing.user.id, "user already present");
            return Ok(existing.user);
        }
        self.create_user(input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete(id).await?;
        info!("user_deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn change_role(&self, id: Uuid, role: &str) -> Result<User, ServiceError> {
        if role.trim().is_empty() {
            return Err(ServiceError::InvalidInput("role is empty".into()));
        }
        let user = self.repo.set_role(id, role).await?;
        info!(role = %user.role, "user_role_changed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ROLE_ADMIN, ROLE_USER};
    use crate::users::repository::mock::MockUserRepository;

    fn svc() -> UsersService<MockUserRepository> {
        UsersService::new(Arc::new(MockUserRepository::default()))
    }

    fn new_user(name: &str, role: &str) -> NewUser {
        NewUser { name: name.into(), password: "secret".into(), role: role.into() }
    }

    #[tokio::test]
    async fn authenticate_checks_password() {
        let svc = svc();
        let created = svc.create_user(new_user("viewer", ROLE_USER)).await.unwrap();

        let user = svc.authenticate("viewer", "secret").await.unwrap();
        assert_eq!(user, created);
        assert!(!user.is_admin());

        assert!(matches!(svc.authenticate("viewer", "Secret").await, Err(ServiceError::Unauthorized)));
        assert!(matches!(svc.authenticate("ghost", "secret").await, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn unknown_user_is_rejected_after_a_real_verify() {
        let svc = svc();
        svc.create_user(new_user("viewer", ROLE_USER)).await.unwrap();

        let hash = UNKNOWN_USER_HASH.as_deref().expect("placeholder hash is computed");
        assert!(PasswordHash::new(hash).is_ok());
        assert!(matches!(
            svc.authenticate("ghost", "unknown-user-placeholder").await,
            Err(ServiceError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn create_user_validates_input() {
        let svc = svc();
        assert!(matches!(svc.create_user(new_user("", ROLE_USER)).await, Err(ServiceError::InvalidInput(_))));
        assert!(matches!(svc.create_user(new_user("x", " ")).await, Err(ServiceError::InvalidInput(_))));
        let no_password = NewUser { password: String::new(), ..new_user("x", ROLE_USER) };
        assert!(matches!(svc.create_user(no_password).await, Err(ServiceError::InvalidInput(_))));

        svc.create_user(new_user("dup", ROLE_USER)).await.unwrap();
        assert!(matches!(svc.create_user(new_user("dup", ROLE_USER)).await, Err(ServiceError::Conflict(_))));
    }

    #[tokio::test]
    async fn ensure_user_is_idempotent() {
        let svc = svc();
        let first = svc.ensure_user(new_user("admin", ROLE_ADMIN)).await.unwrap();
        let second = svc.ensure_user(new_user("admin", ROLE_ADMIN)).await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn role_change_and_delete() {
        let svc = svc();
        let user = svc.create_user(new_user("editor", ROLE_USER)).await.unwrap();
        let promoted = svc.change_role(user.id, ROLE_ADMIN).await.unwrap();
        assert!(promoted.is_admin());
        assert!(svc.authenticate("editor", "secret").await.unwrap().is_admin());

        svc.delete_user(user.id).await.unwrap();
        assert!(matches!(svc.delete_user(user.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.change_role(Uuid::new_v4(), ROLE_ADMIN).await, Err(ServiceError::NotFound(_))));
    }
}
