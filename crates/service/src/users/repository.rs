use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::User;
use crate::errors::ServiceError;

/// A user together with the stored password hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, ServiceError>;
    /// Fails with `Conflict` when the name is taken.
    async fn create(&self, name: &str, password_hash: &str, role: &str) -> Result<User, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
    async fn set_role(&self, id: Uuid, role: &str) -> Result<User, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<HashMap<String, UserRecord>>, // key: name
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, ServiceError> {
            Ok(self.users.lock().unwrap().get(name).cloned())
        }

        async fn create(&self, name: &str, password_hash: &str, role: &str) -> Result<User, ServiceError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(name) {
                return Err(ServiceError::Conflict(format!("user {name} already exists")));
            }
            let user = User { id: Uuid::new_v4(), name: name.to_string(), role: role.to_string() };
            users.insert(name.to_string(), UserRecord { user: user.clone(), password_hash: password_hash.to_string() });
            Ok(user)
        }

        async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|_, r| r.user.id != id);
            if users.len() == before {
                return Err(ServiceError::not_found("user", id));
            }
            Ok(())
        }

        async fn set_role(&self, id: Uuid, role: &str) -> Result<User, ServiceError> {
            let mut users = self.users.lock().unwrap();
            let record = users
                .values_mut()
                .find(|r| r.user.id == id)
                .ok_or_else(|| ServiceError::not_found("user", id))?;
            record.user.role = role.to_string();
            Ok(record.user.clone())
        }
    }
}
