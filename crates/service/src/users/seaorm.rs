use async_trait::async_trait;
use chrono::Utc;
use models::app_user;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, SqlErr};
use uuid::Uuid;

use crate::domain::User;
use crate::errors::ServiceError;
use crate::users::repository::{UserRecord, UserRepository};

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_user(m: &app_user::Model) -> User {
    User { id: m.id, name: m.name.clone(), role: m.role.clone() }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<UserRecord>, ServiceError> {
        let res = app_user::Entity::find()
            .filter(app_user::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(res.map(|m| UserRecord { user: to_user(&m), password_hash: m.password_hash }))
    }

    async fn create(&self, name: &str, password_hash: &str, role: &str) -> Result<User, ServiceError> {
        let inserted = app_user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            password_hash: Set(password_hash.to_string()),
            role: Set(role.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::Conflict(format!("user {name} already exists")),
            _ => ServiceError::from(e),
        })?;
        Ok(to_user(&inserted))
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let res = app_user::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("user", id));
        }
        Ok(())
    }

    async fn set_role(&self, id: Uuid, role: &str) -> Result<User, ServiceError> {
        let stored = app_user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;
        let mut am: app_user::ActiveModel = stored.into();
        am.role = Set(role.to_string());
        let updated = am.update(&self.db).await?;
        Ok(to_user(&updated))
    }
}
