use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::auth::domain::{App, User};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthStorage;

pub struct SeaOrmAuthStorage {
    pub db: DatabaseConnection,
}

/// A duplicate insert is recognized from the database's own uniqueness
/// violation; everything else is an infrastructure failure.
fn classify_insert_err(e: DbErr) -> AuthError {
    if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        AuthError::UserExists
    } else {
        AuthError::Storage(e.to_string())
    }
}

#[async_trait]
impl AuthStorage for SeaOrmAuthStorage {
    async fn save_user(&self, email: &str, pass_hash: &str) -> Result<i64, AuthError> {
        let created = models::user::insert(&self.db, email, pass_hash)
            .await
            .map_err(classify_insert_err)?;
        Ok(created.id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, AuthError> {
        let found = models::user::find_by_email(&self.db, email)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        found
            .map(|u| User { id: u.id, email: u.email, pass_hash: u.pass_hash, is_admin: u.is_admin })
            .ok_or(AuthError::UserNotFound)
    }

    async fn find_app_by_id(&self, id: i64) -> Result<App, AuthError> {
        let found = models::app::find_by_id(&self.db, id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        found
            .map(|a| App { id: a.id, name: a.name, secret: a.secret })
            .ok_or(AuthError::AppNotFound)
    }

    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        let found = models::user::find_by_id(&self.db, user_id)
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        found.map(|u| u.is_admin).ok_or(AuthError::UserNotFound)
    }
}
