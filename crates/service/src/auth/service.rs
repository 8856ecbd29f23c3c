use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use super::errors::AuthError;
use super::password::PasswordPolicy;
use super::repository::AuthStorage;
use super::token;

/// Auth business service independent of web framework.
///
/// Stateless across calls: the storage handle, hashing policy and token TTL
/// are read-only after construction and safe for concurrent use.
pub struct AuthService<S: AuthStorage + ?Sized> {
    storage: Arc<S>,
    passwords: PasswordPolicy,
    token_ttl: Duration,
}

impl<S: AuthStorage + ?Sized> AuthService<S> {
    pub fn new(storage: Arc<S>, passwords: PasswordPolicy, token_ttl: Duration) -> Self {
        Self { storage, passwords, token_ttl }
    }

    /// Register a new user with a hashed password, returning the new id.
    ///
    /// Not idempotent: the second call with the same email fails with
    /// [`AuthError::UserExists`]. The storage uniqueness constraint is the
    /// race guard, so two concurrent registrations resolve to one winner.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, password::PasswordPolicy, repository::mock::MockAuthStorage};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// let storage = Arc::new(MockAuthStorage::default());
    /// let svc = AuthService::new(storage, PasswordPolicy::default(), Duration::from_secs(3600));
    /// let uid = tokio_test::block_on(svc.register("user@example.com", "Secret123")).unwrap();
    /// assert!(uid > 0);
    /// ```
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(&self, email: &str, password: &str) -> Result<i64, AuthError> {
        let pass_hash = self.passwords.hash(password)?;
        let user_id = self.storage.save_user(email, &pass_hash).await?;
        info!(user_id, "user registered");
        Ok(user_id)
    }

    /// Authenticate a user and issue a token signed for `app_id`.
    ///
    /// An unknown email and a wrong password both come back as
    /// [`AuthError::InvalidCredentials`]; nothing in the error reveals which
    /// one happened. An unprovisioned app id keeps its own kind.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, password::PasswordPolicy, repository::mock::MockAuthStorage};
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// let storage = Arc::new(MockAuthStorage::default().with_app(1, "web", "secret"));
    /// let svc = AuthService::new(storage, PasswordPolicy::default(), Duration::from_secs(3600));
    /// tokio_test::block_on(svc.register("u@e.com", "Passw0rd")).unwrap();
    /// let token = tokio_test::block_on(svc.login("u@e.com", "Passw0rd", 1)).unwrap();
    /// assert!(!token.is_empty());
    /// ```
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str, app_id: i64) -> Result<String, AuthError> {
        let user = match self.storage.find_user_by_email(email).await {
            Ok(user) => user,
            // Collapse unknown email into the generic credentials error so the
            // caller cannot enumerate registered addresses
            Err(AuthError::UserNotFound) => {
                debug!("login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        self.passwords.verify(password, &user.pass_hash)?;

        let app = self.storage.find_app_by_id(app_id).await?;
        let token = token::issue(&user, &app, self.token_ttl)?;
        info!(user_id = user.id, app_id = app.id, "user logged in");
        Ok(token)
    }

    /// Report the administrator flag for `user_id`.
    #[instrument(skip(self))]
    pub async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        let is_admin = self.storage.is_admin(user_id).await?;
        debug!(user_id, is_admin, "admin status checked");
        Ok(is_admin)
    }
}
