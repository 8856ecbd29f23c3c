use async_trait::async_trait;

use super::domain::{App, User};
use super::errors::AuthError;

/// Storage capability required by the auth service. Exactly four operations;
/// any backend that provides them is substitutable.
///
/// Every method is an `async fn`, so an in-flight query is abandoned when the
/// caller's future is dropped (request cancelled or timed out).
#[async_trait]
pub trait AuthStorage: Send + Sync {
    /// Insert a new user, returning its storage-assigned id. A duplicate
    /// email must surface as [`AuthError::UserExists`], detected from the
    /// backend's uniqueness violation rather than a racy pre-check.
    async fn save_user(&self, email: &str, pass_hash: &str) -> Result<i64, AuthError>;
    async fn find_user_by_email(&self, email: &str) -> Result<User, AuthError>;
    async fn find_app_by_id(&self, id: i64) -> Result<App, AuthError>;
    async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError>;
}

/// Simple in-memory mock storage for tests, doc examples and benches
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    pub struct MockAuthStorage {
        users: Mutex<HashMap<String, User>>, // key: email
        apps: Mutex<HashMap<i64, App>>,      // key: app id
        next_id: AtomicI64,
    }

    impl Default for MockAuthStorage {
        fn default() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                apps: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    impl MockAuthStorage {
        /// Seed a pre-provisioned app, mirroring out-of-band provisioning.
        pub fn with_app(self, id: i64, name: &str, secret: &str) -> Self {
            self.apps
                .lock()
                .unwrap()
                .insert(id, App { id, name: name.to_string(), secret: secret.to_string() });
            self
        }
    }

    #[async_trait]
    impl AuthStorage for MockAuthStorage {
        async fn save_user(&self, email: &str, pass_hash: &str) -> Result<i64, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(email) {
                return Err(AuthError::UserExists);
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            users.insert(
                email.to_string(),
                User { id, email: email.to_string(), pass_hash: pass_hash.to_string(), is_admin: false },
            );
            Ok(id)
        }

        async fn find_user_by_email(&self, email: &str) -> Result<User, AuthError> {
            let users = self.users.lock().unwrap();
            users.get(email).cloned().ok_or(AuthError::UserNotFound)
        }

        async fn find_app_by_id(&self, id: i64) -> Result<App, AuthError> {
            let apps = self.apps.lock().unwrap();
            apps.get(&id).cloned().ok_or(AuthError::AppNotFound)
        }

        async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
            let users = self.users.lock().unwrap();
            users
                .values()
                .find(|u| u.id == user_id)
                .map(|u| u.is_admin)
                .ok_or(AuthError::UserNotFound)
        }
    }
}
