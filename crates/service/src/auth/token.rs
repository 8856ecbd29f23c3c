use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::domain::{App, User};
use super::errors::AuthError;

/// Claims embedded in an issued token. `exp` is unix seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub email: String,
    pub app_id: i64,
    pub exp: i64,
}

/// Sign a token for `user` scoped to `app`, HS256 with the app's own secret.
/// Nothing is persisted; validity is signature + expiry only.
pub fn issue(user: &User, app: &App, ttl: Duration) -> Result<String, AuthError> {
    let claims = Claims {
        uid: user.id,
        email: user.email.clone(),
        app_id: app.id,
        exp: Utc::now().timestamp() + ttl.as_secs() as i64,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(app.secret.as_bytes()))
        .map_err(|e| AuthError::Token(e.to_string()))
}
