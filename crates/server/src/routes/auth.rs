use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use service::auth::{errors::AuthError, repository::AuthStorage, AuthService};

use crate::observability;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<dyn AuthStorage>>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub app_id: i64,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub token: String,
}

#[derive(Serialize)]
pub struct IsAdminOutput {
    pub is_admin: bool,
}

/// The single place where an error kind becomes a caller-visible status.
///
/// `InvalidCredentials` maps to 400 rather than 401 on purpose: the response
/// must not hint whether the email exists. Internal kinds (including an
/// unprovisioned app id, which is a server misconfiguration) log their detail
/// and return a generic body.
pub(crate) fn map_auth_error(err: AuthError) -> (StatusCode, String) {
    observability::AUTH_FAILURES_TOTAL.inc();
    match err {
        AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
        AuthError::InvalidCredentials => {
            (StatusCode::BAD_REQUEST, "invalid email or password".to_string())
        }
        AuthError::UserExists => (StatusCode::CONFLICT, "user already exists".to_string()),
        AuthError::UserNotFound => (StatusCode::NOT_FOUND, "user not found".to_string()),
        other => {
            error!(code = other.code(), error = %other, "internal auth failure");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
        }
    }
}

#[utoipa::path(post, path = "/auth/register", tag = "auth",
    request_body = crate::openapi::RegisterRequest,
    responses(
        (status = 200, description = "Registered"),
        (status = 400, description = "Bad Request"),
        (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, (StatusCode, String)> {
    observability::AUTH_REQUESTS_TOTAL.inc();
    if input.email.is_empty() {
        return Err(map_auth_error(AuthError::Validation("email is required".into())));
    }
    if input.password.is_empty() {
        return Err(map_auth_error(AuthError::Validation("password is required".into())));
    }

    let user_id = state
        .auth
        .register(&input.email, &input.password)
        .await
        .map_err(map_auth_error)?;
    Ok(Json(RegisterOutput { user_id }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged In"),
        (status = 400, description = "Bad Request")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, (StatusCode, String)> {
    observability::AUTH_REQUESTS_TOTAL.inc();
    if input.email.is_empty() {
        return Err(map_auth_error(AuthError::Validation("email is required".into())));
    }
    if input.password.is_empty() {
        return Err(map_auth_error(AuthError::Validation("password is required".into())));
    }
    if input.app_id <= 0 {
        return Err(map_auth_error(AuthError::Validation("app_id is required".into())));
    }

    let token = state
        .auth
        .login(&input.email, &input.password, input.app_id)
        .await
        .map_err(map_auth_error)?;
    Ok(Json(LoginOutput { token }))
}

#[utoipa::path(get, path = "/auth/is_admin/{user_id}", tag = "auth",
    params(("user_id" = i64, Path, description = "User id to check")),
    responses(
        (status = 200, description = "Admin flag"),
        (status = 400, description = "Bad Request"),
        (status = 404, description = "Not Found")))]
pub async fn is_admin(
    State(state): State<ServerState>,
    Path(user_id): Path<i64>,
) -> Result<Json<IsAdminOutput>, (StatusCode, String)> {
    observability::AUTH_REQUESTS_TOTAL.inc();
    if user_id == 0 {
        return Err(map_auth_error(AuthError::Validation("user_id is required".into())));
    }

    let is_admin = state.auth.is_admin(user_id).await.map_err(map_auth_error)?;
    Ok(Json(IsAdminOutput { is_admin }))
}
