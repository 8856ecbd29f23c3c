use utoipa::OpenApi;

#[derive(utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub app_id: i64,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::is_admin,
    ),
    components(schemas(HealthResponse, RegisterRequest, LoginRequest)),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
