use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::{build_logout_cookie, build_session_cookie};
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::auth::{LoginRequest, MessageResponse};
use crate::application::app_error::AppResult;
use crate::application::dto::auth::LoginDTO;
use crate::application::dto::id::IdDTO;
use crate::application::interactors::auth::{LoginInteractor, LogoutInteractor};
use crate::infra::config::AppConfig;

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body(
        content = LoginRequest,
        example = json!(
            {
                "email": "client@example.com",
                "password": "Password123!",
                "remember_me": true
            }
        )
    ),
    responses(
        (
            status = 200,
            description = "Login successful, session cookie set",
            body = MessageResponse,
            example = json!({ "message": "Login successful" })
        ),
        (
            status = 401,
            description = "Unknown e-mail or wrong password",
            body = ErrorResponse,
            example = json!({ "error": "Invalid Credentials", "kind": "unauthorized" })
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse
        )
    )
)]
pub async fn login(
    interactor: LoginInteractor,
    State(config): State<Arc<AppConfig>>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = LoginDTO {
        email: payload.email.to_string(),
        password: payload.password,
        remember_me: payload.remember_me,
        presence_ttl: config.presence.ttl,
    };
    let result = interactor.execute(dto).await?;
    let cookie = build_session_cookie(&result.session_id, result.remember_me, &config.session);
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, HeaderValue::from_str(&cookie)?);
    Ok((StatusCode::OK, headers, Json(MessageResponse::new("Login successful"))))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (
            status = 200,
            description = "All sessions of the user deleted, cookie expired",
            body = MessageResponse,
            example = json!({ "message": "Logged out successfully" })
        ),
        (status = 401, description = "Missing or invalid session", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn logout(
    auth_user: AuthUser,
    interactor: LogoutInteractor,
    State(config): State<Arc<AppConfig>>,
) -> AppResult<impl IntoResponse> {
    interactor.execute(IdDTO { id: auth_user.user_id }).await?;
    let cookie = build_logout_cookie(&config.session);
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, HeaderValue::from_str(&cookie)?);
    Ok((StatusCode::OK, headers, Json(MessageResponse::new("Logged out successfully"))))
}
