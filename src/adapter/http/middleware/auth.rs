use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::session::{SessionDTO, SessionValidationResult};
use crate::application::interactors::session::ValidateSessionInteractor;
use crate::infra::config::{AppConfig, SessionConfig};

/// The caller resolved by [`auth_middleware`], read back from request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::InvalidCredentials)
    }
}

pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    interactor: ValidateSessionInteractor,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let session_config = &config.session;
    let session_id = extract_session_id(&request, &session_config.cookie_name)?;
    let dto = SessionDTO {
        id: session_id,
        default_max_lifetime: session_config.default_max_lifetime,
        default_idle_timeout: session_config.default_idle_timeout,
        remembered_max_lifetime: session_config.remembered_max_lifetime,
        remembered_idle_timeout: session_config.remembered_idle_timeout,
    };

    let result = interactor.execute(dto).await.map_err(|e| match e {
        AppError::InvalidId(_) => AppError::InvalidCredentials,
        other => other,
    })?;

    match result.status {
        SessionValidationResult::Valid(user_id) => {
            request.extensions_mut().insert(AuthUser {
                user_id: user_id.value.to_string(),
            });
        }
        SessionValidationResult::Expired | SessionValidationResult::Invalid => {
            return Err(AppError::InvalidCredentials);
        }
    }

    Ok(next.run(request).await)
}

fn extract_session_id(request: &Request, cookie_name: &str) -> AppResult<String> {
    let cookie_header = request
        .headers()
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidCredentials)?;

    let prefix = format!("{}=", cookie_name);
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(&prefix))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(AppError::InvalidCredentials)
}

pub fn build_session_cookie(session_id: &str, remember_me: bool, config: &SessionConfig) -> String {
    let max_age = if remember_me {
        config.remembered_max_lifetime
    } else {
        config.default_max_lifetime
    };

    let secure = if config.cookie_secure { "; Secure" } else { "" };
    let http_only = if config.cookie_http_only { "; HttpOnly" } else { "" };
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax{}{}",
        config.cookie_name, session_id, max_age, secure, http_only
    )
}

pub fn build_logout_cookie(config: &SessionConfig) -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", config.cookie_name)
}
