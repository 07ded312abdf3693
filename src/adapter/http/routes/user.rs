use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::user::{CreateUserRequest, UpdateProfileRequest, UserResponse};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::id::IdDTO;
use crate::application::dto::user::{CreateUserDTO, UpdateProfileDTO};
use crate::application::interactors::users::{CreateUserInteractor, GetMeInteractor, UpdateProfileInteractor};

#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (
            status = 409,
            description = "E-mail or username already taken",
            body = ErrorResponse,
            example = json!({ "error": "User with this email already exists", "kind": "conflict" })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn register(
    interactor: CreateUserInteractor,
    ValidJson(payload): ValidJson<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateUserDTO {
        username: payload.username,
        email: payload.email.to_string(),
        password: payload.password.value().to_string(),
        role: payload.role,
        full_name: payload.full_name,
    };
    let user = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_me(auth_user: AuthUser, interactor: GetMeInteractor) -> AppResult<Json<UserResponse>> {
    let user = interactor.execute(IdDTO { id: auth_user.user_id }).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "Users",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_profile(
    auth_user: AuthUser,
    interactor: UpdateProfileInteractor,
    ValidJson(payload): ValidJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let dto = UpdateProfileDTO {
        user_id: auth_user.user_id,
        full_name: payload.full_name,
        bio: payload.bio,
        skills: payload.skills,
        hourly_rate: payload.hourly_rate,
    };
    let user = interactor.execute(dto).await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::header::COOKIE;
    use axum::http::{Request, StatusCode};
    use rstest::rstest;
    use serde_json::{json, Value};
    use serial_test::serial;
    use tower::ServiceExt;

    use crate::infra::app::create_app;
    use crate::infra::state::AppState;
    use crate::tests::fixtures::{init_test_app_state, lazy_app_state};
    use crate::tests::helpers::{
        body_json, delete_user, find_user_by_email, insert_plain_user, insert_session, session_cookie,
        unique_credentials,
    };

    fn register_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/users/register")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[rstest]
    #[case("short1!")]
    #[case("password123!")]
    #[case("Password!!!")]
    #[case("Password123")]
    #[tokio::test]
    async fn test_register_rejects_weak_password(lazy_app_state: AppState, #[case] password: &str) {
        let app = create_app(lazy_app_state.config.as_ref(), lazy_app_state.clone());
        let (username, email) = unique_credentials();
        let body = json!({ "username": username, "email": email, "password": password, "role": "client" });

        let response = app.oneshot(register_request(body)).await.unwrap();
        let status = response.status();
        let json = body_json(response).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "validation_error");
    }

    #[rstest]
    #[tokio::test]
    async fn test_register_rejects_unknown_role(lazy_app_state: AppState) {
        let app = create_app(lazy_app_state.config.as_ref(), lazy_app_state.clone());
        let (username, email) = unique_credentials();
        let body = json!({ "username": username, "email": email, "password": "Password123!", "role": "admin" });

        let response = app.oneshot(register_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    #[ignore = "needs TEST_DATABASE_URL"]
    async fn test_register_then_duplicate_email(#[future] init_test_app_state: anyhow::Result<AppState>) {
        let state = init_test_app_state.await.expect("init app state");
        let app = create_app(state.config.as_ref(), state.clone());
        let (username, email) = unique_credentials();

        let body = json!({ "username": username, "email": email, "password": "Password123!", "role": "freelancer" });
        let first = app.clone().oneshot(register_request(body)).await.unwrap();
        let first_status = first.status();
        let created = body_json(first).await;

        let again = json!({ "username": format!("{}_2", username), "email": email, "password": "Password123!", "role": "client" });
        let second = app.oneshot(register_request(again)).await.unwrap();
        let second_status = second.status();

        if let Some(user_id) = find_user_by_email(&state.pool, &email).await {
            delete_user(&state.pool, user_id).await;
        }

        assert_eq!(first_status, StatusCode::CREATED);
        assert_eq!(created["role"], "freelancer");
        assert_eq!(created["total_earnings"], 0);
        assert!(created.get("password").is_none());
        assert_eq!(second_status, StatusCode::CONFLICT);
    }

    #[rstest]
    #[tokio::test]
    #[serial]
    #[ignore = "needs TEST_DATABASE_URL"]
    async fn test_update_profile(#[future] init_test_app_state: anyhow::Result<AppState>) {
        let state = init_test_app_state.await.expect("init app state");
        let app = create_app(state.config.as_ref(), state.clone());
        let user_id = insert_plain_user(&state.pool, "freelancer").await;
        let session_id = insert_session(&state.pool, user_id).await;
        let cookie = session_cookie(session_id, &state.config.session.cookie_name);

        let body = json!({ "bio": "Rust and Postgres", "skills": ["rust", "sql"], "hourly_rate": 4000 });
        let request = Request::builder()
            .method("PATCH")
            .uri("/users/me")
            .header("content-type", "application/json")
            .header(COOKIE, &cookie)
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let json = body_json(response).await;

        delete_user(&state.pool, user_id).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["bio"], "Rust and Postgres");
        assert_eq!(json["skills"], json!(["rust", "sql"]));
        assert_eq!(json["hourly_rate"], 4000);
    }
}
