use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::discussion::{
    CreateDiscussionRequest, DiscussionListResponse, DiscussionMessageResponse, DiscussionResponse,
    PostMessageRequest, UpdateDiscussionRequest,
};
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::discussion::{
    CreateDiscussionDTO, GetDiscussionDTO, GetDiscussionListDTO, PostMessageDTO, UpdateDiscussionDTO,
};
use crate::application::interactors::discussion::{
    CreateDiscussionInteractor, GetDiscussionInteractor, GetDiscussionListInteractor, PostMessageInteractor,
    UpdateDiscussionInteractor,
};

#[utoipa::path(
    post,
    path = "/workspaces/{workspace_id}/discussions",
    tag = "Discussions",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    request_body = CreateDiscussionRequest,
    responses(
        (status = 201, description = "Discussion started", body = DiscussionResponse),
        (status = 403, description = "Viewers cannot start discussions", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn create_discussion(
    auth_user: AuthUser,
    interactor: CreateDiscussionInteractor,
    Path(workspace_id): Path<String>,
    ValidJson(payload): ValidJson<CreateDiscussionRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateDiscussionDTO {
        user_id: auth_user.user_id,
        workspace_id,
        title: payload.title,
        first_message: payload.first_message,
    };
    let discussion = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(DiscussionResponse::from(discussion))))
}

#[utoipa::path(
    get,
    path = "/workspaces/{workspace_id}/discussions",
    tag = "Discussions",
    params(("workspace_id" = String, Path, description = "Workspace id"), PaginationQuery),
    responses(
        (status = 200, description = "Discussions, pinned first then most recently active", body = DiscussionListResponse),
        (status = 403, description = "Not allowed to read this workspace", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_discussion_list(
    auth_user: AuthUser,
    interactor: GetDiscussionListInteractor,
    Path(workspace_id): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<DiscussionListResponse>> {
    let dto = GetDiscussionListDTO {
        user_id: auth_user.user_id,
        workspace_id,
        page: query.into(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    get,
    path = "/discussions/{discussion_id}",
    tag = "Discussions",
    params(("discussion_id" = String, Path, description = "Discussion id")),
    responses(
        (status = 200, description = "Discussion with its thread", body = DiscussionResponse),
        (status = 403, description = "Not allowed to read this workspace", body = ErrorResponse),
        (status = 404, description = "Discussion not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_discussion(
    auth_user: AuthUser,
    interactor: GetDiscussionInteractor,
    Path(discussion_id): Path<String>,
) -> AppResult<Json<DiscussionResponse>> {
    let dto = GetDiscussionDTO {
        user_id: auth_user.user_id,
        discussion_id,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    post,
    path = "/discussions/{discussion_id}/messages",
    tag = "Discussions",
    params(("discussion_id" = String, Path, description = "Discussion id")),
    request_body = PostMessageRequest,
    responses(
        (status = 201, description = "Message appended", body = DiscussionMessageResponse),
        (status = 403, description = "Viewers cannot post", body = ErrorResponse),
        (status = 404, description = "Discussion not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn post_message(
    auth_user: AuthUser,
    interactor: PostMessageInteractor,
    Path(discussion_id): Path<String>,
    ValidJson(payload): ValidJson<PostMessageRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = PostMessageDTO {
        user_id: auth_user.user_id,
        discussion_id,
        body: payload.body,
    };
    let message = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(DiscussionMessageResponse::from(message))))
}

#[utoipa::path(
    patch,
    path = "/discussions/{discussion_id}",
    tag = "Discussions",
    params(("discussion_id" = String, Path, description = "Discussion id")),
    request_body = UpdateDiscussionRequest,
    responses(
        (status = 200, description = "Discussion updated", body = DiscussionResponse),
        (status = 403, description = "Not allowed to update content", body = ErrorResponse),
        (status = 404, description = "Discussion not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_discussion(
    auth_user: AuthUser,
    interactor: UpdateDiscussionInteractor,
    Path(discussion_id): Path<String>,
    ValidJson(payload): ValidJson<UpdateDiscussionRequest>,
) -> AppResult<Json<DiscussionResponse>> {
    let dto = UpdateDiscussionDTO {
        user_id: auth_user.user_id,
        discussion_id,
        is_pinned: payload.is_pinned,
        status: payload.status,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}
