use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::auth::MessageResponse;
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::adapter::http::schema::workspace::{
    CreateWorkspaceRequest, UpdateMemberRoleRequest, UpdateWorkspaceRequest, WorkspaceListResponse,
    WorkspaceMemberResponse, WorkspaceResponse,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::workspace::{
    CreateWorkspaceDTO, DeleteWorkspaceDTO, GetWorkspaceDTO, GetWorkspaceListDTO, LeaveWorkspaceDTO,
    RemoveMemberDTO, UpdateMemberRoleDTO, UpdateWorkspaceDTO,
};
use crate::application::interactors::workspace::{
    CreateWorkspaceInteractor, DeleteWorkspaceInteractor, GetWorkspaceInteractor, GetWorkspaceListInteractor,
    GetWorkspaceMembersInteractor, LeaveWorkspaceInteractor, RemoveMemberInteractor, UpdateMemberRoleInteractor,
    UpdateWorkspaceInteractor,
};

#[utoipa::path(
    post,
    path = "/workspaces",
    tag = "Workspaces",
    request_body = CreateWorkspaceRequest,
    responses(
        (status = 201, description = "Workspace created", body = WorkspaceResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn create_workspace(
    auth_user: AuthUser,
    interactor: CreateWorkspaceInteractor,
    ValidJson(payload): ValidJson<CreateWorkspaceRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateWorkspaceDTO {
        owner_user_id: auth_user.user_id,
        name: payload.name,
        description: payload.description,
        is_public: payload.is_public,
        allow_member_invite: payload.allow_member_invite,
    };
    let workspace = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(WorkspaceResponse::from(workspace))))
}

#[utoipa::path(
    get,
    path = "/workspaces",
    tag = "Workspaces",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Workspaces the user owns or belongs to", body = WorkspaceListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_workspace_list(
    auth_user: AuthUser,
    interactor: GetWorkspaceListInteractor,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<WorkspaceListResponse>> {
    let dto = GetWorkspaceListDTO {
        user_id: auth_user.user_id,
        page: query.into(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    get,
    path = "/workspaces/{workspace_id}",
    tag = "Workspaces",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    responses(
        (status = 200, description = "Workspace", body = WorkspaceResponse),
        (status = 403, description = "Private workspace and caller is not a member", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_workspace(
    auth_user: AuthUser,
    interactor: GetWorkspaceInteractor,
    Path(workspace_id): Path<String>,
) -> AppResult<Json<WorkspaceResponse>> {
    let dto = GetWorkspaceDTO {
        user_id: auth_user.user_id,
        workspace_id,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/workspaces/{workspace_id}",
    tag = "Workspaces",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    request_body = UpdateWorkspaceRequest,
    responses(
        (status = 200, description = "Workspace updated", body = WorkspaceResponse),
        (status = 403, description = "Owner or admin only", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_workspace(
    auth_user: AuthUser,
    interactor: UpdateWorkspaceInteractor,
    Path(workspace_id): Path<String>,
    ValidJson(payload): ValidJson<UpdateWorkspaceRequest>,
) -> AppResult<Json<WorkspaceResponse>> {
    let dto = UpdateWorkspaceDTO {
        user_id: auth_user.user_id,
        workspace_id,
        name: payload.name,
        description: payload.description,
        is_public: payload.is_public,
        allow_member_invite: payload.allow_member_invite,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/workspaces/{workspace_id}",
    tag = "Workspaces",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    responses(
        (status = 200, description = "Workspace deactivated", body = MessageResponse),
        (status = 403, description = "Owner only", body = ErrorResponse),
        (status = 404, description = "Workspace not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn delete_workspace(
    auth_user: AuthUser,
    interactor: DeleteWorkspaceInteractor,
    Path(workspace_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let dto = DeleteWorkspaceDTO {
        user_id: auth_user.user_id,
        workspace_id,
    };
    interactor.execute(dto).await?;
    Ok(Json(MessageResponse::new("Workspace deleted")))
}

#[utoipa::path(
    get,
    path = "/workspaces/{workspace_id}/members",
    tag = "Workspaces",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    responses(
        (status = 200, description = "Workspace members", body = Vec<WorkspaceMemberResponse>),
        (status = 403, description = "Not allowed to read this workspace", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_workspace_members(
    auth_user: AuthUser,
    interactor: GetWorkspaceMembersInteractor,
    Path(workspace_id): Path<String>,
) -> AppResult<Json<Vec<WorkspaceMemberResponse>>> {
    let dto = GetWorkspaceDTO {
        user_id: auth_user.user_id,
        workspace_id,
    };
    let members = interactor.execute(dto).await?;
    Ok(Json(members.into_iter().map(WorkspaceMemberResponse::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/workspaces/{workspace_id}/members/{user_id}",
    tag = "Workspaces",
    params(
        ("workspace_id" = String, Path, description = "Workspace id"),
        ("user_id" = String, Path, description = "Member user id")
    ),
    request_body = UpdateMemberRoleRequest,
    responses(
        (status = 200, description = "Role changed", body = WorkspaceMemberResponse),
        (status = 403, description = "Not allowed, or target is the owner", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_member_role(
    auth_user: AuthUser,
    interactor: UpdateMemberRoleInteractor,
    Path((workspace_id, target_user_id)): Path<(String, String)>,
    ValidJson(payload): ValidJson<UpdateMemberRoleRequest>,
) -> AppResult<Json<WorkspaceMemberResponse>> {
    let dto = UpdateMemberRoleDTO {
        user_id: auth_user.user_id,
        workspace_id,
        target_user_id,
        role: payload.role,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/workspaces/{workspace_id}/members/{user_id}",
    tag = "Workspaces",
    params(
        ("workspace_id" = String, Path, description = "Workspace id"),
        ("user_id" = String, Path, description = "Member user id")
    ),
    responses(
        (status = 200, description = "Member removed", body = MessageResponse),
        (status = 403, description = "Not allowed, or target is the owner", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn remove_member(
    auth_user: AuthUser,
    interactor: RemoveMemberInteractor,
    Path((workspace_id, target_user_id)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let dto = RemoveMemberDTO {
        user_id: auth_user.user_id,
        workspace_id,
        target_user_id,
    };
    interactor.execute(dto).await?;
    Ok(Json(MessageResponse::new("Member removed")))
}

#[utoipa::path(
    post,
    path = "/workspaces/{workspace_id}/leave",
    tag = "Workspaces",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    responses(
        (status = 200, description = "Left the workspace", body = MessageResponse),
        (status = 403, description = "The owner cannot leave", body = ErrorResponse),
        (status = 404, description = "Not a member", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn leave_workspace(
    auth_user: AuthUser,
    interactor: LeaveWorkspaceInteractor,
    Path(workspace_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let dto = LeaveWorkspaceDTO {
        user_id: auth_user.user_id,
        workspace_id,
    };
    interactor.execute(dto).await?;
    Ok(Json(MessageResponse::new("Left the workspace")))
}
