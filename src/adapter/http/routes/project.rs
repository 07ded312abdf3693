use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::auth::MessageResponse;
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::adapter::http::schema::project::{
    AssignProjectMemberRequest, CreateProjectRequest, ProjectListResponse, ProjectResponse, UpdateProjectRequest,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::project::{
    AssignProjectMemberDTO, CreateProjectDTO, GetProjectDTO, GetProjectListDTO, UpdateProjectDTO,
};
use crate::application::interactors::project::{
    AssignProjectMemberInteractor, CreateProjectInteractor, DeleteProjectInteractor, GetProjectInteractor,
    GetProjectListInteractor, UpdateProjectInteractor,
};

#[utoipa::path(
    post,
    path = "/workspaces/{workspace_id}/projects",
    tag = "Projects",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Viewers cannot create projects", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn create_project(
    auth_user: AuthUser,
    interactor: CreateProjectInteractor,
    Path(workspace_id): Path<String>,
    ValidJson(payload): ValidJson<CreateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateProjectDTO {
        user_id: auth_user.user_id,
        workspace_id,
        name: payload.name,
        description: payload.description,
        priority: payload.priority,
        budget: payload.budget,
        due_date: payload.due_date,
    };
    let project = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(project))))
}

#[utoipa::path(
    get,
    path = "/workspaces/{workspace_id}/projects",
    tag = "Projects",
    params(("workspace_id" = String, Path, description = "Workspace id"), PaginationQuery),
    responses(
        (status = 200, description = "Projects of the workspace", body = ProjectListResponse),
        (status = 403, description = "Not allowed to read this workspace", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_project_list(
    auth_user: AuthUser,
    interactor: GetProjectListInteractor,
    Path(workspace_id): Path<String>,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<ProjectListResponse>> {
    let dto = GetProjectListDTO {
        user_id: auth_user.user_id,
        workspace_id,
        page: query.into(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(("project_id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 403, description = "Not allowed to read this workspace", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_project(
    auth_user: AuthUser,
    interactor: GetProjectInteractor,
    Path(project_id): Path<String>,
) -> AppResult<Json<ProjectResponse>> {
    let dto = GetProjectDTO {
        user_id: auth_user.user_id,
        project_id,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(("project_id" = String, Path, description = "Project id")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 403, description = "Not allowed to update content", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_project(
    auth_user: AuthUser,
    interactor: UpdateProjectInteractor,
    Path(project_id): Path<String>,
    ValidJson(payload): ValidJson<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let dto = UpdateProjectDTO {
        user_id: auth_user.user_id,
        project_id,
        name: payload.name,
        description: payload.description,
        status: payload.status,
        priority: payload.priority,
        progress: payload.progress,
        budget: payload.budget,
        earnings: payload.earnings,
        due_date: payload.due_date,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    delete,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(("project_id" = String, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project deleted", body = MessageResponse),
        (status = 403, description = "Owner or admin only", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn delete_project(
    auth_user: AuthUser,
    interactor: DeleteProjectInteractor,
    Path(project_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let dto = GetProjectDTO {
        user_id: auth_user.user_id,
        project_id,
    };
    interactor.execute(dto).await?;
    Ok(Json(MessageResponse::new("Project deleted")))
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}/members",
    tag = "Projects",
    params(("project_id" = String, Path, description = "Project id")),
    request_body = AssignProjectMemberRequest,
    responses(
        (status = 200, description = "Member assigned", body = ProjectResponse),
        (status = 403, description = "Not allowed, or assignee is outside the workspace", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn assign_project_member(
    auth_user: AuthUser,
    interactor: AssignProjectMemberInteractor,
    Path(project_id): Path<String>,
    ValidJson(payload): ValidJson<AssignProjectMemberRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let dto = AssignProjectMemberDTO {
        user_id: auth_user.user_id,
        project_id,
        member_user_id: payload.user_id,
        role: payload.role,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}
