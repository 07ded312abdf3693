use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::invitation::{InvitationResponse, InviteMemberRequest};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::id::IdDTO;
use crate::application::dto::invitation::{InvitationDecisionDTO, InviteMemberDTO};
use crate::application::interactors::invitation::{
    AcceptInvitationInteractor, DeclineInvitationInteractor, GetMyInvitationsInteractor, InviteMemberInteractor,
};
use crate::infra::config::AppConfig;

#[utoipa::path(
    post,
    path = "/workspaces/{workspace_id}/invitations",
    tag = "Invitations",
    params(("workspace_id" = String, Path, description = "Workspace id")),
    request_body = InviteMemberRequest,
    responses(
        (status = 201, description = "Invitation created or refreshed", body = InvitationResponse),
        (status = 403, description = "Not allowed to invite", body = ErrorResponse),
        (
            status = 409,
            description = "Invitee is already a member",
            body = ErrorResponse,
            example = json!({ "error": "User is already a member of this workspace", "kind": "conflict" })
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn invite_member(
    auth_user: AuthUser,
    interactor: InviteMemberInteractor,
    State(config): State<Arc<AppConfig>>,
    Path(workspace_id): Path<String>,
    ValidJson(payload): ValidJson<InviteMemberRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = InviteMemberDTO {
        user_id: auth_user.user_id,
        workspace_id,
        email: payload.email.to_string(),
        role: payload.role,
        message: payload.message,
        ttl: config.invitation.ttl,
    };
    let invitation = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(InvitationResponse::from(invitation))))
}

#[utoipa::path(
    get,
    path = "/invitations",
    tag = "Invitations",
    responses(
        (status = 200, description = "Pending invitations addressed to the caller", body = Vec<InvitationResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_my_invitations(
    auth_user: AuthUser,
    interactor: GetMyInvitationsInteractor,
) -> AppResult<Json<Vec<InvitationResponse>>> {
    let invitations = interactor.execute(IdDTO { id: auth_user.user_id }).await?;
    Ok(Json(invitations.into_iter().map(InvitationResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/invitations/{token}/accept",
    tag = "Invitations",
    params(("token" = String, Path, description = "Invitation token")),
    responses(
        (status = 200, description = "Invitation accepted, membership created", body = InvitationResponse),
        (status = 403, description = "Invitation is addressed to another e-mail", body = ErrorResponse),
        (status = 404, description = "Invitation not found", body = ErrorResponse),
        (status = 409, description = "Invitation expired or already answered", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn accept_invitation(
    auth_user: AuthUser,
    interactor: AcceptInvitationInteractor,
    Path(token): Path<String>,
) -> AppResult<Json<InvitationResponse>> {
    let dto = InvitationDecisionDTO {
        user_id: auth_user.user_id,
        token,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    post,
    path = "/invitations/{token}/decline",
    tag = "Invitations",
    params(("token" = String, Path, description = "Invitation token")),
    responses(
        (status = 200, description = "Invitation declined", body = InvitationResponse),
        (status = 403, description = "Invitation is addressed to another e-mail", body = ErrorResponse),
        (status = 404, description = "Invitation not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn decline_invitation(
    auth_user: AuthUser,
    interactor: DeclineInvitationInteractor,
    Path(token): Path<String>,
) -> AppResult<Json<InvitationResponse>> {
    let dto = InvitationDecisionDTO {
        user_id: auth_user.user_id,
        token,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}
