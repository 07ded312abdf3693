use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::gig::{CreateGigRequest, GigListResponse, GigResponse};
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::gig::{CreateGigDTO, GigActionDTO};
use crate::application::dto::id::IdDTO;
use crate::application::interactors::gig::{
    AcceptGigInteractor, CompleteGigInteractor, CreateGigInteractor, GetGigInteractor, GetOpenGigsInteractor,
};

#[utoipa::path(
    post,
    path = "/gigs",
    tag = "Gigs",
    request_body = CreateGigRequest,
    responses(
        (status = 201, description = "Gig posted", body = GigResponse),
        (status = 403, description = "Only clients can post gigs", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn create_gig(
    auth_user: AuthUser,
    interactor: CreateGigInteractor,
    ValidJson(payload): ValidJson<CreateGigRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateGigDTO {
        user_id: auth_user.user_id,
        title: payload.title,
        description: payload.description,
        budget: payload.budget,
        deadline: payload.deadline,
    };
    let gig = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(GigResponse::from(gig))))
}

#[utoipa::path(
    get,
    path = "/gigs",
    tag = "Gigs",
    params(PaginationQuery),
    responses((status = 200, description = "Open gigs, newest first", body = GigListResponse))
)]
pub async fn get_open_gigs(
    interactor: GetOpenGigsInteractor,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<GigListResponse>> {
    Ok(Json(interactor.execute(query.into()).await?.into()))
}

#[utoipa::path(
    get,
    path = "/gigs/{gig_id}",
    tag = "Gigs",
    params(("gig_id" = String, Path, description = "Gig id")),
    responses(
        (status = 200, description = "Gig", body = GigResponse),
        (status = 404, description = "Gig not found", body = ErrorResponse)
    )
)]
pub async fn get_gig(interactor: GetGigInteractor, Path(gig_id): Path<String>) -> AppResult<Json<GigResponse>> {
    Ok(Json(interactor.execute(IdDTO { id: gig_id }).await?.into()))
}

#[utoipa::path(
    post,
    path = "/gigs/{gig_id}/accept",
    tag = "Gigs",
    params(("gig_id" = String, Path, description = "Gig id")),
    responses(
        (status = 200, description = "Gig assigned to the caller", body = GigResponse),
        (status = 403, description = "Only freelancers can accept gigs", body = ErrorResponse),
        (
            status = 409,
            description = "Gig is no longer open",
            body = ErrorResponse,
            example = json!({ "error": "Cannot move gig from `assigned` to `assigned`", "kind": "invalid_transition" })
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn accept_gig(
    auth_user: AuthUser,
    interactor: AcceptGigInteractor,
    Path(gig_id): Path<String>,
) -> AppResult<Json<GigResponse>> {
    let dto = GigActionDTO {
        user_id: auth_user.user_id,
        gig_id,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    post,
    path = "/gigs/{gig_id}/complete",
    tag = "Gigs",
    params(("gig_id" = String, Path, description = "Gig id")),
    responses(
        (status = 200, description = "Gig completed", body = GigResponse),
        (status = 403, description = "Only the posting client can complete", body = ErrorResponse),
        (status = 409, description = "Gig is not assigned", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn complete_gig(
    auth_user: AuthUser,
    interactor: CompleteGigInteractor,
    Path(gig_id): Path<String>,
) -> AppResult<Json<GigResponse>> {
    let dto = GigActionDTO {
        user_id: auth_user.user_id,
        gig_id,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}
