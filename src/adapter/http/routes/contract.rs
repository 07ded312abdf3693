use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::contract::{
    ContractListResponse, ContractResponse, CreateContractRequest, MilestoneResponse, UpdateContractStatusRequest,
    UpdateMilestoneStatusRequest,
};
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::contract::{
    CreateContractDTO, GetContractDTO, GetContractListDTO, NewMilestoneDTO, UpdateContractStatusDTO,
    UpdateMilestoneStatusDTO,
};
use crate::application::interactors::contract::{
    CreateContractInteractor, GetContractInteractor, GetContractListInteractor, UpdateContractStatusInteractor,
    UpdateMilestoneStatusInteractor,
};

#[utoipa::path(
    post,
    path = "/contracts",
    tag = "Contracts",
    request_body = CreateContractRequest,
    responses(
        (status = 201, description = "Contract offered, status `pending-acceptance`", body = ContractResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Only clients can offer contracts", body = ErrorResponse),
        (status = 404, description = "Freelancer not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn create_contract(
    auth_user: AuthUser,
    interactor: CreateContractInteractor,
    ValidJson(payload): ValidJson<CreateContractRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateContractDTO {
        user_id: auth_user.user_id,
        freelancer_id: payload.freelancer_id,
        title: payload.title,
        description: payload.description,
        budget: payload.budget,
        deadline: payload.deadline,
        milestones: payload.milestones.into_iter().map(NewMilestoneDTO::from).collect(),
    };
    let contract = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(ContractResponse::from(contract))))
}

#[utoipa::path(
    get,
    path = "/contracts",
    tag = "Contracts",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Contracts where the caller is client or freelancer", body = ContractListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_contract_list(
    auth_user: AuthUser,
    interactor: GetContractListInteractor,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<ContractListResponse>> {
    let dto = GetContractListDTO {
        user_id: auth_user.user_id,
        page: query.into(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    get,
    path = "/contracts/{contract_id}",
    tag = "Contracts",
    params(("contract_id" = String, Path, description = "Contract id")),
    responses(
        (status = 200, description = "Contract", body = ContractResponse),
        (status = 403, description = "Caller is not a party", body = ErrorResponse),
        (status = 404, description = "Contract not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_contract(
    auth_user: AuthUser,
    interactor: GetContractInteractor,
    Path(contract_id): Path<String>,
) -> AppResult<Json<ContractResponse>> {
    let dto = GetContractDTO {
        user_id: auth_user.user_id,
        contract_id,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/contracts/{contract_id}/status",
    tag = "Contracts",
    params(("contract_id" = String, Path, description = "Contract id")),
    request_body = UpdateContractStatusRequest,
    responses(
        (status = 200, description = "Transition applied", body = ContractResponse),
        (status = 403, description = "Caller may not perform this transition", body = ErrorResponse),
        (status = 404, description = "Contract not found", body = ErrorResponse),
        (
            status = 409,
            description = "Transition not allowed from the current status",
            body = ErrorResponse,
            example = json!({
                "error": "Cannot move contract from `completed` to `in-progress`",
                "kind": "invalid_transition"
            })
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_contract_status(
    auth_user: AuthUser,
    interactor: UpdateContractStatusInteractor,
    Path(contract_id): Path<String>,
    ValidJson(payload): ValidJson<UpdateContractStatusRequest>,
) -> AppResult<Json<ContractResponse>> {
    let dto = UpdateContractStatusDTO {
        user_id: auth_user.user_id,
        contract_id,
        status: payload.status,
        reason: payload.reason,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    patch,
    path = "/contracts/{contract_id}/milestones/{milestone_id}",
    tag = "Contracts",
    params(
        ("contract_id" = String, Path, description = "Contract id"),
        ("milestone_id" = String, Path, description = "Milestone id")
    ),
    request_body = UpdateMilestoneStatusRequest,
    responses(
        (status = 200, description = "Milestone updated", body = MilestoneResponse),
        (status = 403, description = "Caller may not move this milestone", body = ErrorResponse),
        (status = 404, description = "Contract or milestone not found", body = ErrorResponse),
        (status = 409, description = "Contract is not in progress, or transition not allowed", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn update_milestone_status(
    auth_user: AuthUser,
    interactor: UpdateMilestoneStatusInteractor,
    Path((contract_id, milestone_id)): Path<(String, String)>,
    ValidJson(payload): ValidJson<UpdateMilestoneStatusRequest>,
) -> AppResult<Json<MilestoneResponse>> {
    let dto = UpdateMilestoneStatusDTO {
        user_id: auth_user.user_id,
        contract_id,
        milestone_id,
        status: payload.status,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}
