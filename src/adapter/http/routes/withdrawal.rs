use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::adapter::http::schema::withdrawal::{
    BalanceResponse, RequestWithdrawalRequest, WithdrawalListResponse, WithdrawalResponse,
};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::withdrawal::{
    CancelWithdrawalDTO, GetBalanceDTO, GetWithdrawalListDTO, RequestWithdrawalDTO,
};
use crate::application::interactors::withdrawal::{
    CancelWithdrawalInteractor, GetBalanceInteractor, GetWithdrawalListInteractor, RequestWithdrawalInteractor,
};
use crate::infra::config::AppConfig;

#[utoipa::path(
    get,
    path = "/withdrawals/balance",
    tag = "Withdrawals",
    responses(
        (status = 200, description = "Balance recomputed from payments and withdrawals", body = BalanceResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_balance(
    auth_user: AuthUser,
    interactor: GetBalanceInteractor,
    State(config): State<Arc<AppConfig>>,
) -> AppResult<Json<BalanceResponse>> {
    let dto = GetBalanceDTO {
        user_id: auth_user.user_id,
        policy: config.settlement.earnings_policy,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    post,
    path = "/withdrawals",
    tag = "Withdrawals",
    request_body = RequestWithdrawalRequest,
    responses(
        (status = 201, description = "Withdrawal recorded as pending", body = WithdrawalResponse),
        (status = 400, description = "Below the minimum or bad bank details", body = ErrorResponse),
        (
            status = 422,
            description = "Requested more than the available balance",
            body = ErrorResponse,
            example = json!({
                "error": "Insufficient balance: requested 600000, available 550000",
                "kind": "insufficient_balance"
            })
        )
    ),
    security(("cookieAuth" = []))
)]
pub async fn request_withdrawal(
    auth_user: AuthUser,
    interactor: RequestWithdrawalInteractor,
    State(config): State<Arc<AppConfig>>,
    ValidJson(payload): ValidJson<RequestWithdrawalRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = RequestWithdrawalDTO {
        user_id: auth_user.user_id,
        amount: payload.amount,
        bank_details: payload.bank_details.into(),
        minimum_amount: config.settlement.minimum_withdrawal,
        policy: config.settlement.earnings_policy,
    };
    let withdrawal = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(WithdrawalResponse::from(withdrawal))))
}

#[utoipa::path(
    get,
    path = "/withdrawals",
    tag = "Withdrawals",
    params(PaginationQuery),
    responses(
        (status = 200, description = "The caller's withdrawals, newest first", body = WithdrawalListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_withdrawal_list(
    auth_user: AuthUser,
    interactor: GetWithdrawalListInteractor,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<WithdrawalListResponse>> {
    let dto = GetWithdrawalListDTO {
        user_id: auth_user.user_id,
        page: query.into(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    post,
    path = "/withdrawals/{withdrawal_id}/cancel",
    tag = "Withdrawals",
    params(("withdrawal_id" = String, Path, description = "Withdrawal id")),
    responses(
        (status = 200, description = "Withdrawal cancelled", body = WithdrawalResponse),
        (status = 404, description = "Withdrawal not found", body = ErrorResponse),
        (status = 409, description = "Only pending withdrawals can be cancelled", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn cancel_withdrawal(
    auth_user: AuthUser,
    interactor: CancelWithdrawalInteractor,
    Path(withdrawal_id): Path<String>,
) -> AppResult<Json<WithdrawalResponse>> {
    let dto = CancelWithdrawalDTO {
        user_id: auth_user.user_id,
        withdrawal_id,
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}
