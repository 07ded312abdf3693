use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::auth::MessageResponse;
use crate::adapter::http::schema::presence::{OnlineUsersQuery, OnlineUsersResponse};
use crate::adapter::http::validation::ValidQuery;
use crate::application::app_error::AppResult;
use crate::application::dto::presence::{HeartbeatDTO, OnlineUsersDTO};
use crate::application::interactors::presence::{GetOnlineUsersInteractor, HeartbeatInteractor};
use crate::infra::config::AppConfig;

#[utoipa::path(
    post,
    path = "/presence/heartbeat",
    tag = "Presence",
    responses(
        (status = 200, description = "Presence extended by the configured TTL", body = MessageResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn heartbeat(
    auth_user: AuthUser,
    interactor: HeartbeatInteractor,
    State(config): State<Arc<AppConfig>>,
) -> AppResult<Json<MessageResponse>> {
    let dto = HeartbeatDTO {
        user_id: auth_user.user_id,
        ttl: config.presence.ttl,
    };
    interactor.execute(dto).await?;
    Ok(Json(MessageResponse::new("ok")))
}

#[utoipa::path(
    get,
    path = "/presence/online",
    tag = "Presence",
    params(OnlineUsersQuery),
    responses(
        (status = 200, description = "Subset of the queried users that are online", body = OnlineUsersResponse),
        (status = 400, description = "Too many or malformed ids", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_online_users(
    _auth_user: AuthUser,
    interactor: GetOnlineUsersInteractor,
    ValidQuery(query): ValidQuery<OnlineUsersQuery>,
) -> AppResult<Json<OnlineUsersResponse>> {
    let online = interactor.execute(OnlineUsersDTO { user_ids: query.ids() }).await?;
    Ok(Json(OnlineUsersResponse {
        user_ids: online.user_ids,
    }))
}
