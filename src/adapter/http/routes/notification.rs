use axum::extract::{Path, Query};
use axum::Json;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::auth::AuthUser;
use crate::adapter::http::schema::auth::MessageResponse;
use crate::adapter::http::schema::notification::{MarkAllReadResponse, NotificationListResponse};
use crate::adapter::http::schema::pagination::PaginationQuery;
use crate::application::app_error::AppResult;
use crate::application::dto::id::IdDTO;
use crate::application::dto::notification::{GetNotificationListDTO, MarkNotificationReadDTO};
use crate::application::interactors::notification::{
    GetNotificationListInteractor, MarkAllNotificationsReadInteractor, MarkNotificationReadInteractor,
};

#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notifications",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Notifications, newest first, with the unread count", body = NotificationListResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn get_notification_list(
    auth_user: AuthUser,
    interactor: GetNotificationListInteractor,
    Query(query): Query<PaginationQuery>,
) -> AppResult<Json<NotificationListResponse>> {
    let dto = GetNotificationListDTO {
        user_id: auth_user.user_id,
        page: query.into(),
    };
    Ok(Json(interactor.execute(dto).await?.into()))
}

#[utoipa::path(
    post,
    path = "/notifications/{notification_id}/read",
    tag = "Notifications",
    params(("notification_id" = String, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Marked as read", body = MessageResponse),
        (status = 404, description = "Notification not found", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn mark_notification_read(
    auth_user: AuthUser,
    interactor: MarkNotificationReadInteractor,
    Path(notification_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let dto = MarkNotificationReadDTO {
        user_id: auth_user.user_id,
        notification_id,
    };
    interactor.execute(dto).await?;
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

#[utoipa::path(
    post,
    path = "/notifications/read-all",
    tag = "Notifications",
    responses(
        (status = 200, description = "Number of notifications marked as read", body = MarkAllReadResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    ),
    security(("cookieAuth" = []))
)]
pub async fn mark_all_notifications_read(
    auth_user: AuthUser,
    interactor: MarkAllNotificationsReadInteractor,
) -> AppResult<Json<MarkAllReadResponse>> {
    let updated = interactor.execute(IdDTO { id: auth_user.user_id }).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}
