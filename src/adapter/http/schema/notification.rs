use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::application::dto::notification::{NotificationDTO, NotificationListDTO};

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: String,
    #[schema(example = "contract_offered")]
    pub kind: String,
    pub title: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub data: Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationDTO> for NotificationResponse {
    fn from(dto: NotificationDTO) -> Self {
        Self {
            id: dto.id,
            kind: dto.kind,
            title: dto.title,
            message: dto.message,
            data: dto.data,
            is_read: dto.is_read,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub total: i64,
    pub unread: i64,
    pub page: i64,
    pub per_page: i64,
    pub items: Vec<NotificationResponse>,
}

impl From<NotificationListDTO> for NotificationListResponse {
    fn from(dto: NotificationListDTO) -> Self {
        Self {
            total: dto.total,
            unread: dto.unread,
            page: dto.page,
            per_page: dto.per_page,
            items: dto.items.into_iter().map(NotificationResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MarkAllReadResponse {
    pub updated: u64,
}
