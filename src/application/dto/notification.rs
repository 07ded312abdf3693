use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::application::dto::pagination::PageRequestDTO;
use crate::domain::entities::notification::Notification;

#[derive(Debug, Clone)]
pub struct GetNotificationListDTO {
    pub user_id: String,
    pub page: PageRequestDTO,
}

#[derive(Debug, Clone)]
pub struct MarkNotificationReadDTO {
    pub user_id: String,
    pub notification_id: String,
}

#[derive(Debug, Clone)]
pub struct NotificationDTO {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: Value,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDTO {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.value.to_string(),
            kind: notification.kind.as_str().to_string(),
            title: notification.title,
            message: notification.message,
            data: notification.data,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationListDTO {
    pub total: i64,
    pub unread: i64,
    pub page: i64,
    pub per_page: i64,
    pub items: Vec<NotificationDTO>,
}
