use std::sync::Arc;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::notification::{
    GetNotificationListDTO, MarkNotificationReadDTO, NotificationDTO, NotificationListDTO,
};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::notification::{NotificationReader, NotificationWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::Notification;
use crate::domain::entities::user::User;

#[derive(Clone)]
pub struct GetNotificationListInteractor {
    notification_reader: Arc<dyn NotificationReader>,
}

impl GetNotificationListInteractor {
    pub fn new(notification_reader: Arc<dyn NotificationReader>) -> Self {
        Self { notification_reader }
    }

    /// Newest first, with the caller's unread count.
    pub async fn execute(&self, dto: GetNotificationListDTO) -> AppResult<NotificationListDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let (page, per_page, offset) = dto.page.bounds();
        let total = self.notification_reader.count_for_user(&user_id).await?;
        let unread = self.notification_reader.count_unread(&user_id).await?;
        let notifications = self.notification_reader.get_for_user(&user_id, per_page, offset).await?;
        Ok(NotificationListDTO {
            total,
            unread,
            page,
            per_page,
            items: notifications.into_iter().map(NotificationDTO::from).collect(),
        })
    }
}

#[derive(Clone)]
pub struct MarkNotificationReadInteractor {
    db_session: Arc<dyn DBSession>,
    notification_writer: Arc<dyn NotificationWriter>,
}

impl MarkNotificationReadInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, notification_writer: Arc<dyn NotificationWriter>) -> Self {
        Self {
            db_session,
            notification_writer,
        }
    }

    pub async fn execute(&self, dto: MarkNotificationReadDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let notification_id: Id<Notification> = dto.notification_id.try_into()?;
        // Someone else's notification looks exactly like a missing one.
        if !self.notification_writer.mark_read(&notification_id, &user_id).await? {
            return Err(AppError::NotificationNotFound);
        }
        self.db_session.commit().await
    }
}

#[derive(Clone)]
pub struct MarkAllNotificationsReadInteractor {
    db_session: Arc<dyn DBSession>,
    notification_writer: Arc<dyn NotificationWriter>,
}

impl MarkAllNotificationsReadInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, notification_writer: Arc<dyn NotificationWriter>) -> Self {
        Self {
            db_session,
            notification_writer,
        }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<u64> {
        let user_id: Id<User> = dto.id.try_into()?;
        let updated = self.notification_writer.mark_all_read(&user_id).await?;
        self.db_session.commit().await?;
        Ok(updated)
    }
}
