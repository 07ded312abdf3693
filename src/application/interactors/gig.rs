use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::gig::{CreateGigDTO, GigActionDTO, GigDTO};
use crate::application::dto::id::IdDTO;
use crate::application::dto::pagination::{PageDTO, PageRequestDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::gig::{GigReader, GigWriter};
use crate::application::interface::gateway::notification::NotificationWriter;
use crate::application::interface::gateway::user::UserReader;
use crate::domain::entities::gig::{Gig, GigStatus};
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::{Notification, NotificationKind};
use crate::domain::entities::user::User;

fn gig_transition(gig: &Gig, to: GigStatus) -> AppError {
    AppError::InvalidTransition {
        entity: "gig",
        from: gig.status.as_str().to_string(),
        to: to.as_str().to_string(),
    }
}

#[derive(Clone)]
pub struct CreateGigInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    gig_writer: Arc<dyn GigWriter>,
}

impl CreateGigInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, user_reader: Arc<dyn UserReader>, gig_writer: Arc<dyn GigWriter>) -> Self {
        Self {
            db_session,
            user_reader,
            gig_writer,
        }
    }

    pub async fn execute(&self, dto: CreateGigDTO) -> AppResult<GigDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let user = self
            .user_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        if !user.is_client() {
            return Err(AppError::Forbidden("Only clients can post gigs".to_string()));
        }
        if dto.budget <= 0 {
            return Err(AppError::Validation("Gig budget must be positive".to_string()));
        }

        let gig = Gig::new(user_id, dto.title, dto.description, dto.budget, dto.deadline);
        self.gig_writer.insert(gig.clone()).await?;
        self.db_session.commit().await?;
        info!("Gig {} posted by {}", gig.id, gig.client_id);
        Ok(gig.into())
    }
}

#[derive(Clone)]
pub struct GetOpenGigsInteractor {
    gig_reader: Arc<dyn GigReader>,
}

impl GetOpenGigsInteractor {
    pub fn new(gig_reader: Arc<dyn GigReader>) -> Self {
        Self { gig_reader }
    }

    pub async fn execute(&self, dto: PageRequestDTO) -> AppResult<PageDTO<GigDTO>> {
        let (page, per_page, offset) = dto.bounds();
        let total = self.gig_reader.count_open().await?;
        let gigs = self.gig_reader.get_open(per_page, offset).await?;
        Ok(PageDTO {
            total,
            page,
            per_page,
            items: gigs.into_iter().map(GigDTO::from).collect(),
        })
    }
}

#[derive(Clone)]
pub struct GetGigInteractor {
    gig_reader: Arc<dyn GigReader>,
}

impl GetGigInteractor {
    pub fn new(gig_reader: Arc<dyn GigReader>) -> Self {
        Self { gig_reader }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<GigDTO> {
        let gig_id: Id<Gig> = dto.id.try_into()?;
        let gig = self.gig_reader.find_by_id(&gig_id).await?.ok_or(AppError::GigNotFound)?;
        Ok(gig.into())
    }
}

#[derive(Clone)]
pub struct AcceptGigInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    gig_reader: Arc<dyn GigReader>,
    gig_writer: Arc<dyn GigWriter>,
    notification_writer: Arc<dyn NotificationWriter>,
}

impl AcceptGigInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        gig_reader: Arc<dyn GigReader>,
        gig_writer: Arc<dyn GigWriter>,
        notification_writer: Arc<dyn NotificationWriter>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            gig_reader,
            gig_writer,
            notification_writer,
        }
    }

    pub async fn execute(&self, dto: GigActionDTO) -> AppResult<GigDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let gig_id: Id<Gig> = dto.gig_id.try_into()?;

        let freelancer = self
            .user_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        if !freelancer.is_freelancer() {
            return Err(AppError::Forbidden("Only freelancers can accept gigs".to_string()));
        }

        let mut gig = self.gig_reader.find_by_id(&gig_id).await?.ok_or(AppError::GigNotFound)?;
        if gig.status != GigStatus::Open {
            return Err(gig_transition(&gig, GigStatus::Assigned));
        }
        if !self.gig_writer.assign(&gig_id, &user_id).await? {
            warn!("Gig {} was taken before {} could accept it", gig_id, user_id);
            return Err(gig_transition(&gig, GigStatus::Assigned));
        }
        gig.status = GigStatus::Assigned;
        gig.freelancer_id = Some(user_id);
        gig.updated_at = Utc::now();

        let notification = Notification::new(
            gig.client_id.clone(),
            NotificationKind::GigAccepted,
            "Gig accepted",
            format!("{} accepted your gig \"{}\"", freelancer.username, gig.title),
            json!({
                "gig_id": gig.id.value.to_string(),
                "freelancer_id": freelancer.id.value.to_string(),
            }),
        );
        self.notification_writer.insert(notification).await?;
        self.db_session.commit().await?;
        info!("Gig {} assigned to {}", gig.id, freelancer.id);
        Ok(gig.into())
    }
}

#[derive(Clone)]
pub struct CompleteGigInteractor {
    db_session: Arc<dyn DBSession>,
    gig_reader: Arc<dyn GigReader>,
    gig_writer: Arc<dyn GigWriter>,
}

impl CompleteGigInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, gig_reader: Arc<dyn GigReader>, gig_writer: Arc<dyn GigWriter>) -> Self {
        Self {
            db_session,
            gig_reader,
            gig_writer,
        }
    }

    pub async fn execute(&self, dto: GigActionDTO) -> AppResult<GigDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let gig_id: Id<Gig> = dto.gig_id.try_into()?;

        let mut gig = self.gig_reader.find_by_id(&gig_id).await?.ok_or(AppError::GigNotFound)?;
        if gig.client_id != user_id {
            return Err(AppError::Forbidden("Only the gig owner can complete it".to_string()));
        }
        if gig.status != GigStatus::Assigned || !self.gig_writer.complete(&gig_id).await? {
            return Err(gig_transition(&gig, GigStatus::Completed));
        }
        gig.status = GigStatus::Completed;
        gig.updated_at = Utc::now();

        self.db_session.commit().await?;
        Ok(gig.into())
    }
}
