use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::user::{CreateUserDTO, UpdateProfileDTO, UserDTO};
use crate::application::interface::crypto::CredentialsHasher;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::{User, UserRole};

#[derive(Clone)]
pub struct CreateUserInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    user_writer: Arc<dyn UserWriter>,
    hasher: Arc<dyn CredentialsHasher>,
}

impl CreateUserInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        user_writer: Arc<dyn UserWriter>,
        hasher: Arc<dyn CredentialsHasher>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            user_writer,
            hasher,
        }
    }

    pub async fn execute(&self, dto: CreateUserDTO) -> AppResult<UserDTO> {
        let role: UserRole = dto.role.parse()?;
        if self.user_reader.is_user(&dto.username, &dto.email).await? {
            warn!("Registration with taken username or email: {}", dto.email);
            return Err(AppError::Conflict(
                "A user with this username or email already exists".to_string(),
            ));
        }

        let hashed = self.hasher.hash_password(&dto.password).await?;
        let user = User::new(dto.username, dto.email, hashed, role, dto.full_name);
        self.user_writer.insert(user.clone()).await?;
        self.db_session.commit().await?;
        info!("Registered {} {}", user.role.as_str(), user.username);
        Ok(user.into())
    }
}

#[derive(Clone)]
pub struct GetMeInteractor {
    user_reader: Arc<dyn UserReader>,
}

impl GetMeInteractor {
    pub fn new(user_reader: Arc<dyn UserReader>) -> Self {
        Self { user_reader }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<UserDTO> {
        let user_id: Id<User> = dto.id.try_into()?;
        let user = self
            .user_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;
        Ok(user.into())
    }
}

#[derive(Clone)]
pub struct UpdateProfileInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    user_writer: Arc<dyn UserWriter>,
}

impl UpdateProfileInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        user_writer: Arc<dyn UserWriter>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            user_writer,
        }
    }

    pub async fn execute(&self, dto: UpdateProfileDTO) -> AppResult<UserDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let mut user = self
            .user_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if let Some(hourly_rate) = dto.hourly_rate {
            if hourly_rate < 0 {
                return Err(AppError::Validation("Hourly rate cannot be negative".to_string()));
            }
            user.hourly_rate = Some(hourly_rate);
        }
        if let Some(full_name) = dto.full_name {
            user.full_name = Some(full_name);
        }
        if let Some(bio) = dto.bio {
            user.bio = Some(bio);
        }
        if let Some(skills) = dto.skills {
            user.skills = skills;
        }
        user.updated_at = chrono::Utc::now();

        self.user_writer.update_profile(user.clone()).await?;
        self.db_session.commit().await?;
        Ok(user.into())
    }
}
