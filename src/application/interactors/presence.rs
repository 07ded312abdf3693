use std::sync::Arc;

use chrono::Utc;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::presence::{HeartbeatDTO, OnlineUsersDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::presence::PresenceStore;
use crate::domain::entities::id::Id;
use crate::domain::entities::presence::Presence;
use crate::domain::entities::user::User;

/// Upper bound on ids per online lookup.
const MAX_PRESENCE_QUERY: usize = 200;

#[derive(Clone)]
pub struct HeartbeatInteractor {
    db_session: Arc<dyn DBSession>,
    presence_store: Arc<dyn PresenceStore>,
}

impl HeartbeatInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, presence_store: Arc<dyn PresenceStore>) -> Self {
        Self {
            db_session,
            presence_store,
        }
    }

    pub async fn execute(&self, dto: HeartbeatDTO) -> AppResult<()> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        self.presence_store
            .heartbeat(Presence::heartbeat(user_id, Utc::now(), dto.ttl))
            .await?;
        self.db_session.commit().await
    }
}

#[derive(Clone)]
pub struct GetOnlineUsersInteractor {
    presence_store: Arc<dyn PresenceStore>,
}

impl GetOnlineUsersInteractor {
    pub fn new(presence_store: Arc<dyn PresenceStore>) -> Self {
        Self { presence_store }
    }

    /// Returns the subset of `user_ids` with an unexpired heartbeat.
    pub async fn execute(&self, dto: OnlineUsersDTO) -> AppResult<OnlineUsersDTO> {
        if dto.user_ids.len() > MAX_PRESENCE_QUERY {
            return Err(AppError::Validation(format!(
                "At most {} users can be queried at once",
                MAX_PRESENCE_QUERY
            )));
        }
        let user_ids = dto
            .user_ids
            .into_iter()
            .map(Id::<User>::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        let online = self.presence_store.online_among(&user_ids, Utc::now()).await?;
        Ok(OnlineUsersDTO {
            user_ids: online.into_iter().map(|id| id.value.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::application::app_error::AppError;
    use crate::application::dto::presence::{HeartbeatDTO, OnlineUsersDTO};
    use crate::application::interactors::mocks::{committing_session, MockPresenceStoreMock};
    use crate::application::interactors::presence::{GetOnlineUsersInteractor, HeartbeatInteractor};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::user::User;

    #[tokio::test]
    async fn test_heartbeat_sets_expiry_from_ttl() {
        let mut presence_store = MockPresenceStoreMock::new();
        presence_store
            .expect_heartbeat()
            .withf(|p| (p.expires_at - p.last_seen_at).num_seconds() == 90)
            .times(1)
            .returning(|_| Ok(()));

        HeartbeatInteractor::new(Arc::new(committing_session()), Arc::new(presence_store))
            .execute(HeartbeatDTO {
                user_id: Id::<User>::generate().value.to_string(),
                ttl: 90,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_online_users_is_a_subset() {
        let online: Id<User> = Id::generate();
        let offline: Id<User> = Id::generate();
        let expected = online.clone();
        let mut presence_store = MockPresenceStoreMock::new();
        presence_store
            .expect_online_among()
            .withf(|ids, _| ids.len() == 2)
            .returning(move |_, _| Ok(vec![expected.clone()]));

        let result = GetOnlineUsersInteractor::new(Arc::new(presence_store))
            .execute(OnlineUsersDTO {
                user_ids: vec![online.value.to_string(), offline.value.to_string()],
            })
            .await
            .unwrap();

        assert_eq!(result.user_ids, vec![online.value.to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let result = GetOnlineUsersInteractor::new(Arc::new(MockPresenceStoreMock::new()))
            .execute(OnlineUsersDTO {
                user_ids: vec!["not-a-uuid".to_string()],
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidId(_)));
    }
}
