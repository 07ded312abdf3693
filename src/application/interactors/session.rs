use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::application::app_error::AppResult;
use crate::application::dto::session::{GetSessionStatusDTO, SessionDTO, SessionValidationResult};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::session::{SessionReader, SessionWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::session::Session;

#[derive(Clone)]
pub struct ValidateSessionInteractor {
    db_session: Arc<dyn DBSession>,
    session_reader: Arc<dyn SessionReader>,
    session_writer: Arc<dyn SessionWriter>,
}

impl ValidateSessionInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        session_reader: Arc<dyn SessionReader>,
        session_writer: Arc<dyn SessionWriter>,
    ) -> Self {
        Self {
            db_session,
            session_reader,
            session_writer,
        }
    }

    fn get_timeouts(dto: &SessionDTO, remember_me: bool) -> (Duration, Duration) {
        if remember_me {
            return (
                Duration::seconds(dto.remembered_max_lifetime),
                Duration::seconds(dto.remembered_idle_timeout),
            );
        }
        (
            Duration::seconds(dto.default_max_lifetime),
            Duration::seconds(dto.default_idle_timeout),
        )
    }

    pub async fn execute(&self, dto: SessionDTO) -> AppResult<GetSessionStatusDTO> {
        let session_id: Id<Session> = dto.id.clone().try_into()?;
        let Some(session) = self.session_reader.find_by_id(&session_id).await? else {
            return Ok(GetSessionStatusDTO {
                status: SessionValidationResult::Invalid,
            });
        };

        let now = Utc::now();
        let (max_lifetime, idle_timeout) = Self::get_timeouts(&dto, session.remember_me);

        if session.is_expired(now, max_lifetime, idle_timeout) {
            self.session_writer.delete(&session_id).await?;
            self.db_session.commit().await?;
            return Ok(GetSessionStatusDTO {
                status: SessionValidationResult::Expired,
            });
        }

        self.session_writer.update_activity(&session_id, now).await?;
        self.db_session.commit().await?;
        Ok(GetSessionStatusDTO {
            status: SessionValidationResult::Valid(session.user_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::session::{SessionDTO, SessionValidationResult};
    use crate::application::interactors::mocks::{
        committing_session, MockDBSessionMock, MockSessionReaderMock, MockSessionWriterMock,
    };
    use crate::application::interactors::session::ValidateSessionInteractor;
    use crate::domain::entities::session::Session;

    // Constants
    const USER_ID: &str = "019c47ec-183d-744e-b11d-cd409015bf13";
    const SESSION_ID: &str = "019c47ec-2160-7e53-bf7e-06db2a1bad85";

    // Fixtures
    #[fixture]
    fn session_dto() -> SessionDTO {
        SessionDTO {
            id: SESSION_ID.to_string(),
            default_max_lifetime: 60,
            default_idle_timeout: 30,
            remembered_max_lifetime: 120,
            remembered_idle_timeout: 90,
        }
    }

    fn active_session(remember_me: bool) -> Session {
        let now = Utc::now();
        Session {
            id: SESSION_ID.to_string().try_into().unwrap(),
            user_id: USER_ID.to_string().try_into().unwrap(),
            created_at: now - Duration::seconds(10),
            last_activity: now - Duration::seconds(5),
            remember_me,
        }
    }

    fn make_interactor(
        db_session: MockDBSessionMock,
        session_reader: MockSessionReaderMock,
        session_writer: MockSessionWriterMock,
    ) -> ValidateSessionInteractor {
        ValidateSessionInteractor::new(Arc::new(db_session), Arc::new(session_reader), Arc::new(session_writer))
    }

    #[rstest]
    #[tokio::test]
    async fn test_validate_session_invalid_when_not_found(session_dto: SessionDTO) {
        let mut session_reader = MockSessionReaderMock::new();
        session_reader.expect_find_by_id().returning(|_| Ok(None));

        let result = make_interactor(MockDBSessionMock::new(), session_reader, MockSessionWriterMock::new())
            .execute(session_dto)
            .await
            .unwrap();
        assert!(matches!(result.status, SessionValidationResult::Invalid));
    }

    #[rstest]
    #[tokio::test]
    async fn test_validate_session_valid_updates_activity(session_dto: SessionDTO) {
        let mut session_reader = MockSessionReaderMock::new();
        let mut session_writer = MockSessionWriterMock::new();

        let session = active_session(false);
        let expected_user_id = session.user_id.clone();
        session_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));
        session_writer.expect_update_activity().times(1).returning(|_, _| Ok(()));

        let result = make_interactor(committing_session(), session_reader, session_writer)
            .execute(session_dto)
            .await
            .unwrap();
        match result.status {
            SessionValidationResult::Valid(user_id) => assert_eq!(user_id, expected_user_id),
            _ => panic!("expected valid status"),
        }
    }

    #[rstest]
    #[case(false, 120, 5)]
    #[case(false, 10, 45)]
    #[case(true, 150, 5)]
    #[case(true, 10, 100)]
    #[tokio::test]
    async fn test_validate_session_expired(
        session_dto: SessionDTO,
        #[case] remember_me: bool,
        #[case] age: i64,
        #[case] idle: i64,
    ) {
        let mut session_reader = MockSessionReaderMock::new();
        let mut session_writer = MockSessionWriterMock::new();

        let mut session = active_session(remember_me);
        session.created_at = Utc::now() - Duration::seconds(age);
        session.last_activity = Utc::now() - Duration::seconds(idle);
        session_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));
        session_writer.expect_delete().times(1).returning(|_| Ok(()));

        let result = make_interactor(committing_session(), session_reader, session_writer)
            .execute(session_dto)
            .await
            .unwrap();
        assert!(matches!(result.status, SessionValidationResult::Expired));
    }

    #[rstest]
    #[tokio::test]
    async fn test_remembered_session_outlives_default_idle(session_dto: SessionDTO) {
        let mut session_reader = MockSessionReaderMock::new();
        let mut session_writer = MockSessionWriterMock::new();

        let mut session = active_session(true);
        session.last_activity = Utc::now() - Duration::seconds(45);
        session_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(session.clone())));
        session_writer.expect_update_activity().returning(|_, _| Ok(()));

        let result = make_interactor(committing_session(), session_reader, session_writer)
            .execute(session_dto)
            .await
            .unwrap();
        assert!(matches!(result.status, SessionValidationResult::Valid(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_validate_session_invalid_id(mut session_dto: SessionDTO) {
        session_dto.id = "invalid-id".to_string();

        let result = make_interactor(
            MockDBSessionMock::new(),
            MockSessionReaderMock::new(),
            MockSessionWriterMock::new(),
        )
        .execute(session_dto)
        .await;
        assert!(matches!(result.unwrap_err(), AppError::InvalidId(_)));
    }
}
