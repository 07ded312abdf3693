use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::{GetSessionIdDTO, LoginDTO};
use crate::application::dto::id::IdDTO;
use crate::application::interface::crypto::CredentialsHasher;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::presence::PresenceStore;
use crate::application::interface::gateway::session::SessionWriter;
use crate::application::interface::gateway::user::UserReader;
use crate::domain::entities::id::Id;
use crate::domain::entities::presence::Presence;
use crate::domain::entities::session::Session;
use crate::domain::entities::user::User;

#[derive(Clone)]
pub struct LoginInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    session_writer: Arc<dyn SessionWriter>,
    presence_store: Arc<dyn PresenceStore>,
    hasher: Arc<dyn CredentialsHasher>,
}

impl LoginInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        session_writer: Arc<dyn SessionWriter>,
        presence_store: Arc<dyn PresenceStore>,
        hasher: Arc<dyn CredentialsHasher>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            session_writer,
            presence_store,
            hasher,
        }
    }

    pub async fn execute(&self, dto: LoginDTO) -> AppResult<GetSessionIdDTO> {
        let user = self.user_reader.find_by_email(&dto.email).await?.ok_or_else(|| {
            warn!("Login attempt with non-existent email: {}", dto.email);
            AppError::InvalidCredentials
        })?;
        let is_valid = self.hasher.verify_password(&dto.password, &user.password).await?;
        if !is_valid {
            warn!("Invalid password for user: {}", user.username);
            return Err(AppError::InvalidCredentials);
        }

        let session = Session::new(user.id.clone(), dto.remember_me);
        let session_id = self.session_writer.insert(session).await?;
        self.presence_store
            .heartbeat(Presence::heartbeat(user.id.clone(), Utc::now(), dto.presence_ttl))
            .await?;
        self.db_session.commit().await?;
        info!("User {} logged in successfully", user.username);
        Ok(GetSessionIdDTO {
            session_id: session_id.value.to_string(),
            remember_me: dto.remember_me,
        })
    }
}

#[derive(Clone)]
pub struct LogoutInteractor {
    db_session: Arc<dyn DBSession>,
    session_writer: Arc<dyn SessionWriter>,
}

impl LogoutInteractor {
    pub fn new(db_session: Arc<dyn DBSession>, session_writer: Arc<dyn SessionWriter>) -> Self {
        Self {
            db_session,
            session_writer,
        }
    }

    pub async fn execute(&self, user_id: IdDTO) -> AppResult<()> {
        let user_id: Id<User> = user_id.id.try_into()?;
        self.session_writer.delete_by_user_id(&user_id).await?;
        self.db_session.commit().await?;
        info!("User {} logged out", user_id.value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::auth::LoginDTO;
    use crate::application::dto::id::IdDTO;
    use crate::application::interactors::auth::{LoginInteractor, LogoutInteractor};
    use crate::application::interactors::mocks::{
        committing_session, MockDBSessionMock, MockHasherMock, MockPresenceStoreMock, MockSessionWriterMock,
        MockUserReaderMock,
    };
    use crate::domain::entities::user::{User, UserRole};

    // Constants
    const USER_ID: &str = "019c47ec-183d-744e-b11d-cd409015bf13";
    const SESSION_ID: &str = "019c47ec-2160-7e53-bf7e-06db2a1bad85";
    const EMAIL: &str = "john@example.com";
    const PASSWORD: &str = "Password123!";
    const HASH: &str = "$argon2id$v=19$m=16384,t=2,p=1$testsalt$testhash";

    // Fixtures
    #[fixture]
    fn valid_login_dto() -> LoginDTO {
        LoginDTO {
            email: EMAIL.to_string(),
            password: PASSWORD.to_string(),
            remember_me: true,
            presence_ttl: 300,
        }
    }

    fn build_user() -> User {
        let mut user = User::new(
            "john".to_string(),
            EMAIL.to_string(),
            HASH.to_string(),
            UserRole::Freelancer,
            None,
        );
        user.id = USER_ID.to_string().try_into().unwrap();
        user
    }

    fn make_interactor(
        db_session: MockDBSessionMock,
        user_reader: MockUserReaderMock,
        session_writer: MockSessionWriterMock,
        presence_store: MockPresenceStoreMock,
        hasher: MockHasherMock,
    ) -> LoginInteractor {
        LoginInteractor::new(
            Arc::new(db_session),
            Arc::new(user_reader),
            Arc::new(session_writer),
            Arc::new(presence_store),
            Arc::new(hasher),
        )
    }

    // LoginInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_login_success_records_presence(valid_login_dto: LoginDTO) {
        let mut user_reader = MockUserReaderMock::new();
        let mut session_writer = MockSessionWriterMock::new();
        let mut presence_store = MockPresenceStoreMock::new();
        let mut hasher = MockHasherMock::new();

        user_reader.expect_find_by_email().returning(|_| Ok(Some(build_user())));
        hasher.expect_verify_password().returning(|_, _| Ok(true));
        session_writer
            .expect_insert()
            .returning(|_| Ok(SESSION_ID.to_string().try_into().unwrap()));
        presence_store
            .expect_heartbeat()
            .withf(|p| p.user_id.value.to_string() == USER_ID && p.expires_at > p.last_seen_at)
            .times(1)
            .returning(|_| Ok(()));

        let result = make_interactor(committing_session(), user_reader, session_writer, presence_store, hasher)
            .execute(valid_login_dto)
            .await;

        let dto = result.unwrap();
        assert_eq!(dto.session_id, SESSION_ID);
        assert!(dto.remember_me);
    }

    #[rstest]
    #[tokio::test]
    async fn test_login_user_not_found(valid_login_dto: LoginDTO) {
        let mut user_reader = MockUserReaderMock::new();
        user_reader.expect_find_by_email().returning(|_| Ok(None));

        let result = make_interactor(
            MockDBSessionMock::new(),
            user_reader,
            MockSessionWriterMock::new(),
            MockPresenceStoreMock::new(),
            MockHasherMock::new(),
        )
        .execute(valid_login_dto)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    #[rstest]
    #[tokio::test]
    async fn test_login_invalid_password(valid_login_dto: LoginDTO) {
        let mut user_reader = MockUserReaderMock::new();
        let mut hasher = MockHasherMock::new();

        user_reader.expect_find_by_email().returning(|_| Ok(Some(build_user())));
        hasher.expect_verify_password().returning(|_, _| Ok(false));

        let result = make_interactor(
            MockDBSessionMock::new(),
            user_reader,
            MockSessionWriterMock::new(),
            MockPresenceStoreMock::new(),
            hasher,
        )
        .execute(valid_login_dto)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
    }

    // LogoutInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_logout_success() {
        let mut session_writer = MockSessionWriterMock::new();
        session_writer.expect_delete_by_user_id().times(1).returning(|_| Ok(()));

        let interactor = LogoutInteractor::new(Arc::new(committing_session()), Arc::new(session_writer));
        let result = interactor.execute(IdDTO { id: USER_ID.to_string() }).await;

        assert!(result.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn test_logout_invalid_id() {
        let interactor = LogoutInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(MockSessionWriterMock::new()),
        );
        let result = interactor.execute(IdDTO { id: "uuid".to_string() }).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidId(_)));
    }
}
