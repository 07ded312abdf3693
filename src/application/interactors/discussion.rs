use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::discussion::{
    CreateDiscussionDTO, DiscussionDTO, GetDiscussionDTO, GetDiscussionListDTO, MessageDTO, PostMessageDTO,
    UpdateDiscussionDTO,
};
use crate::application::dto::pagination::PageDTO;
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::discussion::{DiscussionReader, DiscussionWriter};
use crate::application::interface::gateway::workspace::{WorkspaceMemberReader, WorkspaceReader};
use crate::application::interactors::workspace::load_workspace;
use crate::domain::entities::discussion::{Discussion, DiscussionParticipant, DiscussionStatus};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::Workspace;
use crate::domain::services::access::{authorize, WorkspaceAction};

fn participant_of(discussion: &Discussion, user_id: &Id<User>) -> AppResult<DiscussionParticipant> {
    discussion
        .participants
        .iter()
        .find(|p| &p.user_id == user_id)
        .cloned()
        .ok_or_else(|| AppError::Validation("Participant was not recorded".to_string()))
}

#[derive(Clone)]
pub struct CreateDiscussionInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    discussion_writer: Arc<dyn DiscussionWriter>,
}

impl CreateDiscussionInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        discussion_writer: Arc<dyn DiscussionWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            discussion_writer,
        }
    }

    pub async fn execute(&self, dto: CreateDiscussionDTO) -> AppResult<DiscussionDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::CreateContent)?;

        let mut discussion = Discussion::new(workspace_id, user_id.clone(), dto.title);
        if let Some(body) = dto.first_message {
            discussion.post(user_id, body)?;
        }

        self.discussion_writer.insert(discussion.clone()).await?;
        self.db_session.commit().await?;
        info!("Discussion {} opened in workspace {}", discussion.id, discussion.workspace_id);
        Ok(discussion.into())
    }
}

#[derive(Clone)]
pub struct GetDiscussionListInteractor {
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    discussion_reader: Arc<dyn DiscussionReader>,
}

impl GetDiscussionListInteractor {
    pub fn new(
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        discussion_reader: Arc<dyn DiscussionReader>,
    ) -> Self {
        Self {
            workspace_reader,
            member_reader,
            discussion_reader,
        }
    }

    pub async fn execute(&self, dto: GetDiscussionListDTO) -> AppResult<PageDTO<DiscussionDTO>> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::Read)?;

        let (page, per_page, offset) = dto.page.bounds();
        let total = self.discussion_reader.count_discussions(&workspace_id).await?;
        let discussions = self.discussion_reader.get_all(&workspace_id, per_page, offset).await?;

        Ok(PageDTO {
            total,
            page,
            per_page,
            items: discussions.into_iter().map(DiscussionDTO::from).collect(),
        })
    }
}

#[derive(Clone)]
pub struct GetDiscussionInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    discussion_reader: Arc<dyn DiscussionReader>,
    discussion_writer: Arc<dyn DiscussionWriter>,
}

impl GetDiscussionInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        discussion_reader: Arc<dyn DiscussionReader>,
        discussion_writer: Arc<dyn DiscussionWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            discussion_reader,
            discussion_writer,
        }
    }

    /// Returns the thread and records that the caller has seen it.
    pub async fn execute(&self, dto: GetDiscussionDTO) -> AppResult<DiscussionDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let discussion_id: Id<Discussion> = dto.discussion_id.try_into()?;
        let mut discussion = self
            .discussion_reader
            .find_by_id(&discussion_id)
            .await?
            .ok_or(AppError::DiscussionNotFound)?;
        let (workspace, members) = load_workspace(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            &discussion.workspace_id,
        )
        .await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::Read)?;

        discussion.mark_seen(&user_id, Utc::now());
        self.discussion_writer
            .upsert_participant(&discussion_id, participant_of(&discussion, &user_id)?)
            .await?;
        self.db_session.commit().await?;
        Ok(discussion.into())
    }
}

#[derive(Clone)]
pub struct PostMessageInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    discussion_reader: Arc<dyn DiscussionReader>,
    discussion_writer: Arc<dyn DiscussionWriter>,
}

impl PostMessageInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        discussion_reader: Arc<dyn DiscussionReader>,
        discussion_writer: Arc<dyn DiscussionWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            discussion_reader,
            discussion_writer,
        }
    }

    pub async fn execute(&self, dto: PostMessageDTO) -> AppResult<MessageDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let discussion_id: Id<Discussion> = dto.discussion_id.try_into()?;
        if dto.body.trim().is_empty() {
            return Err(AppError::Validation("Message body cannot be empty".to_string()));
        }

        // Row lock keeps positions dense under concurrent posts.
        let mut discussion = self
            .discussion_reader
            .find_by_id_for_update(&discussion_id)
            .await?
            .ok_or(AppError::DiscussionNotFound)?;
        let (workspace, members) = load_workspace(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            &discussion.workspace_id,
        )
        .await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::CreateContent)?;

        let message = discussion.post(user_id.clone(), dto.body)?;
        self.discussion_writer.append_message(message.clone()).await?;
        self.discussion_writer
            .upsert_participant(&discussion_id, participant_of(&discussion, &user_id)?)
            .await?;
        self.discussion_writer.update_summary(&discussion).await?;
        self.db_session.commit().await?;
        Ok(message.into())
    }
}

#[derive(Clone)]
pub struct UpdateDiscussionInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    discussion_reader: Arc<dyn DiscussionReader>,
    discussion_writer: Arc<dyn DiscussionWriter>,
}

impl UpdateDiscussionInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        discussion_reader: Arc<dyn DiscussionReader>,
        discussion_writer: Arc<dyn DiscussionWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            discussion_reader,
            discussion_writer,
        }
    }

    /// Pins/unpins and opens/closes a discussion.
    pub async fn execute(&self, dto: UpdateDiscussionDTO) -> AppResult<DiscussionDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let discussion_id: Id<Discussion> = dto.discussion_id.try_into()?;
        let status: Option<DiscussionStatus> = dto.status.as_deref().map(str::parse).transpose()?;

        let mut discussion = self
            .discussion_reader
            .find_by_id_for_update(&discussion_id)
            .await?
            .ok_or(AppError::DiscussionNotFound)?;
        let (workspace, members) = load_workspace(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            &discussion.workspace_id,
        )
        .await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::UpdateContent)?;

        if let Some(pinned) = dto.is_pinned {
            discussion.set_pinned(pinned);
        }
        if let Some(status) = status {
            discussion.set_status(status);
        }

        self.discussion_writer.update_summary(&discussion).await?;
        self.db_session.commit().await?;
        Ok(discussion.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::discussion::{
        CreateDiscussionDTO, GetDiscussionDTO, PostMessageDTO, UpdateDiscussionDTO,
    };
    use crate::application::interactors::discussion::{
        CreateDiscussionInteractor, GetDiscussionInteractor, PostMessageInteractor, UpdateDiscussionInteractor,
    };
    use crate::application::interactors::mocks::{
        committing_session, MockDBSessionMock, MockDiscussionReaderMock, MockDiscussionWriterMock,
        MockWorkspaceMemberReaderMock, MockWorkspaceReaderMock,
    };
    use crate::domain::entities::discussion::{Discussion, DiscussionStatus};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::user::User;
    use crate::domain::entities::workspace::{Workspace, WorkspaceMember, WorkspaceMemberRole, WorkspaceSettings};

    // Constants
    const OWNER_ID: &str = "019c47ec-183d-744e-b11d-cd409015bf13";
    const MEMBER_ID: &str = "019c47ec-2160-7e53-bf7e-06db2a1bad85";
    const VIEWER_ID: &str = "019c47ec-29d3-72c4-ba24-a32534f95a71";

    fn id(value: &str) -> Id<User> {
        value.to_string().try_into().unwrap()
    }

    #[derive(Clone)]
    struct Thread {
        workspace: Workspace,
        members: Vec<WorkspaceMember>,
        discussion: Discussion,
    }

    // Fixtures
    #[fixture]
    fn thread() -> Thread {
        let workspace = Workspace::new(id(OWNER_ID), "Studio".to_string(), None, WorkspaceSettings::default());
        let members = vec![
            WorkspaceMember::new(workspace.id.clone(), id(MEMBER_ID), WorkspaceMemberRole::Member),
            WorkspaceMember::new(workspace.id.clone(), id(VIEWER_ID), WorkspaceMemberRole::Viewer),
        ];
        let mut discussion = Discussion::new(workspace.id.clone(), id(OWNER_ID), "Kickoff".to_string());
        discussion.post(id(OWNER_ID), "Welcome".to_string()).unwrap();
        Thread {
            workspace,
            members,
            discussion,
        }
    }

    // Helpers
    fn workspace_readers(thread: &Thread) -> (MockWorkspaceReaderMock, MockWorkspaceMemberReaderMock) {
        let mut workspace_reader = MockWorkspaceReaderMock::new();
        let mut member_reader = MockWorkspaceMemberReaderMock::new();
        let workspace = thread.workspace.clone();
        let members = thread.members.clone();
        workspace_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(workspace.clone())));
        member_reader.expect_list().returning(move |_| Ok(members.clone()));
        (workspace_reader, member_reader)
    }

    fn locked_reader(discussion: Discussion) -> MockDiscussionReaderMock {
        let mut discussion_reader = MockDiscussionReaderMock::new();
        discussion_reader
            .expect_find_by_id_for_update()
            .returning(move |_| Ok(Some(discussion.clone())));
        discussion_reader
    }

    fn post_interactor(
        thread: &Thread,
        discussion: Discussion,
        db_session: MockDBSessionMock,
        discussion_writer: MockDiscussionWriterMock,
    ) -> PostMessageInteractor {
        let (workspace_reader, member_reader) = workspace_readers(thread);
        PostMessageInteractor::new(
            Arc::new(db_session),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(locked_reader(discussion)),
            Arc::new(discussion_writer),
        )
    }

    fn post_dto(thread: &Thread, actor: &str, body: &str) -> PostMessageDTO {
        PostMessageDTO {
            user_id: actor.to_string(),
            discussion_id: thread.discussion.id.value.to_string(),
            body: body.to_string(),
        }
    }

    // CreateDiscussionInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_create_discussion_with_first_message(thread: Thread) {
        let (workspace_reader, member_reader) = workspace_readers(&thread);
        let mut discussion_writer = MockDiscussionWriterMock::new();
        discussion_writer
            .expect_insert()
            .withf(|d| d.message_count == 1 && d.messages[0].position == 1)
            .times(1)
            .returning(|d| Ok(d.id));

        let dto = CreateDiscussionInteractor::new(
            Arc::new(committing_session()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(discussion_writer),
        )
        .execute(CreateDiscussionDTO {
            user_id: MEMBER_ID.to_string(),
            workspace_id: thread.workspace.id.value.to_string(),
            title: "Release plan".to_string(),
            first_message: Some("Draft attached".to_string()),
        })
        .await
        .unwrap();

        assert_eq!(dto.message_count, 1);
        assert_eq!(dto.participants.len(), 1);
        assert_eq!(dto.status, "open");
    }

    // PostMessageInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_post_message_appends_and_recomputes(thread: Thread) {
        let mut discussion_writer = MockDiscussionWriterMock::new();
        discussion_writer
            .expect_append_message()
            .withf(|m| m.position == 2 && m.body == "On it")
            .times(1)
            .returning(|_| Ok(()));
        discussion_writer
            .expect_upsert_participant()
            .withf(|_, p| p.user_id.value.to_string() == MEMBER_ID)
            .times(1)
            .returning(|_, _| Ok(()));
        discussion_writer
            .expect_update_summary()
            .withf(|d| d.message_count == 2 && d.last_activity_at == d.messages[1].created_at)
            .times(1)
            .returning(|_| Ok(()));

        let message = post_interactor(&thread, thread.discussion.clone(), committing_session(), discussion_writer)
            .execute(post_dto(&thread, MEMBER_ID, "On it"))
            .await
            .unwrap();

        assert_eq!(message.position, 2);
        assert_eq!(message.author_id, MEMBER_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn test_post_to_closed_discussion_is_invalid_transition(thread: Thread) {
        let mut closed = thread.discussion.clone();
        closed.set_status(DiscussionStatus::Closed);

        let result = post_interactor(&thread, closed, MockDBSessionMock::new(), MockDiscussionWriterMock::new())
            .execute(post_dto(&thread, MEMBER_ID, "Anyone?"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTransition { entity: "discussion", .. }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_viewer_cannot_post(thread: Thread) {
        let result = post_interactor(
            &thread,
            thread.discussion.clone(),
            MockDBSessionMock::new(),
            MockDiscussionWriterMock::new(),
        )
        .execute(post_dto(&thread, VIEWER_ID, "Hello"))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_blank_message_is_rejected(thread: Thread) {
        let result = PostMessageInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(MockWorkspaceReaderMock::new()),
            Arc::new(MockWorkspaceMemberReaderMock::new()),
            Arc::new(MockDiscussionReaderMock::new()),
            Arc::new(MockDiscussionWriterMock::new()),
        )
        .execute(post_dto(&thread, MEMBER_ID, "   "))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    // GetDiscussionInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_get_discussion_marks_viewer_seen(thread: Thread) {
        let (workspace_reader, member_reader) = workspace_readers(&thread);
        let mut discussion_reader = MockDiscussionReaderMock::new();
        let mut discussion_writer = MockDiscussionWriterMock::new();
        let stored = thread.discussion.clone();
        discussion_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        discussion_writer
            .expect_upsert_participant()
            .withf(|_, p| p.user_id.value.to_string() == VIEWER_ID)
            .times(1)
            .returning(|_, _| Ok(()));

        let dto = GetDiscussionInteractor::new(
            Arc::new(committing_session()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(discussion_reader),
            Arc::new(discussion_writer),
        )
        .execute(GetDiscussionDTO {
            user_id: VIEWER_ID.to_string(),
            discussion_id: thread.discussion.id.value.to_string(),
        })
        .await
        .unwrap();

        assert_eq!(dto.messages.len(), 1);
        assert_eq!(dto.participants.len(), 2);
    }

    // UpdateDiscussionInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_pin_and_close(thread: Thread) {
        let (workspace_reader, member_reader) = workspace_readers(&thread);
        let mut discussion_writer = MockDiscussionWriterMock::new();
        discussion_writer
            .expect_update_summary()
            .withf(|d| d.is_pinned && d.status == DiscussionStatus::Closed && d.message_count == 1)
            .times(1)
            .returning(|_| Ok(()));

        let dto = UpdateDiscussionInteractor::new(
            Arc::new(committing_session()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(locked_reader(thread.discussion.clone())),
            Arc::new(discussion_writer),
        )
        .execute(UpdateDiscussionDTO {
            user_id: OWNER_ID.to_string(),
            discussion_id: thread.discussion.id.value.to_string(),
            is_pinned: Some(true),
            status: Some("closed".to_string()),
        })
        .await
        .unwrap();

        assert!(dto.is_pinned);
        assert_eq!(dto.status, "closed");
    }
}
