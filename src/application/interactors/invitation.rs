use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::id::IdDTO;
use crate::application::dto::invitation::{InvitationDTO, InvitationDecisionDTO, InviteMemberDTO};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::notification::NotificationWriter;
use crate::application::interface::gateway::user::UserReader;
use crate::application::interface::gateway::workspace::{
    WorkspaceInvitationReader, WorkspaceInvitationWriter, WorkspaceMemberReader, WorkspaceMemberWriter,
    WorkspaceReader,
};
use crate::application::interactors::workspace::load_workspace;
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::{Notification, NotificationKind};
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::{
    InvitationStatus, Workspace, WorkspaceInvitation, WorkspaceMember, WorkspaceMemberRole,
};
use crate::domain::services::access::{authorize, WorkspaceAction};

fn generate_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[derive(Clone)]
pub struct InviteMemberInteractor {
    db_session: Arc<dyn DBSession>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    user_reader: Arc<dyn UserReader>,
    invitation_reader: Arc<dyn WorkspaceInvitationReader>,
    invitation_writer: Arc<dyn WorkspaceInvitationWriter>,
    notification_writer: Arc<dyn NotificationWriter>,
}

impl InviteMemberInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        user_reader: Arc<dyn UserReader>,
        invitation_reader: Arc<dyn WorkspaceInvitationReader>,
        invitation_writer: Arc<dyn WorkspaceInvitationWriter>,
        notification_writer: Arc<dyn NotificationWriter>,
    ) -> Self {
        Self {
            db_session,
            workspace_reader,
            member_reader,
            user_reader,
            invitation_reader,
            invitation_writer,
            notification_writer,
        }
    }

    async fn is_already_in(&self, workspace: &Workspace, email: &str) -> AppResult<bool> {
        let owner = self.user_reader.find_by_id(&workspace.owner_user_id).await?;
        if owner.is_some_and(|o| o.email.eq_ignore_ascii_case(email)) {
            return Ok(true);
        }
        self.member_reader.is_member_email(&workspace.id, email).await
    }

    pub async fn execute(&self, dto: InviteMemberDTO) -> AppResult<InvitationDTO> {
        let user_id: Id<User> = dto.user_id.try_into()?;
        let workspace_id: Id<Workspace> = dto.workspace_id.try_into()?;
        let role: WorkspaceMemberRole = dto.role.parse()?;
        let email = dto.email.trim().to_lowercase();

        let (workspace, members) =
            load_workspace(self.workspace_reader.as_ref(), self.member_reader.as_ref(), &workspace_id).await?;
        authorize(&workspace, &members, &user_id, WorkspaceAction::InviteMember)?;

        if self.is_already_in(&workspace, &email).await? {
            return Err(AppError::Conflict(format!(
                "{} is already a member of this workspace",
                email
            )));
        }

        let invitation = match self.invitation_reader.find_pending(&workspace_id, &email).await? {
            Some(mut existing) => {
                existing.refresh(role, dto.message, user_id, dto.ttl);
                self.invitation_writer.refresh(existing.clone()).await?;
                info!("Pending invitation {} refreshed", existing.id);
                existing
            }
            None => {
                let invitation =
                    WorkspaceInvitation::new(workspace_id, email, role, generate_token(), dto.message, user_id, dto.ttl);
                self.invitation_writer.insert(invitation.clone()).await?;
                info!("Invitation {} created for workspace {}", invitation.id, invitation.workspace_id);
                invitation
            }
        };

        if let Some(invitee) = self.user_reader.find_by_email(&invitation.email).await? {
            let notification = Notification::new(
                invitee.id,
                NotificationKind::InvitationReceived,
                "Workspace invitation",
                format!("You have been invited to join {}", workspace.name),
                json!({
                    "workspace_id": workspace.id.value.to_string(),
                    "invitation_id": invitation.id.value.to_string(),
                    "role": invitation.role.as_str(),
                }),
            );
            self.notification_writer.insert(notification).await?;
        }

        self.db_session.commit().await?;
        Ok(invitation.into())
    }
}

/// Loads the caller and the invitation behind `token` and checks that the
/// invitation is addressed to the caller and still open.
async fn open_invitation(
    db_session: &dyn DBSession,
    user_reader: &dyn UserReader,
    invitation_reader: &dyn WorkspaceInvitationReader,
    invitation_writer: &dyn WorkspaceInvitationWriter,
    dto: InvitationDecisionDTO,
    decision: InvitationStatus,
) -> AppResult<(User, WorkspaceInvitation)> {
    let user_id: Id<User> = dto.user_id.try_into()?;
    let user = user_reader.find_by_id(&user_id).await?.ok_or(AppError::UserNotFound)?;
    let invitation = invitation_reader
        .find_by_token(&dto.token)
        .await?
        .ok_or(AppError::InvitationNotFound)?;

    if !invitation.email.eq_ignore_ascii_case(&user.email) {
        warn!("User {} tried to use an invitation addressed to someone else", user.id);
        return Err(AppError::Forbidden("This invitation was sent to another email".to_string()));
    }
    if !invitation.is_pending() {
        return Err(AppError::Conflict(format!(
            "Invitation is already {}",
            invitation.status.as_str()
        )));
    }
    if invitation.is_expired() {
        invitation_writer.set_status(&invitation.id, InvitationStatus::Expired).await?;
        db_session.commit().await?;
        warn!("Invitation {} used after expiry", invitation.id);
        return Err(AppError::InvalidTransition {
            entity: "invitation",
            from: InvitationStatus::Expired.as_str().to_string(),
            to: decision.as_str().to_string(),
        });
    }
    Ok((user, invitation))
}

#[derive(Clone)]
pub struct AcceptInvitationInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    workspace_reader: Arc<dyn WorkspaceReader>,
    member_reader: Arc<dyn WorkspaceMemberReader>,
    member_writer: Arc<dyn WorkspaceMemberWriter>,
    invitation_reader: Arc<dyn WorkspaceInvitationReader>,
    invitation_writer: Arc<dyn WorkspaceInvitationWriter>,
}

impl AcceptInvitationInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        workspace_reader: Arc<dyn WorkspaceReader>,
        member_reader: Arc<dyn WorkspaceMemberReader>,
        member_writer: Arc<dyn WorkspaceMemberWriter>,
        invitation_reader: Arc<dyn WorkspaceInvitationReader>,
        invitation_writer: Arc<dyn WorkspaceInvitationWriter>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            workspace_reader,
            member_reader,
            member_writer,
            invitation_reader,
            invitation_writer,
        }
    }

    pub async fn execute(&self, dto: InvitationDecisionDTO) -> AppResult<InvitationDTO> {
        let (user, mut invitation) = open_invitation(
            self.db_session.as_ref(),
            self.user_reader.as_ref(),
            self.invitation_reader.as_ref(),
            self.invitation_writer.as_ref(),
            dto,
            InvitationStatus::Accepted,
        )
        .await?;

        let (workspace, members) = load_workspace(
            self.workspace_reader.as_ref(),
            self.member_reader.as_ref(),
            &invitation.workspace_id,
        )
        .await?;

        let already_in = workspace.is_owner(&user.id) || members.iter().any(|m| m.user_id == user.id);
        if !already_in {
            self.member_writer
                .insert(WorkspaceMember::new(workspace.id.clone(), user.id.clone(), invitation.role))
                .await?;
        }
        self.invitation_writer
            .set_status(&invitation.id, InvitationStatus::Accepted)
            .await?;
        self.db_session.commit().await?;
        info!("User {} joined workspace {} as {}", user.id, workspace.id, invitation.role.as_str());

        invitation.status = InvitationStatus::Accepted;
        Ok(invitation.into())
    }
}

#[derive(Clone)]
pub struct DeclineInvitationInteractor {
    db_session: Arc<dyn DBSession>,
    user_reader: Arc<dyn UserReader>,
    invitation_reader: Arc<dyn WorkspaceInvitationReader>,
    invitation_writer: Arc<dyn WorkspaceInvitationWriter>,
}

impl DeclineInvitationInteractor {
    pub fn new(
        db_session: Arc<dyn DBSession>,
        user_reader: Arc<dyn UserReader>,
        invitation_reader: Arc<dyn WorkspaceInvitationReader>,
        invitation_writer: Arc<dyn WorkspaceInvitationWriter>,
    ) -> Self {
        Self {
            db_session,
            user_reader,
            invitation_reader,
            invitation_writer,
        }
    }

    pub async fn execute(&self, dto: InvitationDecisionDTO) -> AppResult<InvitationDTO> {
        let (_, mut invitation) = open_invitation(
            self.db_session.as_ref(),
            self.user_reader.as_ref(),
            self.invitation_reader.as_ref(),
            self.invitation_writer.as_ref(),
            dto,
            InvitationStatus::Declined,
        )
        .await?;

        self.invitation_writer
            .set_status(&invitation.id, InvitationStatus::Declined)
            .await?;
        self.db_session.commit().await?;

        invitation.status = InvitationStatus::Declined;
        Ok(invitation.into())
    }
}

#[derive(Clone)]
pub struct GetMyInvitationsInteractor {
    user_reader: Arc<dyn UserReader>,
    invitation_reader: Arc<dyn WorkspaceInvitationReader>,
}

impl GetMyInvitationsInteractor {
    pub fn new(user_reader: Arc<dyn UserReader>, invitation_reader: Arc<dyn WorkspaceInvitationReader>) -> Self {
        Self {
            user_reader,
            invitation_reader,
        }
    }

    pub async fn execute(&self, dto: IdDTO) -> AppResult<Vec<InvitationDTO>> {
        let user_id: Id<User> = dto.id.try_into()?;
        let user = self
            .user_reader
            .find_by_id(&user_id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        let invitations = self.invitation_reader.list_pending_for_email(&user.email).await?;
        Ok(invitations
            .into_iter()
            .filter(|i| !i.is_expired())
            .map(InvitationDTO::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use rstest::{fixture, rstest};

    use crate::application::app_error::AppError;
    use crate::application::dto::id::IdDTO;
    use crate::application::dto::invitation::{InvitationDecisionDTO, InviteMemberDTO};
    use crate::application::interactors::invitation::{
        AcceptInvitationInteractor, DeclineInvitationInteractor, GetMyInvitationsInteractor, InviteMemberInteractor,
    };
    use crate::application::interactors::mocks::{
        accepting_notifications, committing_session, MockDBSessionMock, MockInvitationReaderMock,
        MockInvitationWriterMock, MockNotificationWriterMock, MockUserReaderMock, MockWorkspaceMemberReaderMock,
        MockWorkspaceMemberWriterMock, MockWorkspaceReaderMock,
    };
    use crate::domain::entities::id::Id;
    use crate::domain::entities::user::{User, UserRole};
    use crate::domain::entities::workspace::{
        InvitationStatus, Workspace, WorkspaceInvitation, WorkspaceMember, WorkspaceMemberRole, WorkspaceSettings,
    };

    // Constants
    const OWNER_ID: &str = "019c47ec-183d-744e-b11d-cd409015bf13";
    const INVITEE_ID: &str = "019c47ec-2160-7e53-bf7e-06db2a1bad85";
    const OWNER_EMAIL: &str = "owner@example.com";
    const INVITEE_EMAIL: &str = "dev@example.com";
    const TOKEN: &str = "a3f1c2d4e5b6a7980a1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8091a2b3c4d5";
    const WEEK: i64 = 7 * 24 * 60 * 60;

    fn user(id: &str, email: &str) -> User {
        let mut user = User::new(
            email.split('@').next().unwrap().to_string(),
            email.to_string(),
            "hash".to_string(),
            UserRole::Freelancer,
            None,
        );
        user.id = id.to_string().try_into().unwrap();
        user
    }

    // Fixtures
    #[fixture]
    fn workspace() -> Workspace {
        let owner: Id<User> = OWNER_ID.to_string().try_into().unwrap();
        Workspace::new(owner, "Studio".to_string(), None, WorkspaceSettings::default())
    }

    fn invitation(workspace: &Workspace, ttl: i64) -> WorkspaceInvitation {
        WorkspaceInvitation::new(
            workspace.id.clone(),
            INVITEE_EMAIL.to_string(),
            WorkspaceMemberRole::Member,
            TOKEN.to_string(),
            None,
            workspace.owner_user_id.clone(),
            ttl,
        )
    }

    fn invite_dto(workspace: &Workspace) -> InviteMemberDTO {
        InviteMemberDTO {
            user_id: OWNER_ID.to_string(),
            workspace_id: workspace.id.value.to_string(),
            email: "Dev@Example.com".to_string(),
            role: "admin".to_string(),
            message: Some("Join us".to_string()),
            ttl: WEEK,
        }
    }

    fn workspace_readers(
        workspace: &Workspace,
        members: Vec<WorkspaceMember>,
    ) -> (MockWorkspaceReaderMock, MockWorkspaceMemberReaderMock) {
        let mut workspace_reader = MockWorkspaceReaderMock::new();
        let mut member_reader = MockWorkspaceMemberReaderMock::new();
        let stored = workspace.clone();
        workspace_reader
            .expect_find_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        member_reader.expect_list().returning(move |_| Ok(members.clone()));
        member_reader.expect_is_member_email().returning(|_, _| Ok(false));
        (workspace_reader, member_reader)
    }

    fn user_reader_with_invitee() -> MockUserReaderMock {
        let mut user_reader = MockUserReaderMock::new();
        user_reader.expect_find_by_id().returning(|id| {
            if id.value.to_string() == OWNER_ID {
                Ok(Some(user(OWNER_ID, OWNER_EMAIL)))
            } else {
                Ok(Some(user(INVITEE_ID, INVITEE_EMAIL)))
            }
        });
        user_reader
            .expect_find_by_email()
            .returning(|_| Ok(Some(user(INVITEE_ID, INVITEE_EMAIL))));
        user_reader
    }

    // InviteMemberInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_invite_creates_invitation_and_notifies(workspace: Workspace) {
        let (workspace_reader, member_reader) = workspace_readers(&workspace, vec![]);
        let mut invitation_reader = MockInvitationReaderMock::new();
        let mut invitation_writer = MockInvitationWriterMock::new();
        let mut notification_writer = MockNotificationWriterMock::new();

        invitation_reader.expect_find_pending().returning(|_, _| Ok(None));
        invitation_writer
            .expect_insert()
            .withf(|i| i.email == INVITEE_EMAIL && i.token.len() == 64 && i.is_pending())
            .times(1)
            .returning(|i| Ok(i.id));
        notification_writer
            .expect_insert()
            .withf(|n| n.recipient_id.value.to_string() == INVITEE_ID)
            .times(1)
            .returning(|n| Ok(n.id));

        let dto = InviteMemberInteractor::new(
            Arc::new(committing_session()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(user_reader_with_invitee()),
            Arc::new(invitation_reader),
            Arc::new(invitation_writer),
            Arc::new(notification_writer),
        )
        .execute(invite_dto(&workspace))
        .await
        .unwrap();

        assert_eq!(dto.role, "admin");
        assert_eq!(dto.status, "pending");
    }

    #[rstest]
    #[tokio::test]
    async fn test_reinvite_refreshes_pending_invitation(workspace: Workspace) {
        let (workspace_reader, member_reader) = workspace_readers(&workspace, vec![]);
        let mut invitation_reader = MockInvitationReaderMock::new();
        let mut invitation_writer = MockInvitationWriterMock::new();

        let mut existing = invitation(&workspace, 60);
        existing.updated_at = Utc::now() - Duration::days(1);
        let existing_id = existing.id.clone();
        let previous_update = existing.updated_at;
        invitation_reader
            .expect_find_pending()
            .returning(move |_, _| Ok(Some(existing.clone())));
        invitation_writer.expect_insert().never();
        invitation_writer
            .expect_refresh()
            .withf(move |i| {
                i.id == existing_id
                    && i.role == WorkspaceMemberRole::Admin
                    && i.message.as_deref() == Some("Join us")
                    && i.updated_at > previous_update
            })
            .times(1)
            .returning(|_| Ok(()));

        let dto = InviteMemberInteractor::new(
            Arc::new(committing_session()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(user_reader_with_invitee()),
            Arc::new(invitation_reader),
            Arc::new(invitation_writer),
            Arc::new(accepting_notifications()),
        )
        .execute(invite_dto(&workspace))
        .await
        .unwrap();

        assert_eq!(dto.token, TOKEN);
        assert!(dto.expires_at > Utc::now() + Duration::days(6));
    }

    #[rstest]
    #[tokio::test]
    async fn test_inviting_the_owner_is_conflict(workspace: Workspace) {
        let (workspace_reader, member_reader) = workspace_readers(&workspace, vec![]);
        let mut dto = invite_dto(&workspace);
        dto.email = OWNER_EMAIL.to_string();

        let result = InviteMemberInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(user_reader_with_invitee()),
            Arc::new(MockInvitationReaderMock::new()),
            Arc::new(MockInvitationWriterMock::new()),
            Arc::new(MockNotificationWriterMock::new()),
        )
        .execute(dto)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_viewer_cannot_invite(workspace: Workspace) {
        let viewer: Id<User> = INVITEE_ID.to_string().try_into().unwrap();
        let members = vec![WorkspaceMember::new(workspace.id.clone(), viewer, WorkspaceMemberRole::Viewer)];
        let (workspace_reader, member_reader) = workspace_readers(&workspace, members);
        let mut dto = invite_dto(&workspace);
        dto.user_id = INVITEE_ID.to_string();

        let result = InviteMemberInteractor::new(
            Arc::new(MockDBSessionMock::new()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(MockUserReaderMock::new()),
            Arc::new(MockInvitationReaderMock::new()),
            Arc::new(MockInvitationWriterMock::new()),
            Arc::new(MockNotificationWriterMock::new()),
        )
        .execute(dto)
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }

    // AcceptInvitationInteractor tests
    fn accept_interactor(
        workspace: &Workspace,
        stored: Option<WorkspaceInvitation>,
        db_session: MockDBSessionMock,
        member_writer: MockWorkspaceMemberWriterMock,
        invitation_writer: MockInvitationWriterMock,
    ) -> AcceptInvitationInteractor {
        let (workspace_reader, member_reader) = workspace_readers(workspace, vec![]);
        let mut invitation_reader = MockInvitationReaderMock::new();
        invitation_reader
            .expect_find_by_token()
            .returning(move |_| Ok(stored.clone()));
        AcceptInvitationInteractor::new(
            Arc::new(db_session),
            Arc::new(user_reader_with_invitee()),
            Arc::new(workspace_reader),
            Arc::new(member_reader),
            Arc::new(member_writer),
            Arc::new(invitation_reader),
            Arc::new(invitation_writer),
        )
    }

    fn decision(user_id: &str) -> InvitationDecisionDTO {
        InvitationDecisionDTO {
            user_id: user_id.to_string(),
            token: TOKEN.to_string(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_accept_inserts_member_with_invited_role(workspace: Workspace) {
        let mut member_writer = MockWorkspaceMemberWriterMock::new();
        let mut invitation_writer = MockInvitationWriterMock::new();
        member_writer
            .expect_insert()
            .withf(|m| m.user_id.value.to_string() == INVITEE_ID && m.role == WorkspaceMemberRole::Member)
            .times(1)
            .returning(|_| Ok(()));
        invitation_writer
            .expect_set_status()
            .withf(|_, status| *status == InvitationStatus::Accepted)
            .times(1)
            .returning(|_, _| Ok(()));

        let dto = accept_interactor(
            &workspace,
            Some(invitation(&workspace, WEEK)),
            committing_session(),
            member_writer,
            invitation_writer,
        )
        .execute(decision(INVITEE_ID))
        .await
        .unwrap();

        assert_eq!(dto.status, "accepted");
    }

    #[rstest]
    #[tokio::test]
    async fn test_accept_unknown_token_is_not_found(workspace: Workspace) {
        let result = accept_interactor(
            &workspace,
            None,
            MockDBSessionMock::new(),
            MockWorkspaceMemberWriterMock::new(),
            MockInvitationWriterMock::new(),
        )
        .execute(decision(INVITEE_ID))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::InvitationNotFound));
    }

    #[rstest]
    #[tokio::test]
    async fn test_accept_someone_elses_invitation_is_forbidden(workspace: Workspace) {
        let result = accept_interactor(
            &workspace,
            Some(invitation(&workspace, WEEK)),
            MockDBSessionMock::new(),
            MockWorkspaceMemberWriterMock::new(),
            MockInvitationWriterMock::new(),
        )
        .execute(decision(OWNER_ID))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_accept_answered_invitation_is_conflict(workspace: Workspace) {
        let mut answered = invitation(&workspace, WEEK);
        answered.status = InvitationStatus::Declined;

        let result = accept_interactor(
            &workspace,
            Some(answered),
            MockDBSessionMock::new(),
            MockWorkspaceMemberWriterMock::new(),
            MockInvitationWriterMock::new(),
        )
        .execute(decision(INVITEE_ID))
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_accept_expired_invitation_marks_it_expired(workspace: Workspace) {
        let mut invitation_writer = MockInvitationWriterMock::new();
        invitation_writer
            .expect_set_status()
            .withf(|_, status| *status == InvitationStatus::Expired)
            .times(1)
            .returning(|_, _| Ok(()));

        let result = accept_interactor(
            &workspace,
            Some(invitation(&workspace, -60)),
            committing_session(),
            MockWorkspaceMemberWriterMock::new(),
            invitation_writer,
        )
        .execute(decision(INVITEE_ID))
        .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidTransition { entity: "invitation", .. }
        ));
    }

    // DeclineInvitationInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_decline_sets_status(workspace: Workspace) {
        let stored = invitation(&workspace, WEEK);
        let mut invitation_reader = MockInvitationReaderMock::new();
        let mut invitation_writer = MockInvitationWriterMock::new();
        invitation_reader
            .expect_find_by_token()
            .returning(move |_| Ok(Some(stored.clone())));
        invitation_writer
            .expect_set_status()
            .withf(|_, status| *status == InvitationStatus::Declined)
            .times(1)
            .returning(|_, _| Ok(()));

        let dto = DeclineInvitationInteractor::new(
            Arc::new(committing_session()),
            Arc::new(user_reader_with_invitee()),
            Arc::new(invitation_reader),
            Arc::new(invitation_writer),
        )
        .execute(decision(INVITEE_ID))
        .await
        .unwrap();

        assert_eq!(dto.status, "declined");
    }

    // GetMyInvitationsInteractor tests
    #[rstest]
    #[tokio::test]
    async fn test_my_invitations_skip_expired(workspace: Workspace) {
        let live = invitation(&workspace, WEEK);
        let stale = invitation(&workspace, -1);
        let mut invitation_reader = MockInvitationReaderMock::new();
        invitation_reader
            .expect_list_pending_for_email()
            .withf(|email| email == INVITEE_EMAIL)
            .returning(move |_| Ok(vec![live.clone(), stale.clone()]));

        let items = GetMyInvitationsInteractor::new(Arc::new(user_reader_with_invitee()), Arc::new(invitation_reader))
            .execute(IdDTO {
                id: INVITEE_ID.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
    }
}
