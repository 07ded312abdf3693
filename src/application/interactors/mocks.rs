//! `mockall` doubles shared by the interactor tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;

use crate::application::app_error::AppResult;
use crate::application::interface::crypto::{CredentialsHasher, SignatureVerifier};
use crate::application::interface::db::DBSession;
use crate::application::interface::gateway::contract::{ContractReader, ContractWriter};
use crate::application::interface::gateway::discussion::{DiscussionReader, DiscussionWriter};
use crate::application::interface::gateway::gig::{GigReader, GigWriter};
use crate::application::interface::gateway::notification::{NotificationReader, NotificationWriter};
use crate::application::interface::gateway::payment::{PaymentReader, PaymentWriter};
use crate::application::interface::gateway::presence::PresenceStore;
use crate::application::interface::gateway::project::{ProjectReader, ProjectWriter};
use crate::application::interface::gateway::session::{SessionReader, SessionWriter};
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::application::interface::gateway::withdrawal::{WithdrawalReader, WithdrawalWriter};
use crate::application::interface::gateway::workspace::{
    WorkspaceInvitationReader, WorkspaceInvitationWriter, WorkspaceMemberReader, WorkspaceMemberWriter,
    WorkspaceReader, WorkspaceWriter,
};
use crate::application::interface::payment::{CreateOrderRequest, GatewayOrder, PaymentGateway};
use crate::domain::entities::contract::{Contract, ContractStatus, Milestone, MilestoneStatus};
use crate::domain::entities::discussion::{Discussion, DiscussionMessage, DiscussionParticipant};
use crate::domain::entities::gig::Gig;
use crate::domain::entities::id::Id;
use crate::domain::entities::notification::Notification;
use crate::domain::entities::payment::Payment;
use crate::domain::entities::presence::Presence;
use crate::domain::entities::project::{Project, ProjectMember};
use crate::domain::entities::session::Session;
use crate::domain::entities::user::User;
use crate::domain::entities::withdrawal::Withdrawal;
use crate::domain::entities::workspace::{
    InvitationStatus, Workspace, WorkspaceInvitation, WorkspaceMember, WorkspaceMemberRole, WorkspaceView,
};

mock! {
    pub DBSessionMock {}

    #[async_trait]
    impl DBSession for DBSessionMock {
        async fn commit(&self) -> AppResult<()>;
    }
}

mock! {
    pub HasherMock {}

    #[async_trait]
    impl CredentialsHasher for HasherMock {
        async fn hash_password(&self, password: &str) -> AppResult<String>;
        async fn verify_password(&self, password: &str, hashed: &str) -> AppResult<bool>;
    }
}

mock! {
    pub SignatureVerifierMock {}

    impl SignatureVerifier for SignatureVerifierMock {
        fn verify_payment(&self, order_id: &str, payment_id: &str, signature: &str) -> AppResult<()>;
        fn verify_webhook(&self, body: &[u8], signature: &str) -> AppResult<()>;
    }
}

mock! {
    pub PaymentGatewayMock {}

    #[async_trait]
    impl PaymentGateway for PaymentGatewayMock {
        async fn create_order(&self, request: CreateOrderRequest) -> AppResult<GatewayOrder>;
    }
}

mock! {
    pub UserWriterMock {}

    #[async_trait]
    impl UserWriter for UserWriterMock {
        async fn insert(&self, user: User) -> AppResult<Id<User>>;
        async fn update_profile(&self, user: User) -> AppResult<()>;
        async fn lock(&self, user_id: &Id<User>) -> AppResult<Option<User>>;
        async fn record_payment_totals(
            &self,
            client_id: &Id<User>,
            freelancer_id: &Id<User>,
            spent: i64,
            earned: i64,
        ) -> AppResult<()>;
    }
}

mock! {
    pub UserReaderMock {}

    #[async_trait]
    impl UserReader for UserReaderMock {
        async fn find_by_id(&self, user_id: &Id<User>) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn is_user(&self, username: &str, email: &str) -> AppResult<bool>;
    }
}

mock! {
    pub SessionWriterMock {}

    #[async_trait]
    impl SessionWriter for SessionWriterMock {
        async fn insert(&self, session: Session) -> AppResult<Id<Session>>;
        async fn update_activity(&self, session_id: &Id<Session>, now: DateTime<Utc>) -> AppResult<()>;
        async fn delete(&self, session_id: &Id<Session>) -> AppResult<()>;
        async fn delete_by_user_id(&self, user_id: &Id<User>) -> AppResult<()>;
    }
}

mock! {
    pub SessionReaderMock {}

    #[async_trait]
    impl SessionReader for SessionReaderMock {
        async fn find_by_id(&self, session_id: &Id<Session>) -> AppResult<Option<Session>>;
    }
}

mock! {
    pub PresenceStoreMock {}

    #[async_trait]
    impl PresenceStore for PresenceStoreMock {
        async fn heartbeat(&self, presence: Presence) -> AppResult<()>;
        async fn online_among(&self, user_ids: &[Id<User>], now: DateTime<Utc>) -> AppResult<Vec<Id<User>>>;
    }
}

mock! {
    pub WorkspaceWriterMock {}

    #[async_trait]
    impl WorkspaceWriter for WorkspaceWriterMock {
        async fn insert(&self, workspace: Workspace) -> AppResult<Id<Workspace>>;
        async fn update(&self, workspace: Workspace) -> AppResult<()>;
        async fn deactivate(&self, workspace_id: &Id<Workspace>) -> AppResult<()>;
    }
}

mock! {
    pub WorkspaceReaderMock {}

    #[async_trait]
    impl WorkspaceReader for WorkspaceReaderMock {
        async fn find_by_id(&self, workspace_id: &Id<Workspace>) -> AppResult<Option<Workspace>>;
        async fn find_accessible_by_user(
            &self,
            user_id: &Id<User>,
            limit: i64,
            offset: i64,
        ) -> AppResult<Vec<WorkspaceView>>;
        async fn count_accessible_by_user(&self, user_id: &Id<User>) -> AppResult<i64>;
    }
}

mock! {
    pub WorkspaceMemberWriterMock {}

    #[async_trait]
    impl WorkspaceMemberWriter for WorkspaceMemberWriterMock {
        async fn insert(&self, member: WorkspaceMember) -> AppResult<()>;
        async fn update_role(
            &self,
            workspace_id: &Id<Workspace>,
            user_id: &Id<User>,
            role: WorkspaceMemberRole,
        ) -> AppResult<()>;
        async fn delete(&self, workspace_id: &Id<Workspace>, user_id: &Id<User>) -> AppResult<()>;
    }
}

mock! {
    pub WorkspaceMemberReaderMock {}

    #[async_trait]
    impl WorkspaceMemberReader for WorkspaceMemberReaderMock {
        async fn list(&self, workspace_id: &Id<Workspace>) -> AppResult<Vec<WorkspaceMember>>;
        async fn is_member_email(&self, workspace_id: &Id<Workspace>, email: &str) -> AppResult<bool>;
    }
}

mock! {
    pub InvitationWriterMock {}

    #[async_trait]
    impl WorkspaceInvitationWriter for InvitationWriterMock {
        async fn insert(&self, invitation: WorkspaceInvitation) -> AppResult<Id<WorkspaceInvitation>>;
        async fn refresh(&self, invitation: WorkspaceInvitation) -> AppResult<()>;
        async fn set_status(
            &self,
            invitation_id: &Id<WorkspaceInvitation>,
            status: InvitationStatus,
        ) -> AppResult<()>;
    }
}

mock! {
    pub InvitationReaderMock {}

    #[async_trait]
    impl WorkspaceInvitationReader for InvitationReaderMock {
        async fn find_by_token(&self, token: &str) -> AppResult<Option<WorkspaceInvitation>>;
        async fn find_pending(
            &self,
            workspace_id: &Id<Workspace>,
            email: &str,
        ) -> AppResult<Option<WorkspaceInvitation>>;
        async fn list_pending_for_email(&self, email: &str) -> AppResult<Vec<WorkspaceInvitation>>;
    }
}

mock! {
    pub ProjectWriterMock {}

    #[async_trait]
    impl ProjectWriter for ProjectWriterMock {
        async fn insert(&self, project: Project) -> AppResult<Id<Project>>;
        async fn update(&self, project: Project) -> AppResult<()>;
        async fn delete(&self, project_id: &Id<Project>) -> AppResult<()>;
        async fn upsert_member(&self, project_id: &Id<Project>, member: ProjectMember) -> AppResult<()>;
    }
}

mock! {
    pub ProjectReaderMock {}

    #[async_trait]
    impl ProjectReader for ProjectReaderMock {
        async fn find_by_id(&self, project_id: &Id<Project>) -> AppResult<Option<Project>>;
        async fn get_all(&self, workspace_id: &Id<Workspace>, limit: i64, offset: i64) -> AppResult<Vec<Project>>;
        async fn count_projects(&self, workspace_id: &Id<Workspace>) -> AppResult<i64>;
    }
}

mock! {
    pub DiscussionWriterMock {}

    #[async_trait]
    impl DiscussionWriter for DiscussionWriterMock {
        async fn insert(&self, discussion: Discussion) -> AppResult<Id<Discussion>>;
        async fn append_message(&self, message: DiscussionMessage) -> AppResult<()>;
        async fn upsert_participant(
            &self,
            discussion_id: &Id<Discussion>,
            participant: DiscussionParticipant,
        ) -> AppResult<()>;
        async fn update_summary(&self, discussion: &Discussion) -> AppResult<()>;
    }
}

mock! {
    pub DiscussionReaderMock {}

    #[async_trait]
    impl DiscussionReader for DiscussionReaderMock {
        async fn find_by_id(&self, discussion_id: &Id<Discussion>) -> AppResult<Option<Discussion>>;
        async fn find_by_id_for_update(&self, discussion_id: &Id<Discussion>) -> AppResult<Option<Discussion>>;
        async fn get_all(&self, workspace_id: &Id<Workspace>, limit: i64, offset: i64) -> AppResult<Vec<Discussion>>;
        async fn count_discussions(&self, workspace_id: &Id<Workspace>) -> AppResult<i64>;
    }
}

mock! {
    pub GigWriterMock {}

    #[async_trait]
    impl GigWriter for GigWriterMock {
        async fn insert(&self, gig: Gig) -> AppResult<Id<Gig>>;
        async fn assign(&self, gig_id: &Id<Gig>, freelancer_id: &Id<User>) -> AppResult<bool>;
        async fn complete(&self, gig_id: &Id<Gig>) -> AppResult<bool>;
    }
}

mock! {
    pub GigReaderMock {}

    #[async_trait]
    impl GigReader for GigReaderMock {
        async fn find_by_id(&self, gig_id: &Id<Gig>) -> AppResult<Option<Gig>>;
        async fn get_open(&self, limit: i64, offset: i64) -> AppResult<Vec<Gig>>;
        async fn count_open(&self) -> AppResult<i64>;
    }
}

mock! {
    pub ContractWriterMock {}

    #[async_trait]
    impl ContractWriter for ContractWriterMock {
        async fn insert(&self, contract: Contract) -> AppResult<Id<Contract>>;
        async fn update_status(&self, contract: &Contract, expected: ContractStatus) -> AppResult<bool>;
        async fn update_milestone(&self, milestone: &Milestone, expected: MilestoneStatus) -> AppResult<bool>;
    }
}

mock! {
    pub ContractReaderMock {}

    #[async_trait]
    impl ContractReader for ContractReaderMock {
        async fn find_by_id(&self, contract_id: &Id<Contract>) -> AppResult<Option<Contract>>;
        async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Contract>>;
        async fn count_for_user(&self, user_id: &Id<User>) -> AppResult<i64>;
    }
}

mock! {
    pub PaymentWriterMock {}

    #[async_trait]
    impl PaymentWriter for PaymentWriterMock {
        async fn insert(&self, payment: Payment) -> AppResult<Id<Payment>>;
        async fn capture(&self, order_id: &str, payment_id: &str) -> AppResult<bool>;
        async fn mark_failed(&self, order_id: &str, payment_id: Option<String>) -> AppResult<bool>;
    }
}

mock! {
    pub PaymentReaderMock {}

    #[async_trait]
    impl PaymentReader for PaymentReaderMock {
        async fn find_by_order_id(&self, order_id: &str) -> AppResult<Option<Payment>>;
        async fn find_by_payment_id(&self, payment_id: &str) -> AppResult<Option<Payment>>;
        async fn get_received(&self, user_id: &Id<User>) -> AppResult<Vec<Payment>>;
        async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Payment>>;
        async fn count_for_user(&self, user_id: &Id<User>) -> AppResult<i64>;
    }
}

mock! {
    pub WithdrawalWriterMock {}

    #[async_trait]
    impl WithdrawalWriter for WithdrawalWriterMock {
        async fn insert(&self, withdrawal: Withdrawal) -> AppResult<Id<Withdrawal>>;
        async fn cancel(&self, withdrawal_id: &Id<Withdrawal>, user_id: &Id<User>) -> AppResult<bool>;
    }
}

mock! {
    pub WithdrawalReaderMock {}

    #[async_trait]
    impl WithdrawalReader for WithdrawalReaderMock {
        async fn find_by_id(&self, withdrawal_id: &Id<Withdrawal>) -> AppResult<Option<Withdrawal>>;
        async fn get_all_for_user(&self, user_id: &Id<User>) -> AppResult<Vec<Withdrawal>>;
        async fn get_for_user(&self, user_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Withdrawal>>;
        async fn count_for_user(&self, user_id: &Id<User>) -> AppResult<i64>;
    }
}

mock! {
    pub NotificationWriterMock {}

    #[async_trait]
    impl NotificationWriter for NotificationWriterMock {
        async fn insert(&self, notification: Notification) -> AppResult<Id<Notification>>;
        async fn mark_read(&self, notification_id: &Id<Notification>, recipient_id: &Id<User>) -> AppResult<bool>;
        async fn mark_all_read(&self, recipient_id: &Id<User>) -> AppResult<u64>;
    }
}

mock! {
    pub NotificationReaderMock {}

    #[async_trait]
    impl NotificationReader for NotificationReaderMock {
        async fn get_for_user(&self, recipient_id: &Id<User>, limit: i64, offset: i64) -> AppResult<Vec<Notification>>;
        async fn count_for_user(&self, recipient_id: &Id<User>) -> AppResult<i64>;
        async fn count_unread(&self, recipient_id: &Id<User>) -> AppResult<i64>;
    }
}

/// A notification writer that accepts everything.
pub fn accepting_notifications() -> MockNotificationWriterMock {
    let mut writer = MockNotificationWriterMock::new();
    writer.expect_insert().returning(|n| Ok(n.id));
    writer
}

pub fn committing_session() -> MockDBSessionMock {
    let mut db_session = MockDBSessionMock::new();
    db_session.expect_commit().returning(|| Ok(()));
    db_session
}
