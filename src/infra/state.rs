use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::{Pool, Postgres};

use crate::adapter::db::gateway::contract::ContractGateway;
use crate::adapter::db::gateway::discussion::DiscussionGateway;
use crate::adapter::db::gateway::gig::GigGateway;
use crate::adapter::db::gateway::notification::NotificationGateway;
use crate::adapter::db::gateway::payment::PaymentGateway as PaymentDbGateway;
use crate::adapter::db::gateway::presence::PresenceGateway;
use crate::adapter::db::gateway::project::ProjectGateway;
use crate::adapter::db::gateway::session::SessionGateway;
use crate::adapter::db::gateway::user::UserGateway;
use crate::adapter::db::gateway::withdrawal::WithdrawalGateway;
use crate::adapter::db::gateway::workspace::{WorkspaceGateway, WorkspaceInvitationGateway, WorkspaceMemberGateway};
use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::auth::{LoginInteractor, LogoutInteractor};
use crate::application::interactors::contract::{
    CreateContractInteractor, GetContractInteractor, GetContractListInteractor, UpdateContractStatusInteractor,
    UpdateMilestoneStatusInteractor,
};
use crate::application::interactors::discussion::{
    CreateDiscussionInteractor, GetDiscussionInteractor, GetDiscussionListInteractor, PostMessageInteractor,
    UpdateDiscussionInteractor,
};
use crate::application::interactors::gig::{
    AcceptGigInteractor, CompleteGigInteractor, CreateGigInteractor, GetGigInteractor, GetOpenGigsInteractor,
};
use crate::application::interactors::invitation::{
    AcceptInvitationInteractor, DeclineInvitationInteractor, GetMyInvitationsInteractor, InviteMemberInteractor,
};
use crate::application::interactors::notification::{
    GetNotificationListInteractor, MarkAllNotificationsReadInteractor, MarkNotificationReadInteractor,
};
use crate::application::interactors::payment::{
    CapturePaymentInteractor, CreatePaymentOrderInteractor, GetPaymentListInteractor, HandleWebhookInteractor,
    VerifyPaymentInteractor,
};
use crate::application::interactors::presence::{GetOnlineUsersInteractor, HeartbeatInteractor};
use crate::application::interactors::project::{
    AssignProjectMemberInteractor, CreateProjectInteractor, DeleteProjectInteractor, GetProjectInteractor,
    GetProjectListInteractor, UpdateProjectInteractor,
};
use crate::application::interactors::session::ValidateSessionInteractor;
use crate::application::interactors::users::{CreateUserInteractor, GetMeInteractor, UpdateProfileInteractor};
use crate::application::interactors::withdrawal::{
    CancelWithdrawalInteractor, GetBalanceInteractor, GetWithdrawalListInteractor, RequestWithdrawalInteractor,
};
use crate::application::interactors::workspace::{
    CreateWorkspaceInteractor, DeleteWorkspaceInteractor, GetWorkspaceInteractor, GetWorkspaceListInteractor,
    GetWorkspaceMembersInteractor, LeaveWorkspaceInteractor, RemoveMemberInteractor, UpdateMemberRoleInteractor,
    UpdateWorkspaceInteractor,
};
use crate::application::interface::crypto::{CredentialsHasher, SignatureVerifier};
use crate::application::interface::payment::PaymentGateway;
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub hasher: Arc<dyn CredentialsHasher>,
    pub config: Arc<AppConfig>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub signature_verifier: Arc<dyn SignatureVerifier>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

/// Builds the interactor from `AppState` for every request that names it.
macro_rules! from_request_parts {
    ($($interactor:ty),+ $(,)?) => {
        $(
            impl<S> FromRequestParts<S> for $interactor
            where
                S: Send + Sync,
                AppState: FromRef<S>,
            {
                type Rejection = AppError;

                async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
                    let app_state = AppState::from_ref(state);
                    <$interactor>::from_app_state(&app_state).await
                }
            }
        )+
    };
}

impl AppState {
    fn session(&self) -> SqlxSession {
        SqlxSession::new_lazy(self.pool.clone())
    }
}

fn capture_interactor(session: &SqlxSession) -> CapturePaymentInteractor {
    let user_gateway = UserGateway::new(session.clone());
    let payment_gateway = PaymentDbGateway::new(session.clone());

    CapturePaymentInteractor::new(
        Arc::new(session.clone()),
        Arc::new(payment_gateway.clone()),
        Arc::new(payment_gateway),
        Arc::new(user_gateway),
        Arc::new(NotificationGateway::new(session.clone())),
    )
}

// Users and sessions

#[async_trait]
impl FromAppState for CreateUserInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let user_gateway = UserGateway::new(session.clone());

        Ok(CreateUserInteractor::new(
            Arc::new(session),
            Arc::new(user_gateway.clone()),
            Arc::new(user_gateway),
            state.hasher.clone(),
        ))
    }
}

#[async_trait]
impl FromAppState for LoginInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(LoginInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(SessionGateway::new(session.clone())),
            Arc::new(PresenceGateway::new(session)),
            state.hasher.clone(),
        ))
    }
}

#[async_trait]
impl FromAppState for LogoutInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let session_gateway = SessionGateway::new(session.clone());

        Ok(LogoutInteractor::new(Arc::new(session), Arc::new(session_gateway)))
    }
}

#[async_trait]
impl FromAppState for ValidateSessionInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let session_gateway = Arc::new(SessionGateway::new(session.clone()));

        Ok(ValidateSessionInteractor::new(
            Arc::new(session),
            session_gateway.clone(),
            session_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for GetMeInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetMeInteractor::new(Arc::new(UserGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for UpdateProfileInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let user_gateway = Arc::new(UserGateway::new(session.clone()));

        Ok(UpdateProfileInteractor::new(
            Arc::new(session),
            user_gateway.clone(),
            user_gateway,
        ))
    }
}

// Workspaces

#[async_trait]
impl FromAppState for CreateWorkspaceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let workspace_gateway = WorkspaceGateway::new(session.clone());

        Ok(CreateWorkspaceInteractor::new(Arc::new(session), Arc::new(workspace_gateway)))
    }
}

#[async_trait]
impl FromAppState for GetWorkspaceListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetWorkspaceListInteractor::new(Arc::new(WorkspaceGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for GetWorkspaceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(GetWorkspaceInteractor::new(
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(ProjectGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for UpdateWorkspaceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let workspace_gateway = Arc::new(WorkspaceGateway::new(session.clone()));

        Ok(UpdateWorkspaceInteractor::new(
            Arc::new(session.clone()),
            workspace_gateway.clone(),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(ProjectGateway::new(session)),
            workspace_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for DeleteWorkspaceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let workspace_gateway = Arc::new(WorkspaceGateway::new(session.clone()));

        Ok(DeleteWorkspaceInteractor::new(
            Arc::new(session.clone()),
            workspace_gateway.clone(),
            Arc::new(WorkspaceMemberGateway::new(session)),
            workspace_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for GetWorkspaceMembersInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(GetWorkspaceMembersInteractor::new(
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for UpdateMemberRoleInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let member_gateway = Arc::new(WorkspaceMemberGateway::new(session.clone()));

        Ok(UpdateMemberRoleInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session)),
            member_gateway.clone(),
            member_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for RemoveMemberInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let member_gateway = Arc::new(WorkspaceMemberGateway::new(session.clone()));

        Ok(RemoveMemberInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session)),
            member_gateway.clone(),
            member_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for LeaveWorkspaceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let member_gateway = Arc::new(WorkspaceMemberGateway::new(session.clone()));

        Ok(LeaveWorkspaceInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session)),
            member_gateway.clone(),
            member_gateway,
        ))
    }
}

// Invitations

#[async_trait]
impl FromAppState for InviteMemberInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let invitation_gateway = Arc::new(WorkspaceInvitationGateway::new(session.clone()));

        Ok(InviteMemberInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(UserGateway::new(session.clone())),
            invitation_gateway.clone(),
            invitation_gateway,
            Arc::new(NotificationGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for AcceptInvitationInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let member_gateway = Arc::new(WorkspaceMemberGateway::new(session.clone()));
        let invitation_gateway = Arc::new(WorkspaceInvitationGateway::new(session.clone()));

        Ok(AcceptInvitationInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(WorkspaceGateway::new(session)),
            member_gateway.clone(),
            member_gateway,
            invitation_gateway.clone(),
            invitation_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for DeclineInvitationInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let invitation_gateway = Arc::new(WorkspaceInvitationGateway::new(session.clone()));

        Ok(DeclineInvitationInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session)),
            invitation_gateway.clone(),
            invitation_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for GetMyInvitationsInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(GetMyInvitationsInteractor::new(
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(WorkspaceInvitationGateway::new(session)),
        ))
    }
}

// Projects

#[async_trait]
impl FromAppState for CreateProjectInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(CreateProjectInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(ProjectGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for GetProjectListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(GetProjectListInteractor::new(
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(ProjectGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for GetProjectInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(GetProjectInteractor::new(
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(ProjectGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for UpdateProjectInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let project_gateway = Arc::new(ProjectGateway::new(session.clone()));

        Ok(UpdateProjectInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session)),
            project_gateway.clone(),
            project_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for DeleteProjectInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let project_gateway = Arc::new(ProjectGateway::new(session.clone()));

        Ok(DeleteProjectInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session)),
            project_gateway.clone(),
            project_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for AssignProjectMemberInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let project_gateway = Arc::new(ProjectGateway::new(session.clone()));

        Ok(AssignProjectMemberInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session)),
            project_gateway.clone(),
            project_gateway,
        ))
    }
}

// Discussions

#[async_trait]
impl FromAppState for CreateDiscussionInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(CreateDiscussionInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(DiscussionGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for GetDiscussionListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(GetDiscussionListInteractor::new(
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session.clone())),
            Arc::new(DiscussionGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for GetDiscussionInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let discussion_gateway = Arc::new(DiscussionGateway::new(session.clone()));

        Ok(GetDiscussionInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session)),
            discussion_gateway.clone(),
            discussion_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for PostMessageInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let discussion_gateway = Arc::new(DiscussionGateway::new(session.clone()));

        Ok(PostMessageInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session)),
            discussion_gateway.clone(),
            discussion_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for UpdateDiscussionInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let discussion_gateway = Arc::new(DiscussionGateway::new(session.clone()));

        Ok(UpdateDiscussionInteractor::new(
            Arc::new(session.clone()),
            Arc::new(WorkspaceGateway::new(session.clone())),
            Arc::new(WorkspaceMemberGateway::new(session)),
            discussion_gateway.clone(),
            discussion_gateway,
        ))
    }
}

// Gigs

#[async_trait]
impl FromAppState for CreateGigInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(CreateGigInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(GigGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for GetOpenGigsInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetOpenGigsInteractor::new(Arc::new(GigGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for GetGigInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetGigInteractor::new(Arc::new(GigGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for AcceptGigInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let gig_gateway = Arc::new(GigGateway::new(session.clone()));

        Ok(AcceptGigInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session.clone())),
            gig_gateway.clone(),
            gig_gateway,
            Arc::new(NotificationGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for CompleteGigInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let gig_gateway = Arc::new(GigGateway::new(session.clone()));

        Ok(CompleteGigInteractor::new(Arc::new(session), gig_gateway.clone(), gig_gateway))
    }
}

// Contracts

#[async_trait]
impl FromAppState for CreateContractInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(CreateContractInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(ContractGateway::new(session.clone())),
            Arc::new(NotificationGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for GetContractListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetContractListInteractor::new(Arc::new(ContractGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for GetContractInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetContractInteractor::new(Arc::new(ContractGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for UpdateContractStatusInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let contract_gateway = Arc::new(ContractGateway::new(session.clone()));

        Ok(UpdateContractStatusInteractor::new(
            Arc::new(session.clone()),
            contract_gateway.clone(),
            contract_gateway,
            Arc::new(NotificationGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for UpdateMilestoneStatusInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let contract_gateway = Arc::new(ContractGateway::new(session.clone()));

        Ok(UpdateMilestoneStatusInteractor::new(
            Arc::new(session),
            contract_gateway.clone(),
            contract_gateway,
        ))
    }
}

// Payments

#[async_trait]
impl FromAppState for CreatePaymentOrderInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(CreatePaymentOrderInteractor::new(
            Arc::new(session.clone()),
            Arc::new(GigGateway::new(session.clone())),
            Arc::new(ContractGateway::new(session.clone())),
            Arc::new(PaymentDbGateway::new(session)),
            state.payment_gateway.clone(),
        ))
    }
}

#[async_trait]
impl FromAppState for VerifyPaymentInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(VerifyPaymentInteractor::new(
            state.signature_verifier.clone(),
            Arc::new(PaymentDbGateway::new(session.clone())),
            capture_interactor(&session),
        ))
    }
}

#[async_trait]
impl FromAppState for HandleWebhookInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let payment_gateway = Arc::new(PaymentDbGateway::new(session.clone()));
        let contract_gateway = Arc::new(ContractGateway::new(session.clone()));

        Ok(HandleWebhookInteractor::new(
            Arc::new(session.clone()),
            state.signature_verifier.clone(),
            payment_gateway.clone(),
            payment_gateway,
            contract_gateway.clone(),
            contract_gateway,
            Arc::new(NotificationGateway::new(session.clone())),
            capture_interactor(&session),
        ))
    }
}

#[async_trait]
impl FromAppState for GetPaymentListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetPaymentListInteractor::new(Arc::new(PaymentDbGateway::new(state.session()))))
    }
}

// Withdrawals

#[async_trait]
impl FromAppState for GetBalanceInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();

        Ok(GetBalanceInteractor::new(
            Arc::new(PaymentDbGateway::new(session.clone())),
            Arc::new(WithdrawalGateway::new(session)),
        ))
    }
}

#[async_trait]
impl FromAppState for RequestWithdrawalInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let withdrawal_gateway = Arc::new(WithdrawalGateway::new(session.clone()));

        Ok(RequestWithdrawalInteractor::new(
            Arc::new(session.clone()),
            Arc::new(UserGateway::new(session.clone())),
            Arc::new(PaymentDbGateway::new(session)),
            withdrawal_gateway.clone(),
            withdrawal_gateway,
        ))
    }
}

#[async_trait]
impl FromAppState for GetWithdrawalListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetWithdrawalListInteractor::new(Arc::new(WithdrawalGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for CancelWithdrawalInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let withdrawal_gateway = Arc::new(WithdrawalGateway::new(session.clone()));

        Ok(CancelWithdrawalInteractor::new(
            Arc::new(session),
            withdrawal_gateway.clone(),
            withdrawal_gateway,
        ))
    }
}

// Notifications and presence

#[async_trait]
impl FromAppState for GetNotificationListInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetNotificationListInteractor::new(Arc::new(NotificationGateway::new(state.session()))))
    }
}

#[async_trait]
impl FromAppState for MarkNotificationReadInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let notification_gateway = NotificationGateway::new(session.clone());

        Ok(MarkNotificationReadInteractor::new(Arc::new(session), Arc::new(notification_gateway)))
    }
}

#[async_trait]
impl FromAppState for MarkAllNotificationsReadInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let notification_gateway = NotificationGateway::new(session.clone());

        Ok(MarkAllNotificationsReadInteractor::new(Arc::new(session), Arc::new(notification_gateway)))
    }
}

#[async_trait]
impl FromAppState for HeartbeatInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        let session = state.session();
        let presence_gateway = PresenceGateway::new(session.clone());

        Ok(HeartbeatInteractor::new(Arc::new(session), Arc::new(presence_gateway)))
    }
}

#[async_trait]
impl FromAppState for GetOnlineUsersInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(GetOnlineUsersInteractor::new(Arc::new(PresenceGateway::new(state.session()))))
    }
}

from_request_parts!(
    CreateUserInteractor,
    LoginInteractor,
    LogoutInteractor,
    ValidateSessionInteractor,
    GetMeInteractor,
    UpdateProfileInteractor,
    CreateWorkspaceInteractor,
    GetWorkspaceListInteractor,
    GetWorkspaceInteractor,
    UpdateWorkspaceInteractor,
    DeleteWorkspaceInteractor,
    GetWorkspaceMembersInteractor,
    UpdateMemberRoleInteractor,
    RemoveMemberInteractor,
    LeaveWorkspaceInteractor,
    InviteMemberInteractor,
    AcceptInvitationInteractor,
    DeclineInvitationInteractor,
    GetMyInvitationsInteractor,
    CreateProjectInteractor,
    GetProjectListInteractor,
    GetProjectInteractor,
    UpdateProjectInteractor,
    DeleteProjectInteractor,
    AssignProjectMemberInteractor,
    CreateDiscussionInteractor,
    GetDiscussionListInteractor,
    GetDiscussionInteractor,
    PostMessageInteractor,
    UpdateDiscussionInteractor,
    CreateGigInteractor,
    GetOpenGigsInteractor,
    GetGigInteractor,
    AcceptGigInteractor,
    CompleteGigInteractor,
    CreateContractInteractor,
    GetContractListInteractor,
    GetContractInteractor,
    UpdateContractStatusInteractor,
    UpdateMilestoneStatusInteractor,
    CreatePaymentOrderInteractor,
    VerifyPaymentInteractor,
    HandleWebhookInteractor,
    GetPaymentListInteractor,
    GetBalanceInteractor,
    RequestWithdrawalInteractor,
    GetWithdrawalListInteractor,
    CancelWithdrawalInteractor,
    GetNotificationListInteractor,
    MarkNotificationReadInteractor,
    MarkAllNotificationsReadInteractor,
    HeartbeatInteractor,
    GetOnlineUsersInteractor,
);
