use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::{
    InvitationStatus, Workspace, WorkspaceInvitation, WorkspaceMember, WorkspaceMemberRole, WorkspaceView,
};

#[async_trait]
pub trait WorkspaceWriter: Send + Sync {
    async fn insert(&self, workspace: Workspace) -> AppResult<Id<Workspace>>;
    async fn update(&self, workspace: Workspace) -> AppResult<()>;
    async fn deactivate(&self, workspace_id: &Id<Workspace>) -> AppResult<()>;
}

#[async_trait]
pub trait WorkspaceReader: Send + Sync {
    /// Active workspaces only.
    async fn find_by_id(&self, workspace_id: &Id<Workspace>) -> AppResult<Option<Workspace>>;
    async fn find_accessible_by_user(
        &self,
        user_id: &Id<User>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<WorkspaceView>>;
    async fn count_accessible_by_user(&self, user_id: &Id<User>) -> AppResult<i64>;
}

#[async_trait]
pub trait WorkspaceMemberWriter: Send + Sync {
    async fn insert(&self, member: WorkspaceMember) -> AppResult<()>;
    async fn update_role(
        &self,
        workspace_id: &Id<Workspace>,
        user_id: &Id<User>,
        role: WorkspaceMemberRole,
    ) -> AppResult<()>;
    async fn delete(&self, workspace_id: &Id<Workspace>, user_id: &Id<User>) -> AppResult<()>;
}

#[async_trait]
pub trait WorkspaceMemberReader: Send + Sync {
    async fn list(&self, workspace_id: &Id<Workspace>) -> AppResult<Vec<WorkspaceMember>>;
    async fn is_member_email(&self, workspace_id: &Id<Workspace>, email: &str) -> AppResult<bool>;
}

#[async_trait]
pub trait WorkspaceInvitationWriter: Send + Sync {
    async fn insert(&self, invitation: WorkspaceInvitation) -> AppResult<Id<WorkspaceInvitation>>;
    async fn refresh(&self, invitation: WorkspaceInvitation) -> AppResult<()>;
    async fn set_status(
        &self,
        invitation_id: &Id<WorkspaceInvitation>,
        status: InvitationStatus,
    ) -> AppResult<()>;
}

#[async_trait]
pub trait WorkspaceInvitationReader: Send + Sync {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<WorkspaceInvitation>>;
    async fn find_pending(
        &self,
        workspace_id: &Id<Workspace>,
        email: &str,
    ) -> AppResult<Option<WorkspaceInvitation>>;
    async fn list_pending_for_email(&self, email: &str) -> AppResult<Vec<WorkspaceInvitation>>;
}
