use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::application::app_error::AppError;
use crate::domain::entities::{id::Id, user::User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSettings {
    pub is_public: bool,
    pub allow_member_invite: bool,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            is_public: false,
            allow_member_invite: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Workspace {
    pub id: Id<Workspace>,
    pub owner_user_id: Id<User>,
    pub name: String,
    pub description: Option<String>,
    pub settings: WorkspaceSettings,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    pub fn new(
        owner_user_id: Id<User>,
        name: String,
        description: Option<String>,
        settings: WorkspaceSettings,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            owner_user_id,
            name,
            description,
            settings,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owner(&self, user_id: &Id<User>) -> bool {
        &self.owner_user_id == user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceMemberRole {
    Admin,
    Member,
    Viewer,
}

impl WorkspaceMemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceMemberRole::Admin => "admin",
            WorkspaceMemberRole::Member => "member",
            WorkspaceMemberRole::Viewer => "viewer",
        }
    }
}

impl FromStr for WorkspaceMemberRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(WorkspaceMemberRole::Admin),
            "member" => Ok(WorkspaceMemberRole::Member),
            "viewer" => Ok(WorkspaceMemberRole::Viewer),
            other => Err(AppError::Validation(format!("Unknown workspace role `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkspaceMember {
    pub workspace_id: Id<Workspace>,
    pub user_id: Id<User>,
    pub role: WorkspaceMemberRole,
    pub joined_at: DateTime<Utc>,
}

impl WorkspaceMember {
    pub fn new(workspace_id: Id<Workspace>, user_id: Id<User>, role: WorkspaceMemberRole) -> Self {
        Self {
            workspace_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

/// A workspace as seen by one user, with aggregate counters.
#[derive(Debug, Clone)]
pub struct WorkspaceView {
    pub workspace: Workspace,
    pub user_role: String,
    pub total_members: i64,
    pub total_projects: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Declined => "declined",
            InvitationStatus::Expired => "expired",
        }
    }
}

impl FromStr for InvitationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "declined" => Ok(InvitationStatus::Declined),
            "expired" => Ok(InvitationStatus::Expired),
            other => Err(AppError::Validation(format!("Unknown invitation status `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkspaceInvitation {
    pub id: Id<WorkspaceInvitation>,
    pub workspace_id: Id<Workspace>,
    pub email: String,
    pub role: WorkspaceMemberRole,
    pub token: String,
    pub message: Option<String>,
    pub invited_by: Id<User>,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkspaceInvitation {
    pub fn new(
        workspace_id: Id<Workspace>,
        email: String,
        role: WorkspaceMemberRole,
        token: String,
        message: Option<String>,
        invited_by: Id<User>,
        ttl_seconds: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            workspace_id,
            email,
            role,
            token,
            message,
            invited_by,
            status: InvitationStatus::Pending,
            expires_at: now + Duration::seconds(ttl_seconds),
            created_at: now,
            updated_at: now,
        }
    }

    /// Re-issues a pending invitation in place instead of creating a second one.
    pub fn refresh(&mut self, role: WorkspaceMemberRole, message: Option<String>, invited_by: Id<User>, ttl_seconds: i64) {
        let now = Utc::now();
        self.role = role;
        self.message = message;
        self.invited_by = invited_by;
        self.expires_at = now + Duration::seconds(ttl_seconds);
        self.updated_at = now;
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }
}
