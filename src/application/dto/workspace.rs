use chrono::{DateTime, Utc};

use crate::application::dto::pagination::PageRequestDTO;
use crate::domain::entities::workspace::{Workspace, WorkspaceMember};

#[derive(Debug, Clone)]
pub struct CreateWorkspaceDTO {
    pub owner_user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub allow_member_invite: bool,
}

#[derive(Debug, Clone)]
pub struct WorkspaceDTO {
    pub id: String,
    pub owner_user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub allow_member_invite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_members: i64,
    pub total_projects: i64,
    pub user_role: Option<String>,
}

impl WorkspaceDTO {
    pub fn new(workspace: Workspace, user_role: Option<String>, total_members: i64, total_projects: i64) -> Self {
        Self {
            id: workspace.id.value.to_string(),
            owner_user_id: workspace.owner_user_id.value.to_string(),
            name: workspace.name,
            description: workspace.description,
            is_public: workspace.settings.is_public,
            allow_member_invite: workspace.settings.allow_member_invite,
            created_at: workspace.created_at,
            updated_at: workspace.updated_at,
            total_members,
            total_projects,
            user_role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetWorkspaceListDTO {
    pub user_id: String,
    pub page: PageRequestDTO,
}

#[derive(Debug, Clone)]
pub struct GetWorkspaceDTO {
    pub user_id: String,
    pub workspace_id: String,
}

#[derive(Debug, Clone)]
pub struct UpdateWorkspaceDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub allow_member_invite: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct DeleteWorkspaceDTO {
    pub user_id: String,
    pub workspace_id: String,
}

#[derive(Debug, Clone)]
pub struct UpdateMemberRoleDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub target_user_id: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct RemoveMemberDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub target_user_id: String,
}

#[derive(Debug, Clone)]
pub struct LeaveWorkspaceDTO {
    pub user_id: String,
    pub workspace_id: String,
}

#[derive(Debug, Clone)]
pub struct WorkspaceMemberDTO {
    pub user_id: String,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

impl From<WorkspaceMember> for WorkspaceMemberDTO {
    fn from(member: WorkspaceMember) -> Self {
        Self {
            user_id: member.user_id.value.to_string(),
            role: member.role.as_str().to_string(),
            joined_at: member.joined_at,
        }
    }
}
