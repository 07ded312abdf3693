use chrono::{DateTime, Utc};

use crate::domain::entities::workspace::WorkspaceInvitation;

#[derive(Debug, Clone)]
pub struct InviteMemberDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub email: String,
    pub role: String,
    pub message: Option<String>,
    pub ttl: i64,
}

#[derive(Debug, Clone)]
pub struct InvitationDecisionDTO {
    pub user_id: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct InvitationDTO {
    pub id: String,
    pub workspace_id: String,
    pub email: String,
    pub role: String,
    pub message: Option<String>,
    pub status: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkspaceInvitation> for InvitationDTO {
    fn from(invitation: WorkspaceInvitation) -> Self {
        Self {
            id: invitation.id.value.to_string(),
            workspace_id: invitation.workspace_id.value.to_string(),
            email: invitation.email,
            role: invitation.role.as_str().to_string(),
            message: invitation.message,
            status: invitation.status.as_str().to_string(),
            token: invitation.token,
            expires_at: invitation.expires_at,
            created_at: invitation.created_at,
            updated_at: invitation.updated_at,
        }
    }
}
