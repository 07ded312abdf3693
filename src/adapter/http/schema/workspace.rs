use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::pagination::page_response;
use crate::application::dto::workspace::{WorkspaceDTO, WorkspaceMemberDTO};

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Design Studio",
    "description": "Client work for Q3",
    "is_public": false,
    "allow_member_invite": true
}))]
pub struct CreateWorkspaceRequest {
    #[validate(length(min = 1, max = 100, message = "Workspace name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default = "default_true")]
    pub allow_member_invite: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateWorkspaceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub allow_member_invite: Option<bool>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMemberRoleRequest {
    #[schema(example = "admin")]
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkspaceResponse {
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
    /// `owner`, `admin`, `member`, `viewer`, or null for outsiders.
    #[schema(example = "owner")]
    pub user_role: Option<String>,
}

impl From<WorkspaceDTO> for WorkspaceResponse {
    fn from(dto: WorkspaceDTO) -> Self {
        Self {
            id: dto.id,
            owner_user_id: dto.owner_user_id,
            name: dto.name,
            description: dto.description,
            is_public: dto.is_public,
            allow_member_invite: dto.allow_member_invite,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
            total_members: dto.total_members,
            total_projects: dto.total_projects,
            user_role: dto.user_role,
        }
    }
}

page_response!(WorkspaceListResponse, WorkspaceResponse);

#[derive(Debug, Serialize, ToSchema)]
pub struct WorkspaceMemberResponse {
    pub user_id: String,
    #[schema(example = "member")]
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

impl From<WorkspaceMemberDTO> for WorkspaceMemberResponse {
    fn from(dto: WorkspaceMemberDTO) -> Self {
        Self {
            user_id: dto.user_id,
            role: dto.role,
            joined_at: dto.joined_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use validator::Validate;

    use crate::adapter::http::schema::workspace::CreateWorkspaceRequest;

    #[test]
    fn test_create_defaults() {
        let request: CreateWorkspaceRequest = serde_json::from_value(json!({"name": "Studio"})).unwrap();

        assert!(!request.is_public);
        assert!(request.allow_member_invite);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let request: CreateWorkspaceRequest = serde_json::from_value(json!({"name": ""})).unwrap();
        assert!(request.validate().is_err());
    }
}
