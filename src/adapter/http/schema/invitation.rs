use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_email::Email;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::dto::invitation::InvitationDTO;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct InviteMemberRequest {
    #[schema(value_type = String, example = "teammate@example.com")]
    pub email: Email,
    #[schema(example = "member")]
    pub role: String,
    #[validate(length(max = 500))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvitationResponse {
    pub id: String,
    pub workspace_id: String,
    pub email: String,
    pub role: String,
    pub message: Option<String>,
    #[schema(example = "pending")]
    pub status: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvitationDTO> for InvitationResponse {
    fn from(dto: InvitationDTO) -> Self {
        Self {
            id: dto.id,
            workspace_id: dto.workspace_id,
            email: dto.email,
            role: dto.role,
            message: dto.message,
            status: dto.status,
            token: dto.token,
            expires_at: dto.expires_at,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}
