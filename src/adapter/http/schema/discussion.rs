use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::pagination::page_response;
use crate::application::dto::discussion::{DiscussionDTO, MessageDTO, ParticipantDTO};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDiscussionRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub first_message: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostMessageRequest {
    #[validate(length(min = 1, max = 10000, message = "Message must be between 1 and 10000 characters"))]
    pub body: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDiscussionRequest {
    pub is_pinned: Option<bool>,
    #[schema(example = "resolved")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiscussionMessageResponse {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<MessageDTO> for DiscussionMessageResponse {
    fn from(dto: MessageDTO) -> Self {
        Self {
            id: dto.id,
            author_id: dto.author_id,
            body: dto.body,
            position: dto.position,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantResponse {
    pub user_id: String,
    pub last_seen_at: DateTime<Utc>,
}

impl From<ParticipantDTO> for ParticipantResponse {
    fn from(dto: ParticipantDTO) -> Self {
        Self {
            user_id: dto.user_id,
            last_seen_at: dto.last_seen_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DiscussionResponse {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub created_by: String,
    #[schema(example = "open")]
    pub status: String,
    pub is_pinned: bool,
    pub message_count: i32,
    pub last_activity_at: DateTime<Utc>,
    pub messages: Vec<DiscussionMessageResponse>,
    pub participants: Vec<ParticipantResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DiscussionDTO> for DiscussionResponse {
    fn from(dto: DiscussionDTO) -> Self {
        Self {
            id: dto.id,
            workspace_id: dto.workspace_id,
            title: dto.title,
            created_by: dto.created_by,
            status: dto.status,
            is_pinned: dto.is_pinned,
            message_count: dto.message_count,
            last_activity_at: dto.last_activity_at,
            messages: dto.messages.into_iter().map(DiscussionMessageResponse::from).collect(),
            participants: dto.participants.into_iter().map(ParticipantResponse::from).collect(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

page_response!(DiscussionListResponse, DiscussionResponse);
