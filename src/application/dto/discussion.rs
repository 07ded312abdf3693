use chrono::{DateTime, Utc};

use crate::application::dto::pagination::PageRequestDTO;
use crate::domain::entities::discussion::{Discussion, DiscussionMessage};

#[derive(Debug, Clone)]
pub struct CreateDiscussionDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub title: String,
    pub first_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GetDiscussionDTO {
    pub user_id: String,
    pub discussion_id: String,
}

#[derive(Debug, Clone)]
pub struct GetDiscussionListDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub page: PageRequestDTO,
}

#[derive(Debug, Clone)]
pub struct PostMessageDTO {
    pub user_id: String,
    pub discussion_id: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct UpdateDiscussionDTO {
    pub user_id: String,
    pub discussion_id: String,
    pub is_pinned: Option<bool>,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MessageDTO {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl From<DiscussionMessage> for MessageDTO {
    fn from(message: DiscussionMessage) -> Self {
        Self {
            id: message.id.value.to_string(),
            author_id: message.author_id.value.to_string(),
            body: message.body,
            position: message.position,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParticipantDTO {
    pub user_id: String,
    pub last_seen_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DiscussionDTO {
    pub id: String,
    pub workspace_id: String,
    pub title: String,
    pub created_by: String,
    pub status: String,
    pub is_pinned: bool,
    pub message_count: i32,
    pub last_activity_at: DateTime<Utc>,
    pub messages: Vec<MessageDTO>,
    pub participants: Vec<ParticipantDTO>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Discussion> for DiscussionDTO {
    fn from(discussion: Discussion) -> Self {
        Self {
            id: discussion.id.value.to_string(),
            workspace_id: discussion.workspace_id.value.to_string(),
            title: discussion.title,
            created_by: discussion.created_by.value.to_string(),
            status: discussion.status.as_str().to_string(),
            is_pinned: discussion.is_pinned,
            message_count: discussion.message_count,
            last_activity_at: discussion.last_activity_at,
            messages: discussion.messages.into_iter().map(MessageDTO::from).collect(),
            participants: discussion
                .participants
                .into_iter()
                .map(|p| ParticipantDTO {
                    user_id: p.user_id.value.to_string(),
                    last_seen_at: p.last_seen_at,
                })
                .collect(),
            created_at: discussion.created_at,
            updated_at: discussion.updated_at,
        }
    }
}
