use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscussionStatus {
    Open,
    Closed,
}

impl DiscussionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscussionStatus::Open => "open",
            DiscussionStatus::Closed => "closed",
        }
    }
}

impl FromStr for DiscussionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "open" => Ok(DiscussionStatus::Open),
            "closed" => Ok(DiscussionStatus::Closed),
            other => Err(AppError::Validation(format!("Unknown discussion status `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiscussionMessage {
    pub id: Id<DiscussionMessage>,
    pub discussion_id: Id<Discussion>,
    pub author_id: Id<User>,
    pub body: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DiscussionParticipant {
    pub user_id: Id<User>,
    pub last_seen_at: DateTime<Utc>,
}

/// A workspace thread. `messages` is append-only and ordered by `position`;
/// `message_count` and `last_activity_at` are always derived from it.
#[derive(Debug, Clone)]
pub struct Discussion {
    pub id: Id<Discussion>,
    pub workspace_id: Id<Workspace>,
    pub title: String,
    pub created_by: Id<User>,
    pub status: DiscussionStatus,
    pub is_pinned: bool,
    pub messages: Vec<DiscussionMessage>,
    pub participants: Vec<DiscussionParticipant>,
    pub message_count: i32,
    pub last_activity_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    pub fn new(workspace_id: Id<Workspace>, created_by: Id<User>, title: String) -> Self {
        let now = Utc::now();
        let mut discussion = Self {
            id: Id::generate(),
            workspace_id,
            title,
            created_by: created_by.clone(),
            status: DiscussionStatus::Open,
            is_pinned: false,
            messages: Vec::new(),
            participants: Vec::new(),
            message_count: 0,
            last_activity_at: now,
            created_at: now,
            updated_at: now,
        };
        discussion.mark_seen(&created_by, now);
        discussion
    }

    pub fn post(&mut self, author_id: Id<User>, body: String) -> AppResult<DiscussionMessage> {
        if self.status == DiscussionStatus::Closed {
            return Err(AppError::InvalidTransition {
                entity: "discussion",
                from: self.status.as_str().to_string(),
                to: "message".to_string(),
            });
        }

        let now = Utc::now();
        let position = self.messages.last().map(|m| m.position + 1).unwrap_or(1);
        let message = DiscussionMessage {
            id: Id::generate(),
            discussion_id: self.id.clone(),
            author_id: author_id.clone(),
            body,
            position,
            created_at: now,
        };
        self.messages.push(message.clone());
        self.mark_seen(&author_id, now);
        self.recompute();
        Ok(message)
    }

    pub fn mark_seen(&mut self, user_id: &Id<User>, at: DateTime<Utc>) {
        match self.participants.iter_mut().find(|p| &p.user_id == user_id) {
            Some(participant) => participant.last_seen_at = at,
            None => self.participants.push(DiscussionParticipant {
                user_id: user_id.clone(),
                last_seen_at: at,
            }),
        }
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.is_pinned = pinned;
        self.recompute();
    }

    pub fn set_status(&mut self, status: DiscussionStatus) {
        self.status = status;
        self.recompute();
    }

    pub fn recompute(&mut self) {
        self.message_count = self.messages.len() as i32;
        self.last_activity_at = self
            .messages
            .last()
            .map(|m| m.created_at)
            .unwrap_or(self.created_at);
        self.updated_at = Utc::now();
    }
}
