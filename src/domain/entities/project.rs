use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::application::app_error::AppError;
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "planning" => Ok(ProjectStatus::Planning),
            "active" => Ok(ProjectStatus::Active),
            "on-hold" => Ok(ProjectStatus::OnHold),
            "completed" => Ok(ProjectStatus::Completed),
            "cancelled" => Ok(ProjectStatus::Cancelled),
            other => Err(AppError::Validation(format!("Unknown project status `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl ProjectPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectPriority::Low => "low",
            ProjectPriority::Medium => "medium",
            ProjectPriority::High => "high",
            ProjectPriority::Urgent => "urgent",
        }
    }
}

impl FromStr for ProjectPriority {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ProjectPriority::Low),
            "medium" => Ok(ProjectPriority::Medium),
            "high" => Ok(ProjectPriority::High),
            "urgent" => Ok(ProjectPriority::Urgent),
            other => Err(AppError::Validation(format!("Unknown project priority `{}`", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectMemberRole {
    Lead,
    Contributor,
    Reviewer,
}

impl ProjectMemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectMemberRole::Lead => "lead",
            ProjectMemberRole::Contributor => "contributor",
            ProjectMemberRole::Reviewer => "reviewer",
        }
    }
}

impl FromStr for ProjectMemberRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lead" => Ok(ProjectMemberRole::Lead),
            "contributor" => Ok(ProjectMemberRole::Contributor),
            "reviewer" => Ok(ProjectMemberRole::Reviewer),
            other => Err(AppError::Validation(format!("Unknown project member role `{}`", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectMember {
    pub user_id: Id<User>,
    pub role: ProjectMemberRole,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub id: Id<Project>,
    pub workspace_id: Id<Workspace>,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub progress: i32,
    pub budget: i64,
    pub earnings: i64,
    pub members: Vec<ProjectMember>,
    pub created_by: Id<User>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        workspace_id: Id<Workspace>,
        created_by: Id<User>,
        name: String,
        description: Option<String>,
        priority: ProjectPriority,
        budget: i64,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            workspace_id,
            name,
            description,
            status: ProjectStatus::Planning,
            priority,
            progress: 0,
            budget,
            earnings: 0,
            members: Vec::new(),
            created_by,
            due_date,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Progress is clamped to 0..=100; reaching 100 completes the project.
    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress.clamp(0, 100);
        if self.progress == 100 {
            self.set_status(ProjectStatus::Completed);
        }
        self.updated_at = Utc::now();
    }

    pub fn set_status(&mut self, status: ProjectStatus) {
        if status == ProjectStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
        if status != ProjectStatus::Completed {
            self.completed_at = None;
        }
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Inserts or re-roles an assignment.
    pub fn assign(&mut self, user_id: Id<User>, role: ProjectMemberRole) {
        match self.members.iter_mut().find(|m| m.user_id == user_id) {
            Some(member) => member.role = role,
            None => self.members.push(ProjectMember {
                user_id,
                role,
                assigned_at: Utc::now(),
            }),
        }
        self.updated_at = Utc::now();
    }
}
