use chrono::{DateTime, Utc};

use crate::application::dto::pagination::PageRequestDTO;
use crate::domain::entities::project::{Project, ProjectMember};

#[derive(Debug, Clone)]
pub struct CreateProjectDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub priority: String,
    pub budget: i64,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct UpdateProjectDTO {
    pub user_id: String,
    pub project_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub progress: Option<i32>,
    pub budget: Option<i64>,
    pub earnings: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct GetProjectDTO {
    pub user_id: String,
    pub project_id: String,
}

#[derive(Debug, Clone)]
pub struct GetProjectListDTO {
    pub user_id: String,
    pub workspace_id: String,
    pub page: PageRequestDTO,
}

#[derive(Debug, Clone)]
pub struct AssignProjectMemberDTO {
    pub user_id: String,
    pub project_id: String,
    pub member_user_id: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct ProjectMemberDTO {
    pub user_id: String,
    pub role: String,
    pub assigned_at: DateTime<Utc>,
}

impl From<ProjectMember> for ProjectMemberDTO {
    fn from(member: ProjectMember) -> Self {
        Self {
            user_id: member.user_id.value.to_string(),
            role: member.role.as_str().to_string(),
            assigned_at: member.assigned_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProjectDTO {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub progress: i32,
    pub budget: i64,
    pub earnings: i64,
    pub members: Vec<ProjectMemberDTO>,
    pub created_by: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectDTO {
    fn from(project: Project) -> Self {
        Self {
            id: project.id.value.to_string(),
            workspace_id: project.workspace_id.value.to_string(),
            name: project.name,
            description: project.description,
            status: project.status.as_str().to_string(),
            priority: project.priority.as_str().to_string(),
            progress: project.progress,
            budget: project.budget,
            earnings: project.earnings,
            members: project.members.into_iter().map(ProjectMemberDTO::from).collect(),
            created_by: project.created_by.value.to_string(),
            due_date: project.due_date,
            completed_at: project.completed_at,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}
