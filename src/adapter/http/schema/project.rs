use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::pagination::page_response;
use crate::application::dto::project::{ProjectDTO, ProjectMemberDTO};
use crate::infra::constants::MAX_AMOUNT;

fn default_priority() -> String {
    "medium".to_string()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Landing page",
    "description": "Marketing site rebuild",
    "priority": "high",
    "budget": 250000,
    "due_date": "2026-12-01T00:00:00Z"
}))]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 200, message = "Project name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub budget: i64,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[schema(example = "completed")]
    pub status: Option<String>,
    pub priority: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub progress: Option<i32>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub budget: Option<i64>,
    #[validate(range(min = 0, max = MAX_AMOUNT))]
    pub earnings: Option<i64>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignProjectMemberRequest {
    pub user_id: String,
    #[schema(example = "contributor")]
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectMemberResponse {
    pub user_id: String,
    pub role: String,
    pub assigned_at: DateTime<Utc>,
}

impl From<ProjectMemberDTO> for ProjectMemberResponse {
    fn from(dto: ProjectMemberDTO) -> Self {
        Self {
            user_id: dto.user_id,
            role: dto.role,
            assigned_at: dto.assigned_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: String,
    pub workspace_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub progress: i32,
    pub budget: i64,
    pub earnings: i64,
    pub members: Vec<ProjectMemberResponse>,
    pub created_by: String,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectDTO> for ProjectResponse {
    fn from(dto: ProjectDTO) -> Self {
        Self {
            id: dto.id,
            workspace_id: dto.workspace_id,
            name: dto.name,
            description: dto.description,
            status: dto.status,
            priority: dto.priority,
            progress: dto.progress,
            budget: dto.budget,
            earnings: dto.earnings,
            members: dto.members.into_iter().map(ProjectMemberResponse::from).collect(),
            created_by: dto.created_by,
            due_date: dto.due_date,
            completed_at: dto.completed_at,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

page_response!(ProjectListResponse, ProjectResponse);

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;
    use validator::Validate;

    use crate::adapter::http::schema::project::{CreateProjectRequest, UpdateProjectRequest};

    #[rstest]
    fn test_priority_defaults_to_medium() {
        let request: CreateProjectRequest = serde_json::from_value(json!({"name": "Landing page"})).unwrap();
        assert_eq!(request.priority, "medium");
        assert_eq!(request.budget, 0);
    }

    #[rstest]
    #[case(json!({"progress": 101}), false)]
    #[case(json!({"progress": -1}), false)]
    #[case(json!({"progress": 100}), true)]
    #[case(json!({"budget": -5}), false)]
    fn test_update_ranges(#[case] body: serde_json::Value, #[case] ok: bool) {
        let request: UpdateProjectRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.validate().is_ok(), ok);
    }
}
