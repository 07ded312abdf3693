use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::id::Id;
use crate::domain::entities::project::{Project, ProjectMember};
use crate::domain::entities::workspace::Workspace;

#[async_trait]
pub trait ProjectWriter: Send + Sync {
    async fn insert(&self, project: Project) -> AppResult<Id<Project>>;
    async fn update(&self, project: Project) -> AppResult<()>;
    async fn delete(&self, project_id: &Id<Project>) -> AppResult<()>;
    async fn upsert_member(&self, project_id: &Id<Project>, member: ProjectMember) -> AppResult<()>;
}

#[async_trait]
pub trait ProjectReader: Send + Sync {
    async fn find_by_id(&self, project_id: &Id<Project>) -> AppResult<Option<Project>>;
    async fn get_all(&self, workspace_id: &Id<Workspace>, limit: i64, offset: i64) -> AppResult<Vec<Project>>;
    async fn count_projects(&self, workspace_id: &Id<Workspace>) -> AppResult<i64>;
}
