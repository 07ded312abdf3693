use async_trait::async_trait;
use futures::FutureExt;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::project::{ProjectReader, ProjectWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::project::{Project, ProjectMember, ProjectMemberRole, ProjectPriority, ProjectStatus};
use crate::domain::entities::workspace::Workspace;

const PROJECT_COLUMNS: &str = r#"
    id, workspace_id, name, description, status::text AS status, priority::text AS priority, progress, budget,
    earnings, created_by, due_date, completed_at, created_at, updated_at
"#;

#[derive(Clone)]
pub struct ProjectGateway {
    session: SqlxSession,
}

impl ProjectGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_project(row: &PgRow) -> AppResult<Project> {
        let status: String = row.try_get("status")?;
        let priority: String = row.try_get("priority")?;
        Ok(Project {
            id: Id::new(row.try_get("id")?),
            workspace_id: Id::new(row.try_get("workspace_id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            status: status.parse::<ProjectStatus>()?,
            priority: priority.parse::<ProjectPriority>()?,
            progress: row.try_get("progress")?,
            budget: row.try_get("budget")?,
            earnings: row.try_get("earnings")?,
            members: Vec::new(),
            created_by: Id::new(row.try_get("created_by")?),
            due_date: row.try_get("due_date")?,
            completed_at: row.try_get("completed_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    async fn load_members(tx: &mut Transaction<'static, Postgres>, project: &mut Project) -> AppResult<()> {
        let rows = sqlx::query(
            r#"
                SELECT user_id, role::text AS role, assigned_at
                FROM project_members
                WHERE project_id = $1
                ORDER BY assigned_at
            "#,
        )
        .bind(project.id.value)
        .fetch_all(tx.as_mut())
        .await?;

        project.members = rows
            .iter()
            .map(|row| {
                let role: String = row.try_get("role")?;
                Ok(ProjectMember {
                    user_id: Id::new(row.try_get("user_id")?),
                    role: role.parse::<ProjectMemberRole>()?,
                    assigned_at: row.try_get("assigned_at")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;
        Ok(())
    }

    async fn save_member(
        tx: &mut Transaction<'static, Postgres>,
        project_id: Uuid,
        member: &ProjectMember,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
                INSERT INTO project_members (project_id, user_id, role, assigned_at)
                VALUES ($1, $2, $3::project_member_role, $4)
                ON CONFLICT (project_id, user_id) DO UPDATE SET role = EXCLUDED.role
            "#,
        )
        .bind(project_id)
        .bind(member.user_id.value)
        .bind(member.role.as_str())
        .bind(member.assigned_at)
        .execute(tx.as_mut())
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ProjectWriter for ProjectGateway {
    async fn insert(&self, project: Project) -> AppResult<Id<Project>> {
        self.session
            .with_tx(|tx| {
                let project = project.clone();
                async move {
                    let row = sqlx::query(
                        r#"
                            INSERT INTO projects
                                (
                                    id,
                                    workspace_id,
                                    name,
                                    description,
                                    status,
                                    priority,
                                    progress,
                                    budget,
                                    earnings,
                                    created_by,
                                    due_date,
                                    completed_at,
                                    created_at,
                                    updated_at
                                )
                            VALUES
                                ($1, $2, $3, $4, $5::project_status, $6::project_priority, $7, $8, $9, $10, $11, $12,
                                 $13, $14)
                            RETURNING id
                        "#,
                    )
                    .bind(project.id.value)
                    .bind(project.workspace_id.value)
                    .bind(&project.name)
                    .bind(&project.description)
                    .bind(project.status.as_str())
                    .bind(project.priority.as_str())
                    .bind(project.progress)
                    .bind(project.budget)
                    .bind(project.earnings)
                    .bind(project.created_by.value)
                    .bind(project.due_date)
                    .bind(project.completed_at)
                    .bind(project.created_at)
                    .bind(project.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;

                    for member in &project.members {
                        Self::save_member(tx, project.id.value, member).await?;
                    }

                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, project: Project) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let project = project.clone();
                async move {
                    sqlx::query(
                        r#"
                            UPDATE
                                projects
                            SET
                                name = $2,
                                description = $3,
                                status = $4::project_status,
                                priority = $5::project_priority,
                                progress = $6,
                                budget = $7,
                                earnings = $8,
                                due_date = $9,
                                completed_at = $10,
                                updated_at = $11
                            WHERE
                                id = $1
                        "#,
                    )
                    .bind(project.id.value)
                    .bind(&project.name)
                    .bind(&project.description)
                    .bind(project.status.as_str())
                    .bind(project.priority.as_str())
                    .bind(project.progress)
                    .bind(project.budget)
                    .bind(project.earnings)
                    .bind(project.due_date)
                    .bind(project.completed_at)
                    .bind(project.updated_at)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn delete(&self, project_id: &Id<Project>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let project_id = project_id.value;
                async move {
                    sqlx::query("DELETE FROM projects WHERE id = $1")
                        .bind(project_id)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn upsert_member(&self, project_id: &Id<Project>, member: ProjectMember) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let project_id = project_id.value;
                let member = member.clone();
                async move { Self::save_member(tx, project_id, &member).await }.boxed()
            })
            .await
    }
}

#[async_trait]
impl ProjectReader for ProjectGateway {
    async fn find_by_id(&self, project_id: &Id<Project>) -> AppResult<Option<Project>> {
        self.session
            .with_tx(|tx| {
                let project_id = project_id.value;
                async move {
                    let query = format!("SELECT {} FROM projects WHERE id = $1", PROJECT_COLUMNS);
                    let row = sqlx::query(&query)
                        .bind(project_id)
                        .fetch_optional(tx.as_mut())
                        .await?;
                    match row {
                        Some(row) => {
                            let mut project = Self::get_project(&row)?;
                            Self::load_members(tx, &mut project).await?;
                            Ok(Some(project))
                        }
                        None => Ok(None),
                    }
                }
                .boxed()
            })
            .await
    }

    async fn get_all(&self, workspace_id: &Id<Workspace>, limit: i64, offset: i64) -> AppResult<Vec<Project>> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                async move {
                    let query = format!(
                        "SELECT {} FROM projects WHERE workspace_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                        PROJECT_COLUMNS
                    );
                    let rows = sqlx::query(&query)
                        .bind(workspace_id)
                        .bind(limit)
                        .bind(offset)
                        .fetch_all(tx.as_mut())
                        .await?;

                    let mut projects = rows.iter().map(Self::get_project).collect::<AppResult<Vec<_>>>()?;
                    for project in projects.iter_mut() {
                        Self::load_members(tx, project).await?;
                    }
                    Ok(projects)
                }
                .boxed()
            })
            .await
    }

    async fn count_projects(&self, workspace_id: &Id<Workspace>) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                async move {
                    let row = sqlx::query("SELECT COUNT(id) AS total FROM projects WHERE workspace_id = $1")
                        .bind(workspace_id)
                        .fetch_one(tx.as_mut())
                        .await?;
                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }
}
