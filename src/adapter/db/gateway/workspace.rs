use async_trait::async_trait;
use futures::FutureExt;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::AppResult;
use crate::application::interface::gateway::workspace::{
    WorkspaceInvitationReader, WorkspaceInvitationWriter, WorkspaceMemberReader, WorkspaceMemberWriter,
    WorkspaceReader, WorkspaceWriter,
};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::{
    InvitationStatus, Workspace, WorkspaceInvitation, WorkspaceMember, WorkspaceMemberRole, WorkspaceSettings,
    WorkspaceView,
};

#[derive(Clone)]
pub struct WorkspaceGateway {
    session: SqlxSession,
}

impl WorkspaceGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_workspace(row: &PgRow) -> AppResult<Workspace> {
        Ok(Workspace {
            id: Id::new(row.try_get("id")?),
            owner_user_id: Id::new(row.try_get("owner_user_id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            settings: WorkspaceSettings {
                is_public: row.try_get("is_public")?,
                allow_member_invite: row.try_get("allow_member_invite")?,
            },
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn get_workspace_view(row: &PgRow) -> AppResult<WorkspaceView> {
        let workspace = Self::get_workspace(row)?;

        Ok(WorkspaceView {
            workspace,
            user_role: row.try_get("user_role")?,
            total_members: row.try_get("total_members")?,
            total_projects: row.try_get("total_projects")?,
        })
    }
}

#[async_trait]
impl WorkspaceWriter for WorkspaceGateway {
    async fn insert(&self, workspace: Workspace) -> AppResult<Id<Workspace>> {
        self.session
            .with_tx(|tx| {
                let workspace = workspace.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            INSERT INTO workspaces
                                (id, owner_user_id, name, description, is_public, allow_member_invite, is_active,
                                 created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                            RETURNING
                                id
                        "#,
                    )
                    .bind(workspace.id.value)
                    .bind(workspace.owner_user_id.value)
                    .bind(&workspace.name)
                    .bind(&workspace.description)
                    .bind(workspace.settings.is_public)
                    .bind(workspace.settings.allow_member_invite)
                    .bind(workspace.is_active)
                    .bind(workspace.created_at)
                    .bind(workspace.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = result.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, workspace: Workspace) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let workspace = workspace.clone();
                async move {
                    sqlx::query(
                        r#"
                            UPDATE
                                workspaces
                            SET
                                name = $2,
                                description = $3,
                                is_public = $4,
                                allow_member_invite = $5,
                                updated_at = $6
                            WHERE
                                id = $1
                        "#,
                    )
                    .bind(workspace.id.value)
                    .bind(&workspace.name)
                    .bind(&workspace.description)
                    .bind(workspace.settings.is_public)
                    .bind(workspace.settings.allow_member_invite)
                    .bind(workspace.updated_at)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn deactivate(&self, workspace_id: &Id<Workspace>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                async move {
                    sqlx::query("UPDATE workspaces SET is_active = FALSE, updated_at = now() WHERE id = $1")
                        .bind(workspace_id)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl WorkspaceReader for WorkspaceGateway {
    async fn find_by_id(&self, workspace_id: &Id<Workspace>) -> AppResult<Option<Workspace>> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, owner_user_id, name, description, is_public, allow_member_invite, is_active,
                                created_at, updated_at
                            FROM
                                workspaces
                            WHERE
                                id = $1 AND is_active
                        "#,
                    )
                    .bind(workspace_id)
                    .fetch_optional(tx.as_mut())
                    .await?;
                    result.as_ref().map(Self::get_workspace).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn find_accessible_by_user(
        &self,
        user_id: &Id<User>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<WorkspaceView>> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT
                                w.id,
                                w.owner_user_id,
                                w.name,
                                w.description,
                                w.is_public,
                                w.allow_member_invite,
                                w.is_active,
                                w.created_at,
                                w.updated_at,
                                (
                                    SELECT COUNT(user_id)
                                    FROM (
                                        SELECT w.owner_user_id AS user_id
                                        UNION
                                        SELECT user_id FROM workspace_members WHERE workspace_id = w.id
                                    ) AS members
                                ) AS total_members,
                                (
                                    SELECT COUNT(id) FROM projects WHERE workspace_id = w.id
                                ) AS total_projects,
                                CASE
                                    WHEN w.owner_user_id = $1 THEN 'owner'
                                    ELSE wm.role::text
                                END AS user_role
                            FROM workspaces AS w
                            LEFT JOIN workspace_members AS wm ON w.id = wm.workspace_id AND wm.user_id = $1
                            WHERE
                                w.is_active
                                AND (w.owner_user_id = $1 OR wm.user_id IS NOT NULL)
                            ORDER BY
                                w.created_at DESC
                            LIMIT $2 OFFSET $3
                        "#,
                    )
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(tx.as_mut())
                    .await?;

                    rows.iter().map(Self::get_workspace_view).collect()
                }
                .boxed()
            })
            .await
    }

    async fn count_accessible_by_user(&self, user_id: &Id<User>) -> AppResult<i64> {
        self.session
            .with_tx(|tx| {
                let user_id = user_id.value;
                async move {
                    let row = sqlx::query(
                        r#"
                            SELECT COUNT(w.id) AS total
                            FROM
                                workspaces AS w
                            WHERE
                                w.is_active
                                AND (
                                    w.owner_user_id = $1
                                    OR EXISTS(
                                        SELECT 1
                                        FROM
                                            workspace_members AS wm
                                        WHERE wm.workspace_id = w.id
                                            AND wm.user_id = $1
                                    )
                                )
                        "#,
                    )
                    .bind(user_id)
                    .fetch_one(tx.as_mut())
                    .await?;

                    Ok(row.try_get("total")?)
                }
                .boxed()
            })
            .await
    }
}

#[derive(Clone)]
pub struct WorkspaceMemberGateway {
    session: SqlxSession,
}

impl WorkspaceMemberGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_member(row: &PgRow) -> AppResult<WorkspaceMember> {
        let role: String = row.try_get("role")?;
        Ok(WorkspaceMember {
            workspace_id: Id::new(row.try_get("workspace_id")?),
            user_id: Id::new(row.try_get("user_id")?),
            role: role.parse::<WorkspaceMemberRole>()?,
            joined_at: row.try_get("joined_at")?,
        })
    }
}

#[async_trait]
impl WorkspaceMemberWriter for WorkspaceMemberGateway {
    async fn insert(&self, member: WorkspaceMember) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let member = member.clone();
                async move {
                    sqlx::query(
                        r#"
                            INSERT INTO workspace_members
                                (workspace_id, user_id, role, joined_at)
                            VALUES
                                ($1, $2, $3::workspace_member_role, $4)
                            ON CONFLICT (workspace_id, user_id) DO NOTHING
                        "#,
                    )
                    .bind(member.workspace_id.value)
                    .bind(member.user_id.value)
                    .bind(member.role.as_str())
                    .bind(member.joined_at)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn update_role(
        &self,
        workspace_id: &Id<Workspace>,
        user_id: &Id<User>,
        role: WorkspaceMemberRole,
    ) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                let user_id = user_id.value;
                async move {
                    sqlx::query(
                        r#"
                            UPDATE workspace_members
                            SET role = $3::workspace_member_role
                            WHERE workspace_id = $1 AND user_id = $2
                        "#,
                    )
                    .bind(workspace_id)
                    .bind(user_id)
                    .bind(role.as_str())
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn delete(&self, workspace_id: &Id<Workspace>, user_id: &Id<User>) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                let user_id = user_id.value;
                async move {
                    sqlx::query("DELETE FROM workspace_members WHERE workspace_id = $1 AND user_id = $2")
                        .bind(workspace_id)
                        .bind(user_id)
                        .execute(tx.as_mut())
                        .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl WorkspaceMemberReader for WorkspaceMemberGateway {
    async fn list(&self, workspace_id: &Id<Workspace>) -> AppResult<Vec<WorkspaceMember>> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                async move {
                    let rows = sqlx::query(
                        r#"
                            SELECT
                                workspace_id, user_id, role::text AS role, joined_at
                            FROM
                                workspace_members
                            WHERE
                                workspace_id = $1
                            ORDER BY
                                joined_at
                        "#,
                    )
                    .bind(workspace_id)
                    .fetch_all(tx.as_mut())
                    .await?;
                    rows.iter().map(Self::get_member).collect()
                }
                .boxed()
            })
            .await
    }

    async fn is_member_email(&self, workspace_id: &Id<Workspace>, email: &str) -> AppResult<bool> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                let email = email.to_lowercase();
                async move {
                    let row = sqlx::query(
                        r#"
                            SELECT EXISTS(
                                SELECT 1
                                FROM
                                    users AS u
                                    JOIN workspaces AS w ON w.id = $1
                                    LEFT JOIN workspace_members AS wm ON wm.workspace_id = w.id AND wm.user_id = u.id
                                WHERE
                                    lower(u.email) = $2
                                    AND (w.owner_user_id = u.id OR wm.user_id IS NOT NULL)
                            ) AS is_member
                        "#,
                    )
                    .bind(workspace_id)
                    .bind(&email)
                    .fetch_one(tx.as_mut())
                    .await?;
                    Ok(row.try_get("is_member")?)
                }
                .boxed()
            })
            .await
    }
}

const INVITATION_COLUMNS: &str = r#"
    id, workspace_id, email, role::text AS role, token, message, invited_by, status::text AS status,
    expires_at, created_at, updated_at
"#;

#[derive(Clone)]
pub struct WorkspaceInvitationGateway {
    session: SqlxSession,
}

impl WorkspaceInvitationGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn get_invitation(row: &PgRow) -> AppResult<WorkspaceInvitation> {
        let role: String = row.try_get("role")?;
        let status: String = row.try_get("status")?;
        Ok(WorkspaceInvitation {
            id: Id::new(row.try_get("id")?),
            workspace_id: Id::new(row.try_get("workspace_id")?),
            email: row.try_get("email")?,
            role: role.parse::<WorkspaceMemberRole>()?,
            token: row.try_get("token")?,
            message: row.try_get("message")?,
            invited_by: Id::new(row.try_get("invited_by")?),
            status: status.parse::<InvitationStatus>()?,
            expires_at: row.try_get("expires_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl WorkspaceInvitationWriter for WorkspaceInvitationGateway {
    async fn insert(&self, invitation: WorkspaceInvitation) -> AppResult<Id<WorkspaceInvitation>> {
        self.session
            .with_tx(|tx| {
                let invitation = invitation.clone();
                async move {
                    let result = sqlx::query(
                        r#"
                            INSERT INTO workspace_invitations
                                (id, workspace_id, email, role, token, message, invited_by, status, expires_at,
                                 created_at, updated_at)
                            VALUES
                                ($1, $2, $3, $4::workspace_member_role, $5, $6, $7, $8::invitation_status, $9, $10, $11)
                            RETURNING
                                id
                        "#,
                    )
                    .bind(invitation.id.value)
                    .bind(invitation.workspace_id.value)
                    .bind(&invitation.email)
                    .bind(invitation.role.as_str())
                    .bind(&invitation.token)
                    .bind(&invitation.message)
                    .bind(invitation.invited_by.value)
                    .bind(invitation.status.as_str())
                    .bind(invitation.expires_at)
                    .bind(invitation.created_at)
                    .bind(invitation.updated_at)
                    .fetch_one(tx.as_mut())
                    .await?;
                    let id: Uuid = result.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn refresh(&self, invitation: WorkspaceInvitation) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let invitation = invitation.clone();
                async move {
                    sqlx::query(
                        r#"
                            UPDATE
                                workspace_invitations
                            SET
                                role = $2::workspace_member_role,
                                message = $3,
                                invited_by = $4,
                                expires_at = $5,
                                updated_at = $6
                            WHERE
                                id = $1
                        "#,
                    )
                    .bind(invitation.id.value)
                    .bind(invitation.role.as_str())
                    .bind(&invitation.message)
                    .bind(invitation.invited_by.value)
                    .bind(invitation.expires_at)
                    .bind(invitation.updated_at)
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }

    async fn set_status(
        &self,
        invitation_id: &Id<WorkspaceInvitation>,
        status: InvitationStatus,
    ) -> AppResult<()> {
        self.session
            .with_tx(|tx| {
                let invitation_id = invitation_id.value;
                async move {
                    sqlx::query(
                        r#"
                            UPDATE workspace_invitations
                            SET status = $2::invitation_status, updated_at = now()
                            WHERE id = $1
                        "#,
                    )
                    .bind(invitation_id)
                    .bind(status.as_str())
                    .execute(tx.as_mut())
                    .await?;
                    Ok(())
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl WorkspaceInvitationReader for WorkspaceInvitationGateway {
    async fn find_by_token(&self, token: &str) -> AppResult<Option<WorkspaceInvitation>> {
        self.session
            .with_tx(|tx| {
                let token = token.to_owned();
                async move {
                    let query = format!("SELECT {} FROM workspace_invitations WHERE token = $1", INVITATION_COLUMNS);
                    let result = sqlx::query(&query)
                        .bind(&token)
                        .fetch_optional(tx.as_mut())
                        .await?;
                    result.as_ref().map(Self::get_invitation).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn find_pending(
        &self,
        workspace_id: &Id<Workspace>,
        email: &str,
    ) -> AppResult<Option<WorkspaceInvitation>> {
        self.session
            .with_tx(|tx| {
                let workspace_id = workspace_id.value;
                let email = email.to_lowercase();
                async move {
                    let query = format!(
                        "SELECT {} FROM workspace_invitations WHERE workspace_id = $1 AND email = $2 AND status = 'pending'",
                        INVITATION_COLUMNS
                    );
                    let result = sqlx::query(&query)
                        .bind(workspace_id)
                        .bind(&email)
                        .fetch_optional(tx.as_mut())
                        .await?;
                    result.as_ref().map(Self::get_invitation).transpose()
                }
                .boxed()
            })
            .await
    }

    async fn list_pending_for_email(&self, email: &str) -> AppResult<Vec<WorkspaceInvitation>> {
        self.session
            .with_tx(|tx| {
                let email = email.to_lowercase();
                async move {
                    let query = format!(
                        "SELECT {} FROM workspace_invitations WHERE email = $1 AND status = 'pending' ORDER BY created_at DESC",
                        INVITATION_COLUMNS
                    );
                    let rows = sqlx::query(&query).bind(&email).fetch_all(tx.as_mut()).await?;
                    rows.iter().map(Self::get_invitation).collect()
                }
                .boxed()
            })
            .await
    }
}
