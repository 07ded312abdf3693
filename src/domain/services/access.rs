use crate::application::app_error::{AppError, AppResult};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;
use crate::domain::entities::workspace::{Workspace, WorkspaceMember, WorkspaceMemberRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceAction {
    Read,
    UpdateWorkspace,
    DeleteWorkspace,
    InviteMember,
    ManageMembers,
    CreateContent,
    UpdateContent,
    DeleteContent,
}

impl WorkspaceAction {
    pub const ALL: [WorkspaceAction; 8] = [
        WorkspaceAction::Read,
        WorkspaceAction::UpdateWorkspace,
        WorkspaceAction::DeleteWorkspace,
        WorkspaceAction::InviteMember,
        WorkspaceAction::ManageMembers,
        WorkspaceAction::CreateContent,
        WorkspaceAction::UpdateContent,
        WorkspaceAction::DeleteContent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceAction::Read => "read",
            WorkspaceAction::UpdateWorkspace => "update the workspace",
            WorkspaceAction::DeleteWorkspace => "delete the workspace",
            WorkspaceAction::InviteMember => "invite members",
            WorkspaceAction::ManageMembers => "manage members",
            WorkspaceAction::CreateContent => "create content",
            WorkspaceAction::UpdateContent => "update content",
            WorkspaceAction::DeleteContent => "delete content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

impl EffectiveRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveRole::Owner => "owner",
            EffectiveRole::Admin => "admin",
            EffectiveRole::Member => "member",
            EffectiveRole::Viewer => "viewer",
        }
    }
}

impl From<WorkspaceMemberRole> for EffectiveRole {
    fn from(role: WorkspaceMemberRole) -> Self {
        match role {
            WorkspaceMemberRole::Admin => EffectiveRole::Admin,
            WorkspaceMemberRole::Member => EffectiveRole::Member,
            WorkspaceMemberRole::Viewer => EffectiveRole::Viewer,
        }
    }
}

/// The only place that decides who a user is inside a workspace.
///
/// The owner is always `Owner`, whatever the member list says about them.
pub fn effective_role(workspace: &Workspace, members: &[WorkspaceMember], user_id: &Id<User>) -> Option<EffectiveRole> {
    if workspace.is_owner(user_id) {
        return Some(EffectiveRole::Owner);
    }
    members
        .iter()
        .find(|m| &m.user_id == user_id && m.workspace_id == workspace.id)
        .map(|m| m.role.into())
}

pub fn can_access(
    workspace: &Workspace,
    members: &[WorkspaceMember],
    user_id: &Id<User>,
    action: WorkspaceAction,
) -> bool {
    match effective_role(workspace, members, user_id) {
        Some(EffectiveRole::Owner) => true,
        Some(EffectiveRole::Admin) => match action {
            WorkspaceAction::DeleteWorkspace => false,
            WorkspaceAction::InviteMember => workspace.settings.allow_member_invite,
            _ => true,
        },
        Some(EffectiveRole::Member) => matches!(
            action,
            WorkspaceAction::Read | WorkspaceAction::CreateContent | WorkspaceAction::UpdateContent
        ),
        Some(EffectiveRole::Viewer) => action == WorkspaceAction::Read,
        None => action == WorkspaceAction::Read && workspace.settings.is_public,
    }
}

pub fn authorize(
    workspace: &Workspace,
    members: &[WorkspaceMember],
    user_id: &Id<User>,
    action: WorkspaceAction,
) -> AppResult<()> {
    if can_access(workspace, members, user_id, action) {
        return Ok(());
    }
    Err(AppError::Forbidden(format!(
        "Not allowed to {} in this workspace",
        action.as_str()
    )))
}

/// Checks a role change or removal of `target` and returns the target's membership.
///
/// The owner can never be targeted, not even by themselves.
pub fn authorize_member_change<'a>(
    workspace: &Workspace,
    members: &'a [WorkspaceMember],
    actor_id: &Id<User>,
    target_id: &Id<User>,
) -> AppResult<&'a WorkspaceMember> {
    authorize(workspace, members, actor_id, WorkspaceAction::ManageMembers)?;

    if workspace.is_owner(target_id) {
        return Err(AppError::Forbidden(
            "The workspace owner cannot be removed or have their role changed".to_string(),
        ));
    }

    members
        .iter()
        .find(|m| &m.user_id == target_id)
        .ok_or(AppError::MemberNotFound)
}
