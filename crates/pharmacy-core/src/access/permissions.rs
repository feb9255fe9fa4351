//! Per-record permissions checked by admin handlers after the route guard.

use uuid::Uuid;

use crate::domain::{Post, Role};

use super::AccessDecision;

/// Whether `role` may open the new-post editor.
pub fn post_create_access(role: Role) -> AccessDecision {
    if role.can_author_posts() {
        AccessDecision::Allow
    } else {
        AccessDecision::RedirectToDashboard
    }
}

/// Admins and editors may edit any post; everyone else only their own.
pub fn post_edit_access(user_id: Uuid, role: Role, post: &Post) -> AccessDecision {
    if role.can_edit_any_post() || post.author_id == Some(user_id) {
        AccessDecision::Allow
    } else {
        AccessDecision::RedirectToPosts
    }
}

/// Accepted role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Unchanged,
    Apply(Role),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleChangeError {
    #[error("Only admins can change roles")]
    NotAdmin,

    #[error("You cannot change your own role")]
    OwnRole,
}

/// Validate a role change requested by `actor` for `target`.
pub fn check_role_change(
    actor_id: Uuid,
    actor_role: Role,
    target_id: Uuid,
    current: Option<Role>,
    requested: Role,
) -> Result<RoleChange, RoleChangeError> {
    if !actor_role.can_manage_users() {
        return Err(RoleChangeError::NotAdmin);
    }
    if current == Some(requested) {
        return Ok(RoleChange::Unchanged);
    }
    if actor_id == target_id {
        return Err(RoleChangeError::OwnRole);
    }
    Ok(RoleChange::Apply(requested))
}
