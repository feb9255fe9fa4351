//! Route guard for `/admin` paths.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::Role;

pub const ADMIN_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";
pub const POSTS_PATH: &str = "/admin/posts";
pub const USERS_PATH: &str = "/admin/users";
pub const SITE_ROOT: &str = "/";

/// Identity resolved from a valid session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub email: String,
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    RedirectToLogin,
    RedirectToRoot,
    RedirectToDashboard,
    RedirectToPosts,
}

impl AccessDecision {
    /// Location to redirect to, or `None` when the request may proceed.
    pub fn redirect_location(self) -> Option<&'static str> {
        match self {
            AccessDecision::Allow => None,
            AccessDecision::RedirectToLogin => Some(LOGIN_PATH),
            AccessDecision::RedirectToRoot => Some(SITE_ROOT),
            AccessDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
            AccessDecision::RedirectToPosts => Some(POSTS_PATH),
        }
    }

    pub fn is_allowed(self) -> bool {
        self == AccessDecision::Allow
    }
}

/// How far a request got through session resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    AuthenticatedNoProfile,
    AuthenticatedAllowedRole(Role),
    AuthenticatedAdmin,
}

impl SessionState {
    pub fn classify(identity: Option<&SessionIdentity>, role: Option<Role>) -> Self {
        match (identity, role) {
            (None, _) => SessionState::Unauthenticated,
            (Some(_), None) => SessionState::AuthenticatedNoProfile,
            (Some(_), Some(Role::Admin)) => SessionState::AuthenticatedAdmin,
            (Some(_), Some(role)) => SessionState::AuthenticatedAllowedRole(role),
        }
    }
}

/// Whether `path` is `prefix` itself or nested below it.
pub fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Decide whether a request may reach `path`.
///
/// `role` is `None` both when no profile exists and when the stored role is
/// not one of the known values.
pub fn evaluate(path: &str, identity: Option<&SessionIdentity>, role: Option<Role>) -> AccessDecision {
    if !is_under(path, ADMIN_PREFIX) {
        return AccessDecision::Allow;
    }

    if path == LOGIN_PATH {
        return match identity {
            Some(_) => AccessDecision::RedirectToDashboard,
            None => AccessDecision::Allow,
        };
    }

    match SessionState::classify(identity, role) {
        SessionState::Unauthenticated => AccessDecision::RedirectToLogin,
        SessionState::AuthenticatedNoProfile => AccessDecision::RedirectToRoot,
        SessionState::AuthenticatedAdmin => AccessDecision::Allow,
        SessionState::AuthenticatedAllowedRole(_) if is_under(path, USERS_PATH) => {
            AccessDecision::RedirectToDashboard
        }
        SessionState::AuthenticatedAllowedRole(_) => AccessDecision::Allow,
    }
}
