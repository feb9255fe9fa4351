//! Access control for the admin area.
//!
//! Every decision here is a pure function of the request path and the
//! session resolved for that request; nothing is cached between requests.

mod guard;
mod navigation;
mod permissions;

pub use guard::{
    ADMIN_PREFIX, AccessDecision, DASHBOARD_PATH, LOGIN_PATH, POSTS_PATH, SITE_ROOT, SessionIdentity,
    SessionState, USERS_PATH, evaluate, is_under,
};
pub use navigation::{NavItem, navigation_for};
pub use permissions::{RoleChange, RoleChangeError, check_role_change, post_create_access, post_edit_access};
