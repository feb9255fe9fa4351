use serde::Serialize;

use crate::domain::Role;

use super::is_under;

/// Sidebar entry of the admin area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub active: bool,
}

const NAVIGATION: &[(&str, &str, fn(Role) -> bool)] = &[
    ("Dashboard", "/admin/dashboard", |_| true),
    ("Posts", "/admin/posts", Role::can_author_posts),
    ("Categories", "/admin/categories", Role::can_manage_categories),
    ("Users", "/admin/users", Role::can_manage_users),
    ("Settings", "/admin/settings", Role::can_manage_users),
];

/// Sidebar entries visible to `role`, with the entry for `path` marked active.
pub fn navigation_for(role: Role, path: &str) -> Vec<NavItem> {
    NAVIGATION
        .iter()
        .filter(|(_, _, visible)| visible(role))
        .map(|&(name, href, _)| NavItem {
            name,
            href,
            active: is_under(path, href),
        })
        .collect()
}
