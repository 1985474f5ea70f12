//! Role-filtered sidebar sections and dashboard quick actions.

use serde::Serialize;

use crate::roles;

/// Who may see a navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Audience {
    Staff,
    Assigners,
    Management,
    UserAdders,
    UserManagers,
}

impl Audience {
    fn admits(self, role: &str) -> bool {
        match self {
            Self::Staff => roles::is_staff(role),
            Self::Assigners => roles::can_assign(role),
            Self::Management => roles::is_management(role),
            Self::UserAdders => roles::can_add_users(role),
            Self::UserManagers => roles::can_manage_users(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub name: &'static str,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub role: String,
    pub role_label: String,
    pub sections: Vec<NavSection>,
    pub quick_actions: Vec<NavItem>,
}

const SIDEBAR: &[(&str, &[(&str, &str, Audience)])] = &[
    ("Home", &[("HelpDesk", "/", Audience::Staff)]),
    (
        "Ticket",
        &[
            ("Add", "/ticket/add", Audience::Staff),
            ("View", "/ticket/view", Audience::Staff),
            ("Assign", "/ticket/assign", Audience::Assigners),
            ("Reassign", "/ticket/reassign", Audience::Assigners),
            ("Analysis", "/ticket/analysis", Audience::Management),
            ("Change Status", "/ticket/change-status", Audience::Staff),
        ],
    ),
    (
        "User",
        &[
            ("Add User", "/users/add", Audience::UserAdders),
            ("View", "/users/view", Audience::UserManagers),
        ],
    ),
];

const QUICK_ACTIONS: &[(&str, &str, Audience)] = &[
    ("Add Ticket", "/ticket/add", Audience::Staff),
    ("View Tickets", "/ticket/view", Audience::Staff),
    ("Assign Ticket", "/ticket/assign", Audience::Assigners),
    ("Re-assign Ticket", "/ticket/reassign", Audience::Assigners),
    ("Analytics Dashboard", "/ticket/analysis", Audience::Management),
    ("Change Ticket Status", "/ticket/change-status", Audience::Staff),
    ("Add User", "/users/add", Audience::UserAdders),
    ("View Users", "/users/view", Audience::UserManagers),
];

fn visible(entries: &[(&'static str, &'static str, Audience)], role: &str) -> Vec<NavItem> {
    entries
        .iter()
        .filter(|(_, _, audience)| audience.admits(role))
        .map(|&(name, path, _)| NavItem { name, path })
        .collect()
}

/// Navigation for `role`. Sections left with no visible item are dropped,
/// so a non-staff role gets an empty menu.
pub fn navigation_for(role: &str) -> Navigation {
    let sections = SIDEBAR
        .iter()
        .filter_map(|&(name, entries)| {
            let items = visible(entries, role);
            (!items.is_empty()).then_some(NavSection { name, items })
        })
        .collect();

    Navigation {
        role: role.to_string(),
        role_label: roles::display_name(role).to_string(),
        sections,
        quick_actions: visible(QUICK_ACTIONS, role),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_action(nav: &Navigation, name: &str) -> bool {
        nav.quick_actions.iter().any(|a| a.name == name)
    }

    fn has_item(nav: &Navigation, name: &str) -> bool {
        nav.sections.iter().flat_map(|s| &s.items).any(|i| i.name == name)
    }

    #[test]
    fn only_gm_can_add_users() {
        assert!(has_item(&navigation_for(roles::ROLE_GM), "Add User"));
        assert!(!has_item(&navigation_for(roles::ROLE_MANAGER), "Add User"));
        assert!(!has_action(&navigation_for(roles::ROLE_SUPERADMIN), "Add User"));
    }

    #[test]
    fn admin_sees_no_assignment_or_analysis() {
        let nav = navigation_for(roles::ROLE_ADMIN);
        assert!(!has_action(&nav, "Assign Ticket"));
        assert!(!has_action(&nav, "Re-assign Ticket"));
        assert!(!has_action(&nav, "Analytics Dashboard"));
        assert!(has_action(&nav, "View Tickets"));
        assert!(nav.sections.iter().all(|s| s.name != "User"));
    }

    #[test]
    fn superadmin_can_assign_but_not_analyse() {
        let nav = navigation_for(roles::ROLE_SUPERADMIN);
        assert!(has_item(&nav, "Assign"));
        assert!(has_item(&nav, "Reassign"));
        assert!(!has_item(&nav, "Analysis"));
    }

    #[test]
    fn plain_user_gets_empty_menu() {
        let nav = navigation_for(roles::ROLE_USER);
        assert!(nav.sections.is_empty());
        assert!(nav.quick_actions.is_empty());
    }

    #[test]
    fn gm_label_is_spelled_out() {
        assert_eq!(navigation_for(roles::ROLE_GM).role_label, "General Manager");
    }
}
