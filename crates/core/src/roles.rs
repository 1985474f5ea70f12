//! Well-known role names and the access rules built on them.
//!
//! Role strings are issued by the external auth service and compared
//! verbatim (case-sensitive), matching what the backend stores.

pub const ROLE_SUPERADMIN: &str = "Superadmin";
pub const ROLE_GM: &str = "GM";
pub const ROLE_MANAGER: &str = "Manager";
pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_USER: &str = "User";

/// Roles that may sign in to the staff portal.
pub const STAFF_ROLES: &[&str] = &[ROLE_SUPERADMIN, ROLE_GM, ROLE_MANAGER, ROLE_ADMIN];

/// All roles a user record may carry.
pub const VALID_ROLES: &[&str] = &[ROLE_SUPERADMIN, ROLE_GM, ROLE_MANAGER, ROLE_ADMIN, ROLE_USER];

pub fn is_staff(role: &str) -> bool {
    STAFF_ROLES.contains(&role)
}

/// GM and Manager: dashboards, analysis, user management.
pub fn is_management(role: &str) -> bool {
    role == ROLE_GM || role == ROLE_MANAGER
}

/// Management sees every ticket; everyone else only sees tickets assigned to them.
pub fn sees_all_tickets(role: &str) -> bool {
    is_management(role)
}

/// Roles allowed to assign or reassign tickets.
pub fn can_assign(role: &str) -> bool {
    role == ROLE_SUPERADMIN || is_management(role)
}

pub fn can_manage_users(role: &str) -> bool {
    is_management(role)
}

/// Only the General Manager may create new accounts.
pub fn can_add_users(role: &str) -> bool {
    role == ROLE_GM
}

/// Human-readable title shown on the dashboard header.
pub fn display_name(role: &str) -> &str {
    if role == ROLE_GM {
        "General Manager"
    } else {
        role
    }
}
