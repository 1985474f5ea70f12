//! Staff user records as served by the backend.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Build the `id -> name` lookup used when mapping tickets to the view shape.
pub fn name_index(users: &[User]) -> HashMap<DbId, String> {
    users.iter().map(|u| (u.id, u.name.clone())).collect()
}

pub fn find_by_id(users: &[User], id: DbId) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: DbId, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: "Admin".to_string(),
            department: None,
            phone: None,
        }
    }

    #[test]
    fn name_index_maps_ids_to_names() {
        let users = vec![user(1, "Ada"), user(2, "Bola")];
        let index = name_index(&users);
        assert_eq!(index.get(&2).map(String::as_str), Some("Bola"));
        assert!(index.get(&3).is_none());
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let parsed: User =
            serde_json::from_str(r#"{"id":4,"name":"Chi","email":"c@x.io","role":"GM"}"#).unwrap();
        assert_eq!(parsed.department, None);
        assert_eq!(parsed.phone, None);
    }

    #[test]
    fn find_by_id_matches_exactly() {
        let users = vec![user(1, "Ada")];
        assert!(find_by_id(&users, 1).is_some());
        assert!(find_by_id(&users, 2).is_none());
    }
}
