//! Public ticket submission and its validation rules.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::form_options::{self, SUB_CATEGORY_OTHERS};

/// A ticket as submitted by a visitor from the public form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketSubmission {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub department: String,
    pub category: String,
    pub sub_category: String,
    #[serde(default)]
    pub other_sub_category: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 10000, message = "Details are required"))]
    pub details: String,
}

impl NewTicketSubmission {
    /// Field-level checks plus the cross-field form rules.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        if !form_options::DEPARTMENTS.contains(&self.department.as_str()) {
            return Err(CoreError::Validation(format!(
                "Unknown department '{}'",
                self.department
            )));
        }

        let subs = form_options::sub_categories(&self.category).ok_or_else(|| {
            CoreError::Validation(format!("Unknown category '{}'", self.category))
        })?;

        if !subs.contains(&self.sub_category.as_str()) {
            return Err(CoreError::Validation(format!(
                "'{}' is not a sub-category of '{}'",
                self.sub_category, self.category
            )));
        }

        if self.sub_category == SUB_CATEGORY_OTHERS
            && self
                .other_sub_category
                .as_deref()
                .map_or(true, |s| s.trim().is_empty())
        {
            return Err(CoreError::Validation(
                "Please describe the issue when choosing 'Others'".into(),
            ));
        }

        Ok(())
    }
}
