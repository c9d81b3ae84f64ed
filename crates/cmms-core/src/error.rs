//! Shared validation error collection
//!
//! Form-level validation needs to report several messages at once (a field
//! error plus a blocking notice, for example), so this is a collection rather
//! than a single error value.

use std::collections::HashMap;
use thiserror::Error;

/// Validation errors collection
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
#[error("Validation errors: {errors:?}")]
pub struct ValidationErrors {
    /// Field-specific errors: field_name -> Vec<error_messages>
    pub errors: HashMap<String, Vec<String>>,
    /// Base errors not tied to a specific field
    pub base_errors: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let errors = ValidationErrors::new();
        assert!(errors.is_empty());
        assert!(errors.full_messages().is_empty());
    }

    #[test]
    fn test_add_and_query() {
        let mut errors = ValidationErrors::new();
        errors.add("attachments", "contains a duplicate file name");
        errors.add_base("The form cannot be submitted");

        assert!(!errors.is_empty());
        assert!(errors.has_error("attachments"));
        assert!(!errors.has_error("title"));
        assert_eq!(
            errors.get("attachments"),
            Some(&vec!["contains a duplicate file name".to_string()])
        );
        assert_eq!(errors.full_messages().len(), 2);
    }
}
