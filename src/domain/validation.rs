//! Declarative validation schema for the entry form.
//!
//! A draft carries every field as raw text, since form inputs are text.
//! Validation either accepts the draft into an [`Employee`] or yields
//! field-level messages for inline display. Pure; no side effects.

use super::models::{Employee, Role};
use std::collections::HashMap;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

/// Raw form input prior to validation.
#[derive(Debug, Clone, Default, Validate)]
pub struct EmployeeDraft {
    #[validate(length(min = 3, message = "Name must be at least 3 characters."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    pub phone: String,
    #[validate(custom = "validate_role")]
    pub role: String,
    pub joining_date: String,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    if Role::from_str(role).is_ok() {
        Ok(())
    } else {
        let mut error = ValidationError::new("role");
        error.message = Some("Select a valid role.".into());
        Err(error)
    }
}

impl EmployeeDraft {
    /// Validates the draft and converts it into an employee record.
    ///
    /// The phone field is carried over exactly as entered, empty string
    /// included. The joining date is accepted as any text value; only the
    /// date-entry control constrains its shape.
    ///
    /// # Errors
    ///
    /// Returns per-field messages when any rule is violated.
    pub fn into_employee(self) -> Result<Employee, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;

        let role = match Role::from_str(&self.role) {
            Ok(role) => role,
            Err(_) => return Err(FieldErrors::single("role", "Select a valid role.")),
        };

        Ok(Employee {
            name: self.name,
            email: self.email,
            phone: Some(self.phone),
            role,
            joining_date: self.joining_date,
        })
    }
}

/// Field-level validation messages keyed by draft field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(HashMap<&'static str, String>);

impl FieldErrors {
    pub fn single(field: &'static str, message: &str) -> Self {
        let mut map = HashMap::new();
        map.insert(field, message.to_string());
        FieldErrors(map)
    }

    /// Message for one field, if that field was rejected.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = HashMap::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}.", field));
                map.insert(field, message);
            }
        }
        FieldErrors(map)
    }
}
