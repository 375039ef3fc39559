//! Validation of contact form input.
//!
//! Rules are plain functions keyed by field name so they can be driven from
//! any UI binding as well as from the submission endpoint.

pub mod rules;

pub use rules::*;

use crate::models::{LeadField, LeadRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

/// Outcome of checking one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    pub valid: bool,
    pub message: Option<String>,
}

impl FieldValidation {
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

impl LeadField {
    /// Message shown next to the field when its rule fails.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            LeadField::Name => Some("Please enter your name"),
            LeadField::Mobile => Some("Please enter a valid Australian mobile number"),
            LeadField::Email => Some("Please enter a valid email address"),
            LeadField::Service => Some("Please select a service"),
            LeadField::Budget | LeadField::Notes => None,
        }
    }

    pub fn check(&self, raw_value: &str) -> FieldValidation {
        let result = match self {
            LeadField::Name => validate_name(raw_value),
            LeadField::Mobile => validate_mobile(raw_value),
            LeadField::Email => validate_email(raw_value),
            LeadField::Service => validate_service(raw_value),
            LeadField::Budget | LeadField::Notes => Ok(()),
        };

        match (result, self.error_message()) {
            (Err(_), Some(message)) => FieldValidation::fail(message),
            _ => FieldValidation::pass(),
        }
    }
}

/// Checks a raw value against the rule registered for `field_name`.
/// Fields without a rule always pass.
pub fn validate_field(field_name: &str, raw_value: &str) -> FieldValidation {
    match field_name.parse::<LeadField>() {
        Ok(field) => field.check(raw_value),
        Err(_) => FieldValidation::pass(),
    }
}

/// Per-field messages for a whole record, as reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    pub fn from_validation_errors(errors: ValidationErrors) -> Self {
        let mut report = Self::success();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Validation failed for field '{}'", field),
                };
                report.add_error(&field, &message);
            }
        }

        report
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }
}

pub fn validate_lead(record: &LeadRecord) -> ValidationReport {
    match record.validate() {
        Ok(()) => ValidationReport::success(),
        Err(errors) => ValidationReport::from_validation_errors(errors),
    }
}
