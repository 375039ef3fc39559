//! The lead record carried from the contact form to the notification sink.

use crate::validation::rules::{validate_email, validate_mobile, validate_name, validate_service};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Fields of the contact form, in the order they are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadField {
    Name,
    Mobile,
    Email,
    Service,
    Budget,
    Notes,
}

impl LeadField {
    pub const ALL: [LeadField; 6] = [
        LeadField::Name,
        LeadField::Mobile,
        LeadField::Email,
        LeadField::Service,
        LeadField::Budget,
        LeadField::Notes,
    ];

    /// Fields that must pass their rule before a lead may be submitted.
    pub const REQUIRED: [LeadField; 4] = [
        LeadField::Name,
        LeadField::Mobile,
        LeadField::Email,
        LeadField::Service,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Mobile => "mobile",
            LeadField::Email => "email",
            LeadField::Service => "service",
            LeadField::Budget => "budget",
            LeadField::Notes => "notes",
        }
    }

    /// Label used when rendering the field in a notification.
    pub fn label(&self) -> &'static str {
        match self {
            LeadField::Name => "Name",
            LeadField::Mobile => "Mobile",
            LeadField::Email => "Email",
            LeadField::Service => "Service",
            LeadField::Budget => "Budget",
            LeadField::Notes => "Notes",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for LeadField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown lead field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for LeadField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadField::ALL
            .iter()
            .copied()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A prospective customer's contact details and intent.
///
/// Absent values are empty strings, never missing keys, so every
/// rendering of a record carries all six fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LeadRecord {
    #[validate(custom(function = "validate_name", message = "Please enter your name"))]
    pub name: String,

    #[validate(custom(function = "validate_mobile", message = "Please enter a valid Australian mobile number"))]
    pub mobile: String,

    #[validate(custom(function = "validate_email", message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_service", message = "Please select a service"))]
    pub service: String,

    pub budget: String,
    pub notes: String,
}

impl LeadRecord {
    /// Builds a record from a flat key/value mapping. Missing keys become
    /// empty strings and keys outside the lead schema are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let mut record = LeadRecord::default();
        for field in LeadField::ALL {
            if let Some(value) = fields.get(field.key()) {
                record.set(field, value.clone());
            }
        }
        record
    }

    pub fn get(&self, field: LeadField) -> &str {
        match field {
            LeadField::Name => &self.name,
            LeadField::Mobile => &self.mobile,
            LeadField::Email => &self.email,
            LeadField::Service => &self.service,
            LeadField::Budget => &self.budget,
            LeadField::Notes => &self.notes,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LeadField::Name => self.name = value,
            LeadField::Mobile => self.mobile = value,
            LeadField::Email => self.email = value,
            LeadField::Service => self.service = value,
            LeadField::Budget => self.budget = value,
            LeadField::Notes => self.notes = value,
        }
    }

    /// Flat key to string mapping of every field, optional ones included.
    pub fn to_fields(&self) -> BTreeMap<String, String> {
        LeadField::ALL
            .iter()
            .map(|field| (field.key().to_string(), self.get(*field).to_string()))
            .collect()
    }
}
