//! Field rules for the contact form

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // Optional +61 / 61 country code or a trunk 0, then 4 and eight digits.
    static ref MOBILE_REGEX: Regex = Regex::new(
        r"^(\+?61|0)4[0-9]{8}$"
    ).unwrap();

    static ref MOBILE_SEPARATORS: Regex = Regex::new(
        r"[\s\-()]"
    ).unwrap();

    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[^\s@]+@[^\s@]+\.[^\s@]+$"
    ).unwrap();
}

pub const NAME_MIN_LENGTH: usize = 2;

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() < NAME_MIN_LENGTH {
        return Err(ValidationError::new("name_too_short"));
    }

    Ok(())
}

/// Strips the whitespace, hyphens and parentheses people type into phone numbers.
pub fn normalize_mobile(mobile: &str) -> String {
    MOBILE_SEPARATORS.replace_all(mobile, "").into_owned()
}

pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    if !MOBILE_REGEX.is_match(&normalize_mobile(mobile)) {
        return Err(ValidationError::new("invalid_mobile"));
    }

    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("invalid_email"));
    }

    Ok(())
}

/// The placeholder option of the service dropdown submits an empty value.
pub fn validate_service(service: &str) -> Result<(), ValidationError> {
    if service.is_empty() {
        return Err(ValidationError::new("service_required"));
    }

    Ok(())
}
