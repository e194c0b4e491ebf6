//! Parsing and format checks for console answers.
//!
//! # Invariants
//! - Parsers receive already-trimmed, non-empty text.
//! - Format checks here are presentation concerns; uniqueness is enforced by
//!   the core service.

use chrono::NaiveDate;
use ems_core::Gender;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

static MOBILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$").expect("valid email regex")
});
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z][0-9A-Za-z -]{2,9}$").expect("valid postal regex"));

/// Rejected console answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Required,
    Mobile,
    Email,
    Date,
    Gender,
    Salary,
    Id,
    PostalCode,
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "a value is required"),
            Self::Mobile => write!(f, "mobile number must be exactly 10 digits"),
            Self::Email => write!(f, "email must look like name@domain.tld"),
            Self::Date => write!(f, "date must be YYYY-MM-DD"),
            Self::Gender => write!(f, "gender must be male, female or other"),
            Self::Salary => write!(f, "salary must be a whole, non-negative number"),
            Self::Id => write!(f, "id must be a positive whole number"),
            Self::PostalCode => write!(f, "postal code must be 3-10 letters or digits"),
        }
    }
}

pub fn parse_text(value: &str) -> Result<String, InputError> {
    if value.is_empty() {
        return Err(InputError::Required);
    }
    Ok(value.to_string())
}

pub fn parse_mobile(value: &str) -> Result<String, InputError> {
    if MOBILE_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(InputError::Mobile)
    }
}

pub fn parse_email(value: &str) -> Result<String, InputError> {
    if EMAIL_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(InputError::Email)
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| InputError::Date)
}

pub fn format_date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn parse_gender(value: &str) -> Result<Gender, InputError> {
    match value.to_ascii_lowercase().as_str() {
        "m" | "male" => Ok(Gender::Male),
        "f" | "female" => Ok(Gender::Female),
        "o" | "other" => Ok(Gender::Other),
        _ => Err(InputError::Gender),
    }
}

pub fn parse_salary(value: &str) -> Result<i64, InputError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|salary| *salary >= 0)
        .ok_or(InputError::Salary)
}

pub fn parse_id(value: &str) -> Result<i64, InputError> {
    value
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(InputError::Id)
}

pub fn parse_postal_code(value: &str) -> Result<String, InputError> {
    if POSTAL_CODE_RE.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(InputError::PostalCode)
    }
}
