//! Field validation for [`ContactRecord`].
//!
//! Validation only runs on submit-like actions ("View" and "Download").
//! Each rule is evaluated independently, so a record with several problems
//! reports all of them at once.

use crate::record::{ContactRecord, Field};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_INVALID: &str = "Please enter a valid phone number (minimum 10 digits)";

/// Minimum number of decimal digits in a phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

lazy_static! {
    static ref EMAIL_SHAPE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Email pattern is valid");
}

/// Per-field error messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the record can be submitted.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Drops the error for `field`, returning whether one was present.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    /// Errors in field display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(field, msg)| (field.as_str(), msg)))
    }
}

/// Checks every constrained field of `record`.
pub fn validate(record: &ContactRecord) -> ValidationResult {
    let mut result = ValidationResult::new();

    if record.name.trim().is_empty() {
        result.insert(Field::Name, NAME_REQUIRED);
    }

    if record.email.trim().is_empty() {
        result.insert(Field::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&record.email) {
        result.insert(Field::Email, EMAIL_INVALID);
    }

    if record.phone.trim().is_empty() {
        result.insert(Field::Phone, PHONE_REQUIRED);
    } else if !is_valid_phone(&record.phone) {
        result.insert(Field::Phone, PHONE_INVALID);
    }

    result
}

/// Shape check only: `local@domain.tld`, no whitespace or extra `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// At least [`MIN_PHONE_DIGITS`] digits once every other character is dropped.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}
