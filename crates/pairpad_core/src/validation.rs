//! crates/pairpad_core/src/validation.rs
//!
//! Field-level validation that runs locally before any request is sent.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// The key under which non-field errors (e.g. a failed submission) are stored.
pub const GENERAL: &str = "general";

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_AGE: u32 = 18;

/// Per-field error messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error; a later error for the same field replaces the earlier one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn general(&self) -> Option<&str> {
        self.get(GENERAL)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// `Ok(())` when empty, otherwise the errors themselves.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

//=========================================================================================
// Reusable checks
//=========================================================================================

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value.trim())
}

pub fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if is_blank(value) {
        errors.insert(field, message);
    }
}

/// Whole years between `birth` and `today`, accounting for whether the
/// birthday has already occurred this year.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Rejects a minimum budget that is not strictly below the maximum.
pub fn check_budget(errors: &mut FieldErrors, budget_min: Option<u32>, budget_max: Option<u32>) {
    if let (Some(min), Some(max)) = (budget_min, budget_max) {
        if min >= max {
            errors.insert("budget_max", "Maximum budget must be greater than minimum");
        }
    }
}

/// Rejects a date of birth that makes the user younger than [`MIN_AGE`].
pub fn check_adult(errors: &mut FieldErrors, date_of_birth: Option<NaiveDate>, today: NaiveDate) {
    if let Some(birth) = date_of_birth {
        if age_on(birth, today) < MIN_AGE as i32 {
            errors.insert("date_of_birth", "You must be at least 18 years old");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("  ana.b+tag@uni.edu "));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("ana example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn age_counts_completed_years() {
        let today = date(2026, 10, 19);
        assert_eq!(age_on(date(2008, 10, 19), today), 18);
        assert_eq!(age_on(date(2008, 10, 20), today), 17);
        assert_eq!(age_on(date(1990, 1, 1), today), 36);
    }

    #[test]
    fn budget_min_must_be_below_max() {
        let mut errors = FieldErrors::new();
        check_budget(&mut errors, Some(900), Some(900));
        assert!(errors.contains("budget_max"));

        let mut errors = FieldErrors::new();
        check_budget(&mut errors, Some(400), Some(900));
        check_budget(&mut errors, None, Some(900));
        assert!(errors.is_empty());
    }

    #[test]
    fn minors_are_rejected() {
        let today = date(2026, 10, 19);
        let mut errors = FieldErrors::new();
        check_adult(&mut errors, Some(date(2010, 5, 1)), today);
        assert_eq!(errors.get("date_of_birth"), Some("You must be at least 18 years old"));

        let mut errors = FieldErrors::new();
        check_adult(&mut errors, Some(date(2000, 5, 1)), today);
        check_adult(&mut errors, None, today);
        assert!(errors.is_empty());
    }

    #[test]
    fn errors_render_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert("username", "Username is required");
        errors.insert("email", "Email is required");
        assert_eq!(
            errors.to_string(),
            "email: Email is required; username: Username is required"
        );
        assert!(errors.clone().into_result().is_err());
    }
}
