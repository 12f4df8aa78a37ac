// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field validation for operator input.
//!
//! Every helper is pure: it inspects a raw form value and either returns
//! the typed value or a [`Error::Validation`] carrying the message shown
//! to the operator. Nothing here touches the database.

use crate::error::{Error, Result};

/// First year that is rejected by [`is_valid_date`].
pub const YEAR_LIMIT: u32 = 2023;

/// Message for missing required fields.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Check a `YYYY-MM-DD` date.
///
/// Accepts exactly four year digits, two month digits and two day
/// digits, with month 1–12, day 1–31 and year before [`YEAR_LIMIT`].
/// Day-of-month is not checked against the month.
///
/// # Example
///
/// ```rust
/// use boxoffice_core::validate::is_valid_date;
///
/// assert!(is_valid_date("1999-12-31"));
/// assert!(!is_valid_date("2023-01-01"));
/// assert!(!is_valid_date("1999-13-01"));
/// ```
pub fn is_valid_date(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return false;
    };
    let digits = |p: &str, n: usize| p.len() == n && p.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year, 4) && digits(month, 2) && digits(day, 2)) {
        return false;
    }

    let (Ok(year), Ok(month), Ok(day)) = (year.parse::<u32>(), month.parse::<u32>(), day.parse::<u32>())
    else {
        return false;
    };
    year < YEAR_LIMIT && (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Fail unless every field is non-blank.
pub fn require<S: AsRef<str>>(fields: &[S]) -> Result<()> {
    if fields.iter().any(|f| f.as_ref().trim().is_empty()) {
        return Err(Error::validation(ALL_FIELDS_REQUIRED));
    }
    Ok(())
}

/// Validate a date field.
pub fn date(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if is_valid_date(raw) {
        Ok(raw.to_owned())
    } else {
        Err(Error::validation(
            "Invalid date format or invalid values. Please use YYYY-MM-DD."
        ))
    }
}

/// Parse an integer field such as a user or ticket id.
pub fn integer(raw: &str, field: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::validation(format!("{field} must be an integer")))
}

/// Parse a positive ticket price.
pub fn price(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(Error::validation("Price must be a valid positive number"))
    }
}

/// Parse a performer age in `0..=120`.
pub fn age(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(v) if (0..=120).contains(&v) => Ok(v),
        _ => Err(Error::validation(
            "Age must be a valid integer between 0 and 120"
        ))
    }
}

/// Parse a non-negative venue capacity.
pub fn capacity(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 0 => Ok(v),
        _ => Err(Error::validation("Capacity must be a non-negative integer"))
    }
}

/// Validate a digits-only phone number.
pub fn phone(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
        Ok(raw.to_owned())
    } else {
        Err(Error::validation("Phone number must be a numeric value."))
    }
}

/// Parse a ticket purchaser.
///
/// Blank, `N/A` and `NULL` (any case) mean unpurchased.
pub fn purchaser(raw: &str) -> Result<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("n/a") || raw.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    integer(raw, "Purchased by").map(Some)
}

/// Parse an optional non-negative price bound for searches.
pub fn price_bound(raw: &str, field: &str) -> Result<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(Error::validation(format!(
            "{field} must be a valid non-negative number"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_accepts_calendar_shape() {
        assert!(is_valid_date("2000-01-01"));
        assert!(is_valid_date("2022-12-31"));
        assert!(is_valid_date("1850-06-15"));
    }

    #[test]
    fn date_day_is_not_checked_against_month() {
        assert!(is_valid_date("2021-02-31"));
    }

    #[test]
    fn date_rejects_out_of_range_components() {
        assert!(!is_valid_date("2023-01-01"));
        assert!(!is_valid_date("2099-01-01"));
        assert!(!is_valid_date("2000-00-10"));
        assert!(!is_valid_date("2000-13-10"));
        assert!(!is_valid_date("2000-01-00"));
        assert!(!is_valid_date("2000-01-32"));
    }

    #[test]
    fn date_rejects_wrong_shape() {
        assert!(!is_valid_date(""));
        assert!(!is_valid_date("2000/01/01"));
        assert!(!is_valid_date("2000-1-01"));
        assert!(!is_valid_date("20000-01-01"));
        assert!(!is_valid_date("2000-01-01-01"));
        assert!(!is_valid_date("abcd-ef-gh"));
        assert!(!is_valid_date("+200-01-01"));
    }

    #[test]
    fn require_rejects_blank() {
        assert!(require(&["a", "b"]).is_ok());
        let err = require(&["a", "  "]).unwrap_err();
        assert_eq!(err.to_string(), ALL_FIELDS_REQUIRED);
    }

    #[test]
    fn price_must_be_positive() {
        assert_eq!(price("12.50").unwrap(), 12.5);
        assert!(price("0").is_err());
        assert!(price("-1").is_err());
        assert!(price("abc").is_err());
        assert!(price("NaN").is_err());
    }

    #[test]
    fn age_bounds() {
        assert_eq!(age("0").unwrap(), 0);
        assert_eq!(age("120").unwrap(), 120);
        assert!(age("121").is_err());
        assert!(age("-1").is_err());
        assert!(age("4.5").is_err());
    }

    #[test]
    fn capacity_non_negative() {
        assert_eq!(capacity(" 500 ").unwrap(), 500);
        assert!(capacity("-5").is_err());
        assert!(capacity("lots").is_err());
    }

    #[test]
    fn phone_digits_only() {
        assert_eq!(phone("5551234").unwrap(), "5551234");
        assert!(phone("555-1234").is_err());
        assert!(phone("").is_err());
    }

    #[test]
    fn purchaser_null_spellings() {
        assert_eq!(purchaser("").unwrap(), None);
        assert_eq!(purchaser("N/A").unwrap(), None);
        assert_eq!(purchaser("null").unwrap(), None);
        assert_eq!(purchaser("7").unwrap(), Some(7));
        assert!(purchaser("someone").is_err());
    }

    #[test]
    fn price_bound_blank_is_absent() {
        assert_eq!(price_bound("", "Min price").unwrap(), None);
        assert_eq!(price_bound("20", "Min price").unwrap(), Some(20.0));
        assert!(price_bound("-3", "Min price").is_err());
        assert!(price_bound("cheap", "Max price").is_err());
    }
}
