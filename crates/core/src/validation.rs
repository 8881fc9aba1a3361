//! Field-level validation helpers used by every entity's create/update path.
//!
//! Each helper names the offending field in its error message.

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::dates::parse_date;
use crate::error::CoreError;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

/// A required text field must contain something other than whitespace.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// A required text field that is optional in an update must not be blanked.
pub fn reject_blank(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(CoreError::Validation(format!("{field} must not be empty")))
        }
        _ => Ok(()),
    }
}

pub fn check_year(year: i32) -> Result<(), CoreError> {
    if year == 0 {
        return Err(CoreError::Validation("year is required".into()));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(CoreError::Validation(format!(
            "year must be between {MIN_YEAR} and {MAX_YEAR}"
        )));
    }
    Ok(())
}

pub fn check_non_negative(field: &str, value: i32) -> Result<(), CoreError> {
    if value < 0 {
        return Err(CoreError::Validation(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Parse an optional date field. Empty input means "no date".
pub fn check_date(field: &str, value: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw).map(Some).ok_or_else(|| {
            CoreError::Validation(format!(
                "{field} must be a date in DD.MM.YYYY or YYYY-MM-DD format"
            ))
        }),
    }
}

pub fn check_email(email: &str) -> Result<(), CoreError> {
    if !email.validate_email() {
        return Err(CoreError::Validation("email is not a valid address".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn required_text_names_the_field() {
        let err = require_text("team_name", "   ").unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "team_name is required");
        assert!(require_text("team_name", "Alpha").is_ok());
    }

    #[test]
    fn blank_update_values_are_rejected() {
        assert!(reject_blank("title", None).is_ok());
        assert!(reject_blank("title", Some("x")).is_ok());
        assert_matches!(reject_blank("title", Some("")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn year_bounds() {
        assert!(check_year(2000).is_ok());
        assert!(check_year(2100).is_ok());
        assert_matches!(check_year(0), Err(CoreError::Validation(msg)) if msg == "year is required");
        assert_matches!(check_year(1999), Err(CoreError::Validation(_)));
        assert_matches!(check_year(2101), Err(CoreError::Validation(_)));
    }

    #[test]
    fn dates_accept_both_formats() {
        assert_eq!(
            check_date("award_date", Some("01.09.2024")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 1)
        );
        assert_eq!(check_date("award_date", Some("")).unwrap(), None);
        assert_eq!(check_date("award_date", None).unwrap(), None);
        assert_matches!(check_date("award_date", Some("soon")), Err(CoreError::Validation(_)));
    }

    #[test]
    fn email_format() {
        assert!(check_email("admin@example.com").is_ok());
        assert!(check_email("not-an-email").is_err());
    }
}
