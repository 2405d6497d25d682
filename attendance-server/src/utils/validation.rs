//! Input validation helpers
//!
//! Text length limits and format checks shared by the CRUD handlers.

use std::sync::LazyLock;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use validator::ValidateEmail;

use crate::db::models::WEEKDAYS;
use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: employee, department, role, position
pub const MAX_NAME_LEN: usize = 200;

/// Task titles
pub const MAX_TITLE_LEN: usize = 200;

/// Descriptions, progress and notification messages
pub const MAX_NOTE_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

pub const MIN_PASSWORD_LEN: usize = 6;

// ── Text ────────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.len() > max_len {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        ));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({} chars, max {max_len})", v.len()),
        ));
    }
    Ok(())
}

// ── Credentials ─────────────────────────────────────────────────────

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    if !email.validate_email() {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid email address: {email}"),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::required("password"));
    }
    if password.len() < MIN_PASSWORD_LEN || password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("password must be {MIN_PASSWORD_LEN}-{MAX_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

// ── Lunch schedule ──────────────────────────────────────────────────

/// `H:MM` or `HH:MM`, 24h
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("time regex is valid")
});

/// Minutes since midnight for a valid `H:MM` / `HH:MM` string
pub fn parse_time_of_day(value: &str) -> Result<u32, AppError> {
    if !TIME_RE.is_match(value) {
        return Err(AppError::with_message(
            ErrorCode::LunchTimeInvalidFormat,
            format!("Invalid time '{value}'. Use HH:MM (24-hour)"),
        ));
    }
    let (hours, minutes) = value.split_once(':').unwrap_or((value, "0"));
    let hours: u32 = hours.parse().unwrap_or(0);
    let minutes: u32 = minutes.parse().unwrap_or(0);
    Ok(hours * 60 + minutes)
}

/// End must be strictly after start
pub fn validate_time_range(start: &str, end: &str) -> Result<(), AppError> {
    let start_min = parse_time_of_day(start)?;
    let end_min = parse_time_of_day(end)?;
    if end_min <= start_min {
        return Err(AppError::with_message(
            ErrorCode::LunchTimeInvalidRange,
            format!("End time {end} must be after start time {start}"),
        ));
    }
    Ok(())
}

/// Non-empty list of weekday names; duplicates removed, order kept
pub fn validate_days(days: &[String]) -> Result<Vec<String>, AppError> {
    if days.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::LunchTimeInvalidDays,
            "At least one day is required",
        ));
    }

    let mut out: Vec<String> = Vec::with_capacity(days.len());
    for day in days {
        let day = day.trim();
        if !WEEKDAYS.contains(&day) {
            return Err(AppError::with_message(
                ErrorCode::LunchTimeInvalidDays,
                format!("Invalid day '{day}'. Must be one of: {}", WEEKDAYS.join(", ")),
            ));
        }
        if !out.iter().any(|d| d == day) {
            out.push(day.to_string());
        }
    }
    Ok(out)
}

// ── Attendance image ────────────────────────────────────────────────

/// Accepts raw base64 or a `data:image/*;base64,` URL
pub fn validate_image_data(value: &str) -> Result<(), AppError> {
    let invalid = |msg: &str| AppError::with_message(ErrorCode::AttendanceInvalidImage, msg);

    let payload = match value.strip_prefix("data:") {
        Some(rest) => {
            let (meta, data) = rest
                .split_once(',')
                .ok_or_else(|| invalid("Malformed data URL"))?;
            if !meta.starts_with("image/") || !meta.ends_with(";base64") {
                return Err(invalid("Image must be a base64 image data URL"));
            }
            data
        }
        None => value,
    };

    if payload.is_empty() {
        return Err(invalid("Image data is empty"));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|_| invalid("Image data is not valid base64"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Ann", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
        assert!(validate_optional_text(&Some(long), "name", MAX_NAME_LEN).is_err());
        assert!(validate_optional_text(&None, "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_email() {
        assert!(validate_email("ann@example.com").is_ok());
        assert!(validate_email(" ann@example.com ").is_ok());
        assert_eq!(
            validate_email("not-an-email").unwrap_err().code,
            ErrorCode::InvalidFormat
        );
        assert_eq!(validate_email("").unwrap_err().code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_password() {
        assert!(validate_password("secret1").is_ok());
        assert!(validate_password("abc").is_err());
        assert_eq!(
            validate_password("").unwrap_err().code,
            ErrorCode::RequiredField
        );
    }

    #[test]
    fn test_time_format() {
        assert_eq!(parse_time_of_day("9:05").unwrap(), 545);
        assert_eq!(parse_time_of_day("23:59").unwrap(), 1439);
        assert_eq!(parse_time_of_day("00:00").unwrap(), 0);
        for bad in ["24:00", "12:60", "12", "1200", "12:5", "ab:cd", " 12:00"] {
            assert_eq!(
                parse_time_of_day(bad).unwrap_err().code,
                ErrorCode::LunchTimeInvalidFormat,
                "{bad}"
            );
        }
    }

    #[test]
    fn test_time_range() {
        assert!(validate_time_range("12:00", "13:00").is_ok());
        assert_eq!(
            validate_time_range("13:00", "12:00").unwrap_err().code,
            ErrorCode::LunchTimeInvalidRange
        );
        assert!(validate_time_range("12:00", "12:00").is_err());
    }

    #[test]
    fn test_days() {
        let days = vec!["Monday".to_string(), "Friday".into(), "Monday".into()];
        assert_eq!(validate_days(&days).unwrap(), vec!["Monday", "Friday"]);
        assert!(validate_days(&[]).is_err());
        assert!(validate_days(&["monday".to_string()]).is_err());
    }

    #[test]
    fn test_image_data() {
        assert!(validate_image_data("aGVsbG8=").is_ok());
        assert!(validate_image_data("data:image/png;base64,aGVsbG8=").is_ok());
        assert!(validate_image_data("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(validate_image_data("data:image/png;base64,").is_err());
        assert!(validate_image_data("not base64!").is_err());
    }
}
