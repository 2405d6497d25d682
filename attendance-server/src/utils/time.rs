//! Date parsing for request payloads
//!
//! All date -> timestamp conversion happens in the API layer; repositories
//! only see `i64` Unix millis.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{AppError, AppResult, ErrorCode};

/// Parse a due date: `YYYY-MM-DD` (midnight UTC), `YYYY-MM-DDTHH:MM`
/// (UTC) or RFC 3339
pub fn parse_due_date(value: &str) -> AppResult<i64> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Ok(naive.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        && let Some(naive) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(naive.and_utc().timestamp_millis());
    }

    Err(AppError::with_message(
        ErrorCode::TaskInvalidDueDate,
        format!("Invalid due date '{}'. Use YYYY-MM-DD or RFC 3339", value),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_date() {
        // 2024-01-02T00:00:00Z
        assert_eq!(parse_due_date("2024-01-02").unwrap(), 1_704_153_600_000);
    }

    #[test]
    fn test_rfc3339_with_offset() {
        assert_eq!(
            parse_due_date("2024-01-02T01:00:00+01:00").unwrap(),
            1_704_153_600_000
        );
        assert_eq!(
            parse_due_date("2024-01-02T00:00:00.000Z").unwrap(),
            1_704_153_600_000
        );
    }

    #[test]
    fn test_datetime_local() {
        assert_eq!(
            parse_due_date("2024-01-02T00:30").unwrap(),
            1_704_153_600_000 + 30 * 60 * 1000
        );
    }

    #[test]
    fn test_invalid() {
        for bad in ["", "tomorrow", "2024-13-01", "02/01/2024"] {
            assert_eq!(
                parse_due_date(bad).unwrap_err().code,
                ErrorCode::TaskInvalidDueDate
            );
        }
    }
}
