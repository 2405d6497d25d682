/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Convert a millisecond timestamp to a UTC datetime.
///
/// Out-of-range values clamp to the Unix epoch.
pub fn millis_to_datetime(millis: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2024-01-01
        assert!(now_millis() > 1_704_067_200_000);
    }

    #[test]
    fn test_millis_to_datetime() {
        let dt = millis_to_datetime(1_704_067_200_000);
        assert_eq!(dt.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }
}
