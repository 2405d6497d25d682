//! Attendance Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceType {
    Checkin,
    Checkout,
}

impl AttendanceType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checkin => "checkin",
            Self::Checkout => "checkout",
        }
    }
}

impl std::str::FromStr for AttendanceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checkin" => Ok(Self::Checkin),
            "checkout" => Ok(Self::Checkout),
            _ => Err(()),
        }
    }
}

/// A single check-in or check-out event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    /// Copied from the employee at write time
    pub employee_name: String,
    #[serde(rename = "type")]
    pub kind: AttendanceType,
    /// Unix millis, server time
    pub timestamp: i64,
    #[serde(default)]
    pub image_data: Option<String>,
}

impl AttendanceRecord {
    pub fn has_image(&self) -> bool {
        self.image_data.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Record attendance payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttendanceCreate {
    #[serde(rename = "type")]
    pub kind: String,
    pub image_data: Option<String>,
    pub employee_id: Option<String>,
}

/// `GET /api/admin/attendance` query
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttendancePageQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub employee_id: Option<String>,
}

/// One page of attendance records
#[derive(Debug, Clone, Serialize)]
pub struct AttendancePage {
    pub attendance: Vec<AttendanceRecord>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_name() {
        let record = AttendanceRecord {
            id: None,
            employee: RecordId::from_table_key("employee", "ann"),
            employee_name: "Ann".into(),
            kind: AttendanceType::Checkout,
            timestamp: 10,
            image_data: Some(String::new()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "checkout");
        assert_eq!(json["employee"], "employee:ann");
        assert!(!record.has_image());
    }

    #[test]
    fn test_parse_type() {
        assert_eq!("checkin".parse(), Ok(AttendanceType::Checkin));
        assert!("CheckIn".parse::<AttendanceType>().is_err());
    }
}
