//! CSV export of attendance records

use shared::util::millis_to_datetime;

use crate::db::models::AttendanceRecord;

pub const ATTENDANCE_HEADER: [&str; 6] = [
    "Employee Name",
    "Employee ID",
    "Type",
    "Date",
    "Time",
    "Image Available",
];

/// Quote a field when it contains a comma, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let row: Vec<String> = fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()))
        .collect();
    out.push_str(&row.join(","));
    out.push_str("\r\n");
}

/// Render records as CSV; dates and times are UTC
pub fn attendance_csv(records: &[AttendanceRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, ATTENDANCE_HEADER);

    for record in records {
        let at = millis_to_datetime(record.timestamp);
        push_row(
            &mut out,
            [
                record.employee_name.clone(),
                record.employee.to_string(),
                record.kind.as_str().to_string(),
                at.format("%Y-%m-%d").to_string(),
                at.format("%H:%M:%S").to_string(),
                if record.has_image() { "Yes" } else { "No" }.to_string(),
            ],
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::AttendanceType;
    use surrealdb::RecordId;

    fn record(name: &str, image: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            id: None,
            employee: RecordId::from_table_key("employee", "ann"),
            employee_name: name.into(),
            kind: AttendanceType::Checkin,
            // 2024-01-02T09:30:00Z
            timestamp: 1_704_187_800_000,
            image_data: image.map(String::from),
        }
    }

    #[test]
    fn test_header_only() {
        assert_eq!(
            attendance_csv(&[]),
            "Employee Name,Employee ID,Type,Date,Time,Image Available\r\n"
        );
    }

    #[test]
    fn test_row_format() {
        let csv = attendance_csv(&[record("Ann", Some("aGk="))]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "Ann,employee:ann,checkin,2024-01-02,09:30:00,Yes");
    }

    #[test]
    fn test_quoting() {
        let csv = attendance_csv(&[record("Doe, \"JD\" John", None)]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with("\"Doe, \"\"JD\"\" John\","));
        assert!(row.ends_with(",No"));
    }
}
