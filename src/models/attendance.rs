//! Attendance records.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee's punches for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier.
    pub id: String,
    /// Who punched.
    pub employee_id: String,
    /// The working day.
    pub date: NaiveDate,
    /// Arrival time.
    #[serde(default)]
    pub check_in: Option<NaiveTime>,
    /// Departure time.
    #[serde(default)]
    pub check_out: Option<NaiveTime>,
}

impl AttendanceRecord {
    /// Hours between check-in and check-out, rounded to two decimal places.
    ///
    /// Returns `None` until both punches exist.
    ///
    /// ```
    /// use hrms_engine::models::AttendanceRecord;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let record = AttendanceRecord {
    ///     id: "att_1".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    ///     check_in: NaiveTime::from_hms_opt(9, 0, 0),
    ///     check_out: NaiveTime::from_hms_opt(17, 30, 0),
    /// };
    /// assert_eq!(record.worked_hours(), Some(Decimal::new(850, 2)));
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        let (check_in, check_out) = (self.check_in?, self.check_out?);
        let minutes = (check_out - check_in).num_minutes().max(0);
        Some((Decimal::from(minutes) / Decimal::from(60)).round_dp(2))
    }
}
