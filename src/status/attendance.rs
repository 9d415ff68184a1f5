//! Attendance punctuality derivation.
//!
//! Turns a day's punches into the label shown in attendance lists.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AttendancePolicy;
use crate::models::AttendanceRecord;

/// Display status for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Covered by approved leave.
    OnLeave,
    /// No check-in.
    Absent,
    /// Checked in, not yet out.
    InProgress,
    /// Checked out before completing the half-day threshold.
    HalfDay,
    /// Arrived after the grace period.
    Late,
    /// On time and a full day.
    Present,
}

/// The derived status plus the numbers behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceAssessment {
    /// The display status.
    pub status: AttendanceStatus,
    /// Minutes after the official start, zero when within grace.
    pub minutes_late: u32,
    /// Hours between the punches, once both exist.
    pub worked_hours: Option<Decimal>,
}

/// Derives the attendance status of a day.
///
/// # Behavior
///
/// - Approved leave wins over any punches.
/// - No record, or a record without check-in, is absent.
/// - A check-in without check-out is in progress; lateness is still
///   reported in `minutes_late`.
/// - A checked-out day shorter than `half_day_hours` is a half day.
/// - A check-in strictly after `work_start + late_grace_minutes` is late.
/// - Anything else is present.
///
/// # Example
///
/// ```
/// use hrms_engine::config::AttendancePolicy;
/// use hrms_engine::models::AttendanceRecord;
/// use hrms_engine::status::{assess_attendance, AttendanceStatus};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let policy = AttendancePolicy {
///     work_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
///     late_grace_minutes: 15,
///     half_day_hours: Decimal::new(4, 0),
///     utc_offset_minutes: 0,
/// };
/// let record = AttendanceRecord {
///     id: "att_1".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
///     check_in: NaiveTime::from_hms_opt(9, 40, 0),
///     check_out: NaiveTime::from_hms_opt(18, 0, 0),
/// };
///
/// let assessment = assess_attendance(Some(&record), false, &policy);
/// assert_eq!(assessment.status, AttendanceStatus::Late);
/// assert_eq!(assessment.minutes_late, 40);
/// ```
pub fn assess_attendance(
    record: Option<&AttendanceRecord>,
    on_leave: bool,
    policy: &AttendancePolicy,
) -> AttendanceAssessment {
    if on_leave {
        return AttendanceAssessment {
            status: AttendanceStatus::OnLeave,
            minutes_late: 0,
            worked_hours: None,
        };
    }

    let Some((record, check_in)) = record.and_then(|r| r.check_in.map(|t| (r, t))) else {
        return AttendanceAssessment {
            status: AttendanceStatus::Absent,
            minutes_late: 0,
            worked_hours: None,
        };
    };

    let deadline = policy.work_start + Duration::minutes(i64::from(policy.late_grace_minutes));
    let is_late = check_in > deadline;
    let minutes_late = if is_late {
        u32::try_from((check_in - policy.work_start).num_minutes()).unwrap_or(0)
    } else {
        0
    };
    let worked_hours = record.worked_hours();

    let status = match worked_hours {
        None => AttendanceStatus::InProgress,
        Some(hours) if hours < policy.half_day_hours => AttendanceStatus::HalfDay,
        Some(_) if is_late => AttendanceStatus::Late,
        Some(_) => AttendanceStatus::Present,
    };

    AttendanceAssessment {
        status,
        minutes_late,
        worked_hours,
    }
}
