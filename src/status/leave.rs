//! Leave day counting and balances.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{LeaveRequest, LeaveStatus, LeaveType};

/// Counts Monday to Friday dates in the inclusive range.
///
/// Returns zero when `end` precedes `start`.
///
/// ```
/// use hrms_engine::status::working_days;
/// use chrono::NaiveDate;
///
/// // Friday 2026-10-16 to Tuesday 2026-10-20
/// let start = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
/// assert_eq!(working_days(start, end), 3);
/// ```
pub fn working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}

/// Yearly balance of one leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The leave type.
    pub leave_type: LeaveType,
    /// Calendar year.
    pub year: i32,
    /// Working days granted per year.
    pub entitlement: u32,
    /// Approved working days falling in the year.
    pub used: u32,
    /// Working days requested and still pending.
    pub pending: u32,
    /// Entitlement minus used, floored at zero.
    pub remaining: u32,
}

/// Computes an employee's balance of a capped leave type for a year.
///
/// Only the part of each request that falls inside the year is counted.
pub fn leave_balance(
    requests: &[LeaveRequest],
    employee_id: &str,
    leave_type: LeaveType,
    year: i32,
    entitlement: u32,
) -> LeaveBalance {
    let mut used = 0;
    let mut pending = 0;

    for request in requests
        .iter()
        .filter(|r| r.employee_id == employee_id && r.leave_type == leave_type)
    {
        let days = working_days_in_year(request.start_date, request.end_date, year);
        match request.status {
            LeaveStatus::Approved => used += days,
            LeaveStatus::Pending => pending += days,
            LeaveStatus::Rejected | LeaveStatus::Cancelled => {}
        }
    }

    LeaveBalance {
        leave_type,
        year,
        entitlement,
        used,
        pending,
        remaining: entitlement.saturating_sub(used),
    }
}

/// Working days of `[start, end]` that fall inside `[from, to]`.
pub fn overlapping_working_days(
    start: NaiveDate,
    end: NaiveDate,
    from: NaiveDate,
    to: NaiveDate,
) -> u32 {
    working_days(start.max(from), end.min(to))
}

/// Working days of `[start, end]` that fall inside calendar `year`.
pub fn working_days_in_year(start: NaiveDate, end: NaiveDate, year: i32) -> u32 {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(first), Some(last)) => overlapping_working_days(start, end, first, last),
        _ => 0,
    }
}
