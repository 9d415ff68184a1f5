//! Leave request model.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of leave being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Paid annual leave, limited by the yearly entitlement.
    Annual,
    /// Sick leave.
    Sick,
    /// Unpaid leave; deducted at payroll time.
    Unpaid,
    /// Maternity leave.
    Maternity,
    /// Paternity leave.
    Paternity,
}

impl LeaveType {
    /// All leave types in display order.
    pub const ALL: [LeaveType; 5] = [
        LeaveType::Annual,
        LeaveType::Sick,
        LeaveType::Unpaid,
        LeaveType::Maternity,
        LeaveType::Paternity,
    ];
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Unpaid => "unpaid",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
        };
        f.write_str(label)
    }
}

/// Review state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting review.
    Pending,
    /// Approved by a reviewer.
    Approved,
    /// Rejected by a reviewer.
    Rejected,
    /// Withdrawn by the requester before review.
    Cancelled,
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// A request for time off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day off (inclusive).
    pub start_date: NaiveDate,
    /// Last day off (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason; required.
    pub justification: String,
    /// Working days covered by the request.
    pub days: u32,
    /// Review state.
    pub status: LeaveStatus,
    /// Who reviewed it.
    #[serde(default)]
    pub reviewer_id: Option<String>,
    /// Reviewer remark.
    #[serde(default)]
    pub reviewer_comment: Option<String>,
    /// When it was reviewed.
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    /// When it was submitted.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Returns true if the request covers the given date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns true for approved requests covering the date.
    pub fn is_approved_on(&self, date: NaiveDate) -> bool {
        self.status == LeaveStatus::Approved && self.covers(date)
    }
}
