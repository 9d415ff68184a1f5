//! Request types for the HRMS API.
//!
//! Query strings and small bodies that are not store forms. Store forms
//! such as [`NewLeaveRequest`](crate::store::NewLeaveRequest) are accepted
//! as bodies directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::PostingStatus;

/// Query for `GET /notifications`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQuery {
    /// Only unread notifications.
    #[serde(default)]
    pub unread_only: bool,
}

/// Query for endpoints reporting on a single day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    /// The day; defaults to today in office time.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query for `GET /positions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionQuery {
    /// Only positions of this department.
    #[serde(default)]
    pub department_id: Option<String>,
}

/// Query for `GET /jobs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingQuery {
    /// Only postings in this status.
    #[serde(default)]
    pub status: Option<PostingStatus>,
}

/// Query for `GET /leave-balance`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceQuery {
    /// Calendar year; defaults to the current one.
    #[serde(default)]
    pub year: Option<i32>,
    /// Another employee's balance; needs the right to view all leave.
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Body of the approve and reject endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Remark shown to the requester.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body of `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u32,
}
