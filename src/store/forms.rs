//! Form payloads accepted by the store's mutators.
//!
//! These are the fields a user fills in; identifiers, timestamps and
//! derived values are assigned by the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{HrmsError, HrmsResult};
use crate::models::{EmployeeStatus, EmploymentType, LeaveType};

/// New employee form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email, unique in the directory.
    pub email: String,
    /// Department id.
    pub department_id: String,
    /// Position id.
    pub position_id: String,
    /// Line manager id.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// Employment arrangement.
    pub employment_type: EmploymentType,
    /// Start date.
    pub hire_date: NaiveDate,
    /// Contract end for fixed-term staff.
    #[serde(default)]
    pub contract_end: Option<NaiveDate>,
    /// Monthly base salary.
    pub base_salary: Decimal,
}

/// Partial employee edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Work email.
    #[serde(default)]
    pub email: Option<String>,
    /// Department id.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Position id.
    #[serde(default)]
    pub position_id: Option<String>,
    /// Line manager id.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// Employment arrangement.
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    /// Directory status; use deactivation to set inactive.
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    /// Contract end.
    #[serde(default)]
    pub contract_end: Option<NaiveDate>,
    /// Monthly base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
}

/// Directory list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilter {
    /// Only this department.
    #[serde(default)]
    pub department_id: Option<String>,
    /// Only this status.
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    /// Case-insensitive match on name or email.
    #[serde(default)]
    pub search: Option<String>,
}

/// New department form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDepartment {
    /// Display name, unique.
    pub name: String,
    /// Department head.
    #[serde(default)]
    pub head_id: Option<String>,
}

/// Leave request form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off.
    pub end_date: NaiveDate,
    /// Reason; must not be blank.
    #[serde(default)]
    pub justification: String,
}

/// Mission request form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMission {
    /// Where to.
    pub destination: String,
    /// Why.
    pub purpose: String,
    /// Departure date.
    pub start_date: NaiveDate,
    /// Return date.
    pub end_date: NaiveDate,
    /// Budget estimate.
    pub estimated_cost: Decimal,
}

/// Job posting form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewJobPosting {
    /// Job title.
    pub title: String,
    /// Hiring department.
    pub department_id: String,
    /// Advert text.
    #[serde(default)]
    pub description: String,
}

/// Candidate application form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCandidate {
    /// Applicant name.
    pub full_name: String,
    /// Applicant email.
    pub email: String,
}

/// Outcome chosen by a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    /// Approve the request.
    Approve,
    /// Reject the request.
    Reject,
}

pub(crate) fn require_text(field: &str, value: &str) -> HrmsResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HrmsError::validation(field, "must not be blank"));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn require_email(field: &str, value: &str) -> HrmsResult<String> {
    let email = require_text(field, value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(HrmsError::validation(field, "must be an email address")),
    }
}

pub(crate) fn require_date_order(start: NaiveDate, end: NaiveDate) -> HrmsResult<()> {
    if end < start {
        return Err(HrmsError::validation("end_date", "must not be before start_date"));
    }
    Ok(())
}
