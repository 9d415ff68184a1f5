//! Mission (business travel) request model.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a mission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStatus {
    /// Awaiting review.
    Pending,
    /// Approved; travel may go ahead.
    Approved,
    /// Rejected.
    Rejected,
    /// Travel done and closed by the traveller.
    Completed,
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MissionStatus::Pending => "pending",
            MissionStatus::Approved => "approved",
            MissionStatus::Rejected => "rejected",
            MissionStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}

/// A business trip request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    /// Unique identifier.
    pub id: String,
    /// The travelling employee.
    pub employee_id: String,
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
    /// Lifecycle state.
    pub status: MissionStatus,
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
