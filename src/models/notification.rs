//! Notification records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// General announcement.
    Info,
    /// A leave request awaits review.
    LeaveRequest,
    /// A leave request was approved or rejected.
    LeaveDecision,
    /// A mission request was submitted or reviewed.
    Mission,
    /// A payslip was paid.
    Payroll,
    /// Recruitment pipeline activity.
    Recruitment,
    /// A fixed-term contract is about to end.
    ContractExpiry,
}

/// A message addressed to one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: String,
    /// The employee who receives it.
    pub recipient_id: String,
    /// Category.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Route of the record the notification refers to.
    #[serde(default)]
    pub link: Option<String>,
    /// Whether the recipient has read it.
    #[serde(default)]
    pub read: bool,
    /// When it was created.
    pub created_at: DateTime<Utc>,
}

/// Content of a notification before it is addressed and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    /// Category.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Route of the referenced record.
    pub link: Option<String>,
}

impl NotificationDraft {
    /// Creates a draft without a link.
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
            link: None,
        }
    }

    /// Attaches a link to the referenced record.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}
