//! Monthly payroll record.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Generated, not yet paid out.
    Draft,
    /// Paid out.
    Paid,
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayrollStatus::Draft => f.write_str("draft"),
            PayrollStatus::Paid => f.write_str("paid"),
        }
    }
}

/// One employee's pay for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier.
    pub id: String,
    /// The paid employee.
    pub employee_id: String,
    /// First day of the month this payroll covers.
    pub period: NaiveDate,
    /// Monthly base salary at generation time.
    pub base_salary: Decimal,
    /// Fixed monthly allowances.
    pub allowances: Decimal,
    /// Discretionary bonus.
    pub bonus: Decimal,
    /// Social security plus unpaid leave deductions.
    pub deductions: Decimal,
    /// Approved unpaid leave working days inside the period.
    pub unpaid_leave_days: u32,
    /// Amount paid out.
    pub net_salary: Decimal,
    /// Payment state.
    pub status: PayrollStatus,
    /// When it was generated.
    pub created_at: DateTime<Utc>,
    /// When it was paid.
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Payroll {
    /// Base salary plus allowances and bonus.
    pub fn gross(&self) -> Decimal {
        self.base_salary + self.allowances + self.bonus
    }
}
