//! Contract expiry window derivation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display status of an employment contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ContractStatus {
    /// No end date.
    Permanent,
    /// Ends after the expiry window.
    Active,
    /// Ends within the window (inclusive of today and the last window day).
    Expiring {
        /// Days from today until the end date.
        days_remaining: u32,
    },
    /// Ended before today.
    Expired,
}

/// Derives the status of a contract ending on `contract_end`.
///
/// ```
/// use hrms_engine::status::{contract_status, ContractStatus};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 11, 5).unwrap();
/// assert_eq!(
///     contract_status(Some(end), today, 30),
///     ContractStatus::Expiring { days_remaining: 17 }
/// );
/// assert_eq!(contract_status(None, today, 30), ContractStatus::Permanent);
/// ```
pub fn contract_status(
    contract_end: Option<NaiveDate>,
    today: NaiveDate,
    window_days: u32,
) -> ContractStatus {
    let Some(end) = contract_end else {
        return ContractStatus::Permanent;
    };

    let remaining = (end - today).num_days();
    if remaining < 0 {
        ContractStatus::Expired
    } else if remaining <= i64::from(window_days) {
        ContractStatus::Expiring {
            days_remaining: u32::try_from(remaining).unwrap_or(u32::MAX),
        }
    } else {
        ContractStatus::Active
    }
}
