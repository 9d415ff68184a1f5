//! Status derivation helpers.
//!
//! Pure functions computing display labels from stored dates and configured
//! thresholds: attendance punctuality, contract expiry and leave day counts.
//! Each call is independent and idempotent.

mod attendance;
mod contract;
mod leave;

pub use attendance::{AttendanceAssessment, AttendanceStatus, assess_attendance};
pub use contract::{ContractStatus, contract_status};
pub use leave::{
    LeaveBalance, leave_balance, overlapping_working_days, working_days, working_days_in_year,
};
