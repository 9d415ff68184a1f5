//! Core data models for the HRMS engine.
//!
//! This module contains the plain records held by the in-memory store.

mod attendance;
mod employee;
mod identity;
mod leave;
mod mission;
mod notification;
mod payroll;
mod recruitment;
mod role;

pub use attendance::AttendanceRecord;
pub use employee::{Department, Employee, EmployeeStatus, EmploymentType, Position};
pub use identity::Identity;
pub use leave::{LeaveRequest, LeaveStatus, LeaveType};
pub use mission::{Mission, MissionStatus};
pub use notification::{Notification, NotificationDraft, NotificationKind};
pub use payroll::{Payroll, PayrollStatus};
pub use recruitment::{Candidate, CandidateStage, JobPosting, PostingStatus};
pub use role::{Role, RoleSet};
