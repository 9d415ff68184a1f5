//! Configuration types for the HRMS engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a configuration directory.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{
    AttendanceRecord, Candidate, Department, Employee, JobPosting, LeaveRequest, LeaveType,
    Mission, Notification, Payroll, Position, Role,
};

/// Maps a claim substring to the role it grants.
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimKeyword {
    /// Lowercase substring looked for inside each claim.
    pub keyword: String,
    /// The role granted on a match.
    pub role: Role,
}

/// Maps an email local-part prefix to a list of roles.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailPrefixRule {
    /// Lowercase prefix of the part before `@`.
    pub prefix: String,
    /// Roles granted on a match.
    pub roles: Vec<Role>,
}

/// What the resolver grants when neither claims nor the email table match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Grant every role. Demo convenience.
    #[default]
    AllRoles,
    /// Grant only the employee role.
    Employee,
}

/// Role resolution tables from roles.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleConfig {
    /// Claim keywords, checked first.
    #[serde(default)]
    pub claim_keywords: Vec<ClaimKeyword>,
    /// Email prefix table, first match wins.
    #[serde(default)]
    pub email_prefixes: Vec<EmailPrefixRule>,
    /// Behaviour when nothing matches.
    #[serde(default)]
    pub fallback: Fallback,
}

/// Punctuality thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendancePolicy {
    /// Official start of the working day.
    pub work_start: NaiveTime,
    /// Minutes after `work_start` before an arrival counts as late.
    pub late_grace_minutes: u32,
    /// Checked-out days shorter than this count as half days.
    pub half_day_hours: Decimal,
    /// Offset of the office's local time from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Contract expiry thresholds.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractPolicy {
    /// Days before the end date from which a contract counts as expiring.
    pub expiring_window_days: u32,
}

/// Yearly leave entitlements.
#[derive(Debug, Clone, Deserialize)]
pub struct LeavePolicy {
    /// Working days per year for each capped leave type. Types absent from
    /// the map are uncapped.
    pub entitlements: HashMap<LeaveType, u32>,
}

impl LeavePolicy {
    /// The yearly entitlement of a leave type, if capped.
    pub fn entitlement(&self, leave_type: LeaveType) -> Option<u32> {
        self.entitlements.get(&leave_type).copied()
    }
}

/// Payroll generation parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollPolicy {
    /// Fixed monthly allowance added to every payslip.
    pub transport_allowance: Decimal,
    /// Share of gross pay withheld (e.g. 0.07).
    pub social_security_rate: Decimal,
    /// Divisor used to derive a daily rate for unpaid leave.
    pub working_days_per_month: u32,
}

/// Business rules from policies.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Attendance thresholds.
    pub attendance: AttendancePolicy,
    /// Contract thresholds.
    pub contracts: ContractPolicy,
    /// Leave entitlements.
    pub leave: LeavePolicy,
    /// Payroll parameters.
    pub payroll: PayrollPolicy,
}

/// Mock records from seed.yaml, loaded into the store at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    /// Departments.
    #[serde(default)]
    pub departments: Vec<Department>,
    /// Positions.
    #[serde(default)]
    pub positions: Vec<Position>,
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Leave requests.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
    /// Missions.
    #[serde(default)]
    pub missions: Vec<Mission>,
    /// Payroll records.
    #[serde(default)]
    pub payrolls: Vec<Payroll>,
    /// Attendance punches.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
    /// Notifications.
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// Job postings.
    #[serde(default)]
    pub job_postings: Vec<JobPosting>,
    /// Candidates.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct HrmsConfig {
    roles: RoleConfig,
    policies: PolicyConfig,
    seed: SeedData,
}

impl HrmsConfig {
    /// Creates a new HrmsConfig from its component parts.
    pub fn new(roles: RoleConfig, policies: PolicyConfig, seed: SeedData) -> Self {
        Self {
            roles,
            policies,
            seed,
        }
    }

    /// Returns the role resolution tables.
    pub fn roles(&self) -> &RoleConfig {
        &self.roles
    }

    /// Returns the business policies.
    pub fn policies(&self) -> &PolicyConfig {
        &self.policies
    }

    /// Returns the seed records.
    pub fn seed(&self) -> &SeedData {
        &self.seed
    }
}
