//! Role to action permission matrix.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HrmsError, HrmsResult};
use crate::models::{Role, RoleSet};

/// A gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Browse the employee directory.
    ViewDirectory,
    /// Create, edit and deactivate employees and departments.
    ManageEmployees,
    /// Approve or reject leave requests.
    ReviewLeave,
    /// See every leave request rather than one's own.
    ViewAllLeave,
    /// Generate and pay payroll, see everyone's payslips.
    ManagePayroll,
    /// Approve or reject missions.
    ReviewMission,
    /// See the daily attendance report.
    ViewAllAttendance,
    /// Run job postings and candidate pipelines.
    ManageRecruitment,
    /// See and scan expiring contracts.
    ManageContracts,
    /// Open the admin panel.
    ViewAdminPanel,
}

impl Action {
    /// Roles allowed to perform the action.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Action::ViewDirectory => &[
                Role::Employee,
                Role::LineManager,
                Role::HrAdmin,
                Role::PayrollSpecialist,
                Role::SystemAdmin,
            ],
            Action::ManageEmployees => &[Role::HrAdmin, Role::SystemAdmin],
            Action::ReviewLeave => &[Role::LineManager, Role::HrAdmin, Role::SystemAdmin],
            Action::ViewAllLeave => &[Role::HrAdmin, Role::SystemAdmin],
            Action::ManagePayroll => &[Role::PayrollSpecialist, Role::SystemAdmin],
            Action::ReviewMission => &[Role::LineManager, Role::SystemAdmin],
            Action::ViewAllAttendance => &[Role::LineManager, Role::HrAdmin, Role::SystemAdmin],
            Action::ManageRecruitment => &[Role::HrAdmin, Role::SystemAdmin],
            Action::ManageContracts => &[Role::HrAdmin, Role::SystemAdmin],
            Action::ViewAdminPanel => &[Role::SystemAdmin],
        }
    }

    /// Returns the snake_case name of the action.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::ViewDirectory => "view_directory",
            Action::ManageEmployees => "manage_employees",
            Action::ReviewLeave => "review_leave",
            Action::ViewAllLeave => "view_all_leave",
            Action::ManagePayroll => "manage_payroll",
            Action::ReviewMission => "review_mission",
            Action::ViewAllAttendance => "view_all_attendance",
            Action::ManageRecruitment => "manage_recruitment",
            Action::ManageContracts => "manage_contracts",
            Action::ViewAdminPanel => "view_admin_panel",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if any held role grants the action.
pub fn can(roles: &RoleSet, action: Action) -> bool {
    roles.contains_any(action.allowed_roles())
}

/// Fails with [`HrmsError::Forbidden`] unless a held role grants the action.
///
/// # Example
///
/// ```
/// use hrms_engine::models::{Role, RoleSet};
/// use hrms_engine::roles::{authorize, Action};
///
/// let roles: RoleSet = [Role::Employee].into_iter().collect();
/// assert!(authorize(&roles, Action::ViewDirectory).is_ok());
/// assert!(authorize(&roles, Action::ManagePayroll).is_err());
/// ```
pub fn authorize(roles: &RoleSet, action: Action) -> HrmsResult<()> {
    if can(roles, action) {
        Ok(())
    } else {
        Err(HrmsError::Forbidden {
            action: action.to_string(),
        })
    }
}
