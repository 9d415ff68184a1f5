//! Role-aware landing page summary.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::HrmsResult;
use crate::models::{
    Identity, LeaveStatus, LeaveType, MissionStatus, PayrollStatus, PostingStatus, Role, RoleSet,
};
use crate::roles::{Action, resolve_explicit_roles};
use crate::status::{AttendanceAssessment, AttendanceStatus, LeaveBalance};

use super::{Actor, HrmsStore};

/// Figures every employee sees about themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSection {
    /// Unread notifications.
    pub unread_notifications: usize,
    /// Own leave requests awaiting review.
    pub pending_leave_requests: usize,
    /// Annual leave balance for the current year, when capped.
    pub annual_leave: Option<LeaveBalance>,
    /// Today's attendance.
    pub attendance_today: AttendanceAssessment,
}

/// Figures about a line manager's direct reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSection {
    /// Active direct reports.
    pub team_size: usize,
    /// Pending leave requests of the team.
    pub pending_leave_requests: usize,
    /// Pending missions of the team.
    pub pending_missions: usize,
    /// Team members who checked in today.
    pub present_today: usize,
}

/// Organisation-wide HR figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrSection {
    /// Active employees.
    pub headcount: usize,
    /// Active employees on approved leave today.
    pub on_leave_today: usize,
    /// Contracts inside the expiry window.
    pub expiring_contracts: usize,
    /// Postings accepting applications.
    pub open_postings: usize,
    /// Candidates not yet hired or rejected.
    pub candidates_in_pipeline: usize,
}

/// Payroll run figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSection {
    /// Payrolls generated but not paid.
    pub draft_payrolls: usize,
    /// Net total of the drafts.
    pub draft_net_total: Decimal,
}

/// Access-control overview for administrators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSection {
    /// Active employees holding each role through claims or the email table.
    pub role_counts: BTreeMap<Role, usize>,
    /// Active employees whose email matches no rule and would get the fallback.
    pub fallback_identities: usize,
}

/// The dashboard; a section is present only for callers holding its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    /// The caller's roles.
    pub roles: RoleSet,
    /// Self-service figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSection>,
    /// Team figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<ManagerSection>,
    /// HR figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr: Option<HrSection>,
    /// Payroll figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payroll: Option<PayrollSection>,
    /// Administration figures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<AdminSection>,
}

impl HrmsStore {
    /// Builds the caller's dashboard for `today`.
    pub fn dashboard(&self, actor: &Actor, today: NaiveDate) -> HrmsResult<Dashboard> {
        let employee_id = actor.employee_id.as_deref();

        let employee = match employee_id {
            Some(id) if actor.has_role(Role::Employee) => Some(self.employee_section(id, today)),
            _ => None,
        };
        let manager = match employee_id {
            Some(id) if actor.has_role(Role::LineManager) => Some(self.manager_section(id, today)),
            _ => None,
        };
        let hr = actor
            .has_role(Role::HrAdmin)
            .then(|| self.hr_section(today));
        let payroll = actor
            .has_role(Role::PayrollSpecialist)
            .then(|| self.payroll_section());
        let admin = actor
            .can(Action::ViewAdminPanel)
            .then(|| self.admin_section());

        Ok(Dashboard {
            roles: actor.roles.clone(),
            employee,
            manager,
            hr,
            payroll,
            admin,
        })
    }

    fn employee_section(&self, employee_id: &str, today: NaiveDate) -> EmployeeSection {
        EmployeeSection {
            unread_notifications: self.notifications.unread_count(employee_id),
            pending_leave_requests: self
                .leave_requests
                .iter()
                .filter(|r| r.employee_id == employee_id && r.status == LeaveStatus::Pending)
                .count(),
            annual_leave: self
                .leave_balances(employee_id, today.year())
                .into_iter()
                .find(|b| b.leave_type == LeaveType::Annual),
            attendance_today: self.assessment_for(employee_id, today),
        }
    }

    fn manager_section(&self, manager_id: &str, today: NaiveDate) -> ManagerSection {
        let team = self.direct_reports(manager_id);
        let in_team = |id: &str| team.iter().any(|e| e.id == id);

        ManagerSection {
            team_size: team.len(),
            pending_leave_requests: self
                .leave_requests
                .iter()
                .filter(|r| r.status == LeaveStatus::Pending && in_team(&r.employee_id))
                .count(),
            pending_missions: self
                .missions
                .iter()
                .filter(|m| m.status == MissionStatus::Pending && in_team(&m.employee_id))
                .count(),
            present_today: team
                .iter()
                .filter(|e| {
                    !matches!(
                        self.assessment_for(&e.id, today).status,
                        AttendanceStatus::Absent | AttendanceStatus::OnLeave
                    )
                })
                .count(),
        }
    }

    fn hr_section(&self, today: NaiveDate) -> HrSection {
        let active: Vec<_> = self.employees.iter().filter(|e| e.is_active()).collect();
        HrSection {
            headcount: active.len(),
            on_leave_today: active
                .iter()
                .filter(|e| self.is_on_leave(&e.id, today))
                .count(),
            expiring_contracts: self.expiring_on(today).len(),
            open_postings: self.job_postings(Some(PostingStatus::Open)).len(),
            candidates_in_pipeline: self
                .candidates
                .iter()
                .filter(|c| !c.stage.is_terminal())
                .count(),
        }
    }

    fn payroll_section(&self) -> PayrollSection {
        let drafts: Vec<_> = self
            .payrolls
            .iter()
            .filter(|p| p.status == PayrollStatus::Draft)
            .collect();
        PayrollSection {
            draft_payrolls: drafts.len(),
            draft_net_total: drafts.iter().map(|p| p.net_salary).sum(),
        }
    }

    fn admin_section(&self) -> AdminSection {
        let mut role_counts: BTreeMap<Role, usize> = Role::ALL.iter().map(|&r| (r, 0)).collect();
        let mut fallback_identities = 0;

        for employee in self.employees.iter().filter(|e| e.is_active()) {
            let identity = Identity::from_email(employee.email.as_str());
            match resolve_explicit_roles(&identity, &self.roles) {
                Some(roles) => {
                    for role in roles.iter() {
                        *role_counts.entry(role).or_default() += 1;
                    }
                }
                None => fallback_identities += 1,
            }
        }

        AdminSection {
            role_counts,
            fallback_identities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_employee_sees_only_own_section() {
        let store = store();
        let dashboard = store.dashboard(&actor(&store, AMINA), today()).unwrap();

        assert!(dashboard.manager.is_none());
        assert!(dashboard.hr.is_none());
        assert!(dashboard.admin.is_none());
        let section = dashboard.employee.unwrap();
        assert_eq!(section.unread_notifications, 1);
        assert_eq!(section.pending_leave_requests, 1);
        assert_eq!(section.annual_leave.unwrap().remaining, 20);
        assert_eq!(section.attendance_today.status, AttendanceStatus::InProgress);
    }

    #[test]
    fn test_manager_section_counts_team() {
        let store = store();
        let dashboard = store.dashboard(&actor(&store, LEE), today()).unwrap();
        let section = dashboard.manager.unwrap();

        assert_eq!(section.team_size, 2);
        assert_eq!(section.pending_leave_requests, 1);
        assert_eq!(section.pending_missions, 1);
        assert_eq!(section.present_today, 1);
    }

    #[test]
    fn test_hr_section() {
        let store = store();
        let section = store
            .dashboard(&actor(&store, SARA), today())
            .unwrap()
            .hr
            .unwrap();
        assert_eq!(section.headcount, 7);
        assert_eq!(section.on_leave_today, 1);
        assert_eq!(section.expiring_contracts, 1);
        assert_eq!(section.open_postings, 1);
        assert_eq!(section.candidates_in_pipeline, 2);
    }

    #[test]
    fn test_payroll_section_totals_drafts() {
        let mut store = store();
        let omar = actor(&store, OMAR);
        assert_eq!(
            store.dashboard(&omar, today()).unwrap().payroll.unwrap().draft_payrolls,
            0
        );

        store.generate_payroll(&omar, 2026, 10, now()).unwrap();
        let section = store.dashboard(&omar, today()).unwrap().payroll.unwrap();
        assert_eq!(section.draft_payrolls, 7);
        let expected: Decimal = store
            .payrolls
            .iter()
            .filter(|p| p.status == PayrollStatus::Draft)
            .map(|p| p.net_salary)
            .sum();
        assert_eq!(section.draft_net_total, expected);
    }

    #[test]
    fn test_admin_section_counts_roles_and_fallbacks() {
        let store = store();
        let dashboard = store.dashboard(&actor(&store, ADMIN), today()).unwrap();
        assert!(dashboard.employee.is_some());
        assert!(dashboard.hr.is_some());

        let admin = dashboard.admin.unwrap();
        assert_eq!(admin.fallback_identities, 1);
        assert_eq!(admin.role_counts[&Role::Employee], 6);
        assert_eq!(admin.role_counts[&Role::SystemAdmin], 1);
        assert_eq!(admin.role_counts[&Role::HrAdmin], 2);
        assert_eq!(admin.role_counts[&Role::LineManager], 2);
    }

    #[test]
    fn test_admin_section_requires_admin_panel_access() {
        let store = store();
        let sara = actor(&store, SARA);
        assert!(!sara.can(Action::ViewAdminPanel));
        assert!(store.dashboard(&sara, today()).unwrap().admin.is_none());
        assert!(store.dashboard(&actor(&store, OMAR), today()).unwrap().admin.is_none());

        let admin = actor(&store, ADMIN);
        assert!(admin.can(Action::ViewAdminPanel));
        assert!(store.dashboard(&admin, today()).unwrap().admin.is_some());
    }

    #[test]
    fn test_fallback_identity_gets_every_section() {
        let store = store();
        let dashboard = store.dashboard(&actor(&store, LINA), today()).unwrap();
        assert!(dashboard.employee.is_some());
        assert!(dashboard.manager.is_some());
        assert!(dashboard.hr.is_some());
        assert!(dashboard.payroll.is_some());
        assert!(dashboard.admin.is_some());
    }
}
