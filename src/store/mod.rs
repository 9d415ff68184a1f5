//! The in-memory mock data layer.
//!
//! [`HrmsStore`] holds every record in plain vectors seeded from
//! `seed.yaml`. Its mutators stand in for backend calls: they validate the
//! form, mutate the vectors in place, fan out notifications and return
//! immediately. Nothing is persisted and nothing is ever removed.

mod actor;
mod attendance;
mod contracts;
mod dashboard;
mod directory;
mod forms;
mod leave;
mod missions;
mod payroll;
mod recruitment;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::config::{ConfigLoader, PolicyConfig, RoleConfig};
use crate::error::HrmsResult;
use crate::models::{
    AttendanceRecord, Candidate, Department, Employee, Identity, JobPosting, LeaveRequest,
    Mission, Notification, NotificationDraft, Payroll, Position,
};
use crate::notifications::{NotificationStore, Recipient, dispatch};
use crate::roles::resolve_roles;

pub use actor::Actor;
pub use attendance::AttendanceRow;
pub use contracts::ExpiringContract;
pub use dashboard::{
    AdminSection, Dashboard, EmployeeSection, HrSection, ManagerSection, PayrollSection,
};
pub use forms::{
    EmployeeFilter, EmployeeUpdate, NewCandidate, NewDepartment, NewEmployee, NewJobPosting,
    NewLeaveRequest, NewMission, ReviewDecision,
};
pub use payroll::{PayrollFigures, compute_payroll};

/// Every HRMS record, held in memory.
#[derive(Debug, Clone)]
pub struct HrmsStore {
    roles: RoleConfig,
    policies: PolicyConfig,
    departments: Vec<Department>,
    positions: Vec<Position>,
    employees: Vec<Employee>,
    leave_requests: Vec<LeaveRequest>,
    missions: Vec<Mission>,
    payrolls: Vec<Payroll>,
    attendance: Vec<AttendanceRecord>,
    notifications: NotificationStore,
    job_postings: Vec<JobPosting>,
    candidates: Vec<Candidate>,
}

impl HrmsStore {
    /// Builds a store from the loaded configuration, copying the seed records.
    pub fn from_config(config: &ConfigLoader) -> Self {
        let seed = config.seed().clone();
        info!(
            employees = seed.employees.len(),
            leave_requests = seed.leave_requests.len(),
            notifications = seed.notifications.len(),
            "Seeding in-memory store"
        );
        Self {
            roles: config.roles().clone(),
            policies: config.policies().clone(),
            departments: seed.departments,
            positions: seed.positions,
            employees: seed.employees,
            leave_requests: seed.leave_requests,
            missions: seed.missions,
            payrolls: seed.payrolls,
            attendance: seed.attendance,
            notifications: NotificationStore::with_records(seed.notifications),
            job_postings: seed.job_postings,
            candidates: seed.candidates,
        }
    }

    /// Resolves an identity's roles and links it to its directory record.
    pub fn actor_for(&self, identity: Identity) -> Actor {
        let resolution = resolve_roles(&identity, &self.roles);
        let employee_id = self
            .employee_by_email(&identity.email)
            .map(|employee| employee.id.clone());
        Actor {
            identity,
            roles: resolution.roles,
            source: resolution.source,
            employee_id,
        }
    }

    /// Converts a UTC instant into office-local wall-clock time.
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.naive_utc() + Duration::minutes(i64::from(self.policies.attendance.utc_offset_minutes))
    }

    /// The role resolution tables.
    pub fn role_config(&self) -> &RoleConfig {
        &self.roles
    }

    /// The business policies.
    pub fn policies(&self) -> &PolicyConfig {
        &self.policies
    }

    /// Notifications addressed to the caller, in insertion order.
    pub fn notifications_for(
        &self,
        actor: &Actor,
        unread_only: bool,
    ) -> HrmsResult<Vec<&Notification>> {
        let employee_id = actor.require_employee()?;
        Ok(self.notifications.for_recipient(employee_id, unread_only))
    }

    /// Number of unread notifications of the caller.
    pub fn unread_notifications(&self, actor: &Actor) -> HrmsResult<usize> {
        let employee_id = actor.require_employee()?;
        Ok(self.notifications.unread_count(employee_id))
    }

    /// Marks one of the caller's notifications read.
    pub fn mark_notification_read(&mut self, actor: &Actor, id: &str) -> HrmsResult<Notification> {
        let employee_id = actor.require_employee()?;
        self.notifications.mark_read(id, employee_id).cloned()
    }

    /// Marks all of the caller's notifications read; returns how many changed.
    pub fn mark_all_notifications_read(&mut self, actor: &Actor) -> HrmsResult<usize> {
        let employee_id = actor.require_employee()?;
        Ok(self.notifications.mark_all_read(employee_id))
    }

    fn notify(
        &mut self,
        targets: &[Recipient],
        draft: NotificationDraft,
        now: DateTime<Utc>,
    ) -> Vec<Notification> {
        dispatch(
            &mut self.notifications,
            targets,
            &self.employees,
            &self.roles,
            draft,
            now,
        )
    }
}

fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
