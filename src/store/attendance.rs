//! Attendance punches and the daily report.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{AttendanceRecord, Employee, Role};
use crate::roles::Action;
use crate::status::{AttendanceAssessment, assess_attendance};

use super::{Actor, HrmsStore, new_id};

/// One line of the daily attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRow {
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Their department.
    pub department_id: String,
    /// The derived status.
    pub assessment: AttendanceAssessment,
}

impl HrmsStore {
    /// Records the caller's arrival at office-local time `at`.
    pub fn check_in(&mut self, actor: &Actor, at: NaiveDateTime) -> HrmsResult<AttendanceRecord> {
        let employee_id = actor.require_employee()?.to_string();
        let (date, time) = (at.date(), whole_seconds(at.time()));

        if let Some(record) = self
            .attendance
            .iter_mut()
            .find(|r| r.employee_id == employee_id && r.date == date)
        {
            if record.check_in.is_some() {
                return Err(HrmsError::Conflict {
                    message: format!("already checked in on {}", date),
                });
            }
            record.check_in = Some(time);
            info!(employee_id = %employee_id, %date, %time, "Checked in");
            return Ok(record.clone());
        }

        let record = AttendanceRecord {
            id: new_id("att"),
            employee_id: employee_id.clone(),
            date,
            check_in: Some(time),
            check_out: None,
        };
        self.attendance.push(record.clone());
        info!(employee_id = %employee_id, %date, %time, "Checked in");
        Ok(record)
    }

    /// Records the caller's departure at office-local time `at`.
    pub fn check_out(&mut self, actor: &Actor, at: NaiveDateTime) -> HrmsResult<AttendanceRecord> {
        let employee_id = actor.require_employee()?;
        let (date, time) = (at.date(), whole_seconds(at.time()));

        let record = self
            .attendance
            .iter_mut()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .filter(|r| r.check_in.is_some())
            .ok_or_else(|| HrmsError::Conflict {
                message: format!("not checked in on {}", date),
            })?;
        if record.check_out.is_some() {
            return Err(HrmsError::Conflict {
                message: format!("already checked out on {}", date),
            });
        }
        if record.check_in.is_some_and(|check_in| time < check_in) {
            return Err(HrmsError::validation(
                "check_out",
                "must not be before check-in",
            ));
        }
        record.check_out = Some(time);
        info!(employee_id = %employee_id, %date, %time, "Checked out");
        Ok(record.clone())
    }

    /// The derived attendance status of an employee on a date.
    pub fn assessment_for(&self, employee_id: &str, date: NaiveDate) -> AttendanceAssessment {
        let record = self
            .attendance
            .iter()
            .find(|r| r.employee_id == employee_id && r.date == date);
        assess_attendance(
            record,
            self.is_on_leave(employee_id, date),
            &self.policies.attendance,
        )
    }

    /// Attendance of every active employee the caller oversees on a date.
    ///
    /// HR and admins see the whole directory; line managers see their
    /// direct reports.
    pub fn daily_report(&self, actor: &Actor, date: NaiveDate) -> HrmsResult<Vec<AttendanceRow>> {
        actor.authorize(Action::ViewAllAttendance)?;
        let sees_all = actor.has_role(Role::HrAdmin) || actor.has_role(Role::SystemAdmin);
        let scope: Vec<&Employee> = if sees_all {
            self.employees.iter().filter(|e| e.is_active()).collect()
        } else {
            self.direct_reports(actor.require_employee()?)
        };

        Ok(scope
            .into_iter()
            .map(|employee| AttendanceRow {
                employee_id: employee.id.clone(),
                employee_name: employee.full_name(),
                department_id: employee.department_id.clone(),
                assessment: self.assessment_for(&employee.id, date),
            })
            .collect())
    }
}

fn whole_seconds(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}
