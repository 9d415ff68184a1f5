//! Leave request workflow.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::info;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{
    LeaveRequest, LeaveStatus, LeaveType, NotificationDraft, NotificationKind, Role,
};
use crate::notifications::Recipient;
use crate::roles::Action;
use crate::status::{LeaveBalance, leave_balance, working_days, working_days_in_year};

use super::forms::{NewLeaveRequest, ReviewDecision, require_date_order, require_text};
use super::{Actor, HrmsStore, new_id};

impl HrmsStore {
    /// Files a leave request for the caller.
    ///
    /// The request must carry a justification, cover at least one working
    /// day, not overlap another pending or approved request, and fit in the
    /// remaining balance of capped leave types. The line manager and HR are
    /// notified.
    pub fn submit_leave(
        &mut self,
        actor: &Actor,
        form: NewLeaveRequest,
        now: DateTime<Utc>,
    ) -> HrmsResult<LeaveRequest> {
        let employee_id = actor.require_employee()?.to_string();
        let justification = require_text("justification", &form.justification)?;
        require_date_order(form.start_date, form.end_date)?;

        let days = working_days(form.start_date, form.end_date);
        if days == 0 {
            return Err(HrmsError::validation(
                "start_date",
                "the requested range contains no working days",
            ));
        }

        let clash = self.leave_requests.iter().find(|r| {
            r.employee_id == employee_id
                && matches!(r.status, LeaveStatus::Pending | LeaveStatus::Approved)
                && r.start_date <= form.end_date
                && form.start_date <= r.end_date
        });
        if let Some(clash) = clash {
            return Err(HrmsError::Conflict {
                message: format!("overlaps leave request '{}'", clash.id),
            });
        }

        if let Some(entitlement) = self.policies.leave.entitlement(form.leave_type) {
            // Each calendar year draws on its own entitlement.
            for year in form.start_date.year()..=form.end_date.year() {
                let in_year = working_days_in_year(form.start_date, form.end_date, year);
                if in_year == 0 {
                    continue;
                }
                let balance = leave_balance(
                    &self.leave_requests,
                    &employee_id,
                    form.leave_type,
                    year,
                    entitlement,
                );
                let available = balance.remaining.saturating_sub(balance.pending);
                if in_year > available {
                    return Err(HrmsError::validation(
                        "end_date",
                        format!(
                            "requested {} day(s) of {} leave in {} but only {} remain",
                            in_year, form.leave_type, year, available
                        ),
                    ));
                }
            }
        }

        let request = LeaveRequest {
            id: new_id("lv"),
            employee_id: employee_id.clone(),
            leave_type: form.leave_type,
            start_date: form.start_date,
            end_date: form.end_date,
            justification,
            days,
            status: LeaveStatus::Pending,
            reviewer_id: None,
            reviewer_comment: None,
            reviewed_at: None,
            created_at: now,
        };
        self.leave_requests.push(request.clone());
        info!(leave_id = %request.id, employee_id = %employee_id, days, "Leave request submitted");

        let name = self.display_name(&employee_id);
        let draft = NotificationDraft::new(
            NotificationKind::LeaveRequest,
            "Leave request to review",
            format!(
                "{} requested {} day(s) of {} leave.",
                name, days, request.leave_type
            ),
        )
        .with_link(format!("/leave-requests/{}", request.id));
        self.notify(
            &[
                Recipient::ManagerOf(employee_id),
                Recipient::Role(Role::HrAdmin),
            ],
            draft,
            now,
        );

        Ok(request)
    }

    /// Leave requests visible to the caller, newest first.
    ///
    /// HR and admins see everything, line managers see their own and their
    /// reports' requests, everyone else sees their own.
    pub fn leave_requests_for(&self, actor: &Actor) -> HrmsResult<Vec<&LeaveRequest>> {
        let mut visible: Vec<&LeaveRequest> = if actor.can(Action::ViewAllLeave) {
            self.leave_requests.iter().collect()
        } else {
            let own = actor.require_employee()?;
            let is_manager = actor.has_role(Role::LineManager);
            self.leave_requests
                .iter()
                .filter(|r| r.employee_id == own || (is_manager && self.manages(own, &r.employee_id)))
                .collect()
        };
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }

    /// Looks up one leave request.
    pub fn leave_request(&self, id: &str) -> HrmsResult<&LeaveRequest> {
        self.leave_requests
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| HrmsError::not_found("leave_request", id))
    }

    /// Approves or rejects a pending leave request and notifies its owner.
    pub fn review_leave(
        &mut self,
        actor: &Actor,
        id: &str,
        decision: ReviewDecision,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> HrmsResult<LeaveRequest> {
        actor.authorize(Action::ReviewLeave)?;
        let reviewer_id = actor.require_employee()?.to_string();
        let action = match decision {
            ReviewDecision::Approve => "approve",
            ReviewDecision::Reject => "reject",
        };

        let request = self.leave_request(id)?;
        if request.status != LeaveStatus::Pending {
            return Err(HrmsError::invalid_transition(
                "leave_request",
                id,
                request.status,
                action,
            ));
        }
        if request.employee_id == reviewer_id {
            return Err(HrmsError::Forbidden {
                action: "review your own leave request".to_string(),
            });
        }
        let reviews_any = actor.has_role(Role::HrAdmin) || actor.has_role(Role::SystemAdmin);
        if !reviews_any && !self.manages(&reviewer_id, &request.employee_id) {
            return Err(HrmsError::Forbidden {
                action: "review leave outside your team".to_string(),
            });
        }

        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        let Some(request) = self.leave_requests.iter_mut().find(|r| r.id == id) else {
            return Err(HrmsError::not_found("leave_request", id));
        };
        request.status = match decision {
            ReviewDecision::Approve => LeaveStatus::Approved,
            ReviewDecision::Reject => LeaveStatus::Rejected,
        };
        request.reviewer_id = Some(reviewer_id.clone());
        request.reviewer_comment = comment;
        request.reviewed_at = Some(now);
        let request = request.clone();
        info!(leave_id = %id, reviewer_id = %reviewer_id, status = %request.status, "Leave request reviewed");

        let mut message = format!(
            "Your {} leave from {} to {} was {}.",
            request.leave_type, request.start_date, request.end_date, request.status
        );
        if let Some(comment) = request.reviewer_comment.as_deref() {
            message.push_str(&format!(" Comment: {}", comment));
        }
        let draft = NotificationDraft::new(
            NotificationKind::LeaveDecision,
            format!("Leave request {}", request.status),
            message,
        )
        .with_link(format!("/leave-requests/{}", request.id));
        self.notify(&[Recipient::Employee(request.employee_id.clone())], draft, now);

        Ok(request)
    }

    /// Withdraws one of the caller's pending requests.
    pub fn cancel_leave(&mut self, actor: &Actor, id: &str) -> HrmsResult<LeaveRequest> {
        let employee_id = actor.require_employee()?;
        let request = self
            .leave_requests
            .iter_mut()
            .find(|r| r.id == id && r.employee_id == employee_id)
            .ok_or_else(|| HrmsError::not_found("leave_request", id))?;
        if request.status != LeaveStatus::Pending {
            return Err(HrmsError::invalid_transition(
                "leave_request",
                id,
                request.status,
                "cancel",
            ));
        }
        request.status = LeaveStatus::Cancelled;
        info!(leave_id = %id, "Leave request cancelled");
        Ok(request.clone())
    }

    /// Balances of every capped leave type for an employee and year.
    pub fn leave_balances(&self, employee_id: &str, year: i32) -> Vec<LeaveBalance> {
        LeaveType::ALL
            .iter()
            .filter_map(|&leave_type| {
                self.policies
                    .leave
                    .entitlement(leave_type)
                    .map(|entitlement| {
                        leave_balance(
                            &self.leave_requests,
                            employee_id,
                            leave_type,
                            year,
                            entitlement,
                        )
                    })
            })
            .collect()
    }

    /// Returns true if the employee has approved leave covering the date.
    pub fn is_on_leave(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.leave_requests
            .iter()
            .any(|r| r.employee_id == employee_id && r.is_approved_on(date))
    }

    pub(crate) fn display_name(&self, employee_id: &str) -> String {
        self.employee(employee_id)
            .map(|e| e.full_name())
            .unwrap_or_else(|_| employee_id.to_string())
    }
}
