//! Monthly payroll generation and payment.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PayrollPolicy;
use crate::error::{HrmsError, HrmsResult};
use crate::models::{
    Employee, LeaveStatus, LeaveType, NotificationDraft, NotificationKind, Payroll, PayrollStatus,
};
use crate::notifications::Recipient;
use crate::roles::Action;
use crate::status::overlapping_working_days;

use super::{Actor, HrmsStore, new_id};

/// The amounts of one payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFigures {
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Fixed allowances.
    pub allowances: Decimal,
    /// Discretionary bonus.
    pub bonus: Decimal,
    /// Base plus allowances plus bonus.
    pub gross: Decimal,
    /// Social security plus unpaid leave.
    pub deductions: Decimal,
    /// Gross minus deductions.
    pub net: Decimal,
}

/// Computes an employee's payslip for a month.
///
/// # Arguments
///
/// * `employee` - The paid employee
/// * `unpaid_days` - Approved unpaid leave working days inside the month
/// * `policy` - Allowance, social security rate and the daily rate divisor
///
/// # Returns
///
/// The payslip amounts, each rounded to two decimal places. The daily rate
/// for unpaid leave is `base_salary / working_days_per_month`.
///
/// # Errors
///
/// `HrmsError::Validation` on `base_salary` when an amount overflows.
///
/// # Examples
///
/// ```
/// use hrms_engine::config::PayrollPolicy;
/// use hrms_engine::models::{Employee, EmployeeStatus, EmploymentType};
/// use hrms_engine::store::compute_payroll;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     first_name: "Amina".to_string(),
///     last_name: "Diallo".to_string(),
///     email: "employee.amina@acme.test".to_string(),
///     department_id: "dep_eng".to_string(),
///     position_id: "pos_dev".to_string(),
///     manager_id: None,
///     employment_type: EmploymentType::FullTime,
///     status: EmployeeStatus::Active,
///     hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     contract_end: None,
///     base_salary: Decimal::from_str("4200.00").unwrap(),
/// };
/// let policy = PayrollPolicy {
///     transport_allowance: Decimal::from_str("150.00").unwrap(),
///     social_security_rate: Decimal::from_str("0.07").unwrap(),
///     working_days_per_month: 22,
/// };
///
/// let figures = compute_payroll(&employee, 0, &policy).unwrap();
/// assert_eq!(figures.gross, Decimal::from_str("4350.00").unwrap());
/// assert_eq!(figures.deductions, Decimal::from_str("304.50").unwrap());
/// assert_eq!(figures.net, Decimal::from_str("4045.50").unwrap());
/// ```
pub fn compute_payroll(
    employee: &Employee,
    unpaid_days: u32,
    policy: &PayrollPolicy,
) -> HrmsResult<PayrollFigures> {
    let overflow = || {
        HrmsError::validation(
            "base_salary",
            format!("payroll amounts for employee '{}' are out of range", employee.id),
        )
    };

    let base_salary = employee.base_salary;
    let allowances = policy.transport_allowance;
    let bonus = Decimal::ZERO;
    let gross = base_salary
        .checked_add(allowances)
        .and_then(|sum| sum.checked_add(bonus))
        .ok_or_else(overflow)?;

    let social_security = gross.checked_mul(policy.social_security_rate).ok_or_else(overflow)?;
    let unpaid_leave = if unpaid_days == 0 || policy.working_days_per_month == 0 {
        Decimal::ZERO
    } else {
        base_salary
            .checked_div(Decimal::from(policy.working_days_per_month))
            .and_then(|daily| daily.checked_mul(Decimal::from(unpaid_days)))
            .ok_or_else(overflow)?
    };
    let deductions = social_security
        .checked_add(unpaid_leave)
        .ok_or_else(overflow)?
        .round_dp(2);
    let net = gross.checked_sub(deductions).ok_or_else(overflow)?;

    Ok(PayrollFigures {
        base_salary: base_salary.round_dp(2),
        allowances: allowances.round_dp(2),
        bonus,
        gross: gross.round_dp(2),
        deductions,
        net: net.round_dp(2),
    })
}

impl HrmsStore {
    /// Generates draft payrolls for a month.
    ///
    /// Every active employee without a payroll for the month gets one;
    /// returns only the newly created records. Nothing is stored when any
    /// payslip fails to compute.
    pub fn generate_payroll(
        &mut self,
        actor: &Actor,
        year: i32,
        month: u32,
        now: DateTime<Utc>,
    ) -> HrmsResult<Vec<Payroll>> {
        actor.authorize(Action::ManagePayroll)?;
        let (first, last) = month_bounds(year, month)
            .ok_or_else(|| HrmsError::validation("month", format!("invalid month {}-{}", year, month)))?;

        let mut created = Vec::new();
        for employee in self.employees.iter().filter(|e| e.is_active()) {
            let exists = self
                .payrolls
                .iter()
                .any(|p| p.employee_id == employee.id && p.period == first);
            if exists {
                debug!(employee_id = %employee.id, period = %first, "Payroll already exists");
                continue;
            }

            let unpaid_days: u32 = self
                .leave_requests
                .iter()
                .filter(|r| {
                    r.employee_id == employee.id
                        && r.leave_type == LeaveType::Unpaid
                        && r.status == LeaveStatus::Approved
                })
                .map(|r| overlapping_working_days(r.start_date, r.end_date, first, last))
                .sum();

            let figures = compute_payroll(employee, unpaid_days, &self.policies.payroll)?;
            created.push(Payroll {
                id: new_id("pr"),
                employee_id: employee.id.clone(),
                period: first,
                base_salary: figures.base_salary,
                allowances: figures.allowances,
                bonus: figures.bonus,
                deductions: figures.deductions,
                unpaid_leave_days: unpaid_days,
                net_salary: figures.net,
                status: PayrollStatus::Draft,
                created_at: now,
                paid_at: None,
            });
        }

        info!(period = %first, created = created.len(), "Payroll generated");
        self.payrolls.extend(created.iter().cloned());
        Ok(created)
    }

    /// Payrolls visible to the caller: all with payroll rights, else their own.
    pub fn payrolls_for(&self, actor: &Actor) -> HrmsResult<Vec<&Payroll>> {
        let mut visible: Vec<&Payroll> = if actor.can(Action::ManagePayroll) {
            self.payrolls.iter().collect()
        } else {
            let own = actor.require_employee()?;
            self.payrolls.iter().filter(|p| p.employee_id == own).collect()
        };
        visible.sort_by(|a, b| {
            b.period
                .cmp(&a.period)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(visible)
    }

    /// Marks a draft payroll paid and notifies the employee.
    pub fn pay_payroll(&mut self, actor: &Actor, id: &str, now: DateTime<Utc>) -> HrmsResult<Payroll> {
        actor.authorize(Action::ManagePayroll)?;
        let payroll = self
            .payrolls
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| HrmsError::not_found("payroll", id))?;
        if payroll.status != PayrollStatus::Draft {
            return Err(HrmsError::invalid_transition("payroll", id, payroll.status, "pay"));
        }
        payroll.status = PayrollStatus::Paid;
        payroll.paid_at = Some(now);
        let payroll = payroll.clone();
        info!(payroll_id = %id, employee_id = %payroll.employee_id, "Payroll paid");

        let draft = NotificationDraft::new(
            NotificationKind::Payroll,
            "Payslip available",
            format!(
                "Your {} payslip has been paid: {}.",
                payroll.period.format("%B %Y"),
                payroll.net_salary
            ),
        )
        .with_link(format!("/payroll/{}", payroll.id));
        self.notify(&[Recipient::Employee(payroll.employee_id.clone())], draft, now);

        Ok(payroll)
    }
}

fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}
