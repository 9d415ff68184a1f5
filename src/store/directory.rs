//! Employee directory: employees, departments and positions.

use tracing::info;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{Department, Employee, EmployeeStatus, Position};
use crate::roles::Action;

use super::forms::{
    EmployeeFilter, EmployeeUpdate, NewDepartment, NewEmployee, require_email, require_text,
};
use super::{Actor, HrmsStore, new_id};

impl HrmsStore {
    /// Lists employees matching the filter, in directory order.
    pub fn employees(&self, actor: &Actor, filter: &EmployeeFilter) -> HrmsResult<Vec<&Employee>> {
        actor.authorize(Action::ViewDirectory)?;
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Ok(self
            .employees
            .iter()
            .filter(|e| {
                filter
                    .department_id
                    .as_deref()
                    .is_none_or(|dep| e.department_id == dep)
            })
            .filter(|e| filter.status.is_none_or(|status| e.status == status))
            .filter(|e| {
                search.as_deref().is_none_or(|needle| {
                    e.full_name().to_lowercase().contains(needle)
                        || e.email.to_lowercase().contains(needle)
                })
            })
            .collect())
    }

    /// Looks up one employee.
    pub fn employee(&self, id: &str) -> HrmsResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| HrmsError::not_found("employee", id))
    }

    /// The active employee signing in with this email.
    pub fn employee_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.is_active() && e.has_email(email))
    }

    /// Active employees whose line manager is `manager_id`.
    pub fn direct_reports(&self, manager_id: &str) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| e.is_active() && e.manager_id.as_deref() == Some(manager_id))
            .collect()
    }

    /// Returns true if `manager_id` is the line manager of `employee_id`.
    pub fn manages(&self, manager_id: &str, employee_id: &str) -> bool {
        self.employees
            .iter()
            .any(|e| e.id == employee_id && e.manager_id.as_deref() == Some(manager_id))
    }

    /// Adds an employee to the directory.
    pub fn create_employee(&mut self, actor: &Actor, form: NewEmployee) -> HrmsResult<Employee> {
        actor.authorize(Action::ManageEmployees)?;

        let first_name = require_text("first_name", &form.first_name)?;
        let last_name = require_text("last_name", &form.last_name)?;
        let email = require_email("email", &form.email)?;
        self.ensure_email_free(&email, None)?;
        self.ensure_placement(&form.department_id, &form.position_id)?;
        if let Some(manager_id) = form.manager_id.as_deref() {
            self.ensure_manager(manager_id, None)?;
        }
        if form.base_salary.is_sign_negative() {
            return Err(HrmsError::validation("base_salary", "must not be negative"));
        }
        if form.contract_end.is_some_and(|end| end < form.hire_date) {
            return Err(HrmsError::validation(
                "contract_end",
                "must not be before hire_date",
            ));
        }

        let employee = Employee {
            id: new_id("emp"),
            first_name,
            last_name,
            email,
            department_id: form.department_id,
            position_id: form.position_id,
            manager_id: form.manager_id,
            employment_type: form.employment_type,
            status: EmployeeStatus::Active,
            hire_date: form.hire_date,
            contract_end: form.contract_end,
            base_salary: form.base_salary,
        };
        info!(employee_id = %employee.id, by = %actor.identity.email, "Employee created");
        self.employees.push(employee.clone());
        Ok(employee)
    }

    /// Applies a partial edit to an employee.
    pub fn update_employee(
        &mut self,
        actor: &Actor,
        id: &str,
        update: EmployeeUpdate,
    ) -> HrmsResult<Employee> {
        actor.authorize(Action::ManageEmployees)?;
        let mut employee = self.employee(id)?.clone();

        if let Some(first_name) = update.first_name.as_deref() {
            employee.first_name = require_text("first_name", first_name)?;
        }
        if let Some(last_name) = update.last_name.as_deref() {
            employee.last_name = require_text("last_name", last_name)?;
        }
        if let Some(email) = update.email.as_deref() {
            let email = require_email("email", email)?;
            self.ensure_email_free(&email, Some(id))?;
            employee.email = email;
        }
        if let Some(department_id) = update.department_id {
            employee.department_id = department_id;
        }
        if let Some(position_id) = update.position_id {
            employee.position_id = position_id;
        }
        self.ensure_placement(&employee.department_id, &employee.position_id)?;
        if let Some(manager_id) = update.manager_id {
            self.ensure_manager(&manager_id, Some(id))?;
            employee.manager_id = Some(manager_id);
        }
        if let Some(employment_type) = update.employment_type {
            employee.employment_type = employment_type;
        }
        if let Some(status) = update.status {
            if status == EmployeeStatus::Inactive {
                return Err(HrmsError::validation(
                    "status",
                    "use deactivation to make an employee inactive",
                ));
            }
            employee.status = status;
        }
        if let Some(contract_end) = update.contract_end {
            if contract_end < employee.hire_date {
                return Err(HrmsError::validation(
                    "contract_end",
                    "must not be before hire_date",
                ));
            }
            employee.contract_end = Some(contract_end);
        }
        if let Some(base_salary) = update.base_salary {
            if base_salary.is_sign_negative() {
                return Err(HrmsError::validation("base_salary", "must not be negative"));
            }
            employee.base_salary = base_salary;
        }

        if let Some(slot) = self.employees.iter_mut().find(|e| e.id == id) {
            *slot = employee.clone();
        }
        info!(employee_id = %id, by = %actor.identity.email, "Employee updated");
        Ok(employee)
    }

    /// Soft-deletes an employee by marking them inactive.
    pub fn deactivate_employee(&mut self, actor: &Actor, id: &str) -> HrmsResult<Employee> {
        actor.authorize(Action::ManageEmployees)?;
        if actor.employee_id.as_deref() == Some(id) {
            return Err(HrmsError::Conflict {
                message: "you cannot deactivate your own account".to_string(),
            });
        }
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| HrmsError::not_found("employee", id))?;
        if employee.status == EmployeeStatus::Inactive {
            return Err(HrmsError::invalid_transition(
                "employee",
                id,
                "inactive",
                "deactivate",
            ));
        }
        employee.status = EmployeeStatus::Inactive;
        info!(employee_id = %id, by = %actor.identity.email, "Employee deactivated");
        Ok(employee.clone())
    }

    /// All departments.
    pub fn departments(&self, actor: &Actor) -> HrmsResult<&[Department]> {
        actor.authorize(Action::ViewDirectory)?;
        Ok(&self.departments)
    }

    /// Adds a department.
    pub fn create_department(&mut self, actor: &Actor, form: NewDepartment) -> HrmsResult<Department> {
        actor.authorize(Action::ManageEmployees)?;
        let name = require_text("name", &form.name)?;
        if self
            .departments
            .iter()
            .any(|d| d.name.eq_ignore_ascii_case(&name))
        {
            return Err(HrmsError::Conflict {
                message: format!("department '{}' already exists", name),
            });
        }
        if let Some(head_id) = form.head_id.as_deref() {
            self.employee(head_id)?;
        }

        let department = Department {
            id: new_id("dep"),
            name,
            head_id: form.head_id,
        };
        self.departments.push(department.clone());
        Ok(department)
    }

    /// Positions, optionally restricted to one department.
    pub fn positions(&self, actor: &Actor, department_id: Option<&str>) -> HrmsResult<Vec<&Position>> {
        actor.authorize(Action::ViewDirectory)?;
        Ok(self
            .positions
            .iter()
            .filter(|p| department_id.is_none_or(|dep| p.department_id == dep))
            .collect())
    }

    fn ensure_email_free(&self, email: &str, except_id: Option<&str>) -> HrmsResult<()> {
        let taken = self
            .employees
            .iter()
            .any(|e| e.has_email(email) && Some(e.id.as_str()) != except_id);
        if taken {
            return Err(HrmsError::Conflict {
                message: format!("email '{}' is already in use", email),
            });
        }
        Ok(())
    }

    fn ensure_placement(&self, department_id: &str, position_id: &str) -> HrmsResult<()> {
        if !self.departments.iter().any(|d| d.id == department_id) {
            return Err(HrmsError::validation(
                "department_id",
                format!("unknown department '{}'", department_id),
            ));
        }
        let position = self
            .positions
            .iter()
            .find(|p| p.id == position_id)
            .ok_or_else(|| {
                HrmsError::validation("position_id", format!("unknown position '{}'", position_id))
            })?;
        if position.department_id != department_id {
            return Err(HrmsError::validation(
                "position_id",
                format!(
                    "position '{}' does not belong to department '{}'",
                    position_id, department_id
                ),
            ));
        }
        Ok(())
    }

    fn ensure_manager(&self, manager_id: &str, employee_id: Option<&str>) -> HrmsResult<()> {
        if Some(manager_id) == employee_id {
            return Err(HrmsError::validation(
                "manager_id",
                "an employee cannot manage themselves",
            ));
        }
        let manager = self.employee(manager_id).map_err(|_| {
            HrmsError::validation("manager_id", format!("unknown employee '{}'", manager_id))
        })?;
        if !manager.is_active() {
            return Err(HrmsError::validation(
                "manager_id",
                format!("employee '{}' is inactive", manager_id),
            ));
        }
        Ok(())
    }
}
