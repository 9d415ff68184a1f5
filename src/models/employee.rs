//! Employee directory models.
//!
//! This module defines the Employee, Department and Position records and
//! the enums describing an employee's arrangement and status.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contractor.
    Contractor,
}

/// Where an employee stands in the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently working.
    Active,
    /// On extended leave.
    OnLeave,
    /// Deactivated; kept in the directory but excluded from payroll and reports.
    Inactive,
}

/// An employee in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Work email; also the sign-in identity.
    pub email: String,
    /// The department the employee belongs to.
    pub department_id: String,
    /// The position the employee holds.
    pub position_id: String,
    /// The employee's line manager, if any.
    #[serde(default)]
    pub manager_id: Option<String>,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// Directory status.
    pub status: EmployeeStatus,
    /// The date the employee started employment.
    pub hire_date: NaiveDate,
    /// Last day of a fixed-term contract; `None` for permanent staff.
    #[serde(default)]
    pub contract_end: Option<NaiveDate>,
    /// Monthly base salary.
    pub base_salary: Decimal,
}

impl Employee {
    /// Returns "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true unless the employee has been deactivated.
    ///
    /// # Examples
    ///
    /// ```
    /// use hrms_engine::models::{Employee, EmployeeStatus, EmploymentType};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     first_name: "Amina".to_string(),
    ///     last_name: "Diallo".to_string(),
    ///     email: "amina@acme.test".to_string(),
    ///     department_id: "dep_eng".to_string(),
    ///     position_id: "pos_dev".to_string(),
    ///     manager_id: None,
    ///     employment_type: EmploymentType::FullTime,
    ///     status: EmployeeStatus::Active,
    ///     hire_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     contract_end: None,
    ///     base_salary: Decimal::new(4200, 0),
    /// };
    /// assert!(employee.is_active());
    /// employee.status = EmployeeStatus::Inactive;
    /// assert!(!employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status != EmployeeStatus::Inactive
    }

    /// Returns true if the email matches, ignoring case and surrounding whitespace.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

/// An organisational unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The employee heading the department.
    #[serde(default)]
    pub head_id: Option<String>,
}

/// A job position within a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Unique identifier.
    pub id: String,
    /// Job title.
    pub title: String,
    /// Owning department.
    pub department_id: String,
    /// Pay grade label.
    pub grade: String,
}
