//! Authorization roles.
//!
//! A [`Role`] is a tag granting access to a subset of routes and actions.
//! Roles are collected into a [`RoleSet`], which always iterates in the
//! declaration order of the enumeration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed enumeration of authorization roles.
///
/// The derived ordering follows declaration order, from least to most
/// privileged, and is the order in which a [`RoleSet`] yields its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Every authenticated person.
    Employee,
    /// Approves requests of direct reports.
    LineManager,
    /// Manages the directory, leave, contracts and recruitment.
    HrAdmin,
    /// Generates and pays payroll.
    PayrollSpecialist,
    /// Full access, including the admin panel.
    SystemAdmin,
}

impl Role {
    /// All roles in canonical order.
    pub const ALL: [Role; 5] = [
        Role::Employee,
        Role::LineManager,
        Role::HrAdmin,
        Role::PayrollSpecialist,
        Role::SystemAdmin,
    ];

    /// Returns the snake_case tag used on the wire and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::LineManager => "line_manager",
            Role::HrAdmin => "hr_admin",
            Role::PayrollSpecialist => "payroll_specialist",
            Role::SystemAdmin => "system_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("unknown role: {}", s))
    }
}

/// An ordered, duplicate-free set of roles.
///
/// # Example
///
/// ```
/// use hrms_engine::models::{Role, RoleSet};
///
/// let roles: RoleSet = [Role::HrAdmin, Role::Employee, Role::HrAdmin].into_iter().collect();
/// assert_eq!(roles.to_vec(), vec![Role::Employee, Role::HrAdmin]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Creates an empty role set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Creates a set holding every role.
    pub fn all() -> Self {
        Role::ALL.into_iter().collect()
    }

    /// Adds a role; returns false if it was already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Returns true if the set holds the role.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Returns true if the set holds at least one of the given roles.
    pub fn contains_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.0.contains(role))
    }

    /// Returns true if no role is held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of roles held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    /// Returns the roles as a vector in canonical order.
    pub fn to_vec(&self) -> Vec<Role> {
        self.iter().collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<Role> for RoleSet {
    fn extend<I: IntoIterator<Item = Role>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}
