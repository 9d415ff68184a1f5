//! The caller of a store operation.

use serde::Serialize;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{Identity, Role, RoleSet};
use crate::roles::{Action, ResolutionSource, authorize, can};

/// An authenticated caller with resolved roles and, when the identity is in
/// the directory, the matching employee id.
#[derive(Debug, Clone, Serialize)]
pub struct Actor {
    /// The presented identity.
    pub identity: Identity,
    /// Resolved roles.
    pub roles: RoleSet,
    /// Which resolver branch produced the roles.
    pub source: ResolutionSource,
    /// The caller's directory record, if any.
    pub employee_id: Option<String>,
}

impl Actor {
    /// Fails unless the caller's roles grant the action.
    pub fn authorize(&self, action: Action) -> HrmsResult<()> {
        authorize(&self.roles, action)
    }

    /// Returns true if the caller's roles grant the action.
    pub fn can(&self, action: Action) -> bool {
        can(&self.roles, action)
    }

    /// Returns true if the caller holds the role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    /// The caller's employee id; self-service operations need one.
    pub fn require_employee(&self) -> HrmsResult<&str> {
        self.employee_id
            .as_deref()
            .ok_or_else(|| HrmsError::not_found("employee", &self.identity.email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(roles: &[Role], employee_id: Option<&str>) -> Actor {
        Actor {
            identity: Identity::from_email("someone@acme.test"),
            roles: roles.iter().copied().collect(),
            source: ResolutionSource::EmailPrefix,
            employee_id: employee_id.map(str::to_string),
        }
    }

    #[test]
    fn test_require_employee_without_record() {
        let err = actor(&[Role::Employee], None).require_employee().unwrap_err();
        match err {
            HrmsError::NotFound { entity, id } => {
                assert_eq!(entity, "employee");
                assert_eq!(id, "someone@acme.test");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_authorize_delegates_to_matrix() {
        let hr = actor(&[Role::Employee, Role::HrAdmin], Some("emp_003"));
        assert!(hr.authorize(Action::ManageRecruitment).is_ok());
        assert!(hr.authorize(Action::ManagePayroll).is_err());
        assert!(hr.has_role(Role::HrAdmin));
    }
}
