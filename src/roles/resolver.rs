//! Identity to role resolution.
//!
//! Claims are consulted first, then the email prefix table, then the
//! configured fallback.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{Fallback, RoleConfig};
use crate::models::{Identity, Role, RoleSet};

/// Which branch of the resolver produced the roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// At least one claim matched a keyword.
    Claims,
    /// The email local part matched a prefix rule.
    EmailPrefix,
    /// Nothing matched; the fallback was granted.
    Fallback,
}

/// The outcome of resolving an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResolution {
    /// Granted roles, in canonical order.
    pub roles: RoleSet,
    /// Which branch granted them.
    pub source: ResolutionSource,
}

impl RoleResolution {
    /// Returns true if the roles came from claims or the email table.
    pub fn is_explicit(&self) -> bool {
        self.source != ResolutionSource::Fallback
    }
}

/// Resolves an identity to its roles.
///
/// # Behavior
///
/// 1. Each claim is lowercased and searched for every configured keyword.
///    Any hit grants the keyword's role; the employee role is always added.
/// 2. Otherwise the first email prefix rule matching the local part wins.
/// 3. Otherwise the configured fallback applies, logged at warn level.
///
/// # Example
///
/// ```no_run
/// use hrms_engine::config::ConfigLoader;
/// use hrms_engine::models::{Identity, Role};
/// use hrms_engine::roles::{resolve_roles, ResolutionSource};
///
/// let loader = ConfigLoader::load("./config/hrms").unwrap();
/// let resolution = resolve_roles(&Identity::from_email("hr.sara@acme.test"), loader.roles());
/// assert_eq!(resolution.source, ResolutionSource::EmailPrefix);
/// assert_eq!(resolution.roles.to_vec(), vec![Role::Employee, Role::HrAdmin]);
/// ```
pub fn resolve_roles(identity: &Identity, config: &RoleConfig) -> RoleResolution {
    if let Some(roles) = roles_from_claims(&identity.claims, config) {
        debug!(email = %identity.email, roles = ?roles.to_vec(), "Roles resolved from claims");
        return RoleResolution {
            roles,
            source: ResolutionSource::Claims,
        };
    }

    if let Some(roles) = roles_from_email(identity, config) {
        debug!(email = %identity.email, roles = ?roles.to_vec(), "Roles resolved from email prefix");
        return RoleResolution {
            roles,
            source: ResolutionSource::EmailPrefix,
        };
    }

    let roles = match config.fallback {
        Fallback::AllRoles => RoleSet::all(),
        Fallback::Employee => [Role::Employee].into_iter().collect(),
    };
    warn!(
        email = %identity.email,
        fallback = ?config.fallback,
        "No claim or email rule matched; granting fallback roles"
    );
    RoleResolution {
        roles,
        source: ResolutionSource::Fallback,
    }
}

/// Resolves only from claims and the email table, never the fallback.
///
/// Used when fanning notifications out to a role: an identity nobody
/// configured must not receive every role's mail.
pub fn resolve_explicit_roles(identity: &Identity, config: &RoleConfig) -> Option<RoleSet> {
    roles_from_claims(&identity.claims, config).or_else(|| roles_from_email(identity, config))
}

fn roles_from_claims(claims: &[String], config: &RoleConfig) -> Option<RoleSet> {
    let mut roles = RoleSet::new();
    for claim in claims {
        let claim = claim.to_lowercase();
        roles.extend(
            config
                .claim_keywords
                .iter()
                .filter(|rule| claim.contains(&rule.keyword.to_lowercase()))
                .map(|rule| rule.role),
        );
    }

    if roles.is_empty() {
        return None;
    }
    roles.insert(Role::Employee);
    Some(roles)
}

fn roles_from_email(identity: &Identity, config: &RoleConfig) -> Option<RoleSet> {
    let local = identity.local_part();
    if local.is_empty() {
        return None;
    }

    config
        .email_prefixes
        .iter()
        .find(|rule| local.starts_with(&rule.prefix.to_lowercase()))
        .map(|rule| rule.roles.iter().copied().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClaimKeyword, EmailPrefixRule};

    fn config(fallback: Fallback) -> RoleConfig {
        RoleConfig {
            claim_keywords: vec![
                ClaimKeyword {
                    keyword: "admin".to_string(),
                    role: Role::SystemAdmin,
                },
                ClaimKeyword {
                    keyword: "payroll".to_string(),
                    role: Role::PayrollSpecialist,
                },
                ClaimKeyword {
                    keyword: "hr".to_string(),
                    role: Role::HrAdmin,
                },
                ClaimKeyword {
                    keyword: "manager".to_string(),
                    role: Role::LineManager,
                },
            ],
            email_prefixes: vec![
                EmailPrefixRule {
                    prefix: "hr".to_string(),
                    roles: vec![Role::Employee, Role::HrAdmin],
                },
                EmailPrefixRule {
                    prefix: "h".to_string(),
                    roles: vec![Role::SystemAdmin],
                },
                EmailPrefixRule {
                    prefix: "manager".to_string(),
                    roles: vec![Role::LineManager, Role::Employee],
                },
                EmailPrefixRule {
                    prefix: "employee".to_string(),
                    roles: vec![Role::Employee],
                },
            ],
            fallback,
        }
    }

    #[test]
    fn test_claims_take_precedence_over_email() {
        let identity = Identity::from_email("employee.amina@acme.test").with_claims(["Payroll-Team"]);
        let resolution = resolve_roles(&identity, &config(Fallback::AllRoles));

        assert_eq!(resolution.source, ResolutionSource::Claims);
        assert_eq!(
            resolution.roles.to_vec(),
            vec![Role::Employee, Role::PayrollSpecialist]
        );
    }

    #[test]
    fn test_claims_match_case_insensitively_and_accumulate() {
        let identity =
            Identity::from_email("x@acme.test").with_claims(["HR-Admins", "Line-Managers"]);
        let resolution = resolve_roles(&identity, &config(Fallback::Employee));

        // "HR-Admins" contains both "hr" and "admin"
        assert_eq!(
            resolution.roles.to_vec(),
            vec![
                Role::Employee,
                Role::LineManager,
                Role::HrAdmin,
                Role::SystemAdmin
            ]
        );
    }

    #[test]
    fn test_unmatched_claims_fall_through_to_email() {
        let identity = Identity::from_email("manager.lee@acme.test").with_claims(["Staff"]);
        let resolution = resolve_roles(&identity, &config(Fallback::AllRoles));

        assert_eq!(resolution.source, ResolutionSource::EmailPrefix);
        assert_eq!(
            resolution.roles.to_vec(),
            vec![Role::Employee, Role::LineManager]
        );
    }

    #[test]
    fn test_first_email_rule_wins() {
        let resolution = resolve_roles(
            &Identity::from_email("hr.sara@acme.test"),
            &config(Fallback::AllRoles),
        );
        assert_eq!(
            resolution.roles.to_vec(),
            vec![Role::Employee, Role::HrAdmin]
        );

        let resolution = resolve_roles(
            &Identity::from_email("hugo@acme.test"),
            &config(Fallback::AllRoles),
        );
        assert_eq!(resolution.roles.to_vec(), vec![Role::SystemAdmin]);
    }

    #[test]
    fn test_email_prefix_ignores_case() {
        let resolution = resolve_roles(
            &Identity::from_email("Manager.Lee@ACME.test"),
            &config(Fallback::Employee),
        );
        assert_eq!(resolution.source, ResolutionSource::EmailPrefix);
    }

    #[test]
    fn test_default_fallback_grants_all_roles() {
        let resolution = resolve_roles(
            &Identity::from_email("lina.petrova@acme.test"),
            &config(Fallback::AllRoles),
        );
        assert_eq!(resolution.source, ResolutionSource::Fallback);
        assert_eq!(resolution.roles, RoleSet::all());
        assert!(!resolution.is_explicit());
    }

    #[test]
    fn test_employee_fallback_grants_employee_only() {
        let resolution = resolve_roles(
            &Identity::from_email("lina.petrova@acme.test"),
            &config(Fallback::Employee),
        );
        assert_eq!(resolution.roles.to_vec(), vec![Role::Employee]);
    }

    #[test]
    fn test_empty_email_uses_fallback() {
        let resolution = resolve_roles(&Identity::from_email(""), &config(Fallback::Employee));
        assert_eq!(resolution.source, ResolutionSource::Fallback);
    }

    #[test]
    fn test_explicit_resolution_never_falls_back() {
        let cfg = config(Fallback::AllRoles);
        assert!(resolve_explicit_roles(&Identity::from_email("lina@acme.test"), &cfg).is_none());
        assert_eq!(
            resolve_explicit_roles(&Identity::from_email("employee.x@acme.test"), &cfg)
                .map(|roles| roles.to_vec()),
            Some(vec![Role::Employee])
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let cfg = config(Fallback::AllRoles);
        let identity = Identity::from_email("manager.lee@acme.test").with_claims(["payroll"]);
        assert_eq!(resolve_roles(&identity, &cfg), resolve_roles(&identity, &cfg));
    }
}
