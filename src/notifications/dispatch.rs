//! Notification fan-out.
//!
//! Expands abstract targets (an employee, someone's manager, everyone holding
//! a role) into concrete recipients and appends one record per recipient.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::RoleConfig;
use crate::models::{Employee, Identity, Notification, NotificationDraft, Role};
use crate::roles::resolve_explicit_roles;

use super::store::NotificationStore;

/// Who a notification should reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A specific employee.
    Employee(String),
    /// The line manager of the given employee.
    ManagerOf(String),
    /// Every active employee explicitly holding the role.
    Role(Role),
}

/// Expands targets into active employee ids, de-duplicated in first-seen order.
///
/// Role targets only count roles granted by claims or the email table; an
/// employee who would only receive the fallback is never a role recipient.
pub fn expand_recipients(
    targets: &[Recipient],
    employees: &[Employee],
    roles: &RoleConfig,
) -> Vec<String> {
    let is_active = |id: &str| employees.iter().any(|e| e.id == id && e.is_active());
    let mut recipients: Vec<String> = Vec::new();
    let mut push = |id: &str| {
        if !recipients.iter().any(|r| r == id) {
            recipients.push(id.to_string());
        }
    };

    for target in targets {
        match target {
            Recipient::Employee(id) => {
                if is_active(id.as_str()) {
                    push(id.as_str());
                }
            }
            Recipient::ManagerOf(id) => {
                let manager = employees
                    .iter()
                    .find(|e| e.id == *id)
                    .and_then(|e| e.manager_id.as_deref());
                if let Some(manager_id) = manager.filter(|m| is_active(*m)) {
                    push(manager_id);
                }
            }
            Recipient::Role(role) => {
                for employee in employees.iter().filter(|e| e.is_active()) {
                    let holds_role =
                        resolve_explicit_roles(&Identity::from_email(&employee.email), roles)
                            .is_some_and(|set| set.contains(*role));
                    if holds_role {
                        push(employee.id.as_str());
                    }
                }
            }
        }
    }

    recipients
}

/// Appends one copy of the draft for every recipient the targets expand to.
///
/// Returns the stored records in recipient order; empty when no target
/// resolved to an active employee.
pub fn dispatch(
    store: &mut NotificationStore,
    targets: &[Recipient],
    employees: &[Employee],
    roles: &RoleConfig,
    draft: NotificationDraft,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let recipients = expand_recipients(targets, employees, roles);
    debug!(
        kind = ?draft.kind,
        recipients = recipients.len(),
        "Dispatching notification"
    );
    recipients
        .iter()
        .map(|recipient| store.append(recipient, draft.clone(), now))
        .collect()
}
