//! Fixed-term contract expiry tracking.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::HrmsResult;
use crate::models::{Notification, NotificationDraft, NotificationKind, Role};
use crate::notifications::{Recipient, expand_recipients};
use crate::roles::Action;
use crate::status::{ContractStatus, contract_status};

use super::{Actor, HrmsStore};

/// An active employee whose contract ends within the expiry window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiringContract {
    /// The employee.
    pub employee_id: String,
    /// Display name.
    pub employee_name: String,
    /// Last contract day.
    pub contract_end: NaiveDate,
    /// Derived status; always [`ContractStatus::Expiring`].
    pub status: ContractStatus,
}

impl ExpiringContract {
    fn days_remaining(&self) -> u32 {
        match self.status {
            ContractStatus::Expiring { days_remaining } => days_remaining,
            _ => u32::MAX,
        }
    }
}

impl HrmsStore {
    /// Contracts ending within the configured window, soonest first.
    pub fn expiring_contracts(&self, actor: &Actor, today: NaiveDate) -> HrmsResult<Vec<ExpiringContract>> {
        actor.authorize(Action::ManageContracts)?;
        Ok(self.expiring_on(today))
    }

    /// Notifies HR of every expiring contract not already flagged.
    ///
    /// A contract is skipped while any HR recipient still has an unread
    /// expiry notification for it. Returns the notifications created.
    pub fn scan_contract_expiries(
        &mut self,
        actor: &Actor,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> HrmsResult<Vec<Notification>> {
        actor.authorize(Action::ManageContracts)?;
        let targets = [Recipient::Role(Role::HrAdmin)];
        let hr = expand_recipients(&targets, &self.employees, &self.roles);

        let mut created = Vec::new();
        for contract in self.expiring_on(today) {
            let link = format!("/employees/{}", contract.employee_id);
            let flagged = hr.iter().any(|recipient| {
                self.notifications
                    .has_unread(recipient, NotificationKind::ContractExpiry, Some(&link))
            });
            if flagged {
                continue;
            }

            let draft = NotificationDraft::new(
                NotificationKind::ContractExpiry,
                "Contract expiring",
                format!(
                    "{}'s contract ends on {} ({} day(s) left).",
                    contract.employee_name,
                    contract.contract_end,
                    contract.days_remaining()
                ),
            )
            .with_link(link);
            created.extend(self.notify(&targets, draft, now));
        }

        info!(%today, notified = created.len(), "Contract expiry scan finished");
        Ok(created)
    }

    pub(crate) fn expiring_on(&self, today: NaiveDate) -> Vec<ExpiringContract> {
        let window = self.policies.contracts.expiring_window_days;
        let mut expiring: Vec<ExpiringContract> = self
            .employees
            .iter()
            .filter(|e| e.is_active())
            .filter_map(|e| {
                let contract_end = e.contract_end?;
                match contract_status(Some(contract_end), today, window) {
                    status @ ContractStatus::Expiring { .. } => Some(ExpiringContract {
                        employee_id: e.id.clone(),
                        employee_name: e.full_name(),
                        contract_end,
                        status,
                    }),
                    _ => None,
                }
            })
            .collect();
        expiring.sort_by_key(|c| c.days_remaining());
        expiring
    }
}
