//! Mission (business travel) workflow.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{Mission, MissionStatus, NotificationDraft, NotificationKind, Role};
use crate::notifications::Recipient;
use crate::roles::Action;

use super::forms::{NewMission, ReviewDecision, require_date_order, require_text};
use super::{Actor, HrmsStore, new_id};

impl HrmsStore {
    /// Files a mission request for the caller and notifies their manager.
    pub fn submit_mission(
        &mut self,
        actor: &Actor,
        form: NewMission,
        now: DateTime<Utc>,
    ) -> HrmsResult<Mission> {
        let employee_id = actor.require_employee()?.to_string();
        let destination = require_text("destination", &form.destination)?;
        let purpose = require_text("purpose", &form.purpose)?;
        require_date_order(form.start_date, form.end_date)?;
        if form.estimated_cost.is_sign_negative() {
            return Err(HrmsError::validation(
                "estimated_cost",
                "must not be negative",
            ));
        }

        let mission = Mission {
            id: new_id("ms"),
            employee_id: employee_id.clone(),
            destination,
            purpose,
            start_date: form.start_date,
            end_date: form.end_date,
            estimated_cost: form.estimated_cost.round_dp(2),
            status: MissionStatus::Pending,
            reviewer_id: None,
            reviewer_comment: None,
            reviewed_at: None,
            created_at: now,
        };
        self.missions.push(mission.clone());
        info!(mission_id = %mission.id, employee_id = %employee_id, "Mission submitted");

        let draft = NotificationDraft::new(
            NotificationKind::Mission,
            "Mission to review",
            format!(
                "{} requested a mission to {} from {} to {}.",
                self.display_name(&employee_id),
                mission.destination,
                mission.start_date,
                mission.end_date
            ),
        )
        .with_link(format!("/missions/{}", mission.id));
        self.notify(&[Recipient::ManagerOf(employee_id)], draft, now);

        Ok(mission)
    }

    /// Missions visible to the caller, newest first.
    pub fn missions_for(&self, actor: &Actor) -> HrmsResult<Vec<&Mission>> {
        let sees_all = actor.has_role(Role::HrAdmin) || actor.has_role(Role::SystemAdmin);
        let mut visible: Vec<&Mission> = if sees_all {
            self.missions.iter().collect()
        } else {
            let own = actor.require_employee()?;
            let is_manager = actor.has_role(Role::LineManager);
            self.missions
                .iter()
                .filter(|m| m.employee_id == own || (is_manager && self.manages(own, &m.employee_id)))
                .collect()
        };
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }

    /// Looks up one mission.
    pub fn mission(&self, id: &str) -> HrmsResult<&Mission> {
        self.missions
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| HrmsError::not_found("mission", id))
    }

    /// Approves or rejects a pending mission and notifies the traveller.
    pub fn review_mission(
        &mut self,
        actor: &Actor,
        id: &str,
        decision: ReviewDecision,
        comment: Option<String>,
        now: DateTime<Utc>,
    ) -> HrmsResult<Mission> {
        actor.authorize(Action::ReviewMission)?;
        let reviewer_id = actor.require_employee()?.to_string();

        let mission = self.mission(id)?;
        if mission.status != MissionStatus::Pending {
            let action = match decision {
                ReviewDecision::Approve => "approve",
                ReviewDecision::Reject => "reject",
            };
            return Err(HrmsError::invalid_transition("mission", id, mission.status, action));
        }
        if mission.employee_id == reviewer_id {
            return Err(HrmsError::Forbidden {
                action: "review your own mission".to_string(),
            });
        }
        if !actor.has_role(Role::SystemAdmin) && !self.manages(&reviewer_id, &mission.employee_id) {
            return Err(HrmsError::Forbidden {
                action: "review missions outside your team".to_string(),
            });
        }

        let Some(mission) = self.missions.iter_mut().find(|m| m.id == id) else {
            return Err(HrmsError::not_found("mission", id));
        };
        mission.status = match decision {
            ReviewDecision::Approve => MissionStatus::Approved,
            ReviewDecision::Reject => MissionStatus::Rejected,
        };
        mission.reviewer_id = Some(reviewer_id);
        mission.reviewer_comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        mission.reviewed_at = Some(now);
        let mission = mission.clone();
        info!(mission_id = %id, status = %mission.status, "Mission reviewed");

        let draft = NotificationDraft::new(
            NotificationKind::Mission,
            format!("Mission {}", mission.status),
            format!(
                "Your mission to {} was {}.",
                mission.destination, mission.status
            ),
        )
        .with_link(format!("/missions/{}", mission.id));
        self.notify(&[Recipient::Employee(mission.employee_id.clone())], draft, now);

        Ok(mission)
    }

    /// Closes one of the caller's approved missions after travel.
    pub fn complete_mission(&mut self, actor: &Actor, id: &str) -> HrmsResult<Mission> {
        let employee_id = actor.require_employee()?;
        let mission = self
            .missions
            .iter_mut()
            .find(|m| m.id == id && m.employee_id == employee_id)
            .ok_or_else(|| HrmsError::not_found("mission", id))?;
        if mission.status != MissionStatus::Approved {
            return Err(HrmsError::invalid_transition(
                "mission",
                id,
                mission.status,
                "complete",
            ));
        }
        mission.status = MissionStatus::Completed;
        info!(mission_id = %id, "Mission completed");
        Ok(mission.clone())
    }
}
