//! Job postings and the candidate pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{
    Candidate, CandidateStage, JobPosting, NotificationDraft, NotificationKind, PostingStatus,
    Role,
};
use crate::notifications::Recipient;
use crate::roles::Action;

use super::forms::{NewCandidate, NewJobPosting, require_email, require_text};
use super::{Actor, HrmsStore, new_id};

impl HrmsStore {
    /// Job postings, optionally filtered by status. Visible to everyone.
    pub fn job_postings(&self, status: Option<PostingStatus>) -> Vec<&JobPosting> {
        self.job_postings
            .iter()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .collect()
    }

    /// Looks up one posting.
    pub fn job_posting(&self, id: &str) -> HrmsResult<&JobPosting> {
        self.job_postings
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| HrmsError::not_found("job_posting", id))
    }

    /// Publishes a new posting.
    pub fn create_posting(
        &mut self,
        actor: &Actor,
        form: NewJobPosting,
        today: NaiveDate,
    ) -> HrmsResult<JobPosting> {
        actor.authorize(Action::ManageRecruitment)?;
        let title = require_text("title", &form.title)?;
        if !self.departments.iter().any(|d| d.id == form.department_id) {
            return Err(HrmsError::validation(
                "department_id",
                format!("unknown department '{}'", form.department_id),
            ));
        }

        let posting = JobPosting {
            id: new_id("job"),
            title,
            department_id: form.department_id,
            description: form.description.trim().to_string(),
            status: PostingStatus::Open,
            opened_on: today,
        };
        self.job_postings.push(posting.clone());
        info!(posting_id = %posting.id, "Job posting opened");
        Ok(posting)
    }

    /// Stops a posting from accepting applications.
    pub fn close_posting(&mut self, actor: &Actor, id: &str) -> HrmsResult<JobPosting> {
        actor.authorize(Action::ManageRecruitment)?;
        let posting = self
            .job_postings
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| HrmsError::not_found("job_posting", id))?;
        if posting.status != PostingStatus::Open {
            return Err(HrmsError::invalid_transition("job_posting", id, posting.status, "close"));
        }
        posting.status = PostingStatus::Closed;
        info!(posting_id = %id, "Job posting closed");
        Ok(posting.clone())
    }

    /// Candidates of a posting in application order.
    pub fn candidates(&self, actor: &Actor, posting_id: &str) -> HrmsResult<Vec<&Candidate>> {
        actor.authorize(Action::ManageRecruitment)?;
        self.job_posting(posting_id)?;
        let mut candidates: Vec<&Candidate> = self
            .candidates
            .iter()
            .filter(|c| c.posting_id == posting_id)
            .collect();
        candidates.sort_by_key(|c| c.applied_on);
        Ok(candidates)
    }

    /// Registers an application to an open posting and notifies HR.
    ///
    /// The application date is the office-local date of `now`.
    pub fn add_candidate(
        &mut self,
        actor: &Actor,
        posting_id: &str,
        form: NewCandidate,
        now: DateTime<Utc>,
    ) -> HrmsResult<Candidate> {
        actor.authorize(Action::ManageRecruitment)?;
        let full_name = require_text("full_name", &form.full_name)?;
        let email = require_email("email", &form.email)?;

        let posting = self.job_posting(posting_id)?;
        if posting.status != PostingStatus::Open {
            return Err(HrmsError::invalid_transition(
                "job_posting",
                posting_id,
                posting.status,
                "add candidates to",
            ));
        }
        let title = posting.title.clone();
        let duplicate = self
            .candidates
            .iter()
            .any(|c| c.posting_id == posting_id && c.email.eq_ignore_ascii_case(&email));
        if duplicate {
            return Err(HrmsError::Conflict {
                message: format!("'{}' already applied to this posting", email),
            });
        }

        let candidate = Candidate {
            id: new_id("cand"),
            posting_id: posting_id.to_string(),
            full_name,
            email,
            stage: CandidateStage::Applied,
            applied_on: self.local_time(now).date(),
        };
        self.candidates.push(candidate.clone());
        info!(candidate_id = %candidate.id, posting_id = %posting_id, "Candidate added");

        let draft = NotificationDraft::new(
            NotificationKind::Recruitment,
            "New candidate",
            format!("{} applied for {}.", candidate.full_name, title),
        )
        .with_link(format!("/jobs/{}/candidates", posting_id));
        self.notify(&[Recipient::Role(Role::HrAdmin)], draft, now);

        Ok(candidate)
    }

    /// Moves a candidate to the next pipeline stage.
    pub fn advance_candidate(&mut self, actor: &Actor, id: &str) -> HrmsResult<Candidate> {
        actor.authorize(Action::ManageRecruitment)?;
        let candidate = self.candidate_mut(id)?;
        let Some(next) = candidate.stage.next() else {
            return Err(HrmsError::invalid_transition("candidate", id, candidate.stage, "advance"));
        };
        candidate.stage = next;
        info!(candidate_id = %id, stage = %next, "Candidate advanced");
        Ok(candidate.clone())
    }

    /// Drops a candidate from the pipeline.
    pub fn reject_candidate(&mut self, actor: &Actor, id: &str) -> HrmsResult<Candidate> {
        actor.authorize(Action::ManageRecruitment)?;
        let candidate = self.candidate_mut(id)?;
        if candidate.stage.is_terminal() {
            return Err(HrmsError::invalid_transition("candidate", id, candidate.stage, "reject"));
        }
        candidate.stage = CandidateStage::Rejected;
        info!(candidate_id = %id, "Candidate rejected");
        Ok(candidate.clone())
    }

    fn candidate_mut(&mut self, id: &str) -> HrmsResult<&mut Candidate> {
        self.candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| HrmsError::not_found("candidate", id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use chrono::TimeZone;

    fn applicant(email: &str) -> NewCandidate {
        NewCandidate {
            full_name: "Zoe Martin".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_postings_filter_by_status() {
        let store = store();
        assert_eq!(store.job_postings(None).len(), 2);
        let open = store.job_postings(Some(PostingStatus::Open));
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "job_001");
    }

    #[test]
    fn test_create_and_close_posting() {
        let mut store = store();
        let sara = actor(&store, SARA);
        let posting = store
            .create_posting(
                &sara,
                NewJobPosting {
                    title: "Payroll Clerk".to_string(),
                    department_id: "dep_fin".to_string(),
                    description: String::new(),
                },
                today(),
            )
            .unwrap();
        assert_eq!(posting.status, PostingStatus::Open);
        assert_eq!(posting.opened_on, today());

        store.close_posting(&sara, &posting.id).unwrap();
        assert!(matches!(
            store.close_posting(&sara, &posting.id),
            Err(HrmsError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_unknown_department_is_rejected() {
        let mut store = store();
        let sara = actor(&store, SARA);
        let form = NewJobPosting {
            title: "Designer".to_string(),
            department_id: "dep_design".to_string(),
            description: String::new(),
        };
        assert!(matches!(
            store.create_posting(&sara, form, today()),
            Err(HrmsError::Validation { .. })
        ));
    }

    #[test]
    fn test_add_candidate_notifies_hr() {
        let mut store = store();
        let sara = actor(&store, SARA);
        let candidate = store
            .add_candidate(&sara, "job_001", applicant("zoe.martin@mail.test"), now())
            .unwrap();
        assert_eq!(candidate.stage, CandidateStage::Applied);
        assert_eq!(candidate.applied_on, today());
        assert!(store.notifications.has_unread(
            "emp_003",
            NotificationKind::Recruitment,
            Some("/jobs/job_001/candidates")
        ));
        assert_eq!(store.candidates(&sara, "job_001").unwrap().len(), 3);
    }

    #[test]
    fn test_applied_on_uses_office_local_date() {
        let mut store = store();
        store.policies.attendance.utc_offset_minutes = 5 * 60;
        let sara = actor(&store, SARA);
        // 21:00 UTC is already the next morning five hours east.
        let late_evening = Utc.with_ymd_and_hms(2026, 10, 19, 21, 0, 0).unwrap();

        let candidate = store
            .add_candidate(&sara, "job_001", applicant("zoe.martin@mail.test"), late_evening)
            .unwrap();
        assert_eq!(candidate.applied_on, date(2026, 10, 20));
    }

    #[test]
    fn test_add_candidate_rules() {
        let mut store = store();
        let sara = actor(&store, SARA);
        assert!(matches!(
            store.add_candidate(&sara, "job_001", applicant("TOM.BAKER@mail.test"), now()),
            Err(HrmsError::Conflict { .. })
        ));
        assert!(matches!(
            store.add_candidate(&sara, "job_002", applicant("zoe@mail.test"), now()),
            Err(HrmsError::InvalidTransition { .. })
        ));
        assert!(matches!(
            store.add_candidate(&sara, "job_001", applicant("zoe.mail.test"), now()),
            Err(HrmsError::Validation { .. })
        ));

        let amina = actor(&store, AMINA);
        assert!(matches!(
            store.add_candidate(&amina, "job_001", applicant("zoe@mail.test"), now()),
            Err(HrmsError::Forbidden { .. })
        ));
    }

    #[test]
    fn test_pipeline_progression() {
        let mut store = store();
        let sara = actor(&store, SARA);
        assert_eq!(
            store.advance_candidate(&sara, "cand_002").unwrap().stage,
            CandidateStage::Offer
        );
        assert_eq!(
            store.advance_candidate(&sara, "cand_002").unwrap().stage,
            CandidateStage::Hired
        );
        assert!(matches!(
            store.advance_candidate(&sara, "cand_002"),
            Err(HrmsError::InvalidTransition { .. })
        ));
        assert!(matches!(
            store.reject_candidate(&sara, "cand_002"),
            Err(HrmsError::InvalidTransition { .. })
        ));

        let rejected = store.reject_candidate(&sara, "cand_001").unwrap();
        assert_eq!(rejected.stage, CandidateStage::Rejected);
    }
}
