//! Recruitment pipeline models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a posting accepts applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingStatus {
    /// Accepting applications.
    Open,
    /// No longer accepting applications.
    Closed,
}

impl fmt::Display for PostingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostingStatus::Open => f.write_str("open"),
            PostingStatus::Closed => f.write_str("closed"),
        }
    }
}

/// An advertised vacancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Unique identifier.
    pub id: String,
    /// Job title.
    pub title: String,
    /// Hiring department.
    pub department_id: String,
    /// Advert text.
    #[serde(default)]
    pub description: String,
    /// Open or closed.
    pub status: PostingStatus,
    /// Publication date.
    pub opened_on: NaiveDate,
}

/// Where a candidate stands in the hiring pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStage {
    /// Application received.
    Applied,
    /// CV screening.
    Screening,
    /// Interviewing.
    Interview,
    /// Offer extended.
    Offer,
    /// Offer accepted.
    Hired,
    /// Dropped from the pipeline.
    Rejected,
}

impl CandidateStage {
    /// The stage after this one, or `None` for terminal stages.
    pub fn next(self) -> Option<CandidateStage> {
        match self {
            CandidateStage::Applied => Some(CandidateStage::Screening),
            CandidateStage::Screening => Some(CandidateStage::Interview),
            CandidateStage::Interview => Some(CandidateStage::Offer),
            CandidateStage::Offer => Some(CandidateStage::Hired),
            CandidateStage::Hired | CandidateStage::Rejected => None,
        }
    }

    /// Hired and rejected candidates are out of the pipeline.
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for CandidateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CandidateStage::Applied => "applied",
            CandidateStage::Screening => "screening",
            CandidateStage::Interview => "interview",
            CandidateStage::Offer => "offer",
            CandidateStage::Hired => "hired",
            CandidateStage::Rejected => "rejected",
        };
        f.write_str(label)
    }
}

/// An applicant for a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique identifier.
    pub id: String,
    /// The posting applied for.
    pub posting_id: String,
    /// Applicant name.
    pub full_name: String,
    /// Applicant email.
    pub email: String,
    /// Pipeline stage.
    pub stage: CandidateStage,
    /// Application date.
    pub applied_on: NaiveDate,
}
