use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{CampaignId, CampaignProfile, CampaignType, LeadId, LeadProfile};
use super::evaluation::CampaignAssignmentResult;

/// Identifier wrapper for assignment decisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

/// Lifecycle of a lead/campaign assignment decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Queued,
    Rejected,
    Dispatched,
}

impl AssignmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentStatus::Queued => "queued",
            AssignmentStatus::Rejected => "rejected",
            AssignmentStatus::Dispatched => "dispatched",
        }
    }
}

/// Persisted record of one assignment decision, verdict included so every
/// rejection stays explainable after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub assignment_id: AssignmentId,
    pub lead: LeadProfile,
    pub campaign_id: CampaignId,
    pub status: AssignmentStatus,
    pub verdict: CampaignAssignmentResult,
    pub decided_at: DateTime<Utc>,
}

impl AssignmentRecord {
    pub fn decision_rationale(&self) -> String {
        if self.verdict.can_assign {
            "cleared for outreach".to_string()
        } else {
            self.verdict.blocked_reasons.join("; ")
        }
    }

    pub fn status_view(&self) -> AssignmentStatusView {
        AssignmentStatusView {
            assignment_id: self.assignment_id.clone(),
            lead_id: self.lead.lead_id.clone(),
            campaign_id: self.campaign_id.clone(),
            status: self.status.label(),
            decision_rationale: self.decision_rationale(),
            estimated_success_rate: self.verdict.estimated_success_rate,
        }
    }
}

/// Sanitized representation of an assignment exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentStatusView {
    pub assignment_id: AssignmentId,
    pub lead_id: LeadId,
    pub campaign_id: CampaignId,
    pub status: &'static str,
    pub decision_rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_success_rate: Option<u8>,
}

/// Storage abstraction over campaigns and assignment decisions so the
/// service module can be exercised in isolation.
pub trait AssignmentStore: Send + Sync {
    fn campaign(&self, id: &CampaignId) -> Result<Option<CampaignProfile>, RepositoryError>;
    fn campaigns(&self) -> Result<Vec<CampaignProfile>, RepositoryError>;
    /// Atomically bump the campaign's daily counter and return the new
    /// value. Implementations must serialize concurrent increments.
    fn increment_daily_count(&self, id: &CampaignId, by: u32) -> Result<u32, RepositoryError>;
    fn insert_assignment(
        &self,
        record: AssignmentRecord,
    ) -> Result<AssignmentRecord, RepositoryError>;
    fn assignment(&self, id: &AssignmentId) -> Result<Option<AssignmentRecord>, RepositoryError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing the hook into downstream outreach automation
/// (message senders, sequencers).
pub trait DispatchPublisher: Send + Sync {
    fn publish(&self, dispatch: OutreachDispatch) -> Result<(), DispatchError>;
}

/// Payload handed to downstream automation once a lead is queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachDispatch {
    pub assignment_id: AssignmentId,
    pub lead_id: LeadId,
    pub campaign_id: CampaignId,
    pub channel: CampaignType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_success_rate: Option<u8>,
}

/// Dispatch transport error.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("dispatch transport unavailable: {0}")]
    Transport(String),
}
