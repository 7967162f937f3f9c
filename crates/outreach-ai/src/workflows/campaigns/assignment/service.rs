use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::domain::{CampaignId, LeadId, LeadProfile};
use super::evaluation::{CampaignAssignmentResult, CampaignCompatibility, EligibilityEngine};
use super::repository::{
    AssignmentId, AssignmentRecord, AssignmentStatus, AssignmentStore, DispatchError,
    DispatchPublisher, OutreachDispatch, RepositoryError,
};

/// Service composing the store, the dispatch hook, and the rules engine.
///
/// Caching and counter bookkeeping live here, never in the engine: the
/// engine stays a pure function of its two inputs.
pub struct CampaignAssignmentService<S, P> {
    store: Arc<S>,
    dispatch: Arc<P>,
    engine: EligibilityEngine,
    verdict_ttl: Duration,
    verdict_cache: Mutex<HashMap<(LeadId, CampaignId), CachedVerdict>>,
}

struct CachedVerdict {
    verdict: CampaignAssignmentResult,
    expires_at: DateTime<Utc>,
}

static ASSIGNMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assignment_id() -> AssignmentId {
    let id = ASSIGNMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssignmentId(format!("asg-{id:06}"))
}

impl<S, P> CampaignAssignmentService<S, P>
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    pub fn new(store: Arc<S>, dispatch: Arc<P>, verdict_ttl: Duration) -> Self {
        Self {
            store,
            dispatch,
            engine: EligibilityEngine::new(),
            verdict_ttl,
            verdict_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Evaluate one lead against a stored campaign, serving repeat calls
    /// from the TTL cache keyed by `(lead_id, campaign_id)`.
    pub fn validate(
        &self,
        lead: &LeadProfile,
        campaign_id: &CampaignId,
    ) -> Result<CampaignAssignmentResult, AssignmentServiceError> {
        let key = (lead.lead_id.clone(), campaign_id.clone());
        let now = Utc::now();

        {
            let mut cache = self.verdict_cache.lock().expect("verdict cache poisoned");
            match cache.get(&key) {
                Some(entry) if entry.expires_at > now => return Ok(entry.verdict.clone()),
                Some(_) => {
                    cache.remove(&key);
                }
                None => {}
            }
        }

        let campaign = self.fetch_campaign(campaign_id)?;
        let verdict = self.engine.validate(lead, &campaign);

        let mut cache = self.verdict_cache.lock().expect("verdict cache poisoned");
        cache.insert(
            key,
            CachedVerdict {
                verdict: verdict.clone(),
                expires_at: now + self.verdict_ttl,
            },
        );

        Ok(verdict)
    }

    /// Evaluate a batch of leads against one stored campaign. Batches bypass
    /// the verdict cache; the merged result is not cacheable per lead.
    pub fn validate_batch(
        &self,
        leads: &[LeadProfile],
        campaign_id: &CampaignId,
    ) -> Result<CampaignAssignmentResult, AssignmentServiceError> {
        let campaign = self.fetch_campaign(campaign_id)?;
        Ok(self.engine.validate_batch(leads, &campaign))
    }

    /// Rank every stored campaign by compatibility with a lead list.
    pub fn compatibility(
        &self,
        leads: &[LeadProfile],
    ) -> Result<Vec<CampaignCompatibility>, AssignmentServiceError> {
        let campaigns = self.store.campaigns()?;
        Ok(self.engine.compatibility(leads, &campaigns))
    }

    /// Decide one assignment and persist the outcome. Accepted leads bump
    /// the campaign's daily counter through the store's atomic increment and
    /// are handed to downstream automation.
    pub fn assign(
        &self,
        lead: LeadProfile,
        campaign_id: &CampaignId,
    ) -> Result<AssignmentRecord, AssignmentServiceError> {
        // Always evaluate against a fresh campaign snapshot; the cached
        // verdict may predate counter movement.
        let campaign = self.fetch_campaign(campaign_id)?;
        let verdict = self.engine.validate(&lead, &campaign);

        let status = if verdict.can_assign {
            self.store.increment_daily_count(campaign_id, 1)?;
            AssignmentStatus::Queued
        } else {
            AssignmentStatus::Rejected
        };

        let record = AssignmentRecord {
            assignment_id: next_assignment_id(),
            lead,
            campaign_id: campaign_id.clone(),
            status,
            verdict,
            decided_at: Utc::now(),
        };

        let stored = self.store.insert_assignment(record)?;

        if stored.status == AssignmentStatus::Queued {
            self.dispatch.publish(OutreachDispatch {
                assignment_id: stored.assignment_id.clone(),
                lead_id: stored.lead.lead_id.clone(),
                campaign_id: stored.campaign_id.clone(),
                channel: campaign.campaign_type,
                estimated_success_rate: stored.verdict.estimated_success_rate,
            })?;
        }

        Ok(stored)
    }

    /// Assign leads one at a time, re-reading the campaign before each
    /// decision so the daily counter advances between leads. A single bulk
    /// validation cannot see its own assignments; this loop can.
    pub fn assign_batch(
        &self,
        leads: Vec<LeadProfile>,
        campaign_id: &CampaignId,
    ) -> Result<Vec<AssignmentRecord>, AssignmentServiceError> {
        leads
            .into_iter()
            .map(|lead| self.assign(lead, campaign_id))
            .collect()
    }

    /// Fetch a stored assignment decision for API responses.
    pub fn assignment(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<AssignmentRecord, AssignmentServiceError> {
        let record = self
            .store
            .assignment(assignment_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn fetch_campaign(
        &self,
        campaign_id: &CampaignId,
    ) -> Result<super::domain::CampaignProfile, AssignmentServiceError> {
        self.store
            .campaign(campaign_id)?
            .ok_or_else(|| AssignmentServiceError::UnknownCampaign(campaign_id.clone()))
    }
}

/// Error raised by the assignment service.
#[derive(Debug, thiserror::Error)]
pub enum AssignmentServiceError {
    #[error("unknown campaign: {0}")]
    UnknownCampaign(CampaignId),
    #[error(transparent)]
    Store(#[from] RepositoryError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
