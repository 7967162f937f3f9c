use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use chrono::Duration;

use crate::workflows::campaigns::assignment::domain::{
    CampaignId, CampaignProfile, CampaignType, ConnectionDegree, LeadId, LeadProfile,
    ProfileVisibility, SearchSource,
};
use crate::workflows::campaigns::assignment::evaluation::EligibilityEngine;
use crate::workflows::campaigns::assignment::repository::{
    AssignmentId, AssignmentRecord, AssignmentStore, DispatchError, DispatchPublisher,
    OutreachDispatch, RepositoryError,
};
use crate::workflows::campaigns::assignment::service::CampaignAssignmentService;

/// Fully compliant lead against `campaign()`: valid LinkedIn URL, 1st-degree
/// connection, allowed search source, strong enrichment.
pub(super) fn lead(suffix: &str) -> LeadProfile {
    LeadProfile {
        lead_id: LeadId(format!("ld-{suffix}")),
        name: "Jordan Reyes".to_string(),
        title: Some("VP of Sales".to_string()),
        company: Some("Acme Robotics".to_string()),
        location: Some("Austin, TX".to_string()),
        linkedin_url: Some("https://www.linkedin.com/in/jordanreyes".to_string()),
        email: Some("jordan@acmerobotics.io".to_string()),
        phone: Some("+1-512-555-0142".to_string()),
        connection_degree: ConnectionDegree::First,
        mutual_connections: 12,
        follower_count: 2400,
        premium_account: false,
        open_to_work: false,
        profile_visibility: ProfileVisibility::Public,
        profile_completeness: 95,
        has_company_page: true,
        industry: Some("Software Development".to_string()),
        seniority_level: Some("VP".to_string()),
        search_source: SearchSource::SalesNavigator,
    }
}

/// Baseline connection-request campaign with room for the whole suite.
pub(super) fn campaign(suffix: &str) -> CampaignProfile {
    let mut allowed = BTreeSet::new();
    allowed.insert(SearchSource::SalesNavigator);
    allowed.insert(SearchSource::BasicSearch);

    CampaignProfile {
        campaign_id: CampaignId(format!("cmp-{suffix}")),
        name: "Q4 Pipeline Builder".to_string(),
        campaign_type: CampaignType::ConnectionRequest,
        connection_required: true,
        premium_required: false,
        email_required: false,
        phone_required: false,
        min_mutual_connections: None,
        max_connection_degree: Some(ConnectionDegree::Second),
        min_profile_completeness: None,
        excluded_industries: BTreeSet::new(),
        excluded_titles: BTreeSet::new(),
        allowed_search_sources: allowed,
        max_leads_per_day: 100,
        current_leads_today: 0,
    }
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new()
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) campaigns: Arc<Mutex<HashMap<CampaignId, CampaignProfile>>>,
    pub(super) assignments: Arc<Mutex<HashMap<AssignmentId, AssignmentRecord>>>,
}

impl MemoryStore {
    pub(super) fn with_campaigns(seed: Vec<CampaignProfile>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.campaigns.lock().expect("campaign mutex poisoned");
            for campaign in seed {
                guard.insert(campaign.campaign_id.clone(), campaign);
            }
        }
        store
    }

    /// Test helper: exhaust a campaign's daily budget directly in storage.
    pub(super) fn fill_daily_limit(&self, id: &CampaignId) {
        let mut guard = self.campaigns.lock().expect("campaign mutex poisoned");
        if let Some(campaign) = guard.get_mut(id) {
            campaign.current_leads_today = campaign.max_leads_per_day;
        }
    }
}

impl AssignmentStore for MemoryStore {
    fn campaign(&self, id: &CampaignId) -> Result<Option<CampaignProfile>, RepositoryError> {
        let guard = self.campaigns.lock().expect("campaign mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn campaigns(&self) -> Result<Vec<CampaignProfile>, RepositoryError> {
        let guard = self.campaigns.lock().expect("campaign mutex poisoned");
        let mut campaigns: Vec<_> = guard.values().cloned().collect();
        campaigns.sort_by(|a, b| a.campaign_id.cmp(&b.campaign_id));
        Ok(campaigns)
    }

    fn increment_daily_count(&self, id: &CampaignId, by: u32) -> Result<u32, RepositoryError> {
        let mut guard = self.campaigns.lock().expect("campaign mutex poisoned");
        let campaign = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        campaign.current_leads_today += by;
        Ok(campaign.current_leads_today)
    }

    fn insert_assignment(
        &self,
        record: AssignmentRecord,
    ) -> Result<AssignmentRecord, RepositoryError> {
        let mut guard = self.assignments.lock().expect("assignment mutex poisoned");
        if guard.contains_key(&record.assignment_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.assignment_id.clone(), record.clone());
        Ok(record)
    }

    fn assignment(&self, id: &AssignmentId) -> Result<Option<AssignmentRecord>, RepositoryError> {
        let guard = self.assignments.lock().expect("assignment mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryDispatch {
    events: Arc<Mutex<Vec<OutreachDispatch>>>,
}

impl MemoryDispatch {
    pub(super) fn events(&self) -> Vec<OutreachDispatch> {
        self.events.lock().expect("dispatch mutex poisoned").clone()
    }
}

impl DispatchPublisher for MemoryDispatch {
    fn publish(&self, dispatch: OutreachDispatch) -> Result<(), DispatchError> {
        self.events
            .lock()
            .expect("dispatch mutex poisoned")
            .push(dispatch);
        Ok(())
    }
}

pub(super) fn build_service(
    campaigns: Vec<CampaignProfile>,
) -> (
    CampaignAssignmentService<MemoryStore, MemoryDispatch>,
    Arc<MemoryStore>,
    Arc<MemoryDispatch>,
) {
    let store = Arc::new(MemoryStore::with_campaigns(campaigns));
    let dispatch = Arc::new(MemoryDispatch::default());
    let service =
        CampaignAssignmentService::new(store.clone(), dispatch.clone(), Duration::minutes(60));
    (service, store, dispatch)
}
