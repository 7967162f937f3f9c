use metrics_exporter_prometheus::PrometheusHandle;
use outreach_ai::workflows::campaigns::assignment::{
    campaign_templates, AssignmentId, AssignmentRecord, AssignmentStore, CampaignId,
    CampaignProfile, DispatchError, DispatchPublisher, OutreachDispatch, RepositoryError,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssignmentStore {
    campaigns: Arc<Mutex<HashMap<CampaignId, CampaignProfile>>>,
    assignments: Arc<Mutex<HashMap<AssignmentId, AssignmentRecord>>>,
}

impl InMemoryAssignmentStore {
    /// Fresh store preloaded with the campaign template catalog.
    pub(crate) fn seeded() -> Self {
        Self::with_campaigns(campaign_templates())
    }

    pub(crate) fn with_campaigns(campaigns: Vec<CampaignProfile>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.campaigns.lock().expect("campaign mutex poisoned");
            for campaign in campaigns {
                guard.insert(campaign.campaign_id.clone(), campaign);
            }
        }
        store
    }
}

impl AssignmentStore for InMemoryAssignmentStore {
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
pub(crate) struct InMemoryDispatchPublisher {
    events: Arc<Mutex<Vec<OutreachDispatch>>>,
}

impl DispatchPublisher for InMemoryDispatchPublisher {
    fn publish(&self, dispatch: OutreachDispatch) -> Result<(), DispatchError> {
        let mut guard = self.events.lock().expect("dispatch mutex poisoned");
        guard.push(dispatch);
        Ok(())
    }
}

impl InMemoryDispatchPublisher {
    pub(crate) fn events(&self) -> Vec<OutreachDispatch> {
        self.events.lock().expect("dispatch mutex poisoned").clone()
    }
}
