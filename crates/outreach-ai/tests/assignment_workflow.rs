//! Integration specifications for the campaign eligibility and assignment
//! workflow, driven entirely through the crate's public facade.

mod common {
    use std::collections::{BTreeSet, HashMap};
    use std::sync::{Arc, Mutex};

    use chrono::Duration;

    use outreach_ai::workflows::campaigns::assignment::{
        AssignmentId, AssignmentRecord, AssignmentStore, CampaignAssignmentService, CampaignId,
        CampaignProfile, CampaignType, ConnectionDegree, DispatchError, DispatchPublisher, LeadId,
        LeadProfile, OutreachDispatch, ProfileVisibility, RepositoryError, SearchSource,
    };

    pub(super) fn lead(suffix: &str) -> LeadProfile {
        LeadProfile {
            lead_id: LeadId(format!("ld-{suffix}")),
            name: "Priya Natarajan".to_string(),
            title: Some("Head of Growth".to_string()),
            company: Some("Northwind Analytics".to_string()),
            location: Some("Seattle, WA".to_string()),
            linkedin_url: Some("https://www.linkedin.com/in/priyanatarajan".to_string()),
            email: Some("priya@northwind.io".to_string()),
            phone: None,
            connection_degree: ConnectionDegree::First,
            mutual_connections: 8,
            follower_count: 1800,
            premium_account: false,
            open_to_work: false,
            profile_visibility: ProfileVisibility::Public,
            profile_completeness: 88,
            has_company_page: true,
            industry: Some("Information Services".to_string()),
            seniority_level: Some("Director".to_string()),
            search_source: SearchSource::SalesNavigator,
        }
    }

    pub(super) fn campaign(suffix: &str) -> CampaignProfile {
        let mut allowed = BTreeSet::new();
        allowed.insert(SearchSource::SalesNavigator);
        allowed.insert(SearchSource::PostEngagement);

        CampaignProfile {
            campaign_id: CampaignId(format!("cmp-{suffix}")),
            name: "Founder Outreach Wave 3".to_string(),
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
            max_leads_per_day: 50,
            current_leads_today: 0,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryStore {
        campaigns: Arc<Mutex<HashMap<CampaignId, CampaignProfile>>>,
        assignments: Arc<Mutex<HashMap<AssignmentId, AssignmentRecord>>>,
    }

    impl MemoryStore {
        pub(super) fn with_campaigns(seed: Vec<CampaignProfile>) -> Self {
            let store = Self::default();
            {
                let mut guard = store.campaigns.lock().expect("lock");
                for campaign in seed {
                    guard.insert(campaign.campaign_id.clone(), campaign);
                }
            }
            store
        }
    }

    impl AssignmentStore for MemoryStore {
        fn campaign(&self, id: &CampaignId) -> Result<Option<CampaignProfile>, RepositoryError> {
            Ok(self.campaigns.lock().expect("lock").get(id).cloned())
        }

        fn campaigns(&self) -> Result<Vec<CampaignProfile>, RepositoryError> {
            Ok(self
                .campaigns
                .lock()
                .expect("lock")
                .values()
                .cloned()
                .collect())
        }

        fn increment_daily_count(&self, id: &CampaignId, by: u32) -> Result<u32, RepositoryError> {
            let mut guard = self.campaigns.lock().expect("lock");
            let campaign = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
            campaign.current_leads_today += by;
            Ok(campaign.current_leads_today)
        }

        fn insert_assignment(
            &self,
            record: AssignmentRecord,
        ) -> Result<AssignmentRecord, RepositoryError> {
            let mut guard = self.assignments.lock().expect("lock");
            if guard.contains_key(&record.assignment_id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.assignment_id.clone(), record.clone());
            Ok(record)
        }

        fn assignment(
            &self,
            id: &AssignmentId,
        ) -> Result<Option<AssignmentRecord>, RepositoryError> {
            Ok(self.assignments.lock().expect("lock").get(id).cloned())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryDispatch {
        events: Arc<Mutex<Vec<OutreachDispatch>>>,
    }

    impl MemoryDispatch {
        pub(super) fn events(&self) -> Vec<OutreachDispatch> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl DispatchPublisher for MemoryDispatch {
        fn publish(&self, dispatch: OutreachDispatch) -> Result<(), DispatchError> {
            self.events.lock().expect("lock").push(dispatch);
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
}

mod eligibility {
    use super::common::*;
    use outreach_ai::workflows::campaigns::assignment::{
        ConnectionDegree, EligibilityEngine, ProfileVisibility,
    };

    #[test]
    fn compliant_lead_is_assignable_with_strong_estimate() {
        let engine = EligibilityEngine::new();
        let verdict = engine.validate(&lead("clean"), &campaign("clean"));

        assert!(verdict.can_assign);
        assert!(verdict.blocked_reasons.is_empty());
        assert!(verdict.estimated_success_rate.expect("rate") >= 40);
    }

    #[test]
    fn missing_linkedin_profile_blocks_with_actionable_reason() {
        let engine = EligibilityEngine::new();
        let mut lead = lead("no-linkedin");
        lead.linkedin_url = None;

        let verdict = engine.validate(&lead, &campaign("any"));

        assert!(!verdict.can_assign);
        assert!(verdict
            .blocked_reasons
            .iter()
            .any(|reason| reason.contains("No valid LinkedIn profile found")));
        assert!(!verdict.suggestions.is_empty());
    }

    #[test]
    fn third_degree_lead_blocked_by_first_degree_campaign() {
        let engine = EligibilityEngine::new();
        let mut lead = lead("distant");
        lead.connection_degree = ConnectionDegree::Third;
        let mut campaign = campaign("close-only");
        campaign.max_connection_degree = Some(ConnectionDegree::First);

        let verdict = engine.validate(&lead, &campaign);

        assert!(!verdict.can_assign);
        assert!(verdict
            .blocked_reasons
            .iter()
            .any(|reason| reason.contains("3rd connection") && reason.contains("1st")));
    }

    #[test]
    fn premium_gate_blocks_free_accounts() {
        let engine = EligibilityEngine::new();
        let mut campaign = campaign("premium-gate");
        campaign.premium_required = true;

        let verdict = engine.validate(&lead("free-tier"), &campaign);
        assert!(!verdict.can_assign);
    }

    #[test]
    fn daily_limit_message_names_the_counts() {
        let engine = EligibilityEngine::new();
        let mut campaign = campaign("saturated");
        campaign.max_leads_per_day = 100;
        campaign.current_leads_today = 100;

        let verdict = engine.validate(&lead("late"), &campaign);

        assert!(!verdict.can_assign);
        assert!(verdict
            .blocked_reasons
            .iter()
            .any(|reason| reason.contains("Daily limit reached: 100/100")));
    }

    #[test]
    fn estimates_stay_within_the_documented_cap() {
        let engine = EligibilityEngine::new();
        let mut lead = lead("max");
        lead.premium_account = true;
        lead.open_to_work = true;
        lead.mutual_connections = 40;
        lead.profile_completeness = 100;

        let verdict = engine.validate(&lead, &campaign("cap"));
        let rate = verdict.estimated_success_rate.expect("rate");
        assert!(rate <= 85);

        lead.profile_visibility = ProfileVisibility::Private;
        let verdict = engine.validate(&lead, &campaign("cap"));
        assert!(verdict.estimated_success_rate.expect("rate") <= 85);
    }
}

mod assignment {
    use super::common::*;
    use outreach_ai::workflows::campaigns::assignment::{AssignmentStatus, AssignmentStore};

    #[test]
    fn queued_assignment_reaches_downstream_automation() {
        let campaign = campaign("flow");
        let campaign_id = campaign.campaign_id.clone();
        let (service, store, dispatch) = build_service(vec![campaign]);

        let record = service.assign(lead("flow"), &campaign_id).expect("assigns");

        assert_eq!(record.status, AssignmentStatus::Queued);
        assert_eq!(dispatch.events().len(), 1);
        assert_eq!(
            store
                .campaign(&campaign_id)
                .expect("store")
                .expect("campaign")
                .current_leads_today,
            1
        );
    }

    #[test]
    fn batch_assignment_respects_the_daily_budget() {
        let mut campaign = campaign("budget");
        campaign.max_leads_per_day = 1;
        let campaign_id = campaign.campaign_id.clone();
        let (service, _, dispatch) = build_service(vec![campaign]);

        let records = service
            .assign_batch(vec![lead("a"), lead("b")], &campaign_id)
            .expect("batch runs");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, AssignmentStatus::Queued);
        assert_eq!(records[1].status, AssignmentStatus::Rejected);
        assert_eq!(dispatch.events().len(), 1);
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::Duration;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::common::*;
    use outreach_ai::workflows::campaigns::assignment::{
        assignment_router, CampaignAssignmentService,
    };

    fn build_router() -> axum::Router {
        let store = Arc::new(MemoryStore::with_campaigns(vec![campaign("api")]));
        let dispatch = Arc::new(MemoryDispatch::default());
        let service = Arc::new(CampaignAssignmentService::new(
            store,
            dispatch,
            Duration::minutes(60),
        ));
        assignment_router(service)
    }

    #[tokio::test]
    async fn validate_endpoint_round_trips_a_verdict() {
        let router = build_router();
        let lead = lead("api");

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/campaigns/cmp-api/validate")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&lead).expect("serialize")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(payload.get("can_assign"), Some(&Value::Bool(true)));
    }

    #[tokio::test]
    async fn templates_are_served_as_static_seed_data() {
        let router = build_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/campaigns/templates")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let payload: Value = serde_json::from_slice(&body).expect("json");
        assert!(!payload.as_array().expect("array").is_empty());
    }
}
