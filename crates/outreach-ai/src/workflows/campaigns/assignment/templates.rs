use std::collections::BTreeSet;

use super::domain::{
    CampaignId, CampaignProfile, CampaignType, ConnectionDegree, SearchSource,
};

/// Seed catalog of campaign policies used to bootstrap a fresh workspace.
/// Static data only; nothing here is computed or mutated at runtime.
pub fn campaign_templates() -> Vec<CampaignProfile> {
    vec![
        CampaignProfile {
            campaign_id: CampaignId("tpl-warm-connect".to_string()),
            name: "Warm Intro Connection Push".to_string(),
            campaign_type: CampaignType::ConnectionRequest,
            connection_required: true,
            premium_required: false,
            email_required: false,
            phone_required: false,
            min_mutual_connections: Some(3),
            max_connection_degree: Some(ConnectionDegree::Second),
            min_profile_completeness: Some(60),
            excluded_industries: BTreeSet::new(),
            excluded_titles: titles(&["student", "intern"]),
            allowed_search_sources: sources(&[
                SearchSource::BasicSearch,
                SearchSource::SalesNavigator,
                SearchSource::PostEngagement,
            ]),
            max_leads_per_day: 80,
            current_leads_today: 0,
        },
        CampaignProfile {
            campaign_id: CampaignId("tpl-navigator-inmail".to_string()),
            name: "Sales Navigator InMail Sequence".to_string(),
            campaign_type: CampaignType::Inmail,
            connection_required: false,
            premium_required: true,
            email_required: false,
            phone_required: false,
            min_mutual_connections: None,
            max_connection_degree: Some(ConnectionDegree::Third),
            min_profile_completeness: Some(70),
            excluded_industries: industries(&["Staffing and Recruiting"]),
            excluded_titles: titles(&["recruiter"]),
            allowed_search_sources: sources(&[
                SearchSource::SalesNavigator,
                SearchSource::RecruiterSearch,
            ]),
            max_leads_per_day: 40,
            current_leads_today: 0,
        },
        CampaignProfile {
            campaign_id: CampaignId("tpl-email-nurture".to_string()),
            name: "Verified Email Nurture".to_string(),
            campaign_type: CampaignType::Email,
            connection_required: false,
            premium_required: false,
            email_required: true,
            phone_required: false,
            min_mutual_connections: None,
            max_connection_degree: None,
            min_profile_completeness: Some(50),
            excluded_industries: BTreeSet::new(),
            excluded_titles: BTreeSet::new(),
            allowed_search_sources: sources(&[
                SearchSource::CsvUpload,
                SearchSource::SalesNavigator,
                SearchSource::BasicSearch,
            ]),
            max_leads_per_day: 200,
            current_leads_today: 0,
        },
        CampaignProfile {
            campaign_id: CampaignId("tpl-abm-multichannel".to_string()),
            name: "Multi-Channel ABM Pilot".to_string(),
            campaign_type: CampaignType::MultiChannel,
            connection_required: false,
            premium_required: false,
            email_required: true,
            phone_required: true,
            min_mutual_connections: Some(1),
            max_connection_degree: Some(ConnectionDegree::Third),
            min_profile_completeness: Some(80),
            excluded_industries: industries(&["Government Administration"]),
            excluded_titles: titles(&["consultant", "freelance"]),
            allowed_search_sources: sources(&[SearchSource::SalesNavigator]),
            max_leads_per_day: 25,
            current_leads_today: 0,
        },
    ]
}

fn sources(values: &[SearchSource]) -> BTreeSet<SearchSource> {
    values.iter().copied().collect()
}

fn industries(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn titles(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}
