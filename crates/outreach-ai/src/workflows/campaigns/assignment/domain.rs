use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for prospect leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for outreach campaigns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(pub String);

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// LinkedIn network distance between the sender and the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionDegree {
    First,
    Second,
    Third,
    OutOfNetwork,
    Unknown,
}

impl ConnectionDegree {
    /// Ordinal used when comparing against a campaign's degree ceiling.
    /// `Unknown` carries no ordinal, so degree rules skip it.
    pub const fn ordinal(self) -> Option<u8> {
        match self {
            ConnectionDegree::First => Some(1),
            ConnectionDegree::Second => Some(2),
            ConnectionDegree::Third => Some(3),
            ConnectionDegree::OutOfNetwork => Some(4),
            ConnectionDegree::Unknown => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ConnectionDegree::First => "1st",
            ConnectionDegree::Second => "2nd",
            ConnectionDegree::Third => "3rd",
            ConnectionDegree::OutOfNetwork => "out-of-network",
            ConnectionDegree::Unknown => "unknown",
        }
    }
}

/// Visibility of the lead's LinkedIn profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileVisibility {
    Public,
    Limited,
    Private,
}

/// Where the lead record was sourced from. Determines compatibility with a
/// campaign's intake policy and is the only field every rule may assume set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    BasicSearch,
    SalesNavigator,
    RecruiterSearch,
    PostEngagement,
    CsvUpload,
}

impl SearchSource {
    pub const fn label(self) -> &'static str {
        match self {
            SearchSource::BasicSearch => "basic search",
            SearchSource::SalesNavigator => "Sales Navigator",
            SearchSource::RecruiterSearch => "recruiter search",
            SearchSource::PostEngagement => "post engagement",
            SearchSource::CsvUpload => "CSV upload",
        }
    }
}

/// Outreach channel a campaign sends through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    ConnectionRequest,
    DirectMessage,
    Inmail,
    Email,
    MultiChannel,
}

impl CampaignType {
    pub const fn label(self) -> &'static str {
        match self {
            CampaignType::ConnectionRequest => "connection request",
            CampaignType::DirectMessage => "direct message",
            CampaignType::Inmail => "InMail",
            CampaignType::Email => "email",
            CampaignType::MultiChannel => "multi-channel",
        }
    }
}

/// Enriched prospect snapshot handed to the rules engine. The engine treats
/// this as read-only input hydrated by the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadProfile {
    pub lead_id: LeadId,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub connection_degree: ConnectionDegree,
    pub mutual_connections: u32,
    pub follower_count: u32,
    pub premium_account: bool,
    pub open_to_work: bool,
    pub profile_visibility: ProfileVisibility,
    /// 0-100 enrichment completeness score.
    pub profile_completeness: u8,
    pub has_company_page: bool,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub seniority_level: Option<String>,
    pub search_source: SearchSource,
}

/// Targeting and eligibility policy of an outreach campaign. Unset optional
/// thresholds mean "no constraint"; an empty allowed-source set means the
/// campaign accepts any intake channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignProfile {
    pub campaign_id: CampaignId,
    pub name: String,
    pub campaign_type: CampaignType,
    pub connection_required: bool,
    pub premium_required: bool,
    pub email_required: bool,
    pub phone_required: bool,
    #[serde(default)]
    pub min_mutual_connections: Option<u32>,
    #[serde(default)]
    pub max_connection_degree: Option<ConnectionDegree>,
    #[serde(default)]
    pub min_profile_completeness: Option<u8>,
    #[serde(default)]
    pub excluded_industries: BTreeSet<String>,
    #[serde(default)]
    pub excluded_titles: BTreeSet<String>,
    #[serde(default)]
    pub allowed_search_sources: BTreeSet<SearchSource>,
    pub max_leads_per_day: u32,
    pub current_leads_today: u32,
}

impl CampaignProfile {
    /// Whether the campaign still has intake headroom today.
    pub fn under_daily_limit(&self) -> bool {
        self.current_leads_today < self.max_leads_per_day
    }
}
