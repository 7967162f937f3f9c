use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::workflows::campaigns::assignment::domain::{
    ConnectionDegree, LeadId, LeadProfile, ProfileVisibility, SearchSource,
};

pub(crate) fn parse_leads<R: Read>(reader: R) -> Result<Vec<LeadProfile>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut leads = Vec::new();

    for (index, record) in csv_reader.deserialize::<ProspectRow>().enumerate() {
        let row = record?;
        leads.push(row.into_lead(index));
    }

    Ok(leads)
}

/// One row of an exported prospect list. Headers follow the export format of
/// the upstream scraping tools; everything beyond the name is optional.
#[derive(Debug, Deserialize)]
struct ProspectRow {
    #[serde(rename = "Lead ID", default, deserialize_with = "empty_string_as_none")]
    lead_id: Option<String>,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Title", default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(
        rename = "LinkedIn URL",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    linkedin_url: Option<String>,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(
        rename = "Connection Degree",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    connection_degree: Option<String>,
    #[serde(
        rename = "Mutual Connections",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    mutual_connections: Option<String>,
    #[serde(rename = "Followers", default, deserialize_with = "empty_string_as_none")]
    followers: Option<String>,
    #[serde(rename = "Premium", default, deserialize_with = "empty_string_as_none")]
    premium: Option<String>,
    #[serde(
        rename = "Open To Work",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    open_to_work: Option<String>,
    #[serde(rename = "Visibility", default, deserialize_with = "empty_string_as_none")]
    visibility: Option<String>,
    #[serde(
        rename = "Profile Completeness",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    profile_completeness: Option<String>,
    #[serde(
        rename = "Has Company Page",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    has_company_page: Option<String>,
    #[serde(rename = "Industry", default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(rename = "Seniority", default, deserialize_with = "empty_string_as_none")]
    seniority: Option<String>,
}

impl ProspectRow {
    fn into_lead(self, index: usize) -> LeadProfile {
        let lead_id = self
            .lead_id
            .unwrap_or_else(|| format!("csv-{:05}", index + 1));

        LeadProfile {
            lead_id: LeadId(lead_id),
            name: self.name,
            title: self.title,
            company: self.company,
            location: self.location,
            linkedin_url: self.linkedin_url,
            email: self.email,
            phone: self.phone,
            connection_degree: parse_degree(self.connection_degree.as_deref()),
            mutual_connections: parse_count(self.mutual_connections.as_deref()),
            follower_count: parse_count(self.followers.as_deref()),
            premium_account: parse_flag(self.premium.as_deref()),
            open_to_work: parse_flag(self.open_to_work.as_deref()),
            profile_visibility: parse_visibility(self.visibility.as_deref()),
            profile_completeness: parse_count(self.profile_completeness.as_deref()).min(100) as u8,
            has_company_page: parse_flag(self.has_company_page.as_deref()),
            industry: self.industry,
            seniority_level: self.seniority,
            // Every CSV-imported lead carries its provenance.
            search_source: SearchSource::CsvUpload,
        }
    }
}

fn parse_degree(value: Option<&str>) -> ConnectionDegree {
    match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
        Some("1st" | "1" | "first") => ConnectionDegree::First,
        Some("2nd" | "2" | "second") => ConnectionDegree::Second,
        Some("3rd" | "3" | "third") => ConnectionDegree::Third,
        Some("out of network" | "out_of_network") => ConnectionDegree::OutOfNetwork,
        _ => ConnectionDegree::Unknown,
    }
}

fn parse_visibility(value: Option<&str>) -> ProfileVisibility {
    match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
        Some("private") => ProfileVisibility::Private,
        Some("limited") => ProfileVisibility::Limited,
        _ => ProfileVisibility::Public,
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "yes" | "y" | "1")
    )
}

fn parse_count(value: Option<&str>) -> u32 {
    value
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
