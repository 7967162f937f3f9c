use serde::{Deserialize, Serialize};

use super::super::domain::{CampaignProfile, LeadProfile, ProfileVisibility};

/// How an outcome participates in the aggregated verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Documentation-only ordering tag. Every rule always runs; priority never
/// short-circuits evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePriority {
    Critical,
    High,
    Medium,
    Low,
}

/// Result of a single eligibility rule against one lead/campaign pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub severity: Severity,
}

impl RuleOutcome {
    /// Absence of a constraint is never a failure.
    fn pass() -> Self {
        Self {
            is_valid: true,
            reason: None,
            suggestion: None,
            severity: Severity::Info,
        }
    }

    fn blocked(reason: String, suggestion: &str) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
            suggestion: Some(suggestion.to_string()),
            severity: Severity::Error,
        }
    }

    fn warning(reason: String, suggestion: &str) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
            suggestion: Some(suggestion.to_string()),
            severity: Severity::Warning,
        }
    }

    /// Non-blocking advisory: the lead stays assignable but the reason and
    /// suggestion are still surfaced to the operator.
    fn advisory(reason: String, suggestion: &str) -> Self {
        Self {
            is_valid: true,
            reason: Some(reason),
            suggestion: Some(suggestion.to_string()),
            severity: Severity::Warning,
        }
    }
}

pub(crate) type RuleFn = fn(&LeadProfile, &CampaignProfile) -> RuleOutcome;

/// A named, pure eligibility check. Rules never inspect each other's
/// outputs, so evaluation order only affects display order of reasons.
pub struct ValidationRule {
    pub name: &'static str,
    pub priority: RulePriority,
    pub(crate) check: RuleFn,
}

/// The fixed catalog of eligibility checks, evaluated in full for every
/// lead/campaign pair.
pub(crate) const RULE_CATALOG: &[ValidationRule] = &[
    ValidationRule {
        name: "linkedin_profile_required",
        priority: RulePriority::Critical,
        check: linkedin_profile_required,
    },
    ValidationRule {
        name: "connection_degree_limit",
        priority: RulePriority::High,
        check: connection_degree_limit,
    },
    ValidationRule {
        name: "premium_account_required",
        priority: RulePriority::High,
        check: premium_account_required,
    },
    ValidationRule {
        name: "email_required",
        priority: RulePriority::High,
        check: email_required,
    },
    ValidationRule {
        name: "phone_required",
        priority: RulePriority::High,
        check: phone_required,
    },
    ValidationRule {
        name: "search_source_compatibility",
        priority: RulePriority::Critical,
        check: search_source_compatibility,
    },
    ValidationRule {
        name: "profile_completeness",
        priority: RulePriority::Medium,
        check: profile_completeness,
    },
    ValidationRule {
        name: "mutual_connections_minimum",
        priority: RulePriority::Medium,
        check: mutual_connections_minimum,
    },
    ValidationRule {
        name: "industry_exclusion",
        priority: RulePriority::High,
        check: industry_exclusion,
    },
    ValidationRule {
        name: "title_exclusion",
        priority: RulePriority::High,
        check: title_exclusion,
    },
    ValidationRule {
        name: "daily_limit",
        priority: RulePriority::Critical,
        check: daily_limit,
    },
    ValidationRule {
        name: "profile_privacy",
        priority: RulePriority::Low,
        check: profile_privacy,
    },
];

/// Public read-only view of the catalog for diagnostics and documentation.
pub fn rule_catalog() -> &'static [ValidationRule] {
    RULE_CATALOG
}

fn linkedin_profile_required(lead: &LeadProfile, _campaign: &CampaignProfile) -> RuleOutcome {
    let valid = lead
        .linkedin_url
        .as_deref()
        .map(|url| url.contains("linkedin.com"))
        .unwrap_or(false);

    if valid {
        RuleOutcome::pass()
    } else {
        RuleOutcome::blocked(
            "No valid LinkedIn profile found for this lead".to_string(),
            "Re-run enrichment to capture the lead's LinkedIn URL",
        )
    }
}

fn connection_degree_limit(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    let max_degree = match campaign.max_connection_degree {
        Some(degree) => degree,
        None => return RuleOutcome::pass(),
    };

    match (lead.connection_degree.ordinal(), max_degree.ordinal()) {
        (Some(lead_ordinal), Some(max_ordinal)) if lead_ordinal > max_ordinal => {
            RuleOutcome::blocked(
                format!(
                    "Lead is a {} connection; campaign accepts {} connections at most",
                    lead.connection_degree.label(),
                    max_degree.label()
                ),
                "Target closer connections or raise the campaign's degree ceiling",
            )
        }
        _ => RuleOutcome::pass(),
    }
}

fn premium_account_required(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    if campaign.premium_required && !lead.premium_account {
        RuleOutcome::blocked(
            "Campaign requires leads with a LinkedIn Premium account".to_string(),
            "Filter the lead list to premium accounts or relax the requirement",
        )
    } else {
        RuleOutcome::pass()
    }
}

fn email_required(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    let has_email = lead
        .email
        .as_deref()
        .map(|email| !email.trim().is_empty())
        .unwrap_or(false);

    if campaign.email_required && !has_email {
        RuleOutcome::blocked(
            "Campaign requires an email address and none is on file".to_string(),
            "Enrich the lead with a verified email before assigning",
        )
    } else {
        RuleOutcome::pass()
    }
}

fn phone_required(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    let has_phone = lead
        .phone
        .as_deref()
        .map(|phone| !phone.trim().is_empty())
        .unwrap_or(false);

    if campaign.phone_required && !has_phone {
        RuleOutcome::blocked(
            "Campaign requires a phone number and none is on file".to_string(),
            "Enrich the lead with a phone number before assigning",
        )
    } else {
        RuleOutcome::pass()
    }
}

fn search_source_compatibility(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    // An empty allowed set means the campaign has no intake restriction.
    if campaign.allowed_search_sources.is_empty()
        || campaign.allowed_search_sources.contains(&lead.search_source)
    {
        RuleOutcome::pass()
    } else {
        RuleOutcome::blocked(
            format!(
                "Leads sourced from {} are not accepted by this campaign",
                lead.search_source.label()
            ),
            "Route the lead to a campaign that accepts its search source",
        )
    }
}

fn profile_completeness(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    match campaign.min_profile_completeness {
        Some(minimum) if lead.profile_completeness < minimum => RuleOutcome::warning(
            format!(
                "Profile completeness {}% is below the campaign minimum of {}%",
                lead.profile_completeness, minimum
            ),
            "Enrich the profile before outreach to improve response rates",
        ),
        _ => RuleOutcome::pass(),
    }
}

fn mutual_connections_minimum(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    match campaign.min_mutual_connections {
        Some(minimum) if lead.mutual_connections < minimum => RuleOutcome::warning(
            format!(
                "Only {} mutual connection(s); campaign prefers at least {}",
                lead.mutual_connections, minimum
            ),
            "Warm the lead through shared connections before outreach",
        ),
        _ => RuleOutcome::pass(),
    }
}

fn industry_exclusion(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    match lead.industry.as_deref() {
        Some(industry) if campaign.excluded_industries.contains(industry) => RuleOutcome::blocked(
            format!("Industry '{industry}' is excluded by this campaign"),
            "Remove the industry exclusion or pick a different campaign",
        ),
        _ => RuleOutcome::pass(),
    }
}

fn title_exclusion(lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    let title = match lead.title.as_deref() {
        Some(title) => title.to_lowercase(),
        None => return RuleOutcome::pass(),
    };

    for excluded in &campaign.excluded_titles {
        if title.contains(&excluded.to_lowercase()) {
            return RuleOutcome::blocked(
                format!("Title matches excluded keyword '{excluded}'"),
                "Review the title exclusion list or pick a different campaign",
            );
        }
    }

    RuleOutcome::pass()
}

fn daily_limit(_lead: &LeadProfile, campaign: &CampaignProfile) -> RuleOutcome {
    if !campaign.under_daily_limit() {
        RuleOutcome::blocked(
            format!(
                "Daily limit reached: {}/{}",
                campaign.current_leads_today, campaign.max_leads_per_day
            ),
            "Wait for the daily counter to reset or raise the campaign limit",
        )
    } else {
        RuleOutcome::pass()
    }
}

fn profile_privacy(lead: &LeadProfile, _campaign: &CampaignProfile) -> RuleOutcome {
    if lead.profile_visibility == ProfileVisibility::Private {
        RuleOutcome::advisory(
            "Profile is private; response rates are typically lower".to_string(),
            "Prefer InMail or email channels for private profiles",
        )
    } else {
        RuleOutcome::pass()
    }
}
