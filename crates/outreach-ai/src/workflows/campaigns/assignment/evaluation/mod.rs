pub(crate) mod estimator;
mod rules;

pub use rules::{rule_catalog, RuleOutcome, RulePriority, Severity, ValidationRule};

use serde::{Deserialize, Serialize};

use super::domain::{CampaignId, CampaignProfile, LeadProfile};

/// Stateless validator that runs the full rule catalog against lead/campaign
/// pairs. Pure computation: no I/O, no caching, no shared state.
#[derive(Debug, Default, Clone, Copy)]
pub struct EligibilityEngine;

impl EligibilityEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one lead against one campaign.
    pub fn validate(&self, lead: &LeadProfile, campaign: &CampaignProfile) -> CampaignAssignmentResult {
        let mut blocked_reasons = Vec::new();
        let mut warnings = Vec::new();
        let mut suggestions = Vec::new();

        for rule in rules::RULE_CATALOG {
            let RuleOutcome {
                is_valid,
                reason,
                suggestion,
                severity,
            } = (rule.check)(lead, campaign);

            match (is_valid, severity, reason) {
                (false, Severity::Error, Some(reason)) => {
                    push_unique(&mut blocked_reasons, reason);
                }
                // Warning-severity reasons surface whether or not they block,
                // so non-blocking advisories (private profiles) still show up.
                (_, Severity::Warning, Some(reason)) => {
                    push_unique(&mut warnings, reason);
                }
                _ => {}
            }

            if let Some(suggestion) = suggestion {
                push_unique(&mut suggestions, suggestion);
            }
        }

        let can_assign = blocked_reasons.is_empty();
        let estimated_success_rate = estimator::estimate_success_rate(lead, campaign);

        CampaignAssignmentResult {
            can_assign,
            blocked_reasons,
            warnings,
            suggestions,
            valid_leads_count: usize::from(can_assign),
            total_leads_count: 1,
            // Computed even for blocked leads so callers can rank remediation.
            estimated_success_rate: Some(estimated_success_rate),
        }
    }

    /// Evaluate many leads against one campaign and merge the verdicts.
    ///
    /// The campaign's daily counter does not advance between per-lead checks
    /// within one call; callers assigning leads incrementally must re-check
    /// the limit after each assignment.
    pub fn validate_batch(
        &self,
        leads: &[LeadProfile],
        campaign: &CampaignProfile,
    ) -> CampaignAssignmentResult {
        let mut merged = CampaignAssignmentResult {
            can_assign: false,
            blocked_reasons: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            valid_leads_count: 0,
            total_leads_count: leads.len(),
            estimated_success_rate: None,
        };

        let mut rate_sum: u64 = 0;
        for lead in leads {
            let verdict = self.validate(lead, campaign);
            if verdict.can_assign {
                merged.valid_leads_count += 1;
            }
            for reason in verdict.blocked_reasons {
                push_unique(&mut merged.blocked_reasons, reason);
            }
            for warning in verdict.warnings {
                push_unique(&mut merged.warnings, warning);
            }
            for suggestion in verdict.suggestions {
                push_unique(&mut merged.suggestions, suggestion);
            }
            rate_sum += u64::from(verdict.estimated_success_rate.unwrap_or(0));
        }

        if !leads.is_empty() {
            merged.can_assign = merged.valid_leads_count > 0;
            let mean = (rate_sum as f64 / leads.len() as f64).round() as u8;
            merged.estimated_success_rate = Some(mean);
        }

        merged
    }

    /// Rank a set of campaigns by how compatible a lead list is with each.
    pub fn compatibility(
        &self,
        leads: &[LeadProfile],
        campaigns: &[CampaignProfile],
    ) -> Vec<CampaignCompatibility> {
        campaigns
            .iter()
            .map(|campaign| {
                let verdict = self.validate_batch(leads, campaign);
                let compatibility_score = if verdict.total_leads_count == 0 {
                    0
                } else {
                    (verdict.valid_leads_count as f64 / verdict.total_leads_count as f64 * 100.0)
                        .round() as u8
                };

                CampaignCompatibility {
                    campaign_id: campaign.campaign_id.clone(),
                    campaign_name: campaign.name.clone(),
                    compatibility_score,
                    valid_leads_count: verdict.valid_leads_count,
                    total_leads_count: verdict.total_leads_count,
                    estimated_success_rate: verdict.estimated_success_rate,
                    top_issues: top_issue_categories(&verdict.blocked_reasons),
                }
            })
            .collect()
    }
}

/// Aggregated verdict for one lead (or a merged batch) against a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignAssignmentResult {
    pub can_assign: bool,
    pub blocked_reasons: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
    pub valid_leads_count: usize,
    pub total_leads_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_success_rate: Option<u8>,
}

/// Per-campaign summary of how well a lead list fits its eligibility policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignCompatibility {
    pub campaign_id: CampaignId,
    pub campaign_name: String,
    pub compatibility_score: u8,
    pub valid_leads_count: usize,
    pub total_leads_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_success_rate: Option<u8>,
    pub top_issues: Vec<String>,
}

fn push_unique(entries: &mut Vec<String>, entry: String) {
    if !entries.contains(&entry) {
        entries.push(entry);
    }
}

/// Display aid: the first three distinct blocking-reason categories, where a
/// category is the reason text before any colon.
fn top_issue_categories(blocked_reasons: &[String]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for reason in blocked_reasons {
        let category = reason
            .split(':')
            .next()
            .unwrap_or(reason)
            .trim()
            .to_string();
        if !categories.contains(&category) {
            categories.push(category);
        }
        if categories.len() == 3 {
            break;
        }
    }
    categories
}
