use crate::infra::{InMemoryAssignmentStore, InMemoryDispatchPublisher};
use clap::Args;
use outreach_ai::error::AppError;
use outreach_ai::workflows::campaigns::assignment::{
    campaign_templates, AssignmentStatus, CampaignAssignmentService, CampaignCompatibility,
    CampaignId, ConnectionDegree, EligibilityEngine, LeadId, LeadProfile, ProfileVisibility,
    SearchSource,
};
use outreach_ai::workflows::leads::LeadCsvImporter;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional prospect CSV export to drive the demo. Defaults to a
    /// synthetic lead list.
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Campaign template to assign against (defaults to the first template).
    #[arg(long)]
    pub(crate) campaign: Option<String>,
    /// Skip the assignment portion of the demo.
    #[arg(long)]
    pub(crate) skip_assignment: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CompatibilityReportArgs {
    /// Prospect CSV export to score against the template catalog.
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Hide campaigns scoring below this threshold.
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
}

pub(crate) fn run_compatibility_report(args: CompatibilityReportArgs) -> Result<(), AppError> {
    let CompatibilityReportArgs { csv, min_score } = args;

    let leads = LeadCsvImporter::from_path(csv)?;
    let engine = EligibilityEngine::new();
    let mut summaries = engine.compatibility(&leads, &campaign_templates());

    if let Some(min) = min_score {
        summaries.retain(|summary| summary.compatibility_score >= min);
    }
    summaries.sort_by(|a, b| {
        b.compatibility_score
            .cmp(&a.compatibility_score)
            .then_with(|| a.campaign_id.cmp(&b.campaign_id))
    });

    render_compatibility_report(leads.len(), &summaries);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        csv,
        campaign,
        skip_assignment,
    } = args;

    println!("Campaign eligibility demo");
    let leads = match csv {
        Some(path) => {
            let leads = LeadCsvImporter::from_path(path)?;
            println!("Lead source: prospect CSV import ({} leads)", leads.len());
            leads
        }
        None => {
            let leads = demo_leads();
            println!("Lead source: synthetic demo list ({} leads)", leads.len());
            leads
        }
    };

    let templates = campaign_templates();
    let engine = EligibilityEngine::new();
    let mut summaries = engine.compatibility(&leads, &templates);
    summaries.sort_by(|a, b| {
        b.compatibility_score
            .cmp(&a.compatibility_score)
            .then_with(|| a.campaign_id.cmp(&b.campaign_id))
    });
    render_compatibility_report(leads.len(), &summaries);

    if skip_assignment || leads.is_empty() {
        return Ok(());
    }

    let campaign_id = match campaign {
        Some(raw) => CampaignId(raw),
        None => templates[0].campaign_id.clone(),
    };
    let campaign_name = templates
        .iter()
        .find(|template| template.campaign_id == campaign_id)
        .map(|template| template.name.as_str())
        .unwrap_or("unknown");

    println!("\nAssignment demo: {} ({})", campaign_id.0, campaign_name);
    let store = Arc::new(InMemoryAssignmentStore::with_campaigns(templates));
    let dispatch = Arc::new(InMemoryDispatchPublisher::default());
    let service = Arc::new(CampaignAssignmentService::new(
        store,
        dispatch.clone(),
        chrono::Duration::minutes(60),
    ));

    let first = &leads[0];
    let verdict = match service.validate(first, &campaign_id) {
        Ok(verdict) => verdict,
        Err(err) => {
            println!("  Validation unavailable: {}", err);
            return Ok(());
        }
    };
    println!(
        "- Lead {} -> can_assign={} (estimated success {}%)",
        first.lead_id.0,
        verdict.can_assign,
        verdict.estimated_success_rate.unwrap_or(0)
    );
    for reason in &verdict.blocked_reasons {
        println!("  Blocked: {}", reason);
    }
    for warning in &verdict.warnings {
        println!("  Warning: {}", warning);
    }
    for suggestion in &verdict.suggestions {
        println!("  Suggestion: {}", suggestion);
    }

    let records = match service.assign_batch(leads, &campaign_id) {
        Ok(records) => records,
        Err(err) => {
            println!("  Assignment unavailable: {}", err);
            return Ok(());
        }
    };

    println!("\nAssignment decisions");
    for record in &records {
        println!(
            "- {} -> {} ({})",
            record.lead.lead_id.0,
            record.status.label(),
            record.decision_rationale()
        );
    }

    if let Some(queued) = records
        .iter()
        .find(|record| record.status == AssignmentStatus::Queued)
    {
        match serde_json::to_string_pretty(&queued.status_view()) {
            Ok(json) => println!("\nPublic status payload:\n{}", json),
            Err(err) => println!("\nPublic status payload unavailable: {}", err),
        }
    }

    let events = dispatch.events();
    if events.is_empty() {
        println!("\nOutreach dispatches: none");
    } else {
        println!("\nOutreach dispatches");
        for event in events {
            println!(
                "- {} -> lead {} via {:?}",
                event.assignment_id.0, event.lead_id.0, event.channel
            );
        }
    }

    Ok(())
}

fn render_compatibility_report(lead_count: usize, summaries: &[CampaignCompatibility]) {
    println!("\nCampaign compatibility ({} leads scored)", lead_count);
    if summaries.is_empty() {
        println!("- no campaigns above the score threshold");
        return;
    }

    for summary in summaries {
        println!(
            "- {} ({}): score {} | {}/{} eligible | est. success {}%",
            summary.campaign_id.0,
            summary.campaign_name,
            summary.compatibility_score,
            summary.valid_leads_count,
            summary.total_leads_count,
            summary.estimated_success_rate.unwrap_or(0)
        );
        for issue in &summary.top_issues {
            println!("    issue: {}", issue);
        }
    }
}

fn demo_leads() -> Vec<LeadProfile> {
    vec![
        LeadProfile {
            lead_id: LeadId("demo-001".to_string()),
            name: "Dana Wu".to_string(),
            title: Some("VP Marketing".to_string()),
            company: Some("Brightline".to_string()),
            location: Some("Austin, TX".to_string()),
            linkedin_url: Some("https://www.linkedin.com/in/danawu".to_string()),
            email: Some("dana@brightline.co".to_string()),
            phone: Some("+1-512-555-0117".to_string()),
            connection_degree: ConnectionDegree::Second,
            mutual_connections: 6,
            follower_count: 2400,
            premium_account: false,
            open_to_work: false,
            profile_visibility: ProfileVisibility::Public,
            profile_completeness: 92,
            has_company_page: true,
            industry: Some("Software Development".to_string()),
            seniority_level: Some("VP".to_string()),
            search_source: SearchSource::SalesNavigator,
        },
        LeadProfile {
            lead_id: LeadId("demo-002".to_string()),
            name: "Marco Silva".to_string(),
            title: Some("Operations Analyst".to_string()),
            company: None,
            location: None,
            linkedin_url: None,
            email: None,
            phone: None,
            connection_degree: ConnectionDegree::Unknown,
            mutual_connections: 0,
            follower_count: 0,
            premium_account: false,
            open_to_work: true,
            profile_visibility: ProfileVisibility::Private,
            profile_completeness: 35,
            has_company_page: false,
            industry: None,
            seniority_level: None,
            search_source: SearchSource::BasicSearch,
        },
    ]
}
