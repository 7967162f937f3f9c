//! Campaign eligibility and lead-assignment workflow.
//!
//! The rules engine itself is pure computation over a lead/campaign pair;
//! the surrounding service owns caching, counter bookkeeping, and dispatch.

pub mod domain;
pub mod evaluation;
pub mod repository;
pub mod router;
pub mod service;
pub mod templates;

#[cfg(test)]
mod tests;

pub use domain::{
    CampaignId, CampaignProfile, CampaignType, ConnectionDegree, LeadId, LeadProfile,
    ProfileVisibility, SearchSource,
};
pub use evaluation::{
    rule_catalog, CampaignAssignmentResult, CampaignCompatibility, EligibilityEngine, RuleOutcome,
    RulePriority, Severity, ValidationRule,
};
pub use repository::{
    AssignmentId, AssignmentRecord, AssignmentStatus, AssignmentStatusView, AssignmentStore,
    DispatchError, DispatchPublisher, OutreachDispatch, RepositoryError,
};
pub use router::assignment_router;
pub use service::{AssignmentServiceError, CampaignAssignmentService};
pub use templates::campaign_templates;
