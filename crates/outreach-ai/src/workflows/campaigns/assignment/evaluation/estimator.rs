use super::super::domain::{
    CampaignProfile, CampaignType, ConnectionDegree, LeadProfile, ProfileVisibility,
};

const BASE_SCORE: i32 = 15;

/// The heuristic never claims near-certainty.
const SUCCESS_RATE_CAP: i32 = 85;

/// Deterministic 0-85 estimate of outreach success likelihood. Bonuses are
/// summed and clamped once at the end, never per step, so the function is
/// order-independent.
pub(crate) fn estimate_success_rate(lead: &LeadProfile, campaign: &CampaignProfile) -> u8 {
    let mut score = BASE_SCORE;

    score += match lead.connection_degree {
        ConnectionDegree::First => 25,
        ConnectionDegree::Second => 15,
        ConnectionDegree::Third => 5,
        _ => 0,
    };

    // Mutually exclusive tiers: only the highest matching one applies.
    score += if lead.mutual_connections >= 10 {
        15
    } else if lead.mutual_connections >= 5 {
        10
    } else if lead.mutual_connections >= 1 {
        5
    } else {
        0
    };

    score += if lead.profile_completeness >= 90 {
        10
    } else if lead.profile_completeness >= 70 {
        5
    } else {
        0
    };

    if lead.premium_account {
        score += 10;
    }
    if lead.open_to_work {
        score += 15;
    }
    if lead.profile_visibility == ProfileVisibility::Private {
        score -= 10;
    }

    score += match campaign.campaign_type {
        CampaignType::ConnectionRequest => 5,
        CampaignType::Inmail => 10,
        CampaignType::Email if lead.email.is_some() => 20,
        _ => 0,
    };

    score.clamp(0, SUCCESS_RATE_CAP) as u8
}
