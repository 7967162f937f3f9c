use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use outreach_ai::error::AppError;
use outreach_ai::workflows::campaigns::assignment::{
    assignment_router, campaign_templates, AssignmentStore, CampaignAssignmentService,
    CampaignCompatibility, DispatchPublisher, EligibilityEngine,
};
use outreach_ai::workflows::leads::LeadCsvImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct LeadReportRequest {
    /// Raw prospect CSV export, headers included.
    pub(crate) csv: String,
    /// Drop campaigns scoring below this threshold.
    #[serde(default)]
    pub(crate) min_score: Option<u8>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LeadReportResponse {
    pub(crate) total_leads: usize,
    pub(crate) campaigns: Vec<CampaignCompatibility>,
}

pub(crate) fn with_assignment_routes<S, P>(
    service: Arc<CampaignAssignmentService<S, P>>,
) -> axum::Router
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    assignment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/leads/report",
            axum::routing::post(lead_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Scores an uploaded prospect CSV against the campaign template catalog
/// without touching stored campaigns or daily counters.
pub(crate) async fn lead_report_endpoint(
    Json(payload): Json<LeadReportRequest>,
) -> Result<Json<LeadReportResponse>, AppError> {
    let LeadReportRequest { csv, min_score } = payload;

    let leads = LeadCsvImporter::from_reader(Cursor::new(csv.into_bytes()))?;
    let engine = EligibilityEngine::new();
    let mut campaigns = engine.compatibility(&leads, &campaign_templates());

    if let Some(min) = min_score {
        campaigns.retain(|summary| summary.compatibility_score >= min);
    }
    campaigns.sort_by(|a, b| {
        b.compatibility_score
            .cmp(&a.compatibility_score)
            .then_with(|| a.campaign_id.cmp(&b.campaign_id))
    });

    Ok(Json(LeadReportResponse {
        total_leads: leads.len(),
        campaigns,
    }))
}
