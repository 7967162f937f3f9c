use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::LeadProfile;
use super::repository::{AssignmentId, AssignmentStore, DispatchPublisher, RepositoryError};
use super::service::{AssignmentServiceError, CampaignAssignmentService};
use super::templates::campaign_templates;
use super::CampaignId;

/// Router builder exposing the validation and assignment endpoints.
pub fn assignment_router<S, P>(service: Arc<CampaignAssignmentService<S, P>>) -> Router
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/campaigns/templates",
            get(templates_handler),
        )
        .route(
            "/api/v1/campaigns/compatibility",
            post(compatibility_handler::<S, P>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/validate",
            post(validate_handler::<S, P>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/validate-batch",
            post(validate_batch_handler::<S, P>),
        )
        .route(
            "/api/v1/campaigns/:campaign_id/assignments",
            post(assign_handler::<S, P>),
        )
        .route(
            "/api/v1/assignments/:assignment_id",
            get(assignment_handler::<S, P>),
        )
        .with_state(service)
}

async fn templates_handler() -> Response {
    (StatusCode::OK, axum::Json(campaign_templates())).into_response()
}

pub(crate) async fn validate_handler<S, P>(
    State(service): State<Arc<CampaignAssignmentService<S, P>>>,
    Path(campaign_id): Path<String>,
    axum::Json(lead): axum::Json<LeadProfile>,
) -> Response
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    match service.validate(&lead, &CampaignId(campaign_id)) {
        Ok(verdict) => (StatusCode::OK, axum::Json(verdict)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn validate_batch_handler<S, P>(
    State(service): State<Arc<CampaignAssignmentService<S, P>>>,
    Path(campaign_id): Path<String>,
    axum::Json(leads): axum::Json<Vec<LeadProfile>>,
) -> Response
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    match service.validate_batch(&leads, &CampaignId(campaign_id)) {
        Ok(verdict) => (StatusCode::OK, axum::Json(verdict)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn compatibility_handler<S, P>(
    State(service): State<Arc<CampaignAssignmentService<S, P>>>,
    axum::Json(leads): axum::Json<Vec<LeadProfile>>,
) -> Response
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    match service.compatibility(&leads) {
        Ok(summaries) => (StatusCode::OK, axum::Json(summaries)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assign_handler<S, P>(
    State(service): State<Arc<CampaignAssignmentService<S, P>>>,
    Path(campaign_id): Path<String>,
    axum::Json(lead): axum::Json<LeadProfile>,
) -> Response
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    match service.assign(lead, &CampaignId(campaign_id)) {
        Ok(record) => {
            let status = if record.verdict.can_assign {
                StatusCode::ACCEPTED
            } else {
                StatusCode::OK
            };
            (status, axum::Json(record.status_view())).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assignment_handler<S, P>(
    State(service): State<Arc<CampaignAssignmentService<S, P>>>,
    Path(assignment_id): Path<String>,
) -> Response
where
    S: AssignmentStore + 'static,
    P: DispatchPublisher + 'static,
{
    match service.assignment(&AssignmentId(assignment_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssignmentServiceError) -> Response {
    let status = match &error {
        AssignmentServiceError::UnknownCampaign(_)
        | AssignmentServiceError::Store(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssignmentServiceError::Store(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AssignmentServiceError::Store(RepositoryError::Unavailable(_))
        | AssignmentServiceError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
