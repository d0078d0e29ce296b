//! Volunteer assignment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use foodbridge_core::types::id::AssignmentId;
use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::assignment::{AssignmentFilter, VolunteerAssignment};
use foodbridge_service::assignment::{CreateAssignmentInput, LocationReport};

use crate::dto::request::AssignmentStatusRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateAssignmentInput>,
) -> Result<(StatusCode, Json<ApiResponse<VolunteerAssignment>>), ApiError> {
    let assignment = state
        .assignment_service
        .create_assignment(&auth, input)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(assignment))))
}

/// GET /api/assignments
pub async fn list_assignments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<AssignmentFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<VolunteerAssignment>>>, ApiError> {
    let page = state
        .assignment_service
        .list_assignments(filter, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// PATCH /api/assignments/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AssignmentId>,
    Json(req): Json<AssignmentStatusRequest>,
) -> Result<Json<ApiResponse<VolunteerAssignment>>, ApiError> {
    let assignment = state
        .assignment_service
        .transition_assignment(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(assignment)))
}

/// POST /api/assignments/{id}/location
pub async fn report_location(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AssignmentId>,
    Json(report): Json<LocationReport>,
) -> Result<StatusCode, ApiError> {
    state
        .assignment_service
        .report_location(&auth, id, report)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
