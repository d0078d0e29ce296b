//! Donation handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use foodbridge_core::types::id::DonationId;
use foodbridge_core::types::pagination::PageResponse;
use foodbridge_entity::donation::{Donation, DonationFilter};
use foodbridge_service::donation::{CreateDonationInput, DonationDetail};

use crate::dto::request::DonationStatusRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// POST /api/donations
pub async fn create_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateDonationInput>,
) -> Result<(StatusCode, Json<ApiResponse<DonationDetail>>), ApiError> {
    let detail = state.donation_service.create_donation(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(detail))))
}

/// GET /api/donations
pub async fn list_donations(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(filter): Query<DonationFilter>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Donation>>>, ApiError> {
    let page = state
        .donation_service
        .list_donations(filter, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/donations/{id}
pub async fn get_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DonationId>,
) -> Result<Json<ApiResponse<DonationDetail>>, ApiError> {
    let detail = state.donation_service.get_donation(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PATCH /api/donations/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DonationId>,
    Json(req): Json<DonationStatusRequest>,
) -> Result<Json<ApiResponse<Donation>>, ApiError> {
    let donation = state
        .donation_service
        .transition_donation(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(donation)))
}
