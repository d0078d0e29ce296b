//! Request DTOs.
//!
//! Create payloads deserialize straight into the service input types; list
//! filters deserialize into the entity filter types.

use serde::{Deserialize, Serialize};

use foodbridge_entity::assignment::AssignmentStatus;
use foodbridge_entity::donation::DonationStatus;

/// Body of `PATCH /api/donations/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationStatusRequest {
    /// Requested target status.
    pub status: DonationStatus,
}

/// Body of `PATCH /api/assignments/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentStatusRequest {
    /// Requested target status.
    pub status: AssignmentStatus,
}
