//! Volunteer assignment repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::{AssignmentId, DonationId};
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::assignment::{
    AssignmentFilter, AssignmentStatus, NewAssignment, VolunteerAssignment,
};

use crate::store::AssignmentStore;

/// Name of the partial unique index allowing one active assignment per donation.
const ACTIVE_ASSIGNMENT_INDEX: &str = "uq_volunteer_assignments_active_donation";

/// Repository for volunteer assignments.
#[derive(Debug, Clone)]
pub struct AssignmentRepository {
    pool: PgPool,
}

impl AssignmentRepository {
    /// Create a new assignment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Check whether an insert failed on the active-assignment unique index.
fn is_active_assignment_conflict(err: &sqlx::Error) -> bool {
    match err.as_database_error() {
        Some(db) => {
            db.is_unique_violation()
                && db.constraint().is_none_or(|c| c == ACTIVE_ASSIGNMENT_INDEX)
        }
        None => false,
    }
}

#[async_trait]
impl AssignmentStore for AssignmentRepository {
    async fn create_if_assignable(&self, data: &NewAssignment) -> AppResult<VolunteerAssignment> {
        // The donation row is share-locked so a concurrent cancel cannot
        // slip between the status check and the insert.
        let inserted = sqlx::query_as::<_, VolunteerAssignment>(
            "INSERT INTO volunteer_assignments (donation_id, volunteer_id, assigned_by_id, \
             assigned_by_role, status, pickup_address, dropoff_address, pickup_time, notes) \
             SELECT d.id, $2, $3, $4, 'assigned', $5, $6, $7, $8 FROM food_donations d \
             WHERE d.id = $1 AND d.status IN ('accepted', 'scheduled') \
             FOR SHARE \
             RETURNING *",
        )
        .bind(data.donation_id)
        .bind(data.volunteer_id)
        .bind(data.assigned_by_id)
        .bind(data.assigned_by_role)
        .bind(&data.pickup_address)
        .bind(&data.dropoff_address)
        .bind(data.pickup_time)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await;

        match inserted {
            Ok(Some(assignment)) => Ok(assignment),
            Ok(None) => Err(AppError::donation_not_assignable(format!(
                "Donation {} is not accepted or scheduled",
                data.donation_id
            ))),
            Err(e) if is_active_assignment_conflict(&e) => {
                Err(AppError::duplicate_active_assignment(format!(
                    "Donation {} already has an active assignment",
                    data.donation_id
                )))
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to create assignment",
                e,
            )),
        }
    }

    async fn find_by_id(&self, id: AssignmentId) -> AppResult<Option<VolunteerAssignment>> {
        sqlx::query_as::<_, VolunteerAssignment>(
            "SELECT * FROM volunteer_assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find assignment", e))
    }

    async fn find_by_donation(
        &self,
        donation_id: DonationId,
    ) -> AppResult<Vec<VolunteerAssignment>> {
        sqlx::query_as::<_, VolunteerAssignment>(
            "SELECT * FROM volunteer_assignments WHERE donation_id = $1 ORDER BY created_at ASC",
        )
        .bind(donation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find donation assignments", e)
        })
    }

    async fn list(
        &self,
        filter: &AssignmentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<VolunteerAssignment>> {
        const WHERE: &str = "WHERE ($1::uuid IS NULL OR volunteer_id = $1) \
             AND ($2::uuid IS NULL OR donation_id = $2) \
             AND ($3::assignment_status IS NULL OR status = $3)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM volunteer_assignments {WHERE}"))
                .bind(filter.volunteer_id)
                .bind(filter.donation_id)
                .bind(filter.status)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count assignments", e)
                })?;

        let assignments = sqlx::query_as::<_, VolunteerAssignment>(&format!(
            "SELECT * FROM volunteer_assignments {WHERE} ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.volunteer_id)
        .bind(filter.donation_id)
        .bind(filter.status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list assignments", e))?;

        Ok(PageResponse::new(
            assignments,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn compare_and_set_status(
        &self,
        id: AssignmentId,
        expected: AssignmentStatus,
        target: AssignmentStatus,
    ) -> AppResult<Option<VolunteerAssignment>> {
        sqlx::query_as::<_, VolunteerAssignment>(
            "UPDATE volunteer_assignments SET status = $3, \
             dropoff_time = CASE WHEN $4 THEN NOW() ELSE dropoff_time END, \
             status_updated_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(target)
        .bind(target == AssignmentStatus::Completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update assignment status", e)
        })
    }
}
