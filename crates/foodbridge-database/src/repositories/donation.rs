//! Donation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use foodbridge_core::error::{AppError, ErrorKind};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::{DonationId, UserId};
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::donation::{Donation, DonationFilter, DonationStatus, FoodItem, NewDonation};

use crate::store::DonationStore;

/// Repository for donations and their food items.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    pool: PgPool,
}

impl DonationRepository {
    /// Create a new donation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationStore for DonationRepository {
    async fn create(&self, data: &NewDonation) -> AppResult<(Donation, Vec<FoodItem>)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let donation = sqlx::query_as::<_, Donation>(
            "INSERT INTO food_donations (donor_id, title, description, quantity_total, quantity_unit, \
             expiry_time, pickup_location, pickup_notes, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending') RETURNING *",
        )
        .bind(data.donor_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.quantity_total)
        .bind(&data.quantity_unit)
        .bind(data.expiry_time)
        .bind(&data.pickup_location)
        .bind(&data.pickup_notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create donation", e))?;

        let mut items = Vec::with_capacity(data.items.len());
        for item in &data.items {
            let row = sqlx::query_as::<_, FoodItem>(
                "INSERT INTO food_items (donation_id, name, category, quantity, quantity_unit, \
                 dietary_info, allergens) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
            )
            .bind(donation.id)
            .bind(&item.name)
            .bind(&item.category)
            .bind(item.quantity)
            .bind(&item.quantity_unit)
            .bind(&item.dietary_info)
            .bind(&item.allergens)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to create food item", e)
            })?;
            items.push(row);
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit donation", e)
        })?;

        Ok((donation, items))
    }

    async fn find_by_id(&self, id: DonationId) -> AppResult<Option<Donation>> {
        sqlx::query_as::<_, Donation>("SELECT * FROM food_donations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find donation", e))
    }

    async fn find_items(&self, id: DonationId) -> AppResult<Vec<FoodItem>> {
        sqlx::query_as::<_, FoodItem>(
            "SELECT * FROM food_items WHERE donation_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find food items", e))
    }

    async fn list(
        &self,
        filter: &DonationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Donation>> {
        const WHERE: &str = "WHERE ($1::donation_status IS NULL OR status = $1) \
             AND ($2::uuid IS NULL OR donor_id = $2) \
             AND ($3::uuid IS NULL OR ngo_id = $3)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM food_donations {WHERE}"))
            .bind(filter.status)
            .bind(filter.donor_id)
            .bind(filter.ngo_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count donations", e)
            })?;

        let donations = sqlx::query_as::<_, Donation>(&format!(
            "SELECT * FROM food_donations {WHERE} ORDER BY created_at DESC LIMIT $4 OFFSET $5"
        ))
        .bind(filter.status)
        .bind(filter.donor_id)
        .bind(filter.ngo_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list donations", e))?;

        Ok(PageResponse::new(
            donations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn claim(&self, id: DonationId, ngo_id: UserId) -> AppResult<Option<Donation>> {
        sqlx::query_as::<_, Donation>(
            "UPDATE food_donations SET status = 'accepted', ngo_id = $2, \
             status_updated_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = 'pending' AND ngo_id IS NULL RETURNING *",
        )
        .bind(id)
        .bind(ngo_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to claim donation", e))
    }

    async fn compare_and_set_status(
        &self,
        id: DonationId,
        expected: DonationStatus,
        target: DonationStatus,
    ) -> AppResult<Option<Donation>> {
        sqlx::query_as::<_, Donation>(
            "UPDATE food_donations SET status = $3, status_updated_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(target)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update donation status", e)
        })
    }
}
