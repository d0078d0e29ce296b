//! Store traits consumed by the lifecycle services.
//!
//! Every status-changing method is a compare-and-swap: it applies the
//! change only if the row is still in the expected state and returns
//! `None` when another writer got there first. Implementations must make
//! each method a single atomic step. Two implementations are provided:
//! - PostgreSQL (conditional `UPDATE ... RETURNING *` and a partial unique index)
//! - In-memory (one `tokio::sync::Mutex` over all tables)

use async_trait::async_trait;

use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::{AssignmentId, DonationId, NotificationId, UserId};
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::assignment::{
    AssignmentFilter, AssignmentStatus, NewAssignment, VolunteerAssignment,
};
use foodbridge_entity::donation::{Donation, DonationFilter, DonationStatus, FoodItem, NewDonation};
use foodbridge_entity::message::{DirectMessage, MessageFilter, NewMessage};
use foodbridge_entity::notification::{NewNotification, Notification};
use foodbridge_entity::user::{User, UserRole};

/// Persistence for donations and their food items.
#[async_trait]
pub trait DonationStore: Send + Sync + 'static {
    /// Insert a donation in `pending` status together with all of its items.
    async fn create(&self, data: &NewDonation) -> AppResult<(Donation, Vec<FoodItem>)>;

    /// Find a donation by ID.
    async fn find_by_id(&self, id: DonationId) -> AppResult<Option<Donation>>;

    /// Return the food items of a donation.
    async fn find_items(&self, id: DonationId) -> AppResult<Vec<FoodItem>>;

    /// List donations matching the filter, newest first.
    async fn list(
        &self,
        filter: &DonationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Donation>>;

    /// Move a `pending`, unclaimed donation to `accepted` and link the NGO.
    ///
    /// Returns `None` if the donation is no longer pending or already has
    /// an NGO.
    async fn claim(&self, id: DonationId, ngo_id: UserId) -> AppResult<Option<Donation>>;

    /// Change the status from `expected` to `target`.
    ///
    /// Returns `None` if the donation is no longer in `expected`.
    async fn compare_and_set_status(
        &self,
        id: DonationId,
        expected: DonationStatus,
        target: DonationStatus,
    ) -> AppResult<Option<Donation>>;
}

/// Persistence for volunteer assignments.
#[async_trait]
pub trait AssignmentStore: Send + Sync + 'static {
    /// Insert an assignment in `assigned` status.
    ///
    /// The donation status check and the one-active-assignment check happen
    /// in the same atomic step as the insert. Fails with
    /// `DonationNotAssignable` if the donation is not accepted or scheduled,
    /// and with `DuplicateActiveAssignment` if a non-cancelled assignment
    /// already exists.
    async fn create_if_assignable(&self, data: &NewAssignment) -> AppResult<VolunteerAssignment>;

    /// Find an assignment by ID.
    async fn find_by_id(&self, id: AssignmentId) -> AppResult<Option<VolunteerAssignment>>;

    /// Return every assignment of a donation, oldest first.
    async fn find_by_donation(&self, donation_id: DonationId)
    -> AppResult<Vec<VolunteerAssignment>>;

    /// List assignments matching the filter, newest first.
    async fn list(
        &self,
        filter: &AssignmentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<VolunteerAssignment>>;

    /// Change the status from `expected` to `target`.
    ///
    /// Moving to `completed` stamps `dropoff_time` in the same write.
    /// Returns `None` if the assignment is no longer in `expected`.
    async fn compare_and_set_status(
        &self,
        id: AssignmentId,
        expected: AssignmentStatus,
        target: AssignmentStatus,
    ) -> AppResult<Option<VolunteerAssignment>>;
}

/// Persistence for in-app notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Append a notification.
    async fn append(&self, data: &NewNotification) -> AppResult<Notification>;

    /// List a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count a user's unread notifications.
    async fn count_unread(&self, user_id: UserId) -> AppResult<u64>;

    /// Mark one of the user's notifications as read.
    ///
    /// Returns `None` if the notification does not exist or belongs to
    /// someone else.
    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> AppResult<Option<Notification>>;

    /// Mark all of a user's notifications as read. Returns how many changed.
    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64>;
}

/// Persistence for direct messages.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Append a message.
    async fn append(&self, data: &NewMessage) -> AppResult<DirectMessage>;

    /// List messages `user_id` sent or received, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: &MessageFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DirectMessage>>;
}

/// Read access to the user directory maintained by the identity system.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Return the IDs of all active users with the given role.
    async fn active_ids_by_role(&self, role: UserRole) -> AppResult<Vec<UserId>>;

    /// Insert or replace a directory entry. Used by seeding tools only.
    async fn upsert(&self, user: &User) -> AppResult<User>;
}
