//! In-memory store using a Tokio mutex for tests and single-node development.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use foodbridge_core::error::AppError;
use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::{
    AssignmentId, DonationId, FoodItemId, MessageId, NotificationId, UserId,
};
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_entity::assignment::{
    AssignmentFilter, AssignmentStatus, NewAssignment, VolunteerAssignment,
};
use foodbridge_entity::donation::{Donation, DonationFilter, DonationStatus, FoodItem, NewDonation};
use foodbridge_entity::message::{DirectMessage, MessageFilter, NewMessage};
use foodbridge_entity::notification::{NewNotification, Notification};
use foodbridge_entity::user::{User, UserRole};

use crate::store::{
    AssignmentStore, DonationStore, MessageStore, NotificationStore, UserDirectory,
};

/// All tables, guarded together so cross-table checks are atomic.
#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    donations: HashMap<DonationId, Donation>,
    food_items: HashMap<DonationId, Vec<FoodItem>>,
    assignments: HashMap<AssignmentId, VolunteerAssignment>,
    notifications: HashMap<NotificationId, Notification>,
    messages: HashMap<MessageId, DirectMessage>,
}

/// In-memory implementation of every store trait.
///
/// Suitable for tests and single-node development only. Cloning shares
/// the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Slice `items` (already sorted) into one page.
fn paginate<T>(items: Vec<T>, page: &PageRequest) -> PageResponse<T> {
    let total = items.len() as u64;
    let page_items = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    PageResponse::new(page_items, page.page, page.page_size, total)
}

#[async_trait]
impl DonationStore for MemoryStore {
    async fn create(&self, data: &NewDonation) -> AppResult<(Donation, Vec<FoodItem>)> {
        let now = Utc::now();
        let donation = Donation {
            id: DonationId::new(),
            donor_id: data.donor_id,
            ngo_id: None,
            title: data.title.clone(),
            description: data.description.clone(),
            quantity_total: data.quantity_total,
            quantity_unit: data.quantity_unit.clone(),
            expiry_time: data.expiry_time,
            pickup_location: data.pickup_location.clone(),
            pickup_notes: data.pickup_notes.clone(),
            status: DonationStatus::Pending,
            status_updated_at: now,
            created_at: now,
            updated_at: now,
        };
        let items: Vec<FoodItem> = data
            .items
            .iter()
            .map(|item| FoodItem {
                id: FoodItemId::new(),
                donation_id: donation.id,
                name: item.name.clone(),
                category: item.category.clone(),
                quantity: item.quantity,
                quantity_unit: item.quantity_unit.clone(),
                dietary_info: item.dietary_info.clone(),
                allergens: item.allergens.clone(),
                created_at: now,
            })
            .collect();

        let mut tables = self.tables.lock().await;
        tables.donations.insert(donation.id, donation.clone());
        tables.food_items.insert(donation.id, items.clone());
        debug!(donation_id = %donation.id, items = items.len(), "Stored donation");

        Ok((donation, items))
    }

    async fn find_by_id(&self, id: DonationId) -> AppResult<Option<Donation>> {
        Ok(self.tables.lock().await.donations.get(&id).cloned())
    }

    async fn find_items(&self, id: DonationId) -> AppResult<Vec<FoodItem>> {
        Ok(self
            .tables
            .lock()
            .await
            .food_items
            .get(&id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list(
        &self,
        filter: &DonationFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Donation>> {
        let tables = self.tables.lock().await;
        let mut donations: Vec<Donation> = tables
            .donations
            .values()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        donations.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(donations, page))
    }

    async fn claim(&self, id: DonationId, ngo_id: UserId) -> AppResult<Option<Donation>> {
        let mut tables = self.tables.lock().await;
        let Some(donation) = tables.donations.get_mut(&id) else {
            return Ok(None);
        };
        if donation.status != DonationStatus::Pending || donation.ngo_id.is_some() {
            return Ok(None);
        }
        let now = Utc::now();
        donation.status = DonationStatus::Accepted;
        donation.ngo_id = Some(ngo_id);
        donation.status_updated_at = now;
        donation.updated_at = now;
        Ok(Some(donation.clone()))
    }

    async fn compare_and_set_status(
        &self,
        id: DonationId,
        expected: DonationStatus,
        target: DonationStatus,
    ) -> AppResult<Option<Donation>> {
        let mut tables = self.tables.lock().await;
        let Some(donation) = tables.donations.get_mut(&id) else {
            return Ok(None);
        };
        if donation.status != expected {
            return Ok(None);
        }
        let now = Utc::now();
        donation.status = target;
        donation.status_updated_at = now;
        donation.updated_at = now;
        Ok(Some(donation.clone()))
    }
}

#[async_trait]
impl AssignmentStore for MemoryStore {
    async fn create_if_assignable(&self, data: &NewAssignment) -> AppResult<VolunteerAssignment> {
        let mut tables = self.tables.lock().await;

        let assignable = tables
            .donations
            .get(&data.donation_id)
            .is_some_and(|d| d.status.is_assignable());
        if !assignable {
            return Err(AppError::donation_not_assignable(format!(
                "Donation {} is not accepted or scheduled",
                data.donation_id
            )));
        }

        let has_active = tables
            .assignments
            .values()
            .any(|a| a.donation_id == data.donation_id && a.status.is_active());
        if has_active {
            return Err(AppError::duplicate_active_assignment(format!(
                "Donation {} already has an active assignment",
                data.donation_id
            )));
        }

        let now = Utc::now();
        let assignment = VolunteerAssignment {
            id: AssignmentId::new(),
            volunteer_id: data.volunteer_id,
            donation_id: data.donation_id,
            assigned_by_id: data.assigned_by_id,
            assigned_by_role: data.assigned_by_role,
            status: AssignmentStatus::Assigned,
            pickup_address: data.pickup_address.clone(),
            dropoff_address: data.dropoff_address.clone(),
            pickup_time: data.pickup_time,
            dropoff_time: None,
            notes: data.notes.clone(),
            status_updated_at: now,
            created_at: now,
            updated_at: now,
        };
        tables.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn find_by_id(&self, id: AssignmentId) -> AppResult<Option<VolunteerAssignment>> {
        Ok(self.tables.lock().await.assignments.get(&id).cloned())
    }

    async fn find_by_donation(
        &self,
        donation_id: DonationId,
    ) -> AppResult<Vec<VolunteerAssignment>> {
        let tables = self.tables.lock().await;
        let mut assignments: Vec<VolunteerAssignment> = tables
            .assignments
            .values()
            .filter(|a| a.donation_id == donation_id)
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.created_at);
        Ok(assignments)
    }

    async fn list(
        &self,
        filter: &AssignmentFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<VolunteerAssignment>> {
        let tables = self.tables.lock().await;
        let mut assignments: Vec<VolunteerAssignment> = tables
            .assignments
            .values()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        assignments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(assignments, page))
    }

    async fn compare_and_set_status(
        &self,
        id: AssignmentId,
        expected: AssignmentStatus,
        target: AssignmentStatus,
    ) -> AppResult<Option<VolunteerAssignment>> {
        let mut tables = self.tables.lock().await;
        let Some(assignment) = tables.assignments.get_mut(&id) else {
            return Ok(None);
        };
        if assignment.status != expected {
            return Ok(None);
        }
        let now = Utc::now();
        assignment.status = target;
        if target == AssignmentStatus::Completed {
            assignment.dropoff_time = Some(now);
        }
        assignment.status_updated_at = now;
        assignment.updated_at = now;
        Ok(Some(assignment.clone()))
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn append(&self, data: &NewNotification) -> AppResult<Notification> {
        let notification = Notification {
            id: NotificationId::new(),
            user_id: data.user_id,
            title: data.title.clone(),
            message: data.message.clone(),
            related_entity_type: data.related.map(|r| r.entity_type().to_string()),
            related_entity_id: data.related.map(|r| r.entity_id()),
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        };
        self.tables
            .lock()
            .await
            .notifications
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let tables = self.tables.lock().await;
        let mut notifications: Vec<Notification> = tables
            .notifications
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(notifications, page))
    }

    async fn count_unread(&self, user_id: UserId) -> AppResult<u64> {
        let tables = self.tables.lock().await;
        Ok(tables
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as u64)
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> AppResult<Option<Notification>> {
        let mut tables = self.tables.lock().await;
        match tables.notifications.get_mut(&id) {
            Some(n) if n.user_id == user_id => {
                n.is_read = true;
                n.read_at.get_or_insert_with(Utc::now);
                Ok(Some(n.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let mut changed = 0;
        for n in tables
            .notifications
            .values_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            n.read_at = Some(now);
            changed += 1;
        }
        Ok(changed)
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn append(&self, data: &NewMessage) -> AppResult<DirectMessage> {
        let message = DirectMessage {
            id: MessageId::new(),
            sender_id: data.sender_id,
            recipient_id: data.recipient_id,
            donation_id: data.donation_id,
            content: data.content.clone(),
            created_at: Utc::now(),
        };
        self.tables
            .lock()
            .await
            .messages
            .insert(message.id, message.clone());
        Ok(message)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: &MessageFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<DirectMessage>> {
        let tables = self.tables.lock().await;
        let mut messages: Vec<DirectMessage> = tables
            .messages
            .values()
            .filter(|m| filter.matches(user_id, m))
            .cloned()
            .collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(messages, page))
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn active_ids_by_role(&self, role: UserRole) -> AppResult<Vec<UserId>> {
        let tables = self.tables.lock().await;
        let mut users: Vec<&User> = tables
            .users
            .values()
            .filter(|u| u.role == role && u.is_active)
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users.into_iter().map(|u| u.id).collect())
    }

    async fn upsert(&self, user: &User) -> AppResult<User> {
        self.tables
            .lock()
            .await
            .users
            .insert(user.id, user.clone());
        Ok(user.clone())
    }
}
