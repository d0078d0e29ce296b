//! Shared test helpers for service integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use foodbridge_core::error::AppError;
use foodbridge_core::events::DomainEvent;
use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::{DonationId, NotificationId, UserId};
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::{MemoryStore, NotificationStore, UserDirectory};
use foodbridge_entity::assignment::VolunteerAssignment;
use foodbridge_entity::donation::{Donation, DonationStatus};
use foodbridge_entity::notification::{NewNotification, Notification};
use foodbridge_entity::user::{User, UserRole};
use foodbridge_service::assignment::CreateAssignmentInput;
use foodbridge_service::donation::{CreateDonationInput, FoodItemInput};
use foodbridge_service::{
    AssignmentService, DonationService, EventSink, MessageService, NotificationEmitter,
    NotificationService, RequestContext,
};

/// Event sink that remembers every published event.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(UserId, DomainEvent)>>,
}

impl RecordingSink {
    /// Event types delivered to one user, in order.
    pub fn event_types_for(&self, user: UserId) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(recipient, _)| *recipient == user)
            .map(|(_, e)| e.event_type())
            .collect()
    }

    /// Events delivered to one user, in order.
    pub fn events_for(&self, user: UserId) -> Vec<DomainEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(recipient, _)| *recipient == user)
            .map(|(_, e)| e.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }
}

impl EventSink for RecordingSink {
    fn publish(&self, recipient: UserId, event: DomainEvent) {
        self.events.lock().unwrap().push((recipient, event));
    }
}

/// Notification store whose writes always fail.
#[derive(Debug, Default)]
pub struct FailingNotificationStore;

#[async_trait]
impl NotificationStore for FailingNotificationStore {
    async fn append(&self, _data: &NewNotification) -> AppResult<Notification> {
        Err(AppError::database("notifications table is unavailable"))
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0))
    }

    async fn count_unread(&self, _user_id: UserId) -> AppResult<u64> {
        Ok(0)
    }

    async fn mark_read(
        &self,
        _id: NotificationId,
        _user_id: UserId,
    ) -> AppResult<Option<Notification>> {
        Ok(None)
    }

    async fn mark_all_read(&self, _user_id: UserId) -> AppResult<u64> {
        Ok(0)
    }
}

/// Services wired against one in-memory store.
pub struct TestApp {
    pub store: MemoryStore,
    pub sink: Arc<RecordingSink>,
    pub donations: DonationService,
    pub assignments: AssignmentService,
    pub messages: MessageService,
    pub notifications: NotificationService,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        Self::build(store.clone(), Arc::new(store))
    }

    /// Wire the services with a different notification store.
    pub fn with_notification_store(notification_store: Arc<dyn NotificationStore>) -> Self {
        Self::build(MemoryStore::new(), notification_store)
    }

    fn build(store: MemoryStore, notification_store: Arc<dyn NotificationStore>) -> Self {
        let shared = Arc::new(store.clone());
        let sink = Arc::new(RecordingSink::default());
        let emitter = NotificationEmitter::new(notification_store.clone(), sink.clone());

        Self {
            donations: DonationService::new(
                shared.clone(),
                shared.clone(),
                shared.clone(),
                emitter.clone(),
            ),
            assignments: AssignmentService::new(
                shared.clone(),
                shared.clone(),
                shared.clone(),
                emitter.clone(),
            ),
            messages: MessageService::new(shared.clone(), shared.clone(), shared, emitter),
            notifications: NotificationService::new(notification_store),
            store,
            sink,
        }
    }

    /// Register a user in the directory and act as them.
    pub async fn user(&self, role: UserRole) -> RequestContext {
        let id = UserId::new();
        self.store
            .upsert(&User {
                id,
                email: format!("{id}@example.test"),
                full_name: format!("Test {role}"),
                role,
                is_active: true,
                created_at: Utc::now(),
            })
            .await
            .expect("seed user");
        RequestContext::new(id, role)
    }

    pub async fn pending_donation(&self, donor: &RequestContext) -> Donation {
        self.donations
            .create_donation(donor, donation_input("Bakery surplus"))
            .await
            .expect("create donation")
            .donation
    }

    /// A donation already claimed by a fresh NGO. Returns `(donor, ngo, donation)`.
    pub async fn accepted_donation(&self) -> (RequestContext, RequestContext, Donation) {
        let donor = self.user(UserRole::Donor).await;
        let ngo = self.user(UserRole::Ngo).await;
        let donation = self.pending_donation(&donor).await;
        let donation = self
            .donations
            .transition_donation(&ngo, donation.id, DonationStatus::Accepted)
            .await
            .expect("accept donation");
        (donor, ngo, donation)
    }

    /// An accepted donation with a volunteer assigned by the NGO.
    /// Returns `(donor, ngo, volunteer, assignment)`.
    pub async fn assigned_delivery(
        &self,
    ) -> (
        RequestContext,
        RequestContext,
        RequestContext,
        VolunteerAssignment,
    ) {
        let (donor, ngo, donation) = self.accepted_donation().await;
        let volunteer = self.user(UserRole::Volunteer).await;
        let assignment = self
            .assignments
            .create_assignment(&ngo, assignment_input(donation.id, volunteer.user_id))
            .await
            .expect("create assignment");
        (donor, ngo, volunteer, assignment)
    }

    pub async fn inbox(&self, user: &RequestContext) -> Vec<Notification> {
        self.notifications
            .list_notifications(user, PageRequest::new(1, 100))
            .await
            .expect("list notifications")
            .items
    }
}

pub fn donation_input(title: &str) -> CreateDonationInput {
    CreateDonationInput {
        title: title.to_string(),
        description: Some("Assorted bread and pastries".to_string()),
        quantity_total: 15.0,
        quantity_unit: "kg".to_string(),
        expiry_time: Utc::now() + Duration::hours(8),
        pickup_location: "12 Market St".to_string(),
        pickup_notes: Some("Ring the back door".to_string()),
        food_items: vec![
            FoodItemInput {
                name: "Sourdough".to_string(),
                category: "bakery".to_string(),
                quantity: 10.0,
                quantity_unit: "kg".to_string(),
                dietary_info: vec!["vegan".to_string()],
                allergens: vec!["gluten".to_string()],
            },
            FoodItemInput {
                name: "Croissants".to_string(),
                category: "bakery".to_string(),
                quantity: 5.0,
                quantity_unit: "kg".to_string(),
                dietary_info: vec![],
                allergens: vec!["gluten".to_string(), "dairy".to_string()],
            },
        ],
    }
}

pub fn assignment_input(donation_id: DonationId, volunteer_id: UserId) -> CreateAssignmentInput {
    CreateAssignmentInput {
        donation_id,
        volunteer_id,
        pickup_time: Utc::now() + Duration::hours(1),
        pickup_address: "12 Market St".to_string(),
        dropoff_address: "3 Shelter Rd".to_string(),
        notes: None,
    }
}
