//! Bundles one handle per store trait for service wiring.

use std::sync::Arc;

use sqlx::PgPool;

use crate::memory::MemoryStore;
use crate::repositories::{
    AssignmentRepository, DonationRepository, MessageRepository, NotificationRepository,
    UserRepository,
};
use crate::store::{
    AssignmentStore, DonationStore, MessageStore, NotificationStore, UserDirectory,
};

/// The full set of stores the lifecycle services are built from.
#[derive(Clone)]
pub struct Stores {
    /// Donation persistence.
    pub donations: Arc<dyn DonationStore>,
    /// Assignment persistence.
    pub assignments: Arc<dyn AssignmentStore>,
    /// Notification persistence.
    pub notifications: Arc<dyn NotificationStore>,
    /// Direct message persistence.
    pub messages: Arc<dyn MessageStore>,
    /// User directory.
    pub users: Arc<dyn UserDirectory>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}

impl Stores {
    /// Every store backed by one shared in-memory store.
    pub fn memory(store: MemoryStore) -> Self {
        let shared = Arc::new(store);
        Self {
            donations: shared.clone(),
            assignments: shared.clone(),
            notifications: shared.clone(),
            messages: shared.clone(),
            users: shared,
        }
    }

    /// Every store backed by PostgreSQL repositories on one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            donations: Arc::new(DonationRepository::new(pool.clone())),
            assignments: Arc::new(AssignmentRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool.clone())),
            messages: Arc::new(MessageRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }
}
