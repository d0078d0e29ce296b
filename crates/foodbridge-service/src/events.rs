//! Real-time event sink abstraction.

use foodbridge_core::events::DomainEvent;
use foodbridge_core::types::id::UserId;

/// Receives committed domain events for delivery to connected users.
///
/// Publishing is fire-and-forget: implementations must not block and
/// must swallow delivery failures.
pub trait EventSink: Send + Sync + 'static {
    /// Deliver an event to one user.
    fn publish(&self, recipient: UserId, event: DomainEvent);
}
