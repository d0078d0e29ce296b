//! # foodbridge-service
//!
//! Business logic for FoodBridge. The donation and assignment services
//! validate every status change against an explicit transition table,
//! apply it as a compare-and-swap through the store traits, and then fan
//! out notifications and real-time events. Direct messages and volunteer
//! location reports use the same notification and event paths.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod assignment;
pub mod context;
pub mod donation;
pub mod events;
pub mod lifecycle;
pub mod message;
pub mod notification;
pub mod validation;

pub use assignment::AssignmentService;
pub use context::RequestContext;
pub use donation::DonationService;
pub use events::EventSink;
pub use message::MessageService;
pub use notification::{NotificationEmitter, NotificationService};
