//! PostgreSQL implementations of the store traits.

pub mod assignment;
pub mod donation;
pub mod message;
pub mod notification;
pub mod user;

pub use assignment::AssignmentRepository;
pub use donation::DonationRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use user::UserRepository;
