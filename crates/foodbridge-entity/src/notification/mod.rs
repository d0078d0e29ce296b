//! In-app notification entities.

pub mod model;

pub use model::{NewNotification, Notification, RelatedEntity};
