//! Volunteer assignment creation and lifecycle transitions.

pub mod input;
pub mod service;

pub use input::{CreateAssignmentInput, LocationReport};
pub use service::AssignmentService;
