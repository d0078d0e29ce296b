//! Volunteer assignment entities.

pub mod model;
pub mod status;

pub use model::{AssignmentFilter, NewAssignment, VolunteerAssignment};
pub use status::AssignmentStatus;
