//! Volunteer assignment state machine.

use foodbridge_entity::assignment::AssignmentStatus::{self, *};

use super::Transition;
use super::permission::PermissionRule::{self, *};

const fn edge(
    from: AssignmentStatus,
    to: AssignmentStatus,
    rule: PermissionRule,
) -> Transition<AssignmentStatus> {
    Transition { from, to, rule }
}

/// Every legal assignment status change.
///
/// `in_progress -> completed` also stamps the drop-off time.
pub static ASSIGNMENT_TRANSITIONS: &[Transition<AssignmentStatus>] = &[
    edge(Assigned, Accepted, AssignedVolunteer),
    edge(Assigned, Cancelled, VolunteerOrAssigner),
    edge(Accepted, InProgress, AssignedVolunteer),
    edge(Accepted, Cancelled, VolunteerOrAssigner),
    edge(InProgress, Completed, AssignedVolunteer),
];
