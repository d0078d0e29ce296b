//! Notification wording for lifecycle changes.

use foodbridge_entity::assignment::{AssignmentStatus, VolunteerAssignment};
use foodbridge_entity::donation::{Donation, DonationStatus};

/// Title shown to every active NGO when a donation is published.
pub const NEW_DONATION_TITLE: &str = "New Donation Available";

/// Title shown to a volunteer when they receive an assignment.
pub const NEW_ASSIGNMENT_TITLE: &str = "New Delivery Assignment";

/// Title shown to the recipient of a direct message.
pub const NEW_MESSAGE_TITLE: &str = "New Message";

/// Body of the direct message notification. The text itself travels in
/// the `message.received` event.
pub const NEW_MESSAGE_BODY: &str = "You have received a new message";

/// Message for the "new donation" fan-out.
pub fn new_donation(donation: &Donation) -> String {
    format!(
        "A new donation \"{}\" ({} {}) is available for pickup at {}.",
        donation.title, donation.quantity_total, donation.quantity_unit, donation.pickup_location
    )
}

/// Message for a freshly created assignment.
pub fn new_assignment(donation: &Donation, assignment: &VolunteerAssignment) -> String {
    format!(
        "You have been assigned to deliver \"{}\" from {} to {}.",
        donation.title, assignment.pickup_address, assignment.dropoff_address
    )
}

/// Title and message for a donation status change.
pub fn donation_status(donation: &Donation, status: DonationStatus) -> (&'static str, String) {
    let title = &donation.title;
    match status {
        DonationStatus::Accepted => (
            "Donation Accepted",
            format!("Your donation \"{title}\" has been accepted by an NGO."),
        ),
        DonationStatus::Rejected => (
            "Donation Rejected",
            format!("Your donation \"{title}\" has been rejected."),
        ),
        DonationStatus::Scheduled => (
            "Pickup Scheduled",
            format!("Pickup for donation \"{title}\" has been scheduled."),
        ),
        DonationStatus::Picked => (
            "Donation Picked Up",
            format!("Donation \"{title}\" has been picked up."),
        ),
        DonationStatus::Delivered => (
            "Donation Delivered",
            format!("Donation \"{title}\" has been delivered."),
        ),
        DonationStatus::Cancelled => (
            "Donation Cancelled",
            format!("Donation \"{title}\" has been cancelled by the donor."),
        ),
        DonationStatus::Pending => (
            "Donation Updated",
            format!("Donation \"{title}\" is pending."),
        ),
    }
}

/// Title and message for an assignment status change.
pub fn assignment_status(status: AssignmentStatus) -> (&'static str, &'static str) {
    match status {
        AssignmentStatus::Accepted => (
            "Assignment Accepted",
            "The volunteer has accepted the delivery assignment.",
        ),
        AssignmentStatus::InProgress => (
            "Delivery In Progress",
            "The volunteer is on the way with the donation.",
        ),
        AssignmentStatus::Completed => (
            "Delivery Completed",
            "The donation has been dropped off.",
        ),
        AssignmentStatus::Cancelled => (
            "Assignment Cancelled",
            "The delivery assignment has been cancelled.",
        ),
        AssignmentStatus::Assigned => (
            "Assignment Updated",
            "The delivery assignment is awaiting the volunteer.",
        ),
    }
}
