//! Donation state machine.

use foodbridge_entity::donation::DonationStatus::{self, *};

use super::Transition;
use super::permission::PermissionRule::{self, *};

const fn edge(
    from: DonationStatus,
    to: DonationStatus,
    rule: PermissionRule,
) -> Transition<DonationStatus> {
    Transition { from, to, rule }
}

/// Every legal donation status change.
///
/// `pending -> accepted` also links the claiming NGO to the donation.
pub static DONATION_TRANSITIONS: &[Transition<DonationStatus>] = &[
    edge(Pending, Accepted, AnyNgo),
    edge(Pending, Rejected, AnyNgo),
    edge(Pending, Cancelled, OwningDonor),
    edge(Accepted, Scheduled, DonationParticipants),
    edge(Accepted, Cancelled, OwningDonor),
    edge(Scheduled, Picked, DonationParticipants),
    edge(Scheduled, Cancelled, OwningDonor),
    edge(Picked, Delivered, DonationParticipants),
    edge(Picked, Cancelled, OwningDonor),
];
