//! Per-edge permission rules.

use foodbridge_core::types::id::UserId;
use foodbridge_entity::assignment::VolunteerAssignment;
use foodbridge_entity::donation::Donation;
use foodbridge_entity::user::UserRole;

use crate::context::RequestContext;

/// The users a permission rule can refer to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parties {
    /// Donor that owns the donation.
    pub donor_id: Option<UserId>,
    /// NGO linked to the donation.
    pub ngo_id: Option<UserId>,
    /// Volunteer of the assignment.
    pub volunteer_id: Option<UserId>,
    /// User that created the assignment.
    pub assigner_id: Option<UserId>,
}

impl Parties {
    /// Parties of a donation.
    pub fn of_donation(donation: &Donation) -> Self {
        Self {
            donor_id: Some(donation.donor_id),
            ngo_id: donation.ngo_id,
            ..Self::default()
        }
    }

    /// Parties of an assignment.
    pub fn of_assignment(assignment: &VolunteerAssignment) -> Self {
        Self {
            volunteer_id: Some(assignment.volunteer_id),
            assigner_id: Some(assignment.assigned_by_id),
            ..Self::default()
        }
    }
}

/// Who may take a transition edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionRule {
    /// Any user acting as an NGO.
    AnyNgo,
    /// Only the donor that owns the donation.
    OwningDonor,
    /// The owning donor, the linked NGO, or an admin.
    DonationParticipants,
    /// Only the volunteer the assignment belongs to.
    AssignedVolunteer,
    /// The assigned volunteer or the user that created the assignment.
    VolunteerOrAssigner,
}

impl PermissionRule {
    /// Check whether the actor may take an edge guarded by this rule.
    pub fn permits(&self, actor: &RequestContext, parties: &Parties) -> bool {
        let is = |party: Option<UserId>| party == Some(actor.user_id);
        match self {
            Self::AnyNgo => actor.has_role(UserRole::Ngo),
            Self::OwningDonor => actor.has_role(UserRole::Donor) && is(parties.donor_id),
            Self::DonationParticipants => {
                actor.is_admin() || is(parties.donor_id) || is(parties.ngo_id)
            }
            Self::AssignedVolunteer => is(parties.volunteer_id),
            Self::VolunteerOrAssigner => is(parties.volunteer_id) || is(parties.assigner_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parties(donor: UserId, ngo: Option<UserId>) -> Parties {
        Parties {
            donor_id: Some(donor),
            ngo_id: ngo,
            ..Parties::default()
        }
    }

    #[test]
    fn test_owning_donor_excludes_admin_and_ngo() {
        let donor = UserId::new();
        let ngo = UserId::new();
        let p = parties(donor, Some(ngo));

        assert!(PermissionRule::OwningDonor.permits(&RequestContext::new(donor, UserRole::Donor), &p));
        assert!(!PermissionRule::OwningDonor.permits(&RequestContext::new(ngo, UserRole::Ngo), &p));
        assert!(
            !PermissionRule::OwningDonor
                .permits(&RequestContext::new(UserId::new(), UserRole::Admin), &p)
        );
    }

    #[test]
    fn test_participants_include_admin_but_not_other_ngo() {
        let donor = UserId::new();
        let ngo = UserId::new();
        let p = parties(donor, Some(ngo));
        let rule = PermissionRule::DonationParticipants;

        assert!(rule.permits(&RequestContext::new(donor, UserRole::Donor), &p));
        assert!(rule.permits(&RequestContext::new(ngo, UserRole::Ngo), &p));
        assert!(rule.permits(&RequestContext::new(UserId::new(), UserRole::Admin), &p));
        assert!(!rule.permits(&RequestContext::new(UserId::new(), UserRole::Ngo), &p));
    }

    #[test]
    fn test_any_ngo_is_role_based() {
        let p = parties(UserId::new(), None);
        assert!(PermissionRule::AnyNgo.permits(&RequestContext::new(UserId::new(), UserRole::Ngo), &p));
        assert!(
            !PermissionRule::AnyNgo
                .permits(&RequestContext::new(UserId::new(), UserRole::Volunteer), &p)
        );
    }

    #[test]
    fn test_volunteer_or_assigner() {
        let volunteer = UserId::new();
        let assigner = UserId::new();
        let p = Parties {
            volunteer_id: Some(volunteer),
            assigner_id: Some(assigner),
            ..Parties::default()
        };

        assert!(
            PermissionRule::VolunteerOrAssigner
                .permits(&RequestContext::new(assigner, UserRole::Ngo), &p)
        );
        assert!(
            !PermissionRule::AssignedVolunteer
                .permits(&RequestContext::new(assigner, UserRole::Ngo), &p)
        );
        assert!(
            PermissionRule::AssignedVolunteer
                .permits(&RequestContext::new(volunteer, UserRole::Volunteer), &p)
        );
    }
}
