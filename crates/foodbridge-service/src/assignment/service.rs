//! Volunteer assignment orchestration and location relay.

use std::sync::Arc;

use tracing::{debug, info};

use foodbridge_core::error::AppError;
use foodbridge_core::events::{AssignmentEvent, DomainEvent, EventPayload};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::AssignmentId;
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::{AssignmentStore, DonationStore, UserDirectory};
use foodbridge_entity::assignment::{
    AssignmentFilter, AssignmentStatus, NewAssignment, VolunteerAssignment,
};
use foodbridge_entity::notification::{NewNotification, RelatedEntity};
use foodbridge_entity::user::UserRole;

use super::input::{CreateAssignmentInput, LocationReport};
use crate::context::RequestContext;
use crate::lifecycle::{ASSIGNMENT_TRANSITIONS, Parties, find_transition};
use crate::notification::{NotificationEmitter, messages};
use crate::validation::validate_input;

/// Assigns volunteers to donations and drives assignments through their
/// lifecycle. Assignment changes never alter the donation's status.
#[derive(Clone)]
pub struct AssignmentService {
    /// Assignment persistence.
    assignments: Arc<dyn AssignmentStore>,
    /// Donation persistence (read-only here).
    donations: Arc<dyn DonationStore>,
    /// User directory for volunteer lookups.
    users: Arc<dyn UserDirectory>,
    /// Notification emitter.
    emitter: NotificationEmitter,
}

impl std::fmt::Debug for AssignmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentService").finish_non_exhaustive()
    }
}

impl AssignmentService {
    /// Creates a new assignment service.
    pub fn new(
        assignments: Arc<dyn AssignmentStore>,
        donations: Arc<dyn DonationStore>,
        users: Arc<dyn UserDirectory>,
        emitter: NotificationEmitter,
    ) -> Self {
        Self {
            assignments,
            donations,
            users,
            emitter,
        }
    }

    /// Assign a volunteer to a donation.
    ///
    /// The actor must be the donation's donor or its linked NGO. The
    /// donation must be accepted or scheduled and must not already have a
    /// non-cancelled assignment; both are re-checked atomically by the store.
    pub async fn create_assignment(
        &self,
        ctx: &RequestContext,
        input: CreateAssignmentInput,
    ) -> AppResult<VolunteerAssignment> {
        validate_input(&input)?;

        let donation = self
            .donations
            .find_by_id(input.donation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Donation {} not found", input.donation_id))
            })?;

        let assigned_by_role = if donation.is_donor(ctx.user_id) {
            UserRole::Donor
        } else if donation.is_linked_ngo(ctx.user_id) {
            UserRole::Ngo
        } else {
            return Err(AppError::forbidden(
                "Only the donation's donor or its NGO can assign a volunteer",
            ));
        };

        let volunteer = self
            .users
            .find_by_id(input.volunteer_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Volunteer {} not found", input.volunteer_id))
            })?;
        if volunteer.role != UserRole::Volunteer || !volunteer.is_active {
            return Err(AppError::validation(format!(
                "User {} is not an active volunteer",
                volunteer.id
            )));
        }

        if !donation.status.is_assignable() {
            return Err(AppError::donation_not_assignable(format!(
                "Donation {} is {}; volunteers can only be assigned once it is accepted or scheduled",
                donation.id, donation.status
            )));
        }

        let assignment = self
            .assignments
            .create_if_assignable(&NewAssignment {
                donation_id: donation.id,
                volunteer_id: volunteer.id,
                assigned_by_id: ctx.user_id,
                assigned_by_role,
                pickup_address: input.pickup_address,
                dropoff_address: input.dropoff_address,
                pickup_time: input.pickup_time,
                notes: input.notes,
            })
            .await?;

        info!(
            assignment_id = %assignment.id,
            donation_id = %assignment.donation_id,
            volunteer_id = %assignment.volunteer_id,
            assigned_by = %ctx.user_id,
            "Volunteer assigned"
        );

        self.emitter
            .emit(
                Some(ctx.user_id),
                NewNotification {
                    user_id: assignment.volunteer_id,
                    title: messages::NEW_ASSIGNMENT_TITLE.to_string(),
                    message: messages::new_assignment(&donation, &assignment),
                    related: Some(RelatedEntity::VolunteerAssignment(assignment.id)),
                },
            )
            .await;
        self.emitter.broadcast(
            &[assignment.volunteer_id, assignment.assigned_by_id],
            &DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Assignment(AssignmentEvent::Created {
                    assignment_id: assignment.id,
                    donation_id: assignment.donation_id,
                }),
            ),
        );

        Ok(assignment)
    }

    /// Find an assignment by ID.
    pub async fn get_assignment(&self, id: AssignmentId) -> AppResult<VolunteerAssignment> {
        self.assignments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Assignment {id} not found")))
    }

    /// List assignments, newest first.
    pub async fn list_assignments(
        &self,
        filter: AssignmentFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<VolunteerAssignment>> {
        self.assignments.list(&filter, &page).await
    }

    /// Move an assignment to `target` on behalf of the actor.
    ///
    /// Completing an assignment stamps its drop-off time in the same write.
    pub async fn transition_assignment(
        &self,
        ctx: &RequestContext,
        id: AssignmentId,
        target: AssignmentStatus,
    ) -> AppResult<VolunteerAssignment> {
        let current = self.get_assignment(id).await?;

        let edge = find_transition(ASSIGNMENT_TRANSITIONS, current.status, target).ok_or_else(
            || {
                AppError::invalid_transition(format!(
                    "Cannot move assignment from {} to {target}",
                    current.status
                ))
            },
        )?;

        if !edge.rule.permits(ctx, &Parties::of_assignment(&current)) {
            return Err(AppError::forbidden(format!(
                "Not allowed to move this assignment from {} to {target}",
                current.status
            )));
        }

        let updated = self
            .assignments
            .compare_and_set_status(id, current.status, target)
            .await?
            .ok_or_else(|| {
                AppError::invalid_transition(format!(
                    "Assignment {id} is no longer {}",
                    current.status
                ))
            })?;

        info!(
            assignment_id = %id,
            donation_id = %updated.donation_id,
            actor_id = %ctx.user_id,
            from = %current.status,
            to = %updated.status,
            "Assignment status changed"
        );

        // Volunteer actions go to the assigner, everyone else's to the volunteer.
        let recipient = if updated.is_volunteer(ctx.user_id) {
            updated.assigned_by_id
        } else {
            updated.volunteer_id
        };
        let (title, message) = messages::assignment_status(updated.status);
        self.emitter
            .emit(
                Some(ctx.user_id),
                NewNotification {
                    user_id: recipient,
                    title: title.to_string(),
                    message: message.to_string(),
                    related: Some(RelatedEntity::VolunteerAssignment(updated.id)),
                },
            )
            .await;
        debug!(assignment_id = %id, recipient = %recipient, "Assignment counterpart notified");

        self.emitter.broadcast(
            &[updated.volunteer_id, updated.assigned_by_id],
            &DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Assignment(AssignmentEvent::StatusChanged {
                    assignment_id: id,
                    donation_id: updated.donation_id,
                    from: current.status.to_string(),
                    to: updated.status.to_string(),
                }),
            ),
        );

        Ok(updated)
    }

    /// Relay the assigned volunteer's position to the donor and the linked NGO.
    ///
    /// Positions are pushed as `assignment.volunteer_location` events only;
    /// nothing is stored and no notification is created. Reports for a
    /// completed or cancelled assignment are rejected.
    pub async fn report_location(
        &self,
        ctx: &RequestContext,
        id: AssignmentId,
        report: LocationReport,
    ) -> AppResult<()> {
        validate_input(&report)?;

        let assignment = self.get_assignment(id).await?;
        if !assignment.is_volunteer(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the assigned volunteer can share a location",
            ));
        }
        if assignment.status.is_terminal() {
            return Err(AppError::validation(format!(
                "Assignment {id} is {}; locations are only shared while it is open",
                assignment.status
            )));
        }

        let donation = self
            .donations
            .find_by_id(assignment.donation_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Donation {} not found", assignment.donation_id))
            })?;

        let mut recipients = vec![donation.donor_id];
        recipients.extend(donation.ngo_id);

        debug!(
            assignment_id = %id,
            recipients = recipients.len(),
            "Relaying volunteer location"
        );
        self.emitter.broadcast(
            &recipients,
            &DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Assignment(AssignmentEvent::VolunteerLocation {
                    assignment_id: id,
                    donation_id: donation.id,
                    latitude: report.latitude,
                    longitude: report.longitude,
                }),
            ),
        );

        Ok(())
    }
}
