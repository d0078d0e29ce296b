//! Donation lifecycle orchestration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use foodbridge_core::error::AppError;
use foodbridge_core::events::{DomainEvent, DonationEvent, EventPayload};
use foodbridge_core::result::AppResult;
use foodbridge_core::types::id::{DonationId, UserId};
use foodbridge_core::types::pagination::{PageRequest, PageResponse};
use foodbridge_database::{AssignmentStore, DonationStore, UserDirectory};
use foodbridge_entity::assignment::VolunteerAssignment;
use foodbridge_entity::donation::{Donation, DonationFilter, DonationStatus, FoodItem};
use foodbridge_entity::notification::{NewNotification, RelatedEntity};
use foodbridge_entity::user::UserRole;

use super::input::CreateDonationInput;
use crate::context::RequestContext;
use crate::lifecycle::{DONATION_TRANSITIONS, Parties, find_transition};
use crate::notification::{NotificationEmitter, messages};
use crate::validation::validate_input;

/// A donation with its items and every assignment made for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationDetail {
    /// The donation.
    #[serde(flatten)]
    pub donation: Donation,
    /// Its food items.
    pub food_items: Vec<FoodItem>,
    /// Its volunteer assignments, oldest first.
    pub assignments: Vec<VolunteerAssignment>,
}

/// Publishes donations and drives them through their lifecycle.
#[derive(Clone)]
pub struct DonationService {
    /// Donation persistence.
    donations: Arc<dyn DonationStore>,
    /// Assignment persistence (read-only here).
    assignments: Arc<dyn AssignmentStore>,
    /// User directory for the NGO fan-out.
    users: Arc<dyn UserDirectory>,
    /// Notification emitter.
    emitter: NotificationEmitter,
}

impl std::fmt::Debug for DonationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DonationService").finish_non_exhaustive()
    }
}

impl DonationService {
    /// Creates a new donation service.
    pub fn new(
        donations: Arc<dyn DonationStore>,
        assignments: Arc<dyn AssignmentStore>,
        users: Arc<dyn UserDirectory>,
        emitter: NotificationEmitter,
    ) -> Self {
        Self {
            donations,
            assignments,
            users,
            emitter,
        }
    }

    /// Publish a new donation on behalf of the acting donor.
    ///
    /// Every active NGO is notified that the donation is available.
    pub async fn create_donation(
        &self,
        ctx: &RequestContext,
        input: CreateDonationInput,
    ) -> AppResult<DonationDetail> {
        if !ctx.has_role(UserRole::Donor) {
            return Err(AppError::forbidden("Only donors can create donations"));
        }
        validate_input(&input)?;

        let (donation, food_items) = self
            .donations
            .create(&input.into_new_donation(ctx.user_id))
            .await?;

        info!(
            donation_id = %donation.id,
            donor_id = %donation.donor_id,
            items = food_items.len(),
            "Donation created"
        );

        self.notify_ngos_of_new_donation(ctx, &donation).await;

        Ok(DonationDetail {
            donation,
            food_items,
            assignments: Vec::new(),
        })
    }

    /// Load a donation with its items and assignments.
    ///
    /// Readable by its donor, its NGO, admins, any NGO while it is still
    /// pending, and any volunteer assigned to it.
    pub async fn get_donation(
        &self,
        ctx: &RequestContext,
        id: DonationId,
    ) -> AppResult<DonationDetail> {
        let donation = self.find_donation(id).await?;
        let assignments = self.assignments.find_by_donation(id).await?;

        let readable = ctx.is_admin()
            || donation.is_donor(ctx.user_id)
            || donation.is_linked_ngo(ctx.user_id)
            || (ctx.has_role(UserRole::Ngo) && donation.status == DonationStatus::Pending)
            || assignments.iter().any(|a| a.is_volunteer(ctx.user_id));
        if !readable {
            return Err(AppError::forbidden(format!(
                "Not allowed to view donation {id}"
            )));
        }

        let food_items = self.donations.find_items(id).await?;
        Ok(DonationDetail {
            donation,
            food_items,
            assignments,
        })
    }

    /// List donations, newest first.
    pub async fn list_donations(
        &self,
        filter: DonationFilter,
        page: PageRequest,
    ) -> AppResult<PageResponse<Donation>> {
        self.donations.list(&filter, &page).await
    }

    /// Move a donation to `target` on behalf of the actor.
    ///
    /// The edge must exist in the donation transition table and its rule
    /// must admit the actor. The change is applied as a compare-and-swap
    /// on the status the decision was made against; acceptance also
    /// requires the donation to be unclaimed.
    pub async fn transition_donation(
        &self,
        ctx: &RequestContext,
        id: DonationId,
        target: DonationStatus,
    ) -> AppResult<Donation> {
        let current = self.find_donation(id).await?;

        if target == DonationStatus::Accepted && ctx.has_role(UserRole::Ngo) {
            if let Some(ngo_id) = current.ngo_id.filter(|n| *n != ctx.user_id) {
                debug!(donation_id = %id, claimed_by = %ngo_id, "Donation already claimed");
                return Err(AppError::already_claimed(format!(
                    "Donation {id} has already been claimed by another NGO"
                )));
            }
        }

        let edge = find_transition(DONATION_TRANSITIONS, current.status, target).ok_or_else(
            || {
                AppError::invalid_transition(format!(
                    "Cannot move donation from {} to {target}",
                    current.status
                ))
            },
        )?;

        if !edge.rule.permits(ctx, &Parties::of_donation(&current)) {
            return Err(AppError::forbidden(format!(
                "A {} may not move this donation from {} to {target}",
                ctx.role, current.status
            )));
        }

        let updated = if target == DonationStatus::Accepted {
            self.donations
                .claim(id, ctx.user_id)
                .await?
                .ok_or_else(|| {
                    AppError::already_claimed(format!(
                        "Donation {id} has already been claimed by another NGO"
                    ))
                })?
        } else {
            self.donations
                .compare_and_set_status(id, current.status, target)
                .await?
                .ok_or_else(|| {
                    AppError::invalid_transition(format!(
                        "Donation {id} is no longer {}",
                        current.status
                    ))
                })?
        };

        info!(
            donation_id = %id,
            actor_id = %ctx.user_id,
            from = %current.status,
            to = %updated.status,
            "Donation status changed"
        );

        self.notify_counterpart(ctx, &updated).await;
        self.emitter.broadcast(
            &participants(&updated),
            &DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Donation(DonationEvent::StatusChanged {
                    donation_id: id,
                    from: current.status.to_string(),
                    to: updated.status.to_string(),
                }),
            ),
        );

        Ok(updated)
    }

    async fn find_donation(&self, id: DonationId) -> AppResult<Donation> {
        self.donations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Donation {id} not found")))
    }

    /// Notify the other side of the donation: the NGO when the donor acts,
    /// the donor otherwise. Nobody is notified if no NGO is linked yet.
    async fn notify_counterpart(&self, ctx: &RequestContext, donation: &Donation) {
        let recipient = if donation.is_donor(ctx.user_id) {
            donation.ngo_id
        } else {
            Some(donation.donor_id)
        };
        let Some(recipient) = recipient else {
            debug!(donation_id = %donation.id, "No counterpart to notify");
            return;
        };

        let (title, message) = messages::donation_status(donation, donation.status);
        self.emitter
            .emit(
                Some(ctx.user_id),
                NewNotification {
                    user_id: recipient,
                    title: title.to_string(),
                    message,
                    related: Some(RelatedEntity::Donation(donation.id)),
                },
            )
            .await;
    }

    async fn notify_ngos_of_new_donation(&self, ctx: &RequestContext, donation: &Donation) {
        let ngos = match self.users.active_ids_by_role(UserRole::Ngo).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(donation_id = %donation.id, error = %e, "Failed to load NGOs for fan-out");
                return;
            }
        };

        let message = messages::new_donation(donation);
        let stored = self
            .emitter
            .emit_many(Some(ctx.user_id), &ngos, |ngo| NewNotification {
                user_id: ngo,
                title: messages::NEW_DONATION_TITLE.to_string(),
                message: message.clone(),
                related: Some(RelatedEntity::Donation(donation.id)),
            })
            .await;
        debug!(donation_id = %donation.id, notified = stored, "NGOs notified");

        self.emitter.broadcast(
            &ngos,
            &DomainEvent::new(
                Some(ctx.user_id),
                EventPayload::Donation(DonationEvent::Created {
                    donation_id: donation.id,
                    title: donation.title.clone(),
                }),
            ),
        );
    }
}

/// Users following a donation's status.
fn participants(donation: &Donation) -> Vec<UserId> {
    std::iter::once(donation.donor_id)
        .chain(donation.ngo_id)
        .collect()
}
