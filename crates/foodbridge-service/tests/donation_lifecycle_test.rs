//! Integration tests for the donation state machine.

mod helpers;

use foodbridge_core::error::ErrorKind;
use foodbridge_core::types::id::DonationId;
use foodbridge_core::types::pagination::PageRequest;
use foodbridge_entity::donation::{DonationFilter, DonationStatus};
use foodbridge_entity::user::UserRole;
use foodbridge_service::lifecycle::{DONATION_TRANSITIONS, find_transition};

use helpers::{TestApp, donation_input};

#[tokio::test]
async fn test_create_donation_notifies_every_active_ngo() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;
    let ngo_a = app.user(UserRole::Ngo).await;
    let ngo_b = app.user(UserRole::Ngo).await;
    let volunteer = app.user(UserRole::Volunteer).await;

    let detail = app
        .donations
        .create_donation(&donor, donation_input("Bakery surplus"))
        .await
        .unwrap();

    assert_eq!(detail.donation.status, DonationStatus::Pending);
    assert!(detail.donation.ngo_id.is_none());
    assert_eq!(detail.food_items.len(), 2);

    for ngo in [&ngo_a, &ngo_b] {
        let inbox = app.inbox(ngo).await;
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].title, "New Donation Available");
        assert_eq!(inbox[0].related_entity_type.as_deref(), Some("donation"));
        assert_eq!(
            inbox[0].related_entity_id,
            Some(detail.donation.id.into_uuid())
        );
    }
    assert!(app.inbox(&volunteer).await.is_empty());
    assert!(app.inbox(&donor).await.is_empty());
}

#[tokio::test]
async fn test_only_donors_create_donations() {
    let app = TestApp::new();
    let ngo = app.user(UserRole::Ngo).await;

    let err = app
        .donations
        .create_donation(&ngo, donation_input("Bakery surplus"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_invalid_donation_input_is_rejected() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;

    let err = app
        .donations
        .create_donation(&donor, donation_input("ab"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_full_happy_path_notifies_counterparts() {
    let app = TestApp::new();
    let (donor, ngo, donation) = app.accepted_donation().await;
    assert_eq!(donation.ngo_id, Some(ngo.user_id));

    let donor_inbox = app.inbox(&donor).await;
    assert_eq!(donor_inbox.len(), 1);
    assert_eq!(donor_inbox[0].title, "Donation Accepted");

    let scheduled = app
        .donations
        .transition_donation(&donor, donation.id, DonationStatus::Scheduled)
        .await
        .unwrap();
    assert!(scheduled.status_updated_at >= donation.status_updated_at);

    app.donations
        .transition_donation(&ngo, donation.id, DonationStatus::Picked)
        .await
        .unwrap();
    let delivered = app
        .donations
        .transition_donation(&ngo, donation.id, DonationStatus::Delivered)
        .await
        .unwrap();

    assert_eq!(delivered.status, DonationStatus::Delivered);
    assert_eq!(delivered.ngo_id, Some(ngo.user_id));

    // Donor acted once (scheduled), NGO twice (picked, delivered).
    let ngo_titles: Vec<_> = app.inbox(&ngo).await.into_iter().map(|n| n.title).collect();
    assert!(ngo_titles.contains(&"Pickup Scheduled".to_string()));
    assert_eq!(app.inbox(&donor).await.len(), 3);
}

#[tokio::test]
async fn test_second_ngo_gets_already_claimed() {
    let app = TestApp::new();
    let (_donor, _ngo_a, donation) = app.accepted_donation().await;
    let ngo_b = app.user(UserRole::Ngo).await;

    let err = app
        .donations
        .transition_donation(&ngo_b, donation.id, DonationStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyClaimed);
}

#[tokio::test]
async fn test_reaccepting_is_an_invalid_transition() {
    let app = TestApp::new();
    let (_donor, ngo, donation) = app.accepted_donation().await;

    let err = app
        .donations
        .transition_donation(&ngo, donation.id, DonationStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTransition);
}

#[tokio::test]
async fn test_any_ngo_may_reject_pending() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;
    let ngo = app.user(UserRole::Ngo).await;
    let donation = app.pending_donation(&donor).await;

    let rejected = app
        .donations
        .transition_donation(&ngo, donation.id, DonationStatus::Rejected)
        .await
        .unwrap();

    assert_eq!(rejected.status, DonationStatus::Rejected);
    assert!(rejected.ngo_id.is_none());
    assert_eq!(app.inbox(&donor).await[0].title, "Donation Rejected");
}

#[tokio::test]
async fn test_donor_cancel_before_claim_notifies_nobody() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;
    let donation = app.pending_donation(&donor).await;
    let before = app.sink.len();

    let cancelled = app
        .donations
        .transition_donation(&donor, donation.id, DonationStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(cancelled.status, DonationStatus::Cancelled);
    assert!(app.inbox(&donor).await.is_empty());
    // Only the donor's own status event goes out.
    assert_eq!(app.sink.len(), before + 1);
}

#[tokio::test]
async fn test_donor_cancel_after_claim_keeps_ngo_and_notifies_it() {
    let app = TestApp::new();
    let (donor, ngo, donation) = app.accepted_donation().await;

    let cancelled = app
        .donations
        .transition_donation(&donor, donation.id, DonationStatus::Cancelled)
        .await
        .unwrap();

    assert_eq!(cancelled.ngo_id, Some(ngo.user_id));
    let inbox = app.inbox(&ngo).await;
    assert!(inbox.iter().any(|n| n.title == "Donation Cancelled"));
}

#[tokio::test]
async fn test_only_the_owning_donor_cancels() {
    let app = TestApp::new();
    let (_donor, ngo, donation) = app.accepted_donation().await;
    let admin = app.user(UserRole::Admin).await;
    let other_donor = app.user(UserRole::Donor).await;

    for actor in [&ngo, &admin, &other_donor] {
        let err = app
            .donations
            .transition_donation(actor, donation.id, DonationStatus::Cancelled)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden, "{}", actor.role);
    }
}

#[tokio::test]
async fn test_admin_progress_notifies_donor() {
    let app = TestApp::new();
    let (donor, _ngo, donation) = app.accepted_donation().await;
    let admin = app.user(UserRole::Admin).await;

    app.donations
        .transition_donation(&admin, donation.id, DonationStatus::Scheduled)
        .await
        .unwrap();

    let titles: Vec<_> = app.inbox(&donor).await.into_iter().map(|n| n.title).collect();
    assert!(titles.contains(&"Pickup Scheduled".to_string()));
}

#[tokio::test]
async fn test_outsiders_cannot_progress_donation() {
    let app = TestApp::new();
    let (_donor, _ngo, donation) = app.accepted_donation().await;
    let other_ngo = app.user(UserRole::Ngo).await;
    let volunteer = app.user(UserRole::Volunteer).await;

    for actor in [&other_ngo, &volunteer] {
        let err = app
            .donations
            .transition_donation(actor, donation.id, DonationStatus::Scheduled)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }
}

#[tokio::test]
async fn test_donor_cannot_accept_own_donation() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;
    let donation = app.pending_donation(&donor).await;

    let err = app
        .donations
        .transition_donation(&donor, donation.id, DonationStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_unknown_donation_is_not_found() {
    let app = TestApp::new();
    let ngo = app.user(UserRole::Ngo).await;

    let err = app
        .donations
        .transition_donation(&ngo, DonationId::new(), DonationStatus::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_terminal_donations_reject_every_target() {
    let app = TestApp::new();
    let (donor, _ngo, donation) = app.accepted_donation().await;
    app.donations
        .transition_donation(&donor, donation.id, DonationStatus::Cancelled)
        .await
        .unwrap();
    let admin = app.user(UserRole::Admin).await;

    for target in DonationStatus::ALL {
        let err = app
            .donations
            .transition_donation(&admin, donation.id, target)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidTransition, "{target}");
    }
}

#[tokio::test]
async fn test_observed_transitions_are_table_edges() {
    // Walk every (from, to) pair with an actor that could take any edge
    // from `from`, and check the outcome agrees with the table.
    let app = TestApp::new();

    for from in [
        DonationStatus::Pending,
        DonationStatus::Accepted,
        DonationStatus::Scheduled,
        DonationStatus::Picked,
    ] {
        for target in DonationStatus::ALL {
            let donor = app.user(UserRole::Donor).await;
            let ngo = app.user(UserRole::Ngo).await;
            let donation = app.pending_donation(&donor).await;

            let path: &[DonationStatus] = match from {
                DonationStatus::Pending => &[],
                DonationStatus::Accepted => &[DonationStatus::Accepted],
                DonationStatus::Scheduled => &[DonationStatus::Accepted, DonationStatus::Scheduled],
                _ => &[
                    DonationStatus::Accepted,
                    DonationStatus::Scheduled,
                    DonationStatus::Picked,
                ],
            };
            for &step in path {
                app.donations
                    .transition_donation(&ngo, donation.id, step)
                    .await
                    .unwrap();
            }

            let actor = if target == DonationStatus::Cancelled {
                &donor
            } else {
                &ngo
            };
            let result = app
                .donations
                .transition_donation(actor, donation.id, target)
                .await;

            match find_transition(DONATION_TRANSITIONS, from, target) {
                Some(_) => assert_eq!(result.unwrap().status, target),
                None => assert!(result.is_err(), "{from} -> {target} should fail"),
            }
        }
    }
}

#[tokio::test]
async fn test_get_donation_visibility() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;
    let ngo = app.user(UserRole::Ngo).await;
    let other_ngo = app.user(UserRole::Ngo).await;
    let other_donor = app.user(UserRole::Donor).await;
    let donation = app.pending_donation(&donor).await;

    // Any NGO can browse while pending.
    assert!(app.donations.get_donation(&other_ngo, donation.id).await.is_ok());
    assert_eq!(
        app.donations
            .get_donation(&other_donor, donation.id)
            .await
            .unwrap_err()
            .kind,
        ErrorKind::Forbidden
    );

    app.donations
        .transition_donation(&ngo, donation.id, DonationStatus::Accepted)
        .await
        .unwrap();

    let detail = app.donations.get_donation(&ngo, donation.id).await.unwrap();
    assert_eq!(detail.food_items.len(), 2);
    assert_eq!(
        app.donations
            .get_donation(&other_ngo, donation.id)
            .await
            .unwrap_err()
            .kind,
        ErrorKind::Forbidden
    );
}

#[tokio::test]
async fn test_list_donations_filters_by_status_and_party() {
    let app = TestApp::new();
    let (donor, ngo, _accepted) = app.accepted_donation().await;
    app.pending_donation(&donor).await;
    app.pending_donation(&donor).await;

    let pending = app
        .donations
        .list_donations(
            DonationFilter {
                status: Some(DonationStatus::Pending),
                donor_id: Some(donor.user_id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(pending.total_items, 2);

    let claimed = app
        .donations
        .list_donations(
            DonationFilter {
                ngo_id: Some(ngo.user_id),
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(claimed.total_items, 1);
    assert_eq!(claimed.items[0].status, DonationStatus::Accepted);
}
