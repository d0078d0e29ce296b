//! Direct messages and volunteer location relay.

mod helpers;

use std::sync::Arc;

use foodbridge_core::error::ErrorKind;
use foodbridge_core::events::{AssignmentEvent, EventPayload, MessageEvent};
use foodbridge_core::types::id::{DonationId, UserId};
use foodbridge_core::types::pagination::PageRequest;
use foodbridge_entity::assignment::AssignmentStatus;
use foodbridge_entity::message::MessageFilter;
use foodbridge_entity::user::UserRole;
use foodbridge_service::assignment::LocationReport;
use foodbridge_service::message::SendMessageInput;

use helpers::{FailingNotificationStore, TestApp};

fn text(recipient_id: UserId, content: &str) -> SendMessageInput {
    SendMessageInput {
        recipient_id,
        content: content.to_string(),
        donation_id: None,
    }
}

fn here() -> LocationReport {
    LocationReport {
        latitude: 52.52,
        longitude: 13.405,
    }
}

#[tokio::test]
async fn test_message_notifies_recipient_then_pushes_text() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;
    let volunteer = app.user(UserRole::Volunteer).await;

    let message = app
        .messages
        .send_message(&donor, text(volunteer.user_id, "Back entrance, please"))
        .await
        .unwrap();
    assert_eq!(message.sender_id, donor.user_id);
    assert_eq!(message.recipient_id, volunteer.user_id);

    let inbox = app.inbox(&volunteer).await;
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].title, "New Message");
    assert_eq!(inbox[0].related_entity_type.as_deref(), Some("message"));
    assert_eq!(inbox[0].related_entity_id, Some(message.id.into_uuid()));
    assert!(app.inbox(&donor).await.is_empty());

    assert_eq!(
        app.sink.event_types_for(volunteer.user_id),
        vec!["notification.created", "message.received"]
    );
    let pushed = app.sink.events_for(volunteer.user_id);
    match &pushed[1].payload {
        EventPayload::Message(MessageEvent::Received {
            message_id,
            content,
            ..
        }) => {
            assert_eq!(*message_id, message.id);
            assert_eq!(content, "Back entrance, please");
        }
        other => panic!("unexpected payload {other:?}"),
    }
}

#[tokio::test]
async fn test_message_survives_notification_failure() {
    let app = TestApp::with_notification_store(Arc::new(FailingNotificationStore));
    let donor = app.user(UserRole::Donor).await;
    let ngo = app.user(UserRole::Ngo).await;

    app.messages
        .send_message(&donor, text(ngo.user_id, "Still available"))
        .await
        .unwrap();

    assert_eq!(
        app.sink.event_types_for(ngo.user_id),
        vec!["message.received"]
    );
}

#[tokio::test]
async fn test_message_rejects_bad_recipients() {
    let app = TestApp::new();
    let donor = app.user(UserRole::Donor).await;

    let to_self = app
        .messages
        .send_message(&donor, text(donor.user_id, "hello me"))
        .await
        .unwrap_err();
    assert_eq!(to_self.kind, ErrorKind::Validation);

    let unknown = app
        .messages
        .send_message(&donor, text(UserId::new(), "anyone there?"))
        .await
        .unwrap_err();
    assert_eq!(unknown.kind, ErrorKind::NotFound);

    let ngo = app.user(UserRole::Ngo).await;
    let blank = app
        .messages
        .send_message(&donor, text(ngo.user_id, "   "))
        .await
        .unwrap_err();
    assert_eq!(blank.kind, ErrorKind::Validation);

    let mut about_missing = text(ngo.user_id, "About that donation");
    about_missing.donation_id = Some(DonationId::new());
    let missing = app
        .messages
        .send_message(&donor, about_missing)
        .await
        .unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_history_filters_by_counterpart_and_donation() {
    let app = TestApp::new();
    let (donor, ngo, donation) = app.accepted_donation().await;
    let volunteer = app.user(UserRole::Volunteer).await;

    let mut about = text(ngo.user_id, "Pickup is ready");
    about.donation_id = Some(donation.id);
    app.messages.send_message(&donor, about).await.unwrap();
    app.messages
        .send_message(&ngo, text(donor.user_id, "Thanks"))
        .await
        .unwrap();
    app.messages
        .send_message(&volunteer, text(donor.user_id, "On my way"))
        .await
        .unwrap();

    let all = app
        .messages
        .list_messages(&donor, MessageFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total_items, 3);
    assert_eq!(all.items[0].content, "On my way");

    let with_ngo = app
        .messages
        .list_messages(
            &donor,
            MessageFilter {
                with_user: Some(ngo.user_id),
                donation_id: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(with_ngo.total_items, 2);

    let about_donation = app
        .messages
        .list_messages(
            &ngo,
            MessageFilter {
                with_user: None,
                donation_id: Some(donation.id),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(about_donation.total_items, 1);

    let volunteer_view = app
        .messages
        .list_messages(&volunteer, MessageFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(volunteer_view.total_items, 1);
}

#[tokio::test]
async fn test_location_reaches_donor_and_ngo_only() {
    let app = TestApp::new();
    let (donor, ngo, volunteer, assignment) = app.assigned_delivery().await;
    let outsider = app.user(UserRole::Ngo).await;
    let donor_inbox = app.inbox(&donor).await.len();

    app.assignments
        .report_location(&volunteer, assignment.id, here())
        .await
        .unwrap();

    for party in [&donor, &ngo] {
        let last = app.sink.events_for(party.user_id).pop().unwrap();
        match last.payload {
            EventPayload::Assignment(AssignmentEvent::VolunteerLocation {
                assignment_id,
                latitude,
                ..
            }) => {
                assert_eq!(assignment_id, assignment.id);
                assert_eq!(latitude, 52.52);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
    assert!(
        !app.sink
            .event_types_for(outsider.user_id)
            .contains(&"assignment.volunteer_location")
    );
    assert!(
        !app.sink
            .event_types_for(volunteer.user_id)
            .contains(&"assignment.volunteer_location")
    );

    // Positions are pushed, never stored as notifications.
    assert_eq!(app.inbox(&donor).await.len(), donor_inbox);
}

#[tokio::test]
async fn test_only_the_assigned_volunteer_reports_location() {
    let app = TestApp::new();
    let (donor, _ngo, _volunteer, assignment) = app.assigned_delivery().await;
    let other_volunteer = app.user(UserRole::Volunteer).await;

    for actor in [&donor, &other_volunteer] {
        let err = app
            .assignments
            .report_location(actor, assignment.id, here())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }
}

#[tokio::test]
async fn test_location_rejected_after_delivery_ends() {
    let app = TestApp::new();
    let (_donor, _ngo, volunteer, assignment) = app.assigned_delivery().await;
    app.assignments
        .transition_assignment(&volunteer, assignment.id, AssignmentStatus::Cancelled)
        .await
        .unwrap();

    let err = app
        .assignments
        .report_location(&volunteer, assignment.id, here())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_location_out_of_range_is_invalid() {
    let app = TestApp::new();
    let (_donor, _ngo, volunteer, assignment) = app.assigned_delivery().await;

    let err = app
        .assignments
        .report_location(
            &volunteer,
            assignment.id,
            LocationReport {
                latitude: 123.0,
                longitude: 0.0,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
