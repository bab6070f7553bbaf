// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end tests of the orchestration surface.

use super::helpers::{
    FailingGateway, RecordingGateway, admin, create_booking, customer, driver, seeded_service,
};
use crate::{BookingService, NewBookingRequest, ReminderAudience};
use vanbid::EngineError;
use vanbid_domain::{
    Booking, BookingId, BookingStatus, Money, NoteType, OfferStatus, Role, User, UserId,
};
use vanbid_notify::NotificationKind;

// ============================================================================
// Booking Creation
// ============================================================================

#[test]
fn test_created_bookings_get_ids_and_order_codes() {
    let service = seeded_service(RecordingGateway::default());

    let booking: Booking = create_booking(&service, 100);

    assert_eq!(booking.booking_id().value().len(), 24);
    assert!(booking.order_code().unwrap().value().starts_with("MV-"));
    assert_eq!(booking.status(), BookingStatus::Pending);
    assert_eq!(service.booking(booking.booking_id()).unwrap(), booking);
}

#[test]
fn test_creation_requires_a_known_customer() {
    let service = seeded_service(RecordingGateway::default());

    let result = service.create_booking(NewBookingRequest {
        customer: UserId::new("cust-unknown"),
        job: super::helpers::sample_job(),
        estimated_price: Money::from_pounds(100),
    });

    assert!(matches!(result.unwrap_err(), EngineError::NotFound { .. }));
}

// ============================================================================
// Offer Flow Through the Full Stack
// ============================================================================

#[test]
fn test_offer_accept_flow_commits_the_winner() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);

    service
        .offer_to_drivers(
            booking.booking_id(),
            vec![UserId::new("drv-1"), UserId::new("drv-2")],
            50,
            &admin(),
        )
        .unwrap();
    let updated: Booking = service
        .respond_to_offer(booking.booking_id(), true, &driver("drv-1"))
        .unwrap();

    assert_eq!(updated.driver(), Some(&UserId::new("drv-1")));
    assert_eq!(updated.status(), BookingStatus::Confirmed);
    assert_eq!(updated.driver_offers()[0].status(), OfferStatus::Accepted);
    assert_eq!(updated.driver_offers()[1].status(), OfferStatus::Rejected);
    for offer in updated.driver_offers() {
        assert_eq!(offer.offered_price(), Money::from_pounds(50));
    }
}

#[test]
fn test_late_accept_after_a_winner_is_a_conflict() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);
    service
        .offer_to_drivers(
            booking.booking_id(),
            vec![UserId::new("drv-1"), UserId::new("drv-2")],
            50,
            &admin(),
        )
        .unwrap();
    service
        .respond_to_offer(booking.booking_id(), true, &driver("drv-1"))
        .unwrap();

    let result = service.respond_to_offer(booking.booking_id(), true, &driver("drv-2"));

    assert!(matches!(result.unwrap_err(), EngineError::Conflict { .. }));
    let snapshot: Booking = service.booking(booking.booking_id()).unwrap();
    assert_eq!(snapshot.driver(), Some(&UserId::new("drv-1")));
}

#[test]
fn test_offering_rejects_out_of_range_percentages() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);

    let result = service.offer_to_drivers(
        booking.booking_id(),
        vec![UserId::new("drv-1")],
        101,
        &admin(),
    );

    assert!(matches!(
        result.unwrap_err(),
        EngineError::Validation { .. }
    ));
}

#[test]
fn test_offering_to_an_unknown_driver_is_not_found() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);

    let result = service.offer_to_drivers(
        booking.booking_id(),
        vec![UserId::new("drv-unknown")],
        50,
        &admin(),
    );

    assert!(matches!(result.unwrap_err(), EngineError::NotFound { .. }));
}

#[test]
fn test_offering_to_a_deactivated_driver_is_rejected() {
    let service = seeded_service(RecordingGateway::default());
    let mut sleeper: User = User::new(UserId::new("drv-4"), String::from("Sam"), Role::Driver);
    sleeper.is_active = false;
    service.register_user(sleeper).unwrap();
    let booking: Booking = create_booking(&service, 100);

    let result =
        service.offer_to_drivers(booking.booking_id(), vec![UserId::new("drv-4")], 50, &admin());

    assert!(matches!(
        result.unwrap_err(),
        EngineError::Validation { .. }
    ));
}

#[test]
fn test_offers_emit_notifications_after_commit() {
    let gateway: RecordingGateway = RecordingGateway::default();
    let service = seeded_service(gateway.clone());
    let booking: Booking = create_booking(&service, 100);

    service
        .offer_to_drivers(
            booking.booking_id(),
            vec![UserId::new("drv-1"), UserId::new("drv-2")],
            50,
            &admin(),
        )
        .unwrap();

    let sent = gateway.sent();
    assert_eq!(sent.len(), 2);
    for notification in &sent {
        assert_eq!(notification.kind, NotificationKind::OfferMade);
        assert_eq!(&notification.booking_id, booking.booking_id());
    }
}

// ============================================================================
// Notification Failure Semantics
// ============================================================================

#[test]
fn test_delivery_failure_never_fails_the_mutation() {
    let service: BookingService<FailingGateway> = seeded_service(FailingGateway);
    let booking: Booking = create_booking(&service, 100);

    let updated: Booking = service
        .offer_to_drivers(booking.booking_id(), vec![UserId::new("drv-1")], 50, &admin())
        .unwrap();

    assert_eq!(updated.driver_offers().len(), 1);
    // The committed state survives even though every delivery failed.
    let snapshot: Booking = service.booking(booking.booking_id()).unwrap();
    assert_eq!(snapshot.driver_offers().len(), 1);
}

// ============================================================================
// Reminders
// ============================================================================

#[test]
fn test_reminders_carry_the_payable_total() {
    let gateway: RecordingGateway = RecordingGateway::default();
    let service = seeded_service(gateway.clone());
    let booking: Booking = create_booking(&service, 100);
    service
        .set_final_price(booking.booking_id(), Money::from_pounds(80), &admin())
        .unwrap();
    service
        .record_additional_work(
            booking.booking_id(),
            Money::from_pounds(20),
            String::from("extra boxes"),
            &admin(),
        )
        .unwrap();

    service
        .send_reminder(booking.booking_id(), ReminderAudience::Customer, &admin())
        .unwrap();

    let sent = gateway.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, NotificationKind::CustomerReminder);
    assert_eq!(sent[0].payload["payable_total"], 10_000);
    assert_eq!(sent[0].payload["recipient"], "cust-1");
}

#[test]
fn test_reminders_are_admin_only() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);

    let result = service.send_reminder(
        booking.booking_id(),
        ReminderAudience::Customer,
        &customer(),
    );

    assert!(matches!(
        result.unwrap_err(),
        EngineError::InvalidTransition { .. }
    ));
}

#[test]
fn test_driver_reminder_requires_a_committed_driver() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);

    let result =
        service.send_reminder(booking.booking_id(), ReminderAudience::Driver, &admin());

    assert!(matches!(result.unwrap_err(), EngineError::NotFound { .. }));
}

// ============================================================================
// Lifecycle Through the Service
// ============================================================================

#[test]
fn test_customer_cancels_their_own_confirmed_booking() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);
    service
        .offer_to_drivers(booking.booking_id(), vec![UserId::new("drv-1")], 50, &admin())
        .unwrap();
    service
        .respond_to_offer(booking.booking_id(), true, &driver("drv-1"))
        .unwrap();

    let cancelled: Booking = service.cancel(booking.booking_id(), &customer()).unwrap();

    assert_eq!(cancelled.status(), BookingStatus::Cancelled);
}

#[test]
fn test_cancel_of_an_in_progress_booking_fails() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);
    service
        .offer_to_drivers(booking.booking_id(), vec![UserId::new("drv-1")], 50, &admin())
        .unwrap();
    service
        .respond_to_offer(booking.booking_id(), true, &driver("drv-1"))
        .unwrap();
    service
        .update_status(booking.booking_id(), BookingStatus::InProgress, &driver("drv-1"))
        .unwrap();

    let result = service.cancel(booking.booking_id(), &customer());

    assert!(matches!(
        result.unwrap_err(),
        EngineError::InvalidTransition { .. }
    ));
}

#[test]
fn test_dispute_round_trip_through_the_service() {
    let gateway: RecordingGateway = RecordingGateway::default();
    let service = seeded_service(gateway.clone());
    let booking: Booking = create_booking(&service, 100);
    service
        .offer_to_drivers(booking.booking_id(), vec![UserId::new("drv-1")], 50, &admin())
        .unwrap();
    service
        .respond_to_offer(booking.booking_id(), true, &driver("drv-1"))
        .unwrap();

    service
        .raise_dispute(
            booking.booking_id(),
            String::from("damaged sofa"),
            &customer(),
        )
        .unwrap();
    let resolved: Booking = service
        .resolve_dispute(booking.booking_id(), true, None, &admin())
        .unwrap();

    assert!(resolved.is_disputed());
    assert!(resolved.dispute_resolved());
    assert!(
        gateway
            .sent()
            .iter()
            .any(|n| n.kind == NotificationKind::DisputeRaised)
    );
}

#[test]
fn test_operations_on_an_unknown_booking_are_not_found() {
    let service = seeded_service(RecordingGateway::default());

    let result = service.cancel(&BookingId::new("bk-missing"), &admin());

    assert!(matches!(result.unwrap_err(), EngineError::NotFound { .. }));
}

// ============================================================================
// User Ledger
// ============================================================================

#[test]
fn test_user_notes_append_through_the_service() {
    let service = seeded_service(RecordingGateway::default());

    let user: User = service
        .add_user_note(
            &UserId::new("drv-1"),
            "insurance document expiring soon",
            NoteType::General,
            &admin(),
        )
        .unwrap();

    assert_eq!(user.notes().len(), 1);
    assert_eq!(user.notes()[0].text(), "insurance document expiring soon");
    assert_eq!(user.notes()[0].author(), &UserId::new("admin-1"));
}

#[test]
fn test_booking_notes_append_through_the_service() {
    let service = seeded_service(RecordingGateway::default());
    let booking: Booking = create_booking(&service, 100);

    service
        .add_booking_note(
            booking.booking_id(),
            "customer called to confirm access",
            NoteType::Call,
            &admin(),
        )
        .unwrap();
    let updated: Booking = service
        .add_booking_note(booking.booking_id(), "second note", NoteType::General, &admin())
        .unwrap();

    assert_eq!(updated.notes().len(), 2);
    assert_eq!(updated.notes()[0].text(), "customer called to confirm access");
}
