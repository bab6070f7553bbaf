// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use crate::{MemoryStore, StoreError};
use std::sync::Arc;
use time::macros::{date, datetime};
use vanbid_domain::{
    Address, Booking, BookingId, JobDetails, Money, Role, ServiceType, User, UserId, VehicleType,
};

fn sample_booking(id: &str) -> Booking {
    let job: JobDetails = JobDetails {
        pickup: Address::new(
            String::from("12 Harbour Road"),
            String::from("Bristol"),
            String::from("BS1 4QA"),
        ),
        delivery: Address::new(
            String::from("8 Mill Lane"),
            String::from("Bath"),
            String::from("BA1 1LN"),
        ),
        pickup_date: date!(2026 - 03 - 14),
        pickup_time: String::from("09:00"),
        service_type: ServiceType::Local,
        vehicle_type: VehicleType::MediumVan,
        special_instructions: None,
        contact_phone: String::from("07700 900123"),
    };
    Booking::new(
        BookingId::new(id),
        None,
        UserId::new("cust-1"),
        job,
        Money::from_pounds(100),
        datetime!(2026-03-01 09:00 UTC),
    )
    .unwrap()
}

#[test]
fn test_insert_and_get_round_trip() {
    let store: MemoryStore = MemoryStore::new();
    store.insert_booking(sample_booking("bk-1")).unwrap();

    let booking: Booking = store.get_booking(&BookingId::new("bk-1")).unwrap();

    assert_eq!(booking.booking_id(), &BookingId::new("bk-1"));
}

#[test]
fn test_duplicate_booking_is_rejected() {
    let store: MemoryStore = MemoryStore::new();
    store.insert_booking(sample_booking("bk-1")).unwrap();

    let result = store.insert_booking(sample_booking("bk-1"));

    assert!(matches!(
        result.unwrap_err(),
        StoreError::DuplicateBooking(_)
    ));
}

#[test]
fn test_missing_booking_is_not_found() {
    let store: MemoryStore = MemoryStore::new();

    let result = store.get_booking(&BookingId::new("bk-missing"));

    assert!(matches!(
        result.unwrap_err(),
        StoreError::BookingNotFound(_)
    ));
}

#[test]
fn test_update_commits_in_place() {
    let store: MemoryStore = MemoryStore::new();
    store.insert_booking(sample_booking("bk-1")).unwrap();
    let now = datetime!(2026-03-01 10:00 UTC);

    store
        .update_booking(&BookingId::new("bk-1"), |booking| {
            booking.set_final_price(Money::from_pounds(80), now)
        })
        .unwrap()
        .unwrap();

    let booking: Booking = store.get_booking(&BookingId::new("bk-1")).unwrap();
    assert_eq!(booking.final_price(), Some(Money::from_pounds(80)));
}

#[test]
fn test_concurrent_updates_of_one_booking_are_serialized() {
    let store: Arc<MemoryStore> = Arc::new(MemoryStore::new());
    store.insert_booking(sample_booking("bk-1")).unwrap();
    let now = datetime!(2026-03-01 10:00 UTC);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    store
                        .update_booking(&BookingId::new("bk-1"), |booking| {
                            booking.record_additional_work(
                                Money::from_pence(1),
                                String::from("increment"),
                                now,
                            )
                        })
                        .unwrap()
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let booking: Booking = store.get_booking(&BookingId::new("bk-1")).unwrap();
    assert_eq!(booking.additional_work_payment(), Money::from_pence(200));
}

#[test]
fn test_user_notes_survive_updates() {
    let store: MemoryStore = MemoryStore::new();
    store
        .insert_user(User::new(
            UserId::new("drv-1"),
            String::from("Dana Driver"),
            Role::Driver,
        ))
        .unwrap();
    let note = vanbid_domain::Note::new(
        "late to pickup",
        vanbid_domain::NoteType::Issue,
        UserId::new("admin-1"),
        datetime!(2026-03-01 10:00 UTC),
    )
    .unwrap();

    store
        .update_user(&UserId::new("drv-1"), |user| user.append_note(note))
        .unwrap();

    let user: User = store.get_user(&UserId::new("drv-1")).unwrap();
    assert_eq!(user.notes().len(), 1);
    assert_eq!(user.notes()[0].text(), "late to pickup");
}
