// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, TransitionResult, apply};
use time::OffsetDateTime;
use time::macros::{date, datetime};
use vanbid_domain::{
    Actor, Address, Booking, BookingId, BookingStatus, JobDetails, Money, OrderCode, Role,
    ServiceType, UserId, VehicleType,
};

pub fn create_time() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn respond_time() -> OffsetDateTime {
    datetime!(2026-03-01 11:15 UTC)
}

pub fn admin() -> Actor {
    Actor::new(UserId::new("admin-1"), Role::Admin)
}

pub fn customer() -> Actor {
    Actor::new(UserId::new("cust-1"), Role::Customer)
}

pub fn driver(id: &str) -> Actor {
    Actor::new(UserId::new(id), Role::Driver)
}

pub fn sample_job() -> JobDetails {
    JobDetails {
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
    }
}

pub fn pending_booking(estimated_pounds: i64) -> Booking {
    Booking::new(
        BookingId::new("bk-0001"),
        Some(OrderCode::new("mv-1001")),
        UserId::new("cust-1"),
        sample_job(),
        Money::from_pounds(estimated_pounds),
        create_time(),
    )
    .unwrap()
}

/// Applies a command as the given actor and unwraps the success path.
pub fn apply_ok(booking: &Booking, command: Command, actor: &Actor) -> TransitionResult {
    apply(booking, command, actor, respond_time()).unwrap()
}

/// Drives a fresh booking to `confirmed` with a driver committed via
/// the offer flow.
pub fn confirmed_booking_with_driver(driver_id: &str) -> Booking {
    let booking: Booking = pending_booking(100);
    let offered: TransitionResult = apply_ok(
        &booking,
        Command::OfferToDrivers {
            drivers: vec![UserId::new(driver_id)],
            percentage: vanbid_domain::Percentage::new(50).unwrap(),
        },
        &admin(),
    );
    let accepted: TransitionResult = apply_ok(
        &offered.new_booking,
        Command::RespondToOffer { accept: true },
        &driver(driver_id),
    );
    assert_eq!(accepted.new_booking.status(), BookingStatus::Confirmed);
    accepted.new_booking
}
