// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Address, Booking, BookingId, JobDetails, Money, OrderCode, ServiceType, UserId, VehicleType,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_time() -> OffsetDateTime {
    datetime!(2026-03-01 09:00 UTC)
}

pub fn later_time() -> OffsetDateTime {
    datetime!(2026-03-01 10:30 UTC)
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
        pickup_date: time::macros::date!(2026 - 03 - 14),
        pickup_time: String::from("09:00"),
        service_type: ServiceType::Local,
        vehicle_type: VehicleType::MediumVan,
        special_instructions: None,
        contact_phone: String::from("07700 900123"),
    }
}

pub fn sample_booking(estimated_pounds: i64) -> Booking {
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

pub fn driver(id: &str) -> UserId {
    UserId::new(id)
}
