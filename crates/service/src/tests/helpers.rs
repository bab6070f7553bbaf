// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{BookingService, NewBookingRequest};
use std::sync::{Arc, Mutex, Once};
use time::macros::date;
use vanbid_domain::{
    Actor, Address, Booking, JobDetails, Money, Role, ServiceType, User, UserId, VehicleType,
};
use vanbid_notify::{Notification, NotificationGateway, NotifyError};

static TRACING: Once = Once::new();

/// Initializes test logging once, honoring `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A gateway that records every notification it is asked to deliver.
#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingGateway {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationGateway for RecordingGateway {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// A gateway whose deliveries always fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingGateway;

impl NotificationGateway for FailingGateway {
    fn notify(&self, _notification: &Notification) -> Result<(), NotifyError> {
        Err(NotifyError {
            message: String::from("smtp connection refused"),
        })
    }
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

/// Builds a service seeded with one admin, one customer, and three
/// active drivers.
pub fn seeded_service<G>(gateway: G) -> BookingService<G>
where
    G: NotificationGateway,
{
    init_tracing();
    let service: BookingService<G> = BookingService::new(gateway);
    service
        .register_user(User::new(
            UserId::new("admin-1"),
            String::from("Avery Admin"),
            Role::Admin,
        ))
        .unwrap();
    service
        .register_user(User::new(
            UserId::new("cust-1"),
            String::from("Casey Customer"),
            Role::Customer,
        ))
        .unwrap();
    for (id, name) in [
        ("drv-1", "Dana Driver"),
        ("drv-2", "Devon Driver"),
        ("drv-3", "Drew Driver"),
    ] {
        service
            .register_user(User::new(UserId::new(id), String::from(name), Role::Driver))
            .unwrap();
    }
    service
}

/// Creates a booking for `cust-1` at the given estimate.
pub fn create_booking<G>(service: &BookingService<G>, estimated_pounds: i64) -> Booking
where
    G: NotificationGateway,
{
    service
        .create_booking(NewBookingRequest {
            customer: UserId::new("cust-1"),
            job: sample_job(),
            estimated_price: Money::from_pounds(estimated_pounds),
        })
        .unwrap()
}
