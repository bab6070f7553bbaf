// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use vanbid_domain::BookingId;

/// The kind of notification to deliver.
///
/// The engine requests delivery; what a kind turns into (email, push,
/// SMS) is the gateway implementation's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Remind the customer about an upcoming or unpaid booking.
    CustomerReminder,
    /// Remind the driver about an upcoming job.
    DriverReminder,
    /// A dispute was raised and needs admin attention.
    DisputeRaised,
    /// A job offer was made to a driver.
    OfferMade,
}

impl NotificationKind {
    /// Converts this kind to its wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CustomerReminder => "customer-reminder",
            Self::DriverReminder => "driver-reminder",
            Self::DisputeRaised => "dispute-raised",
            Self::OfferMade => "offer-made",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A request to notify someone about a booking.
///
/// The payload is opaque to the engine: gateway implementations decide
/// how to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// What happened.
    pub kind: NotificationKind,
    /// The booking the notification concerns.
    pub booking_id: BookingId,
    /// Structured context for the gateway to render.
    pub payload: serde_json::Value,
}

impl Notification {
    /// Creates a new `Notification`.
    ///
    /// # Arguments
    ///
    /// * `kind` - What happened
    /// * `booking_id` - The booking the notification concerns
    /// * `payload` - Structured context for the gateway
    #[must_use]
    pub const fn new(
        kind: NotificationKind,
        booking_id: BookingId,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            kind,
            booking_id,
            payload,
        }
    }
}

/// An error reported by a notification gateway.
///
/// Delivery failures are best-effort by contract: callers log them and
/// move on, and must never let them fail the state mutation that
/// triggered the notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError {
    /// A description of the delivery failure.
    pub message: String,
}

impl std::fmt::Display for NotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Notification delivery failed: {}", self.message)
    }
}

impl std::error::Error for NotifyError {}

/// The delivery boundary.
///
/// Implementations wrap whatever transport the deployment uses. The
/// engine only ever calls `notify` fire-and-forget.
pub trait NotificationGateway {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns a `NotifyError` describing the delivery failure. Callers
    /// are expected to log and swallow it.
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// A gateway that logs deliveries instead of sending them.
///
/// Used in development and tests, and as the default when no real
/// transport is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingGateway;

impl NotificationGateway for TracingGateway {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            kind = notification.kind.as_str(),
            booking_id = %notification.booking_id,
            payload = %notification.payload,
            "notification dispatched"
        );
        Ok(())
    }
}
