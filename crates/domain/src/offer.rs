// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::Money;
use crate::types::UserId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The status of a driver's offer.
///
/// Offers are terminal once accepted or rejected; a driver who wants
/// back in after rejecting must receive a fresh offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    /// Awaiting the driver's response.
    #[default]
    Pending,
    /// The driver accepted and won the booking.
    Accepted,
    /// The driver declined, or another driver won first.
    Rejected,
}

impl FromStr for OfferStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidOfferStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl OfferStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

/// One driver's bid for a booking.
///
/// Offers are created only by offering a job to drivers and resolved
/// only through the booking they belong to, which enforces the
/// at-most-one-winner invariant across the whole offer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// The driver this offer was made to.
    driver: UserId,
    /// The offered price, derived from the booking's base price.
    offered_price: Money,
    /// The offer status.
    status: OfferStatus,
    /// When the offer was made (refreshed if the offer is re-issued
    /// while still pending).
    offered_at: OffsetDateTime,
    /// When the offer was first resolved. Never overwritten.
    responded_at: Option<OffsetDateTime>,
}

impl Offer {
    /// Creates a new pending `Offer`.
    #[must_use]
    pub(crate) const fn new(driver: UserId, offered_price: Money, offered_at: OffsetDateTime) -> Self {
        Self {
            driver,
            offered_price,
            status: OfferStatus::Pending,
            offered_at,
            responded_at: None,
        }
    }

    /// Returns the driver this offer was made to.
    #[must_use]
    pub const fn driver(&self) -> &UserId {
        &self.driver
    }

    /// Returns the offered price.
    #[must_use]
    pub const fn offered_price(&self) -> Money {
        self.offered_price
    }

    /// Returns the offer status.
    #[must_use]
    pub const fn status(&self) -> OfferStatus {
        self.status
    }

    /// Returns when the offer was made.
    #[must_use]
    pub const fn offered_at(&self) -> OffsetDateTime {
        self.offered_at
    }

    /// Returns when the offer was resolved, if it has been.
    #[must_use]
    pub const fn responded_at(&self) -> Option<OffsetDateTime> {
        self.responded_at
    }

    /// Returns whether the offer is still awaiting a response.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, OfferStatus::Pending)
    }

    /// Replaces the terms of a still-pending offer.
    pub(crate) const fn reissue(&mut self, offered_price: Money, offered_at: OffsetDateTime) {
        self.offered_price = offered_price;
        self.offered_at = offered_at;
    }

    /// Marks the offer accepted, recording the first response time.
    pub(crate) fn accept(&mut self, now: OffsetDateTime) {
        self.status = OfferStatus::Accepted;
        self.responded_at.get_or_insert(now);
    }

    /// Marks the offer rejected, recording the first response time.
    pub(crate) fn reject(&mut self, now: OffsetDateTime) {
        self.status = OfferStatus::Rejected;
        self.responded_at.get_or_insert(now);
    }
}
