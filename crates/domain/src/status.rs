// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle status of a booking.
///
/// The dispute flag is an orthogonal overlay on the booking itself and
/// is deliberately not a status: a completed booking can be disputed
/// without losing its place in the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    /// Initial state after creation. No driver committed yet.
    #[default]
    Pending,
    /// A driver is committed (assigned or won the offer round).
    Confirmed,
    /// The job is underway.
    InProgress,
    /// The job finished. Terminal.
    Completed,
    /// The booking was cancelled before work started. Terminal.
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl BookingStatus {
    /// Converts this status to its wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Confirmed
    /// - Confirmed → `InProgress`
    /// - `InProgress` → Completed
    /// - Pending → Cancelled
    /// - Confirmed → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::Pending | Self::Confirmed, Self::Cancelled)
        )
    }

    /// Returns whether this status is terminal.
    ///
    /// A booking is never deleted; it ends its life in one of these.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns whether a dispute may be raised in this status.
    ///
    /// Disputes are only meaningful once a driver is committed: from
    /// `Confirmed`, `InProgress`, or `Completed`.
    #[must_use]
    pub const fn allows_dispute(&self) -> bool {
        matches!(self, Self::Confirmed | Self::InProgress | Self::Completed)
    }
}
