// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::BookingStatus;
use crate::types::{BookingId, UserId};

/// Errors that can occur during domain validation and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Booking status string is not recognized.
    InvalidStatus(String),
    /// Offer status string is not recognized.
    InvalidOfferStatus(String),
    /// Note type string is not recognized.
    InvalidNoteType(String),
    /// Role string is not recognized.
    InvalidRole(String),
    /// Service type string is not recognized.
    InvalidServiceType(String),
    /// Vehicle type string is not recognized.
    InvalidVehicleType(String),
    /// The requested status edge is not in the transition graph.
    InvalidStatusTransition {
        /// The current status.
        from: BookingStatus,
        /// The requested status.
        to: BookingStatus,
    },
    /// Percentage outside the inclusive 0-100 range.
    InvalidPercentage {
        /// The invalid value.
        value: u8,
    },
    /// An amount that must not be negative was negative.
    NegativeAmount {
        /// The field being set.
        field: &'static str,
    },
    /// An amount that must be strictly positive was not.
    NonPositiveAmount {
        /// The field being set.
        field: &'static str,
    },
    /// Money arithmetic overflowed.
    AmountOverflow {
        /// Description of the operation that failed.
        operation: &'static str,
    },
    /// A required field was empty.
    EmptyField {
        /// The field that was empty.
        field: &'static str,
    },
    /// A note's text was empty after trimming.
    EmptyNoteText,
    /// A job offer was made to an empty driver set.
    EmptyDriverList,
    /// The booking already has a driver assigned.
    DriverAlreadyAssigned {
        /// The booking.
        booking_id: BookingId,
    },
    /// No offer exists for the given driver on this booking.
    OfferNotFound {
        /// The driver without an offer.
        driver: UserId,
    },
    /// The driver's offer has already been responded to, with no winner
    /// on the booking.
    OfferAlreadyResolved {
        /// The driver whose offer is resolved.
        driver: UserId,
    },
    /// The booking already has an accepted offer; the caller lost the
    /// race or tried to re-open bidding.
    OfferAlreadyAccepted {
        /// The booking with a winner.
        booking_id: BookingId,
    },
    /// A dispute has already been raised on this booking.
    DisputeAlreadyRaised {
        /// The disputed booking.
        booking_id: BookingId,
    },
    /// No dispute has been raised on this booking.
    DisputeNotRaised {
        /// The undisputed booking.
        booking_id: BookingId,
    },
    /// The booking's status does not permit raising a dispute.
    DisputeNotAllowed {
        /// The current status.
        status: BookingStatus,
    },
    /// The booking's status does not permit attaching completion
    /// evidence.
    CompletionNotAllowed {
        /// The current status.
        status: BookingStatus,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(s) => write!(f, "Invalid booking status: '{s}'"),
            Self::InvalidOfferStatus(s) => write!(f, "Invalid offer status: '{s}'"),
            Self::InvalidNoteType(s) => write!(f, "Invalid note type: '{s}'"),
            Self::InvalidRole(s) => write!(f, "Invalid role: '{s}'"),
            Self::InvalidServiceType(s) => write!(f, "Invalid service type: '{s}'"),
            Self::InvalidVehicleType(s) => write!(f, "Invalid vehicle type: '{s}'"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Booking cannot move from '{from}' to '{to}'")
            }
            Self::InvalidPercentage { value } => {
                write!(f, "Invalid percentage: {value}. Must be between 0 and 100")
            }
            Self::NegativeAmount { field } => {
                write!(f, "Invalid {field}: amount must not be negative")
            }
            Self::NonPositiveAmount { field } => {
                write!(f, "Invalid {field}: amount must be greater than zero")
            }
            Self::AmountOverflow { operation } => {
                write!(f, "Amount overflow while {operation}")
            }
            Self::EmptyField { field } => write!(f, "Required field '{field}' is empty"),
            Self::EmptyNoteText => write!(f, "Note text must not be empty"),
            Self::EmptyDriverList => {
                write!(f, "A job must be offered to at least one driver")
            }
            Self::DriverAlreadyAssigned { booking_id } => {
                write!(f, "Booking '{booking_id}' already has a driver assigned")
            }
            Self::OfferNotFound { driver } => {
                write!(f, "No offer exists for driver '{driver}'")
            }
            Self::OfferAlreadyResolved { driver } => {
                write!(f, "Driver '{driver}' has already responded to this offer")
            }
            Self::OfferAlreadyAccepted { booking_id } => {
                write!(f, "Booking '{booking_id}' already has an accepted offer")
            }
            Self::DisputeAlreadyRaised { booking_id } => {
                write!(f, "Booking '{booking_id}' is already disputed")
            }
            Self::DisputeNotRaised { booking_id } => {
                write!(f, "Booking '{booking_id}' has no dispute to resolve")
            }
            Self::DisputeNotAllowed { status } => {
                write!(f, "A dispute cannot be raised on a '{status}' booking")
            }
            Self::CompletionNotAllowed { status } => {
                write!(
                    f,
                    "Completion details cannot be recorded on a '{status}' booking"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
