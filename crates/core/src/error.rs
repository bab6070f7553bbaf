// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The engine's caller-facing error taxonomy.

use vanbid_domain::DomainError;

/// Errors reported by the booking engine.
///
/// Every variant is a distinct, recoverable outcome; none is a fatal
/// process error. The engine performs no automatic retries: a lost race
/// surfaces as `Conflict` and the caller is expected to refresh state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Malformed input: bad percentage, empty driver list, non-positive
    /// amount, empty note text.
    Validation {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A booking, offer, or user does not exist, or an offer is not in
    /// the expected state.
    NotFound {
        /// The type of resource that was not found.
        resource: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The status edge is not permitted, or the role is not permitted
    /// to request it.
    InvalidTransition {
        /// A human-readable description of the violation.
        message: String,
    },
    /// A race was lost: driver already assigned, or the offer was
    /// already resolved by a concurrent accept.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A dispute has already been raised on this booking.
    AlreadyDisputed {
        /// The disputed booking.
        booking_id: String,
    },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::NotFound { resource, message } => {
                write!(f, "{resource} not found: {message}")
            }
            Self::InvalidTransition { message } => {
                write!(f, "Invalid transition: {message}")
            }
            Self::Conflict { message } => {
                write!(f, "Conflict: {message}")
            }
            Self::AlreadyDisputed { booking_id } => {
                write!(f, "Booking '{booking_id}' is already disputed")
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

/// Translates a domain error into the engine's caller-facing taxonomy.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> EngineError {
    match err {
        DomainError::InvalidStatus(s) => EngineError::Validation {
            field: String::from("status"),
            message: format!("unknown booking status '{s}'"),
        },
        DomainError::InvalidOfferStatus(s) => EngineError::Validation {
            field: String::from("offer_status"),
            message: format!("unknown offer status '{s}'"),
        },
        DomainError::InvalidNoteType(s) => EngineError::Validation {
            field: String::from("note_type"),
            message: format!("unknown note type '{s}'"),
        },
        DomainError::InvalidRole(s) => EngineError::Validation {
            field: String::from("role"),
            message: format!("unknown role '{s}'"),
        },
        DomainError::InvalidServiceType(s) => EngineError::Validation {
            field: String::from("service_type"),
            message: format!("unknown service type '{s}'"),
        },
        DomainError::InvalidVehicleType(s) => EngineError::Validation {
            field: String::from("vehicle_type"),
            message: format!("unknown vehicle type '{s}'"),
        },
        DomainError::InvalidPercentage { value } => EngineError::Validation {
            field: String::from("percentage"),
            message: format!("percentage {value} is outside 0-100"),
        },
        DomainError::NegativeAmount { field } => EngineError::Validation {
            field: String::from(field),
            message: String::from("amount must not be negative"),
        },
        DomainError::NonPositiveAmount { field } => EngineError::Validation {
            field: String::from(field),
            message: String::from("amount must be greater than zero"),
        },
        DomainError::AmountOverflow { operation } => EngineError::Validation {
            field: String::from("amount"),
            message: format!("amount overflow while {operation}"),
        },
        DomainError::EmptyField { field } => EngineError::Validation {
            field: String::from(field),
            message: String::from("required field is empty"),
        },
        DomainError::EmptyNoteText => EngineError::Validation {
            field: String::from("text"),
            message: String::from("note text must not be empty"),
        },
        DomainError::EmptyDriverList => EngineError::Validation {
            field: String::from("drivers"),
            message: String::from("a job must be offered to at least one driver"),
        },
        DomainError::InvalidStatusTransition { from, to } => EngineError::InvalidTransition {
            message: format!("booking cannot move from '{from}' to '{to}'"),
        },
        DomainError::DisputeNotAllowed { status } => EngineError::InvalidTransition {
            message: format!("a dispute cannot be raised on a '{status}' booking"),
        },
        DomainError::CompletionNotAllowed { status } => EngineError::InvalidTransition {
            message: format!("completion details cannot be recorded on a '{status}' booking"),
        },
        DomainError::DriverAlreadyAssigned { booking_id } => EngineError::Conflict {
            message: format!("booking '{booking_id}' already has a driver assigned"),
        },
        DomainError::OfferAlreadyAccepted { booking_id } => EngineError::Conflict {
            message: format!("booking '{booking_id}' already has an accepted offer"),
        },
        DomainError::OfferNotFound { driver } => EngineError::NotFound {
            resource: String::from("Offer"),
            message: format!("no pending offer exists for driver '{driver}'"),
        },
        DomainError::OfferAlreadyResolved { driver } => EngineError::NotFound {
            resource: String::from("Offer"),
            message: format!("driver '{driver}' has already responded to this offer"),
        },
        DomainError::DisputeNotRaised { booking_id } => EngineError::NotFound {
            resource: String::from("Dispute"),
            message: format!("booking '{booking_id}' has no dispute to resolve"),
        },
        DomainError::DisputeAlreadyRaised { booking_id } => EngineError::AlreadyDisputed {
            booking_id: booking_id.to_string(),
        },
    }
}
