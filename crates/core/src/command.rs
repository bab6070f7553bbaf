// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vanbid_domain::{BookingStatus, Money, NoteType, Percentage, UserId};

/// A command represents actor intent as data only.
///
/// Commands are the only way to request booking state changes. The
/// booking they target and the actor issuing them are supplied
/// alongside the command at apply time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Directly assign a driver, outside the bidding flow.
    AssignDriver {
        /// The driver to assign.
        driver: UserId,
    },
    /// Move the booking along one edge of the status graph.
    UpdateStatus {
        /// The requested status.
        new_status: BookingStatus,
    },
    /// Attach completion evidence while the job is underway.
    RecordCompletion {
        /// The driver's free-form completion notes.
        notes: Option<String>,
        /// Opaque references to completion pictures.
        pictures: Vec<String>,
    },
    /// Raise a dispute on the booking.
    RaiseDispute {
        /// Why the dispute is being raised.
        reason: String,
    },
    /// Record the outcome of dispute handling.
    ResolveDispute {
        /// Whether the dispute is considered resolved.
        resolved: bool,
        /// Optional status transition to perform when resolved
        /// (typically to `completed`).
        new_status: Option<BookingStatus>,
    },
    /// Cancel the booking. Sugar for `UpdateStatus` to `cancelled`,
    /// with the same edge restrictions.
    Cancel,
    /// Offer the job to a set of drivers at a percentage of the base
    /// price.
    OfferToDrivers {
        /// The drivers to offer to. Deduplicated at apply time.
        drivers: Vec<UserId>,
        /// The percentage of the base price each driver is offered.
        percentage: Percentage,
    },
    /// Accept or reject the acting driver's pending offer.
    RespondToOffer {
        /// True to accept, false to reject.
        accept: bool,
    },
    /// Overwrite the booking's final price.
    SetFinalPrice {
        /// The new final price.
        amount: Money,
    },
    /// Add an additional-work payment to the running total.
    RecordAdditionalWork {
        /// The payment amount. Must be strictly positive.
        amount: Money,
        /// What the payment was for. Replaces the previous description.
        description: String,
    },
    /// Append a note to the booking's ledger.
    AddNote {
        /// The note text.
        text: String,
        /// The note classification.
        note_type: NoteType,
    },
}

impl Command {
    /// A short name for logging and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AssignDriver { .. } => "AssignDriver",
            Self::UpdateStatus { .. } => "UpdateStatus",
            Self::RecordCompletion { .. } => "RecordCompletion",
            Self::RaiseDispute { .. } => "RaiseDispute",
            Self::ResolveDispute { .. } => "ResolveDispute",
            Self::Cancel => "Cancel",
            Self::OfferToDrivers { .. } => "OfferToDrivers",
            Self::RespondToOffer { .. } => "RespondToOffer",
            Self::SetFinalPrice { .. } => "SetFinalPrice",
            Self::RecordAdditionalWork { .. } => "RecordAdditionalWork",
            Self::AddNote { .. } => "AddNote",
        }
    }
}
