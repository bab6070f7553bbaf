// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based authorization for engine commands.
//!
//! Permissions live in one place: a (role, edge) table for status
//! transitions plus per-command role gates, consulted once inside
//! `apply`. Nothing outside the engine decides who may do what.

use crate::command::Command;
use crate::error::EngineError;
use vanbid_domain::{Actor, BookingStatus, Role};

/// The (role, edge) permission table for status transitions.
///
/// Edge validity itself is the transition graph's concern; this table
/// only answers whether the role may request a given edge:
/// - Admin: every edge in the graph
/// - Driver: `confirmed → in-progress` and `in-progress → completed`
/// - Customer: cancellation from `pending` or `confirmed`
#[must_use]
pub const fn transition_permitted(role: Role, from: BookingStatus, to: BookingStatus) -> bool {
    match role {
        Role::Admin => true,
        Role::Driver => matches!(
            (from, to),
            (BookingStatus::Confirmed, BookingStatus::InProgress)
                | (BookingStatus::InProgress, BookingStatus::Completed)
        ),
        Role::Customer => matches!(
            (from, to),
            (
                BookingStatus::Pending | BookingStatus::Confirmed,
                BookingStatus::Cancelled
            )
        ),
    }
}

/// Checks the role gate for a command, before any booking state is
/// consulted.
///
/// Transition edges are checked separately against the table above;
/// party checks (own booking, assigned driver) happen in `apply` where
/// the booking is available.
///
/// # Errors
///
/// Returns `EngineError::InvalidTransition` if the actor's role may not
/// request this command at all.
pub fn authorize(actor: &Actor, command: &Command) -> Result<(), EngineError> {
    let permitted: bool = match command {
        Command::AssignDriver { .. }
        | Command::ResolveDispute { .. }
        | Command::OfferToDrivers { .. }
        | Command::SetFinalPrice { .. }
        | Command::RecordAdditionalWork { .. } => matches!(actor.role, Role::Admin),
        Command::RespondToOffer { .. } => matches!(actor.role, Role::Driver),
        Command::RecordCompletion { .. } => matches!(actor.role, Role::Admin | Role::Driver),
        Command::Cancel => matches!(actor.role, Role::Admin | Role::Customer),
        // Any party may dispute or annotate; the booking-state checks
        // still apply downstream.
        Command::UpdateStatus { .. } | Command::RaiseDispute { .. } | Command::AddNote { .. } => {
            true
        }
    };
    if permitted {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition {
            message: format!(
                "role '{}' may not request {}",
                actor.role,
                command.name()
            ),
        })
    }
}
