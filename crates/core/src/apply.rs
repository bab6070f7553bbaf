// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::EngineError;
use crate::permissions::{authorize, transition_permitted};
use crate::state::TransitionResult;
use serde_json::json;
use time::OffsetDateTime;
use vanbid_domain::{Actor, Booking, BookingStatus, Money, Note, Role, UserId};
use vanbid_notify::{Notification, NotificationKind};

/// Applies a command to a booking, producing the new booking and any
/// notifications the transition requests.
///
/// The input booking is immutable; on success the caller commits
/// `TransitionResult::new_booking` and then dispatches the
/// notifications. On failure the booking is untouched; there is no
/// partial offer-pool or ledger mutation to undo.
///
/// Callers needing the §5 concurrency guarantee must hold the booking's
/// lock across load, apply, and commit.
///
/// # Arguments
///
/// * `booking` - The current booking (immutable)
/// * `command` - The command to apply
/// * `actor` - The already-authenticated actor issuing the command
/// * `now` - The transition timestamp
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new booking and notifications
/// * `Err(EngineError)` if the command is not permitted or violates a
///   domain rule
///
/// # Errors
///
/// Returns an error if:
/// - The actor's role or party relationship does not permit the command
/// - The command violates a domain rule (invalid edge, lost race,
///   duplicate dispute, malformed input)
#[allow(clippy::too_many_lines)]
pub fn apply(
    booking: &Booking,
    command: Command,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<TransitionResult, EngineError> {
    authorize(actor, &command)?;

    let mut new_booking: Booking = booking.clone();
    let mut notifications: Vec<Notification> = Vec::new();

    match command {
        Command::AssignDriver { driver } => {
            new_booking.assign_driver(driver, now)?;
        }
        Command::UpdateStatus { new_status } => {
            ensure_edge_requestable(actor, booking, new_status)?;
            new_booking.transition_status(new_status, now)?;
        }
        Command::RecordCompletion { notes, pictures } => {
            ensure_assigned_driver(actor, booking)?;
            new_booking.record_completion(notes, pictures, now)?;
        }
        Command::RaiseDispute { reason } => {
            ensure_party(actor, booking)?;
            new_booking.raise_dispute(reason.clone(), now)?;
            notifications.push(Notification::new(
                NotificationKind::DisputeRaised,
                booking.booking_id().clone(),
                json!({
                    "reason": reason,
                    "raised_by": actor.id.value(),
                    "status": new_booking.status().as_str(),
                }),
            ));
        }
        Command::ResolveDispute {
            resolved,
            new_status,
        } => {
            new_booking.resolve_dispute(resolved, now)?;
            if let (true, Some(status)) = (resolved, new_status) {
                new_booking.transition_status(status, now)?;
            }
        }
        Command::Cancel => {
            ensure_party(actor, booking)?;
            ensure_edge_requestable(actor, booking, BookingStatus::Cancelled)?;
            new_booking.transition_status(BookingStatus::Cancelled, now)?;
        }
        Command::OfferToDrivers {
            drivers,
            percentage,
        } => {
            let offered: Vec<UserId> = new_booking.offer_job(&drivers, percentage, now)?;
            let offered_price: Money = new_booking.base_price().percentage_of(percentage);
            for driver in offered {
                notifications.push(Notification::new(
                    NotificationKind::OfferMade,
                    booking.booking_id().clone(),
                    json!({
                        "driver": driver.value(),
                        "offered_price": offered_price.pence(),
                        "percentage": percentage.value(),
                    }),
                ));
            }
        }
        Command::RespondToOffer { accept } => {
            new_booking.respond_to_offer(&actor.id, accept, now)?;
        }
        Command::SetFinalPrice { amount } => {
            new_booking.set_final_price(amount, now)?;
        }
        Command::RecordAdditionalWork {
            amount,
            description,
        } => {
            new_booking.record_additional_work(amount, description, now)?;
        }
        Command::AddNote { text, note_type } => {
            let note: Note = Note::new(&text, note_type, actor.id.clone(), now)?;
            new_booking.append_note(note, now);
        }
    }

    Ok(TransitionResult {
        new_booking,
        notifications,
    })
}

/// Checks that the actor's role may request this status edge, and that
/// a non-admin actor is a party to the booking.
fn ensure_edge_requestable(
    actor: &Actor,
    booking: &Booking,
    to: BookingStatus,
) -> Result<(), EngineError> {
    ensure_party(actor, booking)?;
    if transition_permitted(actor.role, booking.status(), to) {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition {
            message: format!(
                "role '{}' may not move a booking from '{}' to '{}'",
                actor.role,
                booking.status(),
                to
            ),
        })
    }
}

/// Checks that a non-admin actor is a party to the booking: the owning
/// customer or the assigned driver.
fn ensure_party(actor: &Actor, booking: &Booking) -> Result<(), EngineError> {
    let is_party: bool = match actor.role {
        Role::Admin => true,
        Role::Driver => booking.driver() == Some(&actor.id),
        Role::Customer => booking.customer() == &actor.id,
    };
    if is_party {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition {
            message: format!(
                "{} '{}' is not a party to booking '{}'",
                actor.role,
                actor.id,
                booking.booking_id()
            ),
        })
    }
}

/// Checks that a driver actor is the booking's assigned driver. Admins
/// pass unconditionally.
fn ensure_assigned_driver(actor: &Actor, booking: &Booking) -> Result<(), EngineError> {
    if matches!(actor.role, Role::Admin) || booking.driver() == Some(&actor.id) {
        Ok(())
    } else {
        Err(EngineError::InvalidTransition {
            message: format!(
                "driver '{}' is not assigned to booking '{}'",
                actor.id,
                booking.booking_id()
            ),
        })
    }
}
