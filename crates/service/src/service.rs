// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{generate_booking_id, generate_order_code};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn};
use vanbid::{Command, EngineError, apply};
use vanbid_domain::{
    Actor, Booking, BookingId, BookingStatus, JobDetails, Money, Note, NoteType, Percentage, Role,
    User, UserId,
};
use vanbid_notify::{Notification, NotificationGateway, NotificationKind};
use vanbid_store::{MemoryStore, StoreError};

/// The input for creating a booking.
///
/// Creation is a thin constructor: the interesting lifecycle starts
/// afterwards, through commands.
#[derive(Debug, Clone)]
pub struct NewBookingRequest {
    /// The customer the booking belongs to.
    pub customer: UserId,
    /// The logistics of the move.
    pub job: JobDetails,
    /// The price quoted at creation.
    pub estimated_price: Money,
}

/// Who an admin reminder is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAudience {
    /// The booking's customer.
    Customer,
    /// The booking's assigned driver.
    Driver,
}

/// The engine's orchestration surface.
///
/// Each operation resolves the booking under its per-booking lock,
/// applies exactly one command, commits, and then dispatches any
/// notifications the transition requested. Notification delivery is
/// best-effort: failures are logged and never surface as operation
/// failures.
pub struct BookingService<G: NotificationGateway> {
    store: MemoryStore,
    gateway: G,
}

impl<G: NotificationGateway> BookingService<G> {
    /// Creates a service with an empty store.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            store: MemoryStore::new(),
            gateway,
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Registers a user the engine needs to know about (a party to
    /// bookings and a ledger subject).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Conflict` if the identifier is taken.
    pub fn register_user(&self, user: User) -> Result<(), EngineError> {
        self.store.insert_user(user).map_err(translate_store_error)
    }

    /// Creates a booking in `pending` status with a generated id and
    /// order code.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer is unknown or the booking
    /// fields fail validation.
    pub fn create_booking(&self, request: NewBookingRequest) -> Result<Booking, EngineError> {
        let customer: User = self
            .store
            .get_user(&request.customer)
            .map_err(translate_store_error)?;
        if customer.role != Role::Customer {
            return Err(EngineError::NotFound {
                resource: String::from("Customer"),
                message: format!("user '{}' is not a customer", request.customer),
            });
        }
        let booking: Booking = Booking::new(
            generate_booking_id(),
            Some(generate_order_code()),
            request.customer,
            request.job,
            request.estimated_price,
            OffsetDateTime::now_utc(),
        )?;
        self.store
            .insert_booking(booking.clone())
            .map_err(translate_store_error)?;
        info!(
            booking_id = %booking.booking_id(),
            customer = %booking.customer(),
            "booking created"
        );
        Ok(booking)
    }

    /// Directly assigns a driver to a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver is unknown or inactive, the actor
    /// is not an admin, or a driver is already assigned.
    pub fn assign_driver(
        &self,
        booking_id: &BookingId,
        driver: UserId,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.require_active_driver(&driver)?;
        self.execute(booking_id, Command::AssignDriver { driver }, actor)
    }

    /// Moves a booking along one edge of the status graph.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidTransition` if the edge is not in
    /// the graph or the actor's role may not request it.
    pub fn update_status(
        &self,
        booking_id: &BookingId,
        new_status: BookingStatus,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(booking_id, Command::UpdateStatus { new_status }, actor)
    }

    /// Attaches completion evidence to an in-progress booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking is not in progress or the actor
    /// is not its assigned driver (or an admin).
    pub fn record_completion(
        &self,
        booking_id: &BookingId,
        notes: Option<String>,
        pictures: Vec<String>,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(
            booking_id,
            Command::RecordCompletion { notes, pictures },
            actor,
        )
    }

    /// Raises a dispute on a booking.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::AlreadyDisputed` if a dispute is open, or
    /// `EngineError::InvalidTransition` if the status does not permit
    /// disputes.
    pub fn raise_dispute(
        &self,
        booking_id: &BookingId,
        reason: String,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(booking_id, Command::RaiseDispute { reason }, actor)
    }

    /// Records the outcome of dispute handling, optionally moving the
    /// booking to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the booking has
    /// no dispute.
    pub fn resolve_dispute(
        &self,
        booking_id: &BookingId,
        resolved: bool,
        new_status: Option<BookingStatus>,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(
            booking_id,
            Command::ResolveDispute {
                resolved,
                new_status,
            },
            actor,
        )
    }

    /// Cancels a booking. Only legal from `pending` or `confirmed`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidTransition` if the booking has
    /// progressed past `confirmed` or the actor may not cancel it.
    pub fn cancel(&self, booking_id: &BookingId, actor: &Actor) -> Result<Booking, EngineError> {
        self.execute(booking_id, Command::Cancel, actor)
    }

    /// Offers a job to a set of drivers at a percentage of the base
    /// price.
    ///
    /// # Errors
    ///
    /// Returns an error if the percentage is outside 0-100, the driver
    /// set is empty, any driver is unknown or inactive, or the booking
    /// already has a winner.
    pub fn offer_to_drivers(
        &self,
        booking_id: &BookingId,
        drivers: Vec<UserId>,
        percentage: u8,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        let percentage: Percentage = Percentage::new(percentage)?;
        for driver in &drivers {
            self.require_active_driver(driver)?;
        }
        self.execute(
            booking_id,
            Command::OfferToDrivers {
                drivers,
                percentage,
            },
            actor,
        )
    }

    /// Accepts or rejects the acting driver's pending offer.
    ///
    /// At most one accept wins per booking: the whole response runs
    /// under the booking's lock, and a driver whose offer was swept by
    /// a concurrent winner receives `EngineError::Conflict`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound` if the actor holds no pending
    /// offer, or `EngineError::Conflict` if another driver already won.
    pub fn respond_to_offer(
        &self,
        booking_id: &BookingId,
        accept: bool,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(booking_id, Command::RespondToOffer { accept }, actor)
    }

    /// Overwrites a booking's final price.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the amount is
    /// negative.
    pub fn set_final_price(
        &self,
        booking_id: &BookingId,
        amount: Money,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(booking_id, Command::SetFinalPrice { amount }, actor)
    }

    /// Adds an additional-work payment to a booking's running total.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin or the amount is
    /// not strictly positive.
    pub fn record_additional_work(
        &self,
        booking_id: &BookingId,
        amount: Money,
        description: String,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(
            booking_id,
            Command::RecordAdditionalWork {
                amount,
                description,
            },
            actor,
        )
    }

    /// Appends a note to a booking's ledger.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Validation` if the text is empty after
    /// trimming.
    pub fn add_booking_note(
        &self,
        booking_id: &BookingId,
        text: &str,
        note_type: NoteType,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        self.execute(
            booking_id,
            Command::AddNote {
                text: text.to_owned(),
                note_type,
            },
            actor,
        )
    }

    /// Appends a note to a user's ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the subject is unknown or the text is empty
    /// after trimming.
    pub fn add_user_note(
        &self,
        subject: &UserId,
        text: &str,
        note_type: NoteType,
        actor: &Actor,
    ) -> Result<User, EngineError> {
        let note: Note = Note::new(text, note_type, actor.id.clone(), OffsetDateTime::now_utc())?;
        self.store
            .update_user(subject, |user| {
                user.append_note(note);
                user.clone()
            })
            .map_err(translate_store_error)
    }

    /// Sends a reminder about a booking to its customer or driver.
    ///
    /// The reminder does not mutate the booking; its payload carries
    /// the derived payable total so every surface shows the same one.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin, the booking is
    /// unknown, or a driver reminder is requested before a driver is
    /// committed.
    pub fn send_reminder(
        &self,
        booking_id: &BookingId,
        audience: ReminderAudience,
        actor: &Actor,
    ) -> Result<(), EngineError> {
        if actor.role != Role::Admin {
            return Err(EngineError::InvalidTransition {
                message: format!("role '{}' may not send reminders", actor.role),
            });
        }
        let booking: Booking = self.booking(booking_id)?;
        let (kind, recipient): (NotificationKind, UserId) = match audience {
            ReminderAudience::Customer => {
                (NotificationKind::CustomerReminder, booking.customer().clone())
            }
            ReminderAudience::Driver => {
                let Some(driver) = booking.driver() else {
                    return Err(EngineError::NotFound {
                        resource: String::from("Driver"),
                        message: format!("booking '{booking_id}' has no driver to remind"),
                    });
                };
                (NotificationKind::DriverReminder, driver.clone())
            }
        };
        let notification: Notification = Notification::new(
            kind,
            booking_id.clone(),
            json!({
                "recipient": recipient.value(),
                "order_code": booking.order_code().map(ToString::to_string),
                "status": booking.status().as_str(),
                "payable_total": booking.payable_total().pence(),
                "pickup_date": booking.job().pickup_date.to_string(),
            }),
        );
        self.dispatch(&[notification]);
        Ok(())
    }

    /// Returns a snapshot of a booking.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound` if the booking does not exist.
    pub fn booking(&self, booking_id: &BookingId) -> Result<Booking, EngineError> {
        self.store
            .get_booking(booking_id)
            .map_err(translate_store_error)
    }

    /// Returns snapshots of all bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    pub fn bookings(&self) -> Result<Vec<Booking>, EngineError> {
        self.store.list_bookings().map_err(translate_store_error)
    }

    /// Returns a snapshot of a user.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotFound` if the user does not exist.
    pub fn user(&self, user_id: &UserId) -> Result<User, EngineError> {
        self.store.get_user(user_id).map_err(translate_store_error)
    }

    /// The single funnel every booking mutation goes through.
    ///
    /// The engine is applied while the booking's lock is held, and the
    /// new state is committed before the lock is released; only then
    /// are notifications dispatched.
    fn execute(
        &self,
        booking_id: &BookingId,
        command: Command,
        actor: &Actor,
    ) -> Result<Booking, EngineError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let outcome: Result<(Booking, Vec<Notification>), EngineError> = self
            .store
            .update_booking(booking_id, |booking| {
                let result = apply(booking, command, actor, now)?;
                *booking = result.new_booking;
                Ok((booking.clone(), result.notifications))
            })
            .map_err(translate_store_error)?;
        let (snapshot, notifications) = outcome?;
        self.dispatch(&notifications);
        Ok(snapshot)
    }

    /// Checks that a user exists, is a driver, and is active.
    fn require_active_driver(&self, driver: &UserId) -> Result<(), EngineError> {
        let user: User = self.store.get_user(driver).map_err(|err| match err {
            StoreError::UserNotFound(id) => EngineError::NotFound {
                resource: String::from("Driver"),
                message: format!("driver '{id}' does not exist"),
            },
            other => translate_store_error(other),
        })?;
        if user.role != Role::Driver {
            return Err(EngineError::NotFound {
                resource: String::from("Driver"),
                message: format!("user '{driver}' is not a driver"),
            });
        }
        if !user.is_active {
            return Err(EngineError::Validation {
                field: String::from("driver"),
                message: format!("driver '{driver}' account is deactivated"),
            });
        }
        Ok(())
    }

    /// Delivers notifications best-effort. Failures are logged and
    /// swallowed; they never unwind the committed state mutation.
    fn dispatch(&self, notifications: &[Notification]) {
        for notification in notifications {
            if let Err(err) = self.gateway.notify(notification) {
                warn!(
                    kind = notification.kind.as_str(),
                    booking_id = %notification.booking_id,
                    error = %err,
                    "notification delivery failed"
                );
            }
        }
    }
}

/// Translates a store error into the engine's caller-facing taxonomy.
fn translate_store_error(err: StoreError) -> EngineError {
    match err {
        StoreError::BookingNotFound(id) => EngineError::NotFound {
            resource: String::from("Booking"),
            message: format!("booking '{id}' does not exist"),
        },
        StoreError::UserNotFound(id) => EngineError::NotFound {
            resource: String::from("User"),
            message: format!("user '{id}' does not exist"),
        },
        StoreError::DuplicateBooking(id) => EngineError::Conflict {
            message: format!("booking '{id}' already exists"),
        },
        StoreError::DuplicateUser(id) => EngineError::Conflict {
            message: format!("user '{id}' already exists"),
        },
        StoreError::LockPoisoned => EngineError::Conflict {
            message: String::from("storage lock poisoned; retry the operation"),
        },
    }
}
