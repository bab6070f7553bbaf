// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::{Money, Percentage};
use crate::note::Note;
use crate::offer::{Offer, OfferStatus};
use crate::status::BookingStatus;
use crate::types::{BookingId, JobDetails, OrderCode, UserId};
use crate::validation::validate_job_details;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Evidence attached by the driver before a job is closed.
///
/// Attaching evidence does not itself complete the booking; a separate
/// status transition to `completed` is still required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// The driver's free-form completion notes.
    notes: Option<String>,
    /// Opaque references to completion pictures. The engine never
    /// interprets their content.
    pictures: Vec<String>,
    /// When the evidence was attached.
    recorded_at: OffsetDateTime,
}

impl CompletionRecord {
    /// Returns the driver's completion notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns the completion picture references.
    #[must_use]
    pub fn pictures(&self) -> &[String] {
        &self.pictures
    }

    /// Returns when the evidence was attached.
    #[must_use]
    pub const fn recorded_at(&self) -> OffsetDateTime {
        self.recorded_at
    }
}

/// The booking aggregate root.
///
/// A booking owns its offer pool and note ledger as value collections.
/// All fields are private: every mutation goes through a method on this
/// type so the structural invariants hold at all times: at most one
/// accepted offer, append-only notes, monotonic additional-work
/// accrual, and `updated_at` refreshed on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The canonical identifier.
    booking_id: BookingId,
    /// Optional human-readable order code.
    order_code: Option<OrderCode>,
    /// The customer who owns this booking. Immutable after creation.
    customer: UserId,
    /// The committed driver, once one is assigned or wins the offer
    /// round.
    driver: Option<UserId>,
    /// The lifecycle status.
    status: BookingStatus,
    /// Pickup/delivery logistics. Opaque beyond creation-time checks.
    job: JobDetails,
    /// The price quoted at creation. Immutable.
    estimated_price: Money,
    /// Admin override of the estimate, if any.
    final_price: Option<Money>,
    /// Accumulated additional-work payments. Only ever grows.
    additional_work_payment: Money,
    /// The most recent additional-work description. Earlier descriptions
    /// survive only in the note ledger, if a note was added.
    additional_work_description: Option<String>,
    /// The offer pool, in offer order.
    driver_offers: Vec<Offer>,
    /// The append-only note ledger, in insertion order.
    notes: Vec<Note>,
    /// Whether a dispute has been raised. Orthogonal to status.
    is_disputed: bool,
    /// Why the dispute was raised. Kept as historical record even after
    /// resolution.
    dispute_reason: Option<String>,
    /// Whether the dispute has been resolved.
    dispute_resolved: bool,
    /// Completion evidence, once attached.
    completion: Option<CompletionRecord>,
    /// When the booking was created.
    created_at: OffsetDateTime,
    /// When the booking was last mutated.
    updated_at: OffsetDateTime,
}

impl Booking {
    /// Creates a new `Booking` in `pending` status.
    ///
    /// # Arguments
    ///
    /// * `booking_id` - The canonical identifier
    /// * `order_code` - Optional human-readable code
    /// * `customer` - The owning customer
    /// * `job` - The logistics of the move
    /// * `estimated_price` - The price quoted at creation
    /// * `created_at` - The creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if any required job field is empty or the
    /// estimated price is negative.
    pub fn new(
        booking_id: BookingId,
        order_code: Option<OrderCode>,
        customer: UserId,
        job: JobDetails,
        estimated_price: Money,
        created_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        validate_job_details(&job)?;
        if estimated_price.is_negative() {
            return Err(DomainError::NegativeAmount {
                field: "estimated price",
            });
        }
        Ok(Self {
            booking_id,
            order_code,
            customer,
            driver: None,
            status: BookingStatus::Pending,
            job,
            estimated_price,
            final_price: None,
            additional_work_payment: Money::ZERO,
            additional_work_description: None,
            driver_offers: Vec::new(),
            notes: Vec::new(),
            is_disputed: false,
            dispute_reason: None,
            dispute_resolved: false,
            completion: None,
            created_at,
            updated_at: created_at,
        })
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub const fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    /// Returns the human-readable order code, if set.
    #[must_use]
    pub const fn order_code(&self) -> Option<&OrderCode> {
        self.order_code.as_ref()
    }

    /// Returns the owning customer.
    #[must_use]
    pub const fn customer(&self) -> &UserId {
        &self.customer
    }

    /// Returns the committed driver, if one is set.
    #[must_use]
    pub const fn driver(&self) -> Option<&UserId> {
        self.driver.as_ref()
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the logistics details.
    #[must_use]
    pub const fn job(&self) -> &JobDetails {
        &self.job
    }

    /// Returns the price quoted at creation.
    #[must_use]
    pub const fn estimated_price(&self) -> Money {
        self.estimated_price
    }

    /// Returns the admin price override, if any.
    #[must_use]
    pub const fn final_price(&self) -> Option<Money> {
        self.final_price
    }

    /// Returns the accumulated additional-work total.
    #[must_use]
    pub const fn additional_work_payment(&self) -> Money {
        self.additional_work_payment
    }

    /// Returns the most recent additional-work description.
    #[must_use]
    pub fn additional_work_description(&self) -> Option<&str> {
        self.additional_work_description.as_deref()
    }

    /// Returns the offer pool in offer order.
    #[must_use]
    pub fn driver_offers(&self) -> &[Offer] {
        &self.driver_offers
    }

    /// Returns the note ledger in insertion order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Returns whether a dispute has been raised.
    #[must_use]
    pub const fn is_disputed(&self) -> bool {
        self.is_disputed
    }

    /// Returns the dispute reason, if a dispute was ever raised.
    #[must_use]
    pub fn dispute_reason(&self) -> Option<&str> {
        self.dispute_reason.as_deref()
    }

    /// Returns whether the dispute has been resolved.
    #[must_use]
    pub const fn dispute_resolved(&self) -> bool {
        self.dispute_resolved
    }

    /// Returns the completion evidence, once attached.
    #[must_use]
    pub const fn completion(&self) -> Option<&CompletionRecord> {
        self.completion.as_ref()
    }

    /// Returns when the booking was created.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns when the booking was last mutated.
    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// The price an offer round or payable total is based on.
    #[must_use]
    pub fn base_price(&self) -> Money {
        self.final_price.unwrap_or(self.estimated_price)
    }

    /// The payable total: base price plus accumulated additional work.
    ///
    /// Derived on every call and never stored, so every surface that
    /// shows a total shows the same one.
    #[must_use]
    pub fn payable_total(&self) -> Money {
        self.base_price().saturating_add(self.additional_work_payment)
    }

    /// Directly assigns a driver, outside the bidding flow.
    ///
    /// The status is left unchanged; callers typically follow up with a
    /// transition to `confirmed`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DriverAlreadyAssigned` if a driver is set.
    pub fn assign_driver(&mut self, driver: UserId, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.driver.is_some() {
            return Err(DomainError::DriverAlreadyAssigned {
                booking_id: self.booking_id.clone(),
            });
        }
        self.driver = Some(driver);
        self.touch(now);
        Ok(())
    }

    /// Moves the booking along one edge of the transition graph.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the edge is not
    /// permitted by the graph.
    pub fn transition_status(
        &mut self,
        to: BookingStatus,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(to) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.touch(now);
        Ok(())
    }

    /// Attaches completion evidence while the job is underway.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CompletionNotAllowed` unless the booking is
    /// `in-progress`.
    pub fn record_completion(
        &mut self,
        notes: Option<String>,
        pictures: Vec<String>,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if self.status != BookingStatus::InProgress {
            return Err(DomainError::CompletionNotAllowed {
                status: self.status,
            });
        }
        self.completion = Some(CompletionRecord {
            notes,
            pictures,
            recorded_at: now,
        });
        self.touch(now);
        Ok(())
    }

    /// Raises a dispute on the booking.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DisputeAlreadyRaised` if a dispute is
    /// already open, or `DomainError::DisputeNotAllowed` if the status
    /// does not permit disputes.
    pub fn raise_dispute(&mut self, reason: String, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.is_disputed {
            return Err(DomainError::DisputeAlreadyRaised {
                booking_id: self.booking_id.clone(),
            });
        }
        if !self.status.allows_dispute() {
            return Err(DomainError::DisputeNotAllowed {
                status: self.status,
            });
        }
        self.is_disputed = true;
        self.dispute_reason = Some(reason);
        self.dispute_resolved = false;
        self.touch(now);
        Ok(())
    }

    /// Records the outcome of dispute handling.
    ///
    /// `is_disputed` and `dispute_reason` are never cleared; they remain
    /// as historical record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DisputeNotRaised` if the booking has no
    /// dispute.
    pub fn resolve_dispute(&mut self, resolved: bool, now: OffsetDateTime) -> Result<(), DomainError> {
        if !self.is_disputed {
            return Err(DomainError::DisputeNotRaised {
                booking_id: self.booking_id.clone(),
            });
        }
        self.dispute_resolved = resolved;
        self.touch(now);
        Ok(())
    }

    /// Overwrites the final price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeAmount` if the amount is negative.
    pub fn set_final_price(&mut self, amount: Money, now: OffsetDateTime) -> Result<(), DomainError> {
        if amount.is_negative() {
            return Err(DomainError::NegativeAmount {
                field: "final price",
            });
        }
        self.final_price = Some(amount);
        self.touch(now);
        Ok(())
    }

    /// Adds an additional-work payment to the running total.
    ///
    /// The total only ever grows; the description is replaced with the
    /// latest one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NonPositiveAmount` if the amount is not
    /// strictly positive, or `DomainError::AmountOverflow` if the total
    /// would overflow.
    pub fn record_additional_work(
        &mut self,
        amount: Money,
        description: String,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::NonPositiveAmount {
                field: "additional work payment",
            });
        }
        self.additional_work_payment = self.additional_work_payment.checked_add(amount)?;
        self.additional_work_description = Some(description);
        self.touch(now);
        Ok(())
    }

    /// Offers the job to a set of drivers at a percentage of the base
    /// price.
    ///
    /// Driver ids are deduplicated. A driver who already holds a pending
    /// offer has that offer's terms replaced rather than duplicated; a
    /// driver whose earlier offer was resolved receives a fresh one.
    ///
    /// # Returns
    ///
    /// The drivers an offer was issued (or re-issued) to, for
    /// notification purposes.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver set is empty or the booking
    /// already has an accepted offer.
    pub fn offer_job(
        &mut self,
        drivers: &[UserId],
        percentage: Percentage,
        now: OffsetDateTime,
    ) -> Result<Vec<UserId>, DomainError> {
        if drivers.is_empty() {
            return Err(DomainError::EmptyDriverList);
        }
        if self.accepted_offer().is_some() {
            return Err(DomainError::OfferAlreadyAccepted {
                booking_id: self.booking_id.clone(),
            });
        }
        let offered_price: Money = self.base_price().percentage_of(percentage);
        let mut offered: Vec<UserId> = Vec::new();
        for driver in drivers {
            if offered.contains(driver) {
                continue;
            }
            let existing: Option<usize> = self
                .driver_offers
                .iter()
                .position(|offer| offer.driver() == driver && offer.is_pending());
            if let Some(index) = existing {
                if let Some(offer) = self.driver_offers.get_mut(index) {
                    offer.reissue(offered_price, now);
                }
            } else {
                self.driver_offers
                    .push(Offer::new(driver.clone(), offered_price, now));
            }
            offered.push(driver.clone());
        }
        self.touch(now);
        Ok(offered)
    }

    /// Resolves a driver's pending offer.
    ///
    /// On acceptance, in one atomic mutation: the winning offer becomes
    /// `accepted`, every other pending offer becomes `rejected`, the
    /// driver is committed to the booking, and a still-`pending` booking
    /// advances to `confirmed`. On rejection only the driver's own offer
    /// is touched.
    ///
    /// # Errors
    ///
    /// * `DomainError::OfferNotFound` - the driver has no offer here
    /// * `DomainError::OfferAlreadyAccepted` - the booking already has a
    ///   winner (the caller lost the race)
    /// * `DomainError::OfferAlreadyResolved` - the driver already
    ///   responded and no winner exists
    pub fn respond_to_offer(
        &mut self,
        driver: &UserId,
        accept: bool,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let has_winner: bool = self.accepted_offer().is_some();
        let pending_index: Option<usize> = self
            .driver_offers
            .iter()
            .position(|offer| offer.driver() == driver && offer.is_pending());

        let Some(index) = pending_index else {
            if !self.driver_offers.iter().any(|o| o.driver() == driver) {
                return Err(DomainError::OfferNotFound {
                    driver: driver.clone(),
                });
            }
            if has_winner {
                return Err(DomainError::OfferAlreadyAccepted {
                    booking_id: self.booking_id.clone(),
                });
            }
            return Err(DomainError::OfferAlreadyResolved {
                driver: driver.clone(),
            });
        };

        if accept {
            // Conditional update keyed on "no existing accepted offer":
            // a pending offer normally implies no winner, but the check
            // is what turns a lost race into an error instead of a
            // second winner.
            if has_winner {
                return Err(DomainError::OfferAlreadyAccepted {
                    booking_id: self.booking_id.clone(),
                });
            }
            for (i, offer) in self.driver_offers.iter_mut().enumerate() {
                if i == index {
                    offer.accept(now);
                } else if offer.is_pending() {
                    offer.reject(now);
                }
            }
            self.driver = Some(driver.clone());
            if self.status == BookingStatus::Pending {
                self.status = BookingStatus::Confirmed;
            }
        } else if let Some(offer) = self.driver_offers.get_mut(index) {
            offer.reject(now);
        }
        self.touch(now);
        Ok(())
    }

    /// Appends a note to the booking's ledger.
    pub fn append_note(&mut self, note: Note, now: OffsetDateTime) {
        self.notes.push(note);
        self.touch(now);
    }

    /// Returns the accepted offer, if one exists.
    #[must_use]
    pub fn accepted_offer(&self) -> Option<&Offer> {
        self.driver_offers
            .iter()
            .find(|offer| offer.status() == OfferStatus::Accepted)
    }

    /// Returns the pending offer held by a driver, if any.
    #[must_use]
    pub fn pending_offer_for(&self, driver: &UserId) -> Option<&Offer> {
        self.driver_offers
            .iter()
            .find(|offer| offer.driver() == driver && offer.is_pending())
    }

    fn touch(&mut self, now: OffsetDateTime) {
        self.updated_at = now;
    }
}
