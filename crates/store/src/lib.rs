// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory persistence boundary for the VanBid engine.
//!
//! The engine's concurrency contract requires conflicting operations to
//! be serialized **per booking** while unrelated bookings proceed in
//! parallel. This store keeps each booking behind its own mutex inside
//! a registry; `update_booking` holds that mutex for the whole
//! read-apply-commit closure, so a transition is never interleaved with
//! another writer of the same booking and the lock is not released
//! until the mutated state is committed.
//!
//! A durable deployment swaps this crate for a database-backed store
//! providing the same guarantee (for example with transactions or a
//! conditional update on a version column).

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use tracing::debug;
use vanbid_domain::{Booking, BookingId, User, UserId};

#[cfg(test)]
mod tests;

/// Errors reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The booking does not exist.
    #[error("Booking '{0}' not found")]
    BookingNotFound(BookingId),

    /// The user does not exist.
    #[error("User '{0}' not found")]
    UserNotFound(UserId),

    /// A booking with this identifier already exists.
    #[error("Booking '{0}' already exists")]
    DuplicateBooking(BookingId),

    /// A user with this identifier already exists.
    #[error("User '{0}' already exists")]
    DuplicateUser(UserId),

    /// A lock was poisoned by a panicking writer.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

type Slot<T> = Arc<Mutex<T>>;

/// The in-memory store for bookings and users.
///
/// The registries are guarded by reader-writer locks that are held only
/// long enough to look up or insert a slot; entity state itself lives
/// behind per-entity mutexes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bookings: RwLock<HashMap<BookingId, Slot<Booking>>>,
    users: RwLock<HashMap<UserId, Slot<User>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new booking.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateBooking` if the identifier is
    /// already in use.
    pub fn insert_booking(&self, booking: Booking) -> Result<(), StoreError> {
        let mut registry = self
            .bookings
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        let booking_id: BookingId = booking.booking_id().clone();
        if registry.contains_key(&booking_id) {
            return Err(StoreError::DuplicateBooking(booking_id));
        }
        debug!(booking_id = %booking_id, "booking inserted");
        registry.insert(booking_id, Arc::new(Mutex::new(booking)));
        Ok(())
    }

    /// Returns a snapshot of a booking.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::BookingNotFound` if the booking does not
    /// exist.
    pub fn get_booking(&self, booking_id: &BookingId) -> Result<Booking, StoreError> {
        let slot: Slot<Booking> = self.booking_slot(booking_id)?;
        let booking = slot.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(booking.clone())
    }

    /// Runs a closure against a booking while holding its lock.
    ///
    /// The closure sees the current state and may mutate it in place;
    /// the mutation is committed the moment the closure returns and the
    /// lock is released only after that. Two updates of the same
    /// booking are therefore fully serialized, while updates of
    /// different bookings do not contend.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::BookingNotFound` if the booking does not
    /// exist.
    pub fn update_booking<T>(
        &self,
        booking_id: &BookingId,
        f: impl FnOnce(&mut Booking) -> T,
    ) -> Result<T, StoreError> {
        let slot: Slot<Booking> = self.booking_slot(booking_id)?;
        let mut booking = slot.lock().map_err(|_| StoreError::LockPoisoned)?;
        let outcome: T = f(&mut booking);
        debug!(booking_id = %booking_id, "booking updated");
        Ok(outcome)
    }

    /// Returns snapshots of all bookings, in unspecified order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::LockPoisoned` if a lock was poisoned.
    pub fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let registry = self.bookings.read().map_err(|_| StoreError::LockPoisoned)?;
        let slots: Vec<Slot<Booking>> = registry.values().cloned().collect();
        drop(registry);
        let mut bookings: Vec<Booking> = Vec::with_capacity(slots.len());
        for slot in slots {
            let booking = slot.lock().map_err(|_| StoreError::LockPoisoned)?;
            bookings.push(booking.clone());
        }
        Ok(bookings)
    }

    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateUser` if the identifier is already
    /// in use.
    pub fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut registry = self.users.write().map_err(|_| StoreError::LockPoisoned)?;
        let user_id: UserId = user.user_id.clone();
        if registry.contains_key(&user_id) {
            return Err(StoreError::DuplicateUser(user_id));
        }
        debug!(user_id = %user_id, "user inserted");
        registry.insert(user_id, Arc::new(Mutex::new(user)));
        Ok(())
    }

    /// Returns a snapshot of a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if the user does not exist.
    pub fn get_user(&self, user_id: &UserId) -> Result<User, StoreError> {
        let slot: Slot<User> = self.user_slot(user_id)?;
        let user = slot.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(user.clone())
    }

    /// Runs a closure against a user while holding its lock.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` if the user does not exist.
    pub fn update_user<T>(
        &self,
        user_id: &UserId,
        f: impl FnOnce(&mut User) -> T,
    ) -> Result<T, StoreError> {
        let slot: Slot<User> = self.user_slot(user_id)?;
        let mut user = slot.lock().map_err(|_| StoreError::LockPoisoned)?;
        let outcome: T = f(&mut user);
        debug!(user_id = %user_id, "user updated");
        Ok(outcome)
    }

    fn booking_slot(&self, booking_id: &BookingId) -> Result<Slot<Booking>, StoreError> {
        let registry = self.bookings.read().map_err(|_| StoreError::LockPoisoned)?;
        registry
            .get(booking_id)
            .cloned()
            .ok_or_else(|| StoreError::BookingNotFound(booking_id.clone()))
    }

    fn user_slot(&self, user_id: &UserId) -> Result<Slot<User>, StoreError> {
        let registry = self.users.read().map_err(|_| StoreError::LockPoisoned)?;
        registry
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(user_id.clone()))
    }
}
