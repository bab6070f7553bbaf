// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Orchestration boundary for the VanBid engine.
//!
//! This crate wires the pure engine to its collaborators: every
//! operation loads the booking under its per-booking lock, applies a
//! command, commits the result, and only then dispatches notifications
//! best-effort. Callers hand in an already-authenticated [`Actor`];
//! authentication itself lives outside the engine.
//!
//! [`Actor`]: vanbid_domain::Actor

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

mod ids;
mod service;

#[cfg(test)]
mod tests;

pub use service::{BookingService, NewBookingRequest, ReminderAudience};
