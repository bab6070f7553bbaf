// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use vanbid_domain::Booking;
use vanbid_notify::Notification;

/// The result of a successful booking transition.
///
/// Transitions are atomic: they either succeed completely or fail
/// without side effects. Notifications are returned as data; the caller
/// dispatches them only after the new booking state is committed, and
/// delivery failure never unwinds the transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The booking after the transition.
    pub new_booking: Booking,
    /// Notifications the transition requests, in emission order.
    pub notifications: Vec<Notification>,
}
