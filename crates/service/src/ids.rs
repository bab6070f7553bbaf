// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rand::RngExt;
use vanbid_domain::{BookingId, OrderCode};

/// Generates an opaque 24-hex-digit booking identifier.
pub(crate) fn generate_booking_id() -> BookingId {
    let mut rng = rand::rng();
    let value: String = (0..24)
        .map(|_| {
            let digit: u32 = rng.random_range(0..16);
            char::from_digit(digit, 16).unwrap_or('0')
        })
        .collect();
    BookingId::new(&value)
}

/// Generates a human-readable order code of the form `MV-123456`.
pub(crate) fn generate_order_code() -> OrderCode {
    let mut rng = rand::rng();
    let digits: String = (0..6)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    OrderCode::new(&format!("MV-{digits}"))
}
