// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A monetary amount in minor units (pence).
///
/// Prices are never represented as floating point. All arithmetic the
/// engine performs on prices is integer arithmetic on pence, with
/// explicit rounding where a percentage is applied.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    pence: i64,
}

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self { pence: 0 };

    /// Creates an amount from minor units (pence).
    #[must_use]
    pub const fn from_pence(pence: i64) -> Self {
        Self { pence }
    }

    /// Creates an amount from whole pounds.
    #[must_use]
    pub const fn from_pounds(pounds: i64) -> Self {
        Self {
            pence: pounds * 100,
        }
    }

    /// Returns the amount in minor units (pence).
    #[must_use]
    pub const fn pence(&self) -> i64 {
        self.pence
    }

    /// Returns whether this amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.pence > 0
    }

    /// Returns whether this amount is less than zero.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.pence < 0
    }

    /// Adds two amounts, failing on overflow.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the sum does not fit in
    /// 64 bits of pence.
    pub fn checked_add(self, other: Self) -> Result<Self, DomainError> {
        self.pence
            .checked_add(other.pence)
            .map(Self::from_pence)
            .ok_or(DomainError::AmountOverflow {
                operation: "adding amounts",
            })
    }

    /// Adds two amounts, saturating at the numeric bounds.
    ///
    /// Used for derived read-only totals where an error channel is not
    /// available.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            pence: self.pence.saturating_add(other.pence),
        }
    }

    /// Applies a percentage to this amount, rounding half-up to the
    /// nearest penny.
    ///
    /// The intermediate product is computed in 128 bits; because the
    /// percentage is at most 100 the result is bounded by the input and
    /// always fits back into 64 bits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percentage_of(self, percentage: Percentage) -> Self {
        let scaled: i128 = i128::from(self.pence) * i128::from(percentage.value());
        let rounded: i128 = if scaled >= 0 {
            (scaled + 50) / 100
        } else {
            (scaled - 50) / 100
        };
        Self {
            pence: rounded as i64,
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.pence < 0 { "-" } else { "" };
        let magnitude: i64 = self.pence.abs();
        write!(f, "{sign}\u{a3}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

/// A percentage in the inclusive range 0 to 100.
///
/// Offer prices are derived as a percentage of a booking's base price;
/// the range is enforced at construction so a valid `Percentage` can be
/// applied without further checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage {
    value: u8,
}

impl Percentage {
    /// Creates a new `Percentage`.
    ///
    /// # Arguments
    ///
    /// * `value` - The percentage value (must be between 0 and 100 inclusive)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPercentage` if the value exceeds 100.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if value <= 100 {
            Ok(Self { value })
        } else {
            Err(DomainError::InvalidPercentage { value })
        }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.value)
    }
}
