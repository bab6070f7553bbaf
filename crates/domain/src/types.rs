// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::note::Note;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// The opaque identifier of a booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId {
    value: String,
}

impl BookingId {
    /// Creates a new `BookingId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The opaque identifier of a user (customer, driver, or admin).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId {
    value: String,
}

impl UserId {
    /// Creates a new `UserId`.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A human-readable order code shown to customers and drivers.
///
/// Codes are normalized to uppercase; they are display identifiers, not
/// canonical keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderCode {
    value: String,
}

impl OrderCode {
    /// Creates a new `OrderCode`, normalized to uppercase.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_uppercase(),
        }
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for OrderCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The role of an actor invoking the engine.
///
/// Roles arrive already authenticated; the engine only consults them for
/// authorization, never for identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Back-office operators with structural and corrective authority.
    Admin,
    /// Drivers responding to offers and working jobs.
    Driver,
    /// Customers who own bookings.
    Customer,
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "driver" => Ok(Self::Driver),
            "customer" => Ok(Self::Customer),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Driver => "driver",
            Self::Customer => "customer",
        }
    }
}

/// An already-authenticated identity plus role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting user's identifier.
    pub id: UserId,
    /// The acting user's role.
    pub role: Role,
}

impl Actor {
    /// Creates a new `Actor`.
    ///
    /// # Arguments
    ///
    /// * `id` - The acting user's identifier
    /// * `role` - The acting user's role
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

/// The class of moving service requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    /// Same-city move.
    Local,
    /// Cross-region move.
    LongDistance,
    /// Cross-border move.
    Interstate,
}

impl FromStr for ServiceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "long-distance" => Ok(Self::LongDistance),
            "interstate" => Ok(Self::Interstate),
            _ => Err(DomainError::InvalidServiceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ServiceType {
    /// Converts this service type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::LongDistance => "long-distance",
            Self::Interstate => "interstate",
        }
    }
}

/// The vehicle class a job calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleType {
    /// Small van.
    SmallVan,
    /// Medium van.
    MediumVan,
    /// Large (Luton-class) van.
    LargeVan,
    /// Truck.
    Truck,
}

impl FromStr for VehicleType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small-van" => Ok(Self::SmallVan),
            "medium-van" => Ok(Self::MediumVan),
            "large-van" => Ok(Self::LargeVan),
            "truck" => Ok(Self::Truck),
            _ => Err(DomainError::InvalidVehicleType(s.to_string())),
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl VehicleType {
    /// Converts this vehicle type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SmallVan => "small-van",
            Self::MediumVan => "medium-van",
            Self::LargeVan => "large-van",
            Self::Truck => "truck",
        }
    }
}

/// A postal address. Opaque to the engine beyond existence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line.
    pub line: String,
    /// City or town.
    pub city: String,
    /// Postcode.
    pub postcode: String,
}

impl Address {
    /// Creates a new `Address`.
    #[must_use]
    pub const fn new(line: String, city: String, postcode: String) -> Self {
        Self {
            line,
            city,
            postcode,
        }
    }
}

/// The logistics of a booking: where, when, and with what.
///
/// The engine validates that these exist at booking creation and treats
/// them as opaque afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    /// Pickup address.
    pub pickup: Address,
    /// Delivery address.
    pub delivery: Address,
    /// Pickup date.
    pub pickup_date: Date,
    /// Pickup time slot (free-form, e.g. "09:00").
    pub pickup_time: String,
    /// The class of service requested.
    pub service_type: ServiceType,
    /// The vehicle class the job calls for.
    pub vehicle_type: VehicleType,
    /// Customer instructions, if any.
    pub special_instructions: Option<String>,
    /// Contact phone number for the job.
    pub contact_phone: String,
}

/// A user record: a party to bookings and a ledger subject.
///
/// The engine does not own user CRUD; it keeps only what it needs to
/// authorize operations and attach notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The canonical identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// The user's role.
    pub role: Role,
    /// Whether the account is active. Inactive drivers cannot be
    /// assigned or offered jobs.
    pub is_active: bool,
    /// The user's append-only note ledger.
    notes: Vec<Note>,
}

impl User {
    /// Creates a new active `User` with an empty note ledger.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The canonical identifier
    /// * `name` - Display name
    /// * `role` - The user's role
    #[must_use]
    pub const fn new(user_id: UserId, name: String, role: Role) -> Self {
        Self {
            user_id,
            name,
            role,
            is_active: true,
            notes: Vec::new(),
        }
    }

    /// Appends a note to this user's ledger.
    ///
    /// Notes are append-only; there is no removal or edit operation.
    pub fn append_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Returns the note ledger in insertion order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}
