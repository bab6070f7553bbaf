// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Address, JobDetails};

/// Validates that an address has all of its parts.
///
/// The engine treats addresses as opaque beyond this existence check.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` naming the first missing part.
pub fn validate_address(address: &Address, label: &'static str) -> Result<(), DomainError> {
    if address.line.trim().is_empty() {
        return Err(DomainError::EmptyField { field: label });
    }
    if address.city.trim().is_empty() {
        return Err(DomainError::EmptyField { field: label });
    }
    if address.postcode.trim().is_empty() {
        return Err(DomainError::EmptyField { field: label });
    }
    Ok(())
}

/// Validates the logistics block of a booking at creation time.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if any required field is empty.
pub fn validate_job_details(job: &JobDetails) -> Result<(), DomainError> {
    validate_address(&job.pickup, "pickup address")?;
    validate_address(&job.delivery, "delivery address")?;
    if job.pickup_time.trim().is_empty() {
        return Err(DomainError::EmptyField {
            field: "pickup time",
        });
    }
    if job.contact_phone.trim().is_empty() {
        return Err(DomainError::EmptyField {
            field: "contact phone",
        });
    }
    Ok(())
}
