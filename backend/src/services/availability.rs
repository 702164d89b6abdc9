//! Reservation availability check.
//!
//! A property is available for a stay iff no stored reservation of that
//! property overlaps it, with both ends of every stay inclusive. The check
//! is read-only and fails closed: when storage cannot answer, the property
//! is reported as unavailable.
//!
//! Property existence and `check_in <= check_out` are the caller's concern.

use chrono::NaiveDate;
use tracing::error;

use crate::db::repository::ReservationRepository;
use crate::models::{PropertyId, ReservationId, Stay};

/// Whether `property_id` can be booked from `check_in` to `check_out`.
///
/// An unknown property has no reservations and is therefore available.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `property_id` - Property to check
/// * `check_in` / `check_out` - Requested stay, both days included
pub async fn is_available<R>(
    repo: &R,
    property_id: PropertyId,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> bool
where
    R: ReservationRepository + ?Sized,
{
    is_available_excluding(repo, property_id, Stay::new(check_in, check_out), None).await
}

/// Same as [`is_available`], ignoring the reservation `exclude`.
///
/// Used when moving an existing reservation so it does not collide with
/// itself.
pub async fn is_available_excluding<R>(
    repo: &R,
    property_id: PropertyId,
    stay: Stay,
    exclude: Option<ReservationId>,
) -> bool
where
    R: ReservationRepository + ?Sized,
{
    match repo
        .count_overlapping_reservations(property_id, stay, exclude)
        .await
    {
        Ok(overlapping) => overlapping == 0,
        Err(e) => {
            error!(
                property_id = %property_id,
                check_in = %stay.check_in,
                check_out = %stay.check_out,
                error = %e,
                "Unable to check property availability"
            );
            false
        }
    }
}
