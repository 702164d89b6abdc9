//! Reservation use cases.

use tracing::{error, info, warn};
use validator::Validate;

use super::availability::is_available_excluding;
use super::error::{missing_related, ServiceError, ServiceResult};
use super::validation::{FieldErrors, NON_FIELD_ERRORS};
use crate::api::{CreateReservationRequest, UpdateReservationRequest};
use crate::db::repository::{
    GuestRepository, PropertyRepository, RepositoryError, ReservationRepository,
};
use crate::models::{NationalId, PropertyId, Reservation, Stay};

/// Message returned when the requested stay collides with a booking.
pub const UNAVAILABLE_MESSAGE: &str = "Property is not available for the requested dates.";

fn unavailable() -> ServiceError {
    ServiceError::invalid_field(NON_FIELD_ERRORS, UNAVAILABLE_MESSAGE)
}

/// Shape checks shared by creation and update.
fn validate_payload(payload: &impl Validate, stay: Stay) -> Result<(), FieldErrors> {
    let mut fields = match payload.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(errors),
    };
    if !stay.is_ordered() {
        fields.add("check_out", "Check-out must not be before check-in.");
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(fields)
    }
}

async fn ensure_property_exists<R>(repo: &R, property_id: PropertyId) -> ServiceResult<()>
where
    R: PropertyRepository + ?Sized,
{
    match repo.get_property(property_id).await {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_found() => Err(ServiceError::invalid_field(
            "property",
            missing_related(property_id),
        )),
        Err(e) => Err(ServiceError::Unexpected(e)),
    }
}

/// Translate a rejected atomic write. A record can vanish between the
/// checks above and the write, so NotFound is mapped by the entity it names.
fn write_rejected(err: RepositoryError, property_id: PropertyId) -> ServiceError {
    if err.is_conflict() {
        return unavailable();
    }
    if !err.is_not_found() {
        return ServiceError::Unexpected(err);
    }
    let context = err.context();
    let id = context.entity_id.clone().unwrap_or_default();
    match context.entity.as_deref() {
        Some("guest") => ServiceError::not_found("Guest", id),
        Some("reservation") => ServiceError::not_found("Reservation", id),
        _ => ServiceError::invalid_field("property", missing_related(property_id)),
    }
}

/// List a guest's reservations ordered by check-in date.
///
/// An unknown guest yields an empty list.
pub async fn list_for_guest<R>(repo: &R, guest: &NationalId) -> ServiceResult<Vec<Reservation>>
where
    R: ReservationRepository + ?Sized,
{
    Ok(repo.list_reservations_for_guest(guest).await?)
}

/// Book a property for the guest identified by `guest_id`.
///
/// # Returns
/// * `Ok(Reservation)` - The stored reservation
/// * `Err(ServiceError::NotFound)` - If the guest does not exist
/// * `Err(ServiceError::ValidationFailed)` - Invalid payload, unknown property,
///   or a stay overlapping an existing reservation
pub async fn create_reservation<R>(
    repo: &R,
    guest_id: &NationalId,
    request: CreateReservationRequest,
) -> ServiceResult<Reservation>
where
    R: GuestRepository + PropertyRepository + ReservationRepository + ?Sized,
{
    let guest = repo
        .get_guest(guest_id)
        .await
        .map_err(|e| ServiceError::from_lookup(e, "Guest", guest_id))?;

    let stay = Stay::new(request.check_in, request.check_out);
    if let Err(fields) = validate_payload(&request, stay) {
        error!(guest = %guest_id, errors = %fields, "Invalid data for reservation creation");
        return Err(ServiceError::ValidationFailed(fields));
    }
    ensure_property_exists(repo, request.property).await?;

    if !is_available_excluding(repo, request.property, stay, None).await {
        warn!(
            property_id = %request.property,
            check_in = %stay.check_in,
            check_out = %stay.check_out,
            guest = %guest_id,
            "Property is not available to rent"
        );
        return Err(unavailable());
    }

    let property_id = request.property;
    let new_reservation = request.into_new_reservation(guest.national_id);
    let reservation = repo
        .create_reservation(&new_reservation)
        .await
        .map_err(|e| {
            if e.is_conflict() {
                warn!(
                    property_id = %property_id,
                    stay = %stay,
                    guest = %guest_id,
                    "Property was booked concurrently"
                );
            }
            write_rejected(e, property_id)
        })?;

    info!(
        reservation_id = %reservation.id,
        property_id = %reservation.property,
        "Service layer: reservation created"
    );
    Ok(reservation)
}

/// Replace the values of the reservation named by `request.id`.
///
/// Availability is re-checked for the new property and stay, ignoring the
/// reservation being updated.
pub async fn update_reservation<R>(
    repo: &R,
    request: UpdateReservationRequest,
) -> ServiceResult<Reservation>
where
    R: PropertyRepository + ReservationRepository + ?Sized,
{
    let reservation_id = request.id;
    let current = repo
        .get_reservation(reservation_id)
        .await
        .map_err(|e| ServiceError::from_lookup(e, "Reservation", reservation_id))?;

    let stay = Stay::new(request.check_in, request.check_out);
    if let Err(fields) = validate_payload(&request, stay) {
        error!(
            reservation_id = %reservation_id,
            errors = %fields,
            "Invalid data for reservation update"
        );
        return Err(ServiceError::ValidationFailed(fields));
    }
    ensure_property_exists(repo, request.property).await?;

    if !is_available_excluding(repo, request.property, stay, Some(reservation_id)).await {
        warn!(
            reservation_id = %reservation_id,
            property_id = %request.property,
            check_in = %stay.check_in,
            check_out = %stay.check_out,
            "Property is not available for the updated stay"
        );
        return Err(unavailable());
    }

    let property_id = request.property;
    let update = request.into_update(&current);
    let updated = repo
        .update_reservation(reservation_id, &update)
        .await
        .map_err(|e| write_rejected(e, property_id))?;

    info!(reservation_id = %updated.id, "Service layer: reservation updated");
    Ok(updated)
}
