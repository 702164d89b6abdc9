//! Guest registration and lookup.

use validator::Validate;

use super::error::{missing_related, ServiceError, ServiceResult};
use super::validation::FieldErrors;
use crate::api::CreateGuestRequest;
use crate::db::repository::{GuestRepository, LocationRepository};
use crate::models::{Guest, NationalId};

/// Register a guest.
///
/// The national id is the guest's key, so registering it twice is a
/// validation failure on `national_id`.
pub async fn create_guest<R>(repo: &R, request: CreateGuestRequest) -> ServiceResult<Guest>
where
    R: GuestRepository + LocationRepository + ?Sized,
{
    request
        .validate()
        .map_err(|e| ServiceError::ValidationFailed(FieldErrors::from(e)))?;

    let address = request.address;
    repo.create_guest(&request.into_new_guest())
        .await
        .map_err(|e| {
            if e.is_conflict() {
                ServiceError::invalid_field(
                    "national_id",
                    "guest with this national id already exists.",
                )
            } else if e.is_not_found() {
                ServiceError::invalid_field("address", missing_related(address))
            } else {
                ServiceError::Unexpected(e)
            }
        })
}

pub async fn get_guest<R>(repo: &R, national_id: &NationalId) -> ServiceResult<Guest>
where
    R: GuestRepository + ?Sized,
{
    repo.get_guest(national_id)
        .await
        .map_err(|e| ServiceError::from_lookup(e, "Guest", national_id))
}
