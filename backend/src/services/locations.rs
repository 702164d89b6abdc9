//! Location registration and lookup.

use validator::Validate;

use super::error::{ServiceError, ServiceResult};
use super::validation::FieldErrors;
use crate::api::CreateLocationRequest;
use crate::db::repository::LocationRepository;
use crate::models::{Location, LocationId};

pub async fn create_location<R>(repo: &R, request: CreateLocationRequest) -> ServiceResult<Location>
where
    R: LocationRepository + ?Sized,
{
    request
        .validate()
        .map_err(|e| ServiceError::ValidationFailed(FieldErrors::from(e)))?;
    Ok(repo.create_location(&request.into_new_location()).await?)
}

pub async fn get_location<R>(repo: &R, location_id: LocationId) -> ServiceResult<Location>
where
    R: LocationRepository + ?Sized,
{
    repo.get_location(location_id)
        .await
        .map_err(|e| ServiceError::from_lookup(e, "Location", location_id))
}
