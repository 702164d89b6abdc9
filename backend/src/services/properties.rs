//! Property use cases. Properties are always scoped to their owner.

use tracing::{error, info};
use validator::Validate;

use super::error::{missing_related, ServiceError, ServiceResult};
use super::validation::FieldErrors;
use crate::api::CreatePropertyRequest;
use crate::db::repository::{LocationRepository, PropertyRepository};
use crate::models::{Property, User};

/// List the properties owned by `owner`, ordered by id.
pub async fn list_for_owner<R>(repo: &R, owner: &User) -> ServiceResult<Vec<Property>>
where
    R: PropertyRepository + ?Sized,
{
    Ok(repo.list_properties_for_owner(owner.id).await?)
}

/// Create a property owned by `owner`.
///
/// # Returns
/// * `Err(ServiceError::ValidationFailed)` - Invalid payload or unknown location
pub async fn create_property<R>(
    repo: &R,
    owner: &User,
    request: CreatePropertyRequest,
) -> ServiceResult<Property>
where
    R: LocationRepository + PropertyRepository + ?Sized,
{
    if let Err(errors) = request.validate() {
        let fields = FieldErrors::from(errors);
        error!(owner = %owner.id, errors = %fields, "Invalid data for property creation");
        return Err(ServiceError::ValidationFailed(fields));
    }

    let location_id = request.location;
    if let Err(e) = repo.get_location(location_id).await {
        return Err(if e.is_not_found() {
            ServiceError::invalid_field("location", missing_related(location_id))
        } else {
            ServiceError::Unexpected(e)
        });
    }

    let property = repo
        .create_property(&request.into_new_property(owner.id))
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ServiceError::invalid_field("location", missing_related(location_id))
            } else {
                ServiceError::Unexpected(e)
            }
        })?;

    info!(property_id = %property.id, owner = %owner.id, "Service layer: property created");
    Ok(property)
}
