//! Property repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{NewProperty, Property, PropertyId, UserId};

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Store a new property.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the owner or location doesn't exist
    async fn create_property(&self, property: &NewProperty) -> RepositoryResult<Property>;

    /// Retrieve a property by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the property doesn't exist
    async fn get_property(&self, property_id: PropertyId) -> RepositoryResult<Property>;

    /// List the properties owned by a user, ordered by id.
    async fn list_properties_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<Property>>;

    /// Delete a property and all of its reservations.
    async fn delete_property(&self, property_id: PropertyId) -> RepositoryResult<usize>;
}
