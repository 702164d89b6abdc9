//! Location repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Location, LocationId, NewLocation};

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Store a new location and return it with its assigned id.
    async fn create_location(&self, location: &NewLocation) -> RepositoryResult<Location>;

    /// Retrieve a location by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the location doesn't exist
    async fn get_location(&self, location_id: LocationId) -> RepositoryResult<Location>;

    /// Delete a location together with every guest addressed there and every
    /// property located there (and, transitively, their reservations).
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of location rows deleted (0 or 1)
    async fn delete_location(&self, location_id: LocationId) -> RepositoryResult<usize>;
}
