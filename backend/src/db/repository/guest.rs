//! Guest repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Guest, NationalId, NewGuest};

#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Register a guest.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - If the national id is already registered
    /// * `Err(RepositoryError::NotFound)` - If the address location doesn't exist
    async fn create_guest(&self, guest: &NewGuest) -> RepositoryResult<Guest>;

    /// Retrieve a guest by national id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the guest doesn't exist
    async fn get_guest(&self, national_id: &NationalId) -> RepositoryResult<Guest>;

    /// Delete a guest and all of their reservations.
    async fn delete_guest(&self, national_id: &NationalId) -> RepositoryResult<usize>;
}
