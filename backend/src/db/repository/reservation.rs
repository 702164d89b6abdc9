//! Reservation repository trait.
//!
//! Besides plain CRUD this trait owns the overlap query that backs the
//! availability check, and the atomic check-and-write used when booking.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{
    NationalId, NewReservation, PropertyId, Reservation, ReservationId, ReservationUpdate, Stay,
};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Retrieve a reservation by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the reservation doesn't exist
    async fn get_reservation(&self, reservation_id: ReservationId)
        -> RepositoryResult<Reservation>;

    /// List a guest's reservations ordered by check-in date.
    ///
    /// An unknown guest simply has no reservations.
    async fn list_reservations_for_guest(
        &self,
        national_id: &NationalId,
    ) -> RepositoryResult<Vec<Reservation>>;

    /// List a property's reservations ordered by check-in date.
    async fn list_reservations_for_property(
        &self,
        property_id: PropertyId,
    ) -> RepositoryResult<Vec<Reservation>>;

    /// Count reservations of `property_id` whose stay overlaps `stay`
    /// (`existing.check_in <= stay.check_out && existing.check_out >= stay.check_in`).
    ///
    /// # Arguments
    /// * `exclude` - Reservation to leave out of the count (the one being updated)
    async fn count_overlapping_reservations(
        &self,
        property_id: PropertyId,
        stay: Stay,
        exclude: Option<ReservationId>,
    ) -> RepositoryResult<usize>;

    /// Insert a reservation if, and only if, its stay overlaps no existing
    /// reservation of the same property. Check and insert are atomic per property.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - If an overlapping reservation exists
    /// * `Err(RepositoryError::NotFound)` - If the property or guest doesn't exist
    async fn create_reservation(&self, reservation: &NewReservation)
        -> RepositoryResult<Reservation>;

    /// Replace a reservation's values if the new stay overlaps no *other*
    /// reservation of the target property. Check and write are atomic.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the reservation or property doesn't exist
    /// * `Err(RepositoryError::Conflict)` - If an overlapping reservation exists
    async fn update_reservation(
        &self,
        reservation_id: ReservationId,
        update: &ReservationUpdate,
    ) -> RepositoryResult<Reservation>;

    /// Delete a reservation.
    async fn delete_reservation(&self, reservation_id: ReservationId) -> RepositoryResult<usize>;
}
