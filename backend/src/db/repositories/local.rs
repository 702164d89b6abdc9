//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data lives in
//! ordered maps behind a single lock, which also makes the reservation
//! check-and-insert atomic.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::*;
use crate::models::*;

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same data.
///
/// # Example
/// ```
/// use rental_manager::db::repositories::LocalRepository;
/// use rental_manager::db::repository::UserRepository;
/// use rental_manager::models::NewUser;
///
/// # tokio_test_block(async {
/// let repo = LocalRepository::new();
/// let owner = repo
///     .create_user(&NewUser {
///         username: "ana".into(),
///         email: "ana@example.com".into(),
///         api_token: "secret".into(),
///     })
///     .await
///     .unwrap();
/// assert_eq!(repo.find_user_by_token("secret").await.unwrap(), Some(owner));
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    locations: BTreeMap<LocationId, Location>,
    guests: BTreeMap<NationalId, Guest>,
    users: BTreeMap<UserId, User>,
    properties: BTreeMap<PropertyId, Property>,
    reservations: BTreeMap<ReservationId, Reservation>,

    // ID counters
    next_location_id: i64,
    next_user_id: i64,
    next_property_id: i64,
    next_reservation_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            locations: BTreeMap::new(),
            guests: BTreeMap::new(),
            users: BTreeMap::new(),
            properties: BTreeMap::new(),
            reservations: BTreeMap::new(),
            next_location_id: 1,
            next_user_id: 1,
            next_property_id: 1,
            next_reservation_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn overlapping(
        &self,
        property_id: PropertyId,
        stay: Stay,
        exclude: Option<ReservationId>,
    ) -> usize {
        self.reservations
            .values()
            .filter(|r| r.property == property_id)
            .filter(|r| Some(r.id) != exclude)
            .filter(|r| r.stay().overlaps(&stay))
            .count()
    }

    fn remove_property_cascade(&mut self, property_id: PropertyId) -> usize {
        if self.properties.remove(&property_id).is_none() {
            return 0;
        }
        self.reservations.retain(|_, r| r.property != property_id);
        1
    }

    fn remove_guest_cascade(&mut self, national_id: &NationalId) -> usize {
        if self.guests.remove(national_id).is_none() {
            return 0;
        }
        self.reservations.retain(|_, r| &r.guest != national_id);
        1
    }
}

fn unavailable(property_id: PropertyId, stay: Stay) -> RepositoryError {
    RepositoryError::conflict_with_context(
        format!("Property {} is already reserved for {}", property_id, stay),
        ErrorContext::new("reserve")
            .with_entity("property")
            .with_entity_id(property_id),
    )
}

fn missing(operation: &str, entity: &str, id: impl ToString) -> RepositoryError {
    let id = id.to_string();
    RepositoryError::not_found_with_context(
        format!("{} {} not found", entity, id),
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id),
    )
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every operation fails with a retryable connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of reservations stored.
    pub fn reservation_count(&self) -> usize {
        self.data.read().reservations.len()
    }

    /// Get the number of properties stored.
    pub fn property_count(&self) -> usize {
        self.data.read().properties.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HealthRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }
}

#[async_trait]
impl LocationRepository for LocalRepository {
    async fn create_location(&self, location: &NewLocation) -> RepositoryResult<Location> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = LocationId(data.next_location_id);
        data.next_location_id += 1;

        let stored = location.clone().into_location(id, Utc::now());
        data.locations.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_location(&self, location_id: LocationId) -> RepositoryResult<Location> {
        self.check_health()?;
        self.data
            .read()
            .locations
            .get(&location_id)
            .cloned()
            .ok_or_else(|| missing("get_location", "location", location_id))
    }

    async fn delete_location(&self, location_id: LocationId) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.locations.remove(&location_id).is_none() {
            return Ok(0);
        }

        let guests: Vec<NationalId> = data
            .guests
            .values()
            .filter(|g| g.address == location_id)
            .map(|g| g.national_id.clone())
            .collect();
        for national_id in &guests {
            data.remove_guest_cascade(national_id);
        }

        let properties: Vec<PropertyId> = data
            .properties
            .values()
            .filter(|p| p.location == location_id)
            .map(|p| p.id)
            .collect();
        for property_id in properties {
            data.remove_property_cascade(property_id);
        }

        Ok(1)
    }
}

#[async_trait]
impl GuestRepository for LocalRepository {
    async fn create_guest(&self, guest: &NewGuest) -> RepositoryResult<Guest> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.guests.contains_key(&guest.national_id) {
            return Err(RepositoryError::conflict_with_context(
                format!("Guest {} already exists", guest.national_id),
                ErrorContext::new("create_guest")
                    .with_entity("guest")
                    .with_entity_id(&guest.national_id),
            ));
        }
        if !data.locations.contains_key(&guest.address) {
            return Err(missing("create_guest", "location", guest.address));
        }

        let stored = guest.clone().into_guest(Utc::now());
        data.guests.insert(stored.national_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_guest(&self, national_id: &NationalId) -> RepositoryResult<Guest> {
        self.check_health()?;
        self.data
            .read()
            .guests
            .get(national_id)
            .cloned()
            .ok_or_else(|| missing("get_guest", "guest", national_id))
    }

    async fn delete_guest(&self, national_id: &NationalId) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(self.data.write().remove_guest_cascade(national_id))
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.users.values().any(|u| u.api_token == user.api_token) {
            return Err(RepositoryError::conflict_with_context(
                "API token already in use",
                ErrorContext::new("create_user").with_entity("user"),
            ));
        }

        let id = UserId(data.next_user_id);
        data.next_user_id += 1;
        let stored = user.clone().into_user(id);
        data.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_user(&self, user_id: UserId) -> RepositoryResult<User> {
        self.check_health()?;
        self.data
            .read()
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| missing("get_user", "user", user_id))
    }

    async fn find_user_by_token(&self, api_token: &str) -> RepositoryResult<Option<User>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .users
            .values()
            .find(|u| u.api_token == api_token)
            .cloned())
    }

    async fn delete_user(&self, user_id: UserId) -> RepositoryResult<usize> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.users.remove(&user_id).is_none() {
            return Ok(0);
        }
        let owned: Vec<PropertyId> = data
            .properties
            .values()
            .filter(|p| p.owner == user_id)
            .map(|p| p.id)
            .collect();
        for property_id in owned {
            data.remove_property_cascade(property_id);
        }
        Ok(1)
    }
}

#[async_trait]
impl PropertyRepository for LocalRepository {
    async fn create_property(&self, property: &NewProperty) -> RepositoryResult<Property> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.users.contains_key(&property.owner) {
            return Err(missing("create_property", "user", property.owner));
        }
        if !data.locations.contains_key(&property.location) {
            return Err(missing("create_property", "location", property.location));
        }

        let id = PropertyId(data.next_property_id);
        data.next_property_id += 1;
        let stored = property.clone().into_property(id, Utc::now());
        data.properties.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get_property(&self, property_id: PropertyId) -> RepositoryResult<Property> {
        self.check_health()?;
        self.data
            .read()
            .properties
            .get(&property_id)
            .cloned()
            .ok_or_else(|| missing("get_property", "property", property_id))
    }

    async fn list_properties_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<Property>> {
        self.check_health()?;
        Ok(self
            .data
            .read()
            .properties
            .values()
            .filter(|p| p.owner == owner)
            .cloned()
            .collect())
    }

    async fn delete_property(&self, property_id: PropertyId) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(self.data.write().remove_property_cascade(property_id))
    }
}

#[async_trait]
impl ReservationRepository for LocalRepository {
    async fn get_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> RepositoryResult<Reservation> {
        self.check_health()?;
        self.data
            .read()
            .reservations
            .get(&reservation_id)
            .cloned()
            .ok_or_else(|| missing("get_reservation", "reservation", reservation_id))
    }

    async fn list_reservations_for_guest(
        &self,
        national_id: &NationalId,
    ) -> RepositoryResult<Vec<Reservation>> {
        self.check_health()?;
        let mut reservations: Vec<Reservation> = self
            .data
            .read()
            .reservations
            .values()
            .filter(|r| &r.guest == national_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|r| (r.check_in, r.id));
        Ok(reservations)
    }

    async fn list_reservations_for_property(
        &self,
        property_id: PropertyId,
    ) -> RepositoryResult<Vec<Reservation>> {
        self.check_health()?;
        let mut reservations: Vec<Reservation> = self
            .data
            .read()
            .reservations
            .values()
            .filter(|r| r.property == property_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|r| (r.check_in, r.id));
        Ok(reservations)
    }

    async fn count_overlapping_reservations(
        &self,
        property_id: PropertyId,
        stay: Stay,
        exclude: Option<ReservationId>,
    ) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(self.data.read().overlapping(property_id, stay, exclude))
    }

    async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> RepositoryResult<Reservation> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.properties.contains_key(&reservation.property) {
            return Err(missing("create_reservation", "property", reservation.property));
        }
        if !data.guests.contains_key(&reservation.guest) {
            return Err(missing("create_reservation", "guest", &reservation.guest));
        }
        let stay = reservation.stay();
        if data.overlapping(reservation.property, stay, None) > 0 {
            return Err(unavailable(reservation.property, stay));
        }

        let id = ReservationId(data.next_reservation_id);
        data.next_reservation_id += 1;
        let stored = reservation.clone().into_reservation(id, Utc::now());
        data.reservations.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_reservation(
        &self,
        reservation_id: ReservationId,
        update: &ReservationUpdate,
    ) -> RepositoryResult<Reservation> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.reservations.contains_key(&reservation_id) {
            return Err(missing("update_reservation", "reservation", reservation_id));
        }
        if !data.properties.contains_key(&update.property) {
            return Err(missing("update_reservation", "property", update.property));
        }
        let stay = update.stay();
        if data.overlapping(update.property, stay, Some(reservation_id)) > 0 {
            return Err(unavailable(update.property, stay));
        }

        let reservation = data
            .reservations
            .get_mut(&reservation_id)
            .ok_or_else(|| missing("update_reservation", "reservation", reservation_id))?;
        update.clone().apply_to(reservation, Utc::now());
        Ok(reservation.clone())
    }

    async fn delete_reservation(&self, reservation_id: ReservationId) -> RepositoryResult<usize> {
        self.check_health()?;
        Ok(usize::from(
            self.data.write().reservations.remove(&reservation_id).is_some(),
        ))
    }
}
