use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{guests, locations, properties, reservations, users};
use crate::models::{
    Coordinate, Guest, Location, LocationId, NationalId, NewGuest, NewLocation, NewProperty,
    NewReservation, NewUser, Property, PropertyId, Reservation, ReservationId,
    ReservationUpdate, User, UserId,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LocationRow {
    pub location_id: i64,
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        let coordinate = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        };
        Location {
            id: LocationId(row.location_id),
            postal_code: row.postal_code,
            state: row.state,
            city: row.city,
            neighborhood: row.neighborhood,
            street: row.street,
            number: row.number,
            complement: row.complement,
            country: row.country,
            coordinate,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub struct NewLocationRow {
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&NewLocation> for NewLocationRow {
    fn from(location: &NewLocation) -> Self {
        NewLocationRow {
            postal_code: location.postal_code.clone(),
            state: location.state.clone(),
            city: location.city.clone(),
            neighborhood: location.neighborhood.clone(),
            street: location.street.clone(),
            number: location.number.clone(),
            complement: location.complement.clone(),
            country: location.country.clone(),
            latitude: location.coordinate.map(|c| c.latitude),
            longitude: location.coordinate.map(|c| c.longitude),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub api_token: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.user_id),
            username: row.username,
            email: row.email,
            api_token: row.api_token,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub username: String,
    pub email: String,
    pub api_token: String,
}

impl From<&NewUser> for NewUserRow {
    fn from(user: &NewUser) -> Self {
        NewUserRow {
            username: user.username.clone(),
            email: user.email.clone(),
            api_token: user.api_token.clone(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = guests)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GuestRow {
    pub national_id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GuestRow> for Guest {
    fn from(row: GuestRow) -> Self {
        Guest {
            national_id: NationalId(row.national_id),
            name: row.name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
            birth_date: row.birth_date,
            address: LocationId(row.address_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guests)]
pub struct NewGuestRow {
    pub national_id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
    pub address_id: i64,
}

impl From<&NewGuest> for NewGuestRow {
    fn from(guest: &NewGuest) -> Self {
        NewGuestRow {
            national_id: guest.national_id.0.clone(),
            name: guest.name.clone(),
            last_name: guest.last_name.clone(),
            email: guest.email.clone(),
            phone: guest.phone.clone(),
            birth_date: guest.birth_date,
            address_id: guest.address.0,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = properties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PropertyRow {
    pub property_id: i64,
    pub name: String,
    pub description: String,
    pub owner_id: i64,
    pub price: BigDecimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: Option<BigDecimal>,
    pub location_id: i64,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertyRow> for Property {
    fn from(row: PropertyRow) -> Self {
        Property {
            id: PropertyId(row.property_id),
            name: row.name,
            description: row.description,
            owner: UserId(row.owner_id),
            price: row.price,
            max_guests: row.max_guests,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            area: row.area,
            location: LocationId(row.location_id),
            availability: row.availability,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = properties)]
pub struct NewPropertyRow {
    pub name: String,
    pub description: String,
    pub owner_id: i64,
    pub price: BigDecimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: Option<BigDecimal>,
    pub location_id: i64,
    pub availability: bool,
}

impl From<&NewProperty> for NewPropertyRow {
    fn from(property: &NewProperty) -> Self {
        NewPropertyRow {
            name: property.name.clone(),
            description: property.description.clone(),
            owner_id: property.owner.0,
            price: property.price.clone(),
            max_guests: property.max_guests,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            area: property.area.clone(),
            location_id: property.location.0,
            availability: property.availability,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reservations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReservationRow {
    pub reservation_id: i64,
    pub property_id: i64,
    pub renting_price: BigDecimal,
    pub number_of_guests: i32,
    pub description: String,
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: ReservationId(row.reservation_id),
            property: PropertyId(row.property_id),
            renting_price: row.renting_price,
            number_of_guests: row.number_of_guests,
            description: row.description,
            guest: NationalId(row.guest_id),
            check_in: row.check_in,
            check_out: row.check_out,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reservations)]
pub struct NewReservationRow {
    pub property_id: i64,
    pub renting_price: BigDecimal,
    pub number_of_guests: i32,
    pub description: String,
    pub guest_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl From<&NewReservation> for NewReservationRow {
    fn from(reservation: &NewReservation) -> Self {
        NewReservationRow {
            property_id: reservation.property.0,
            renting_price: reservation.renting_price.clone(),
            number_of_guests: reservation.number_of_guests,
            description: reservation.description.clone(),
            guest_id: reservation.guest.0.clone(),
            check_in: reservation.check_in,
            check_out: reservation.check_out,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = reservations)]
pub struct ReservationChangeset {
    pub property_id: i64,
    pub renting_price: BigDecimal,
    pub number_of_guests: i32,
    pub description: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub updated_at: DateTime<Utc>,
}

impl ReservationChangeset {
    pub fn new(update: &ReservationUpdate, now: DateTime<Utc>) -> Self {
        ReservationChangeset {
            property_id: update.property.0,
            renting_price: update.renting_price.clone(),
            number_of_guests: update.number_of_guests,
            description: update.description.clone(),
            check_in: update.check_in,
            check_out: update.check_out,
            updated_at: now,
        }
    }
}
