//! Request payloads accepted by the HTTP API.
//!
//! Every payload derives [`Validate`]; the service layer runs validation
//! before touching the repository and turns failures into a
//! `field -> [messages]` map (see [`crate::services::FieldErrors`]).
//! Responses reuse the domain records in [`crate::models`] directly.

use std::borrow::Cow;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{
    Coordinate, LocationId, NationalId, NewGuest, NewLocation, NewProperty, NewReservation,
    PropertyId, Reservation, ReservationId, ReservationUpdate, UserId, DEFAULT_COUNTRY,
};

/// Digits allowed after the decimal point in money and area fields.
pub const DECIMAL_PLACES: i64 = 2;

/// Total significant digits allowed in money and area fields.
pub const MAX_DIGITS: u64 = 10;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Non-negative decimal with at most [`MAX_DIGITS`] digits, [`DECIMAL_PLACES`]
/// of them after the point.
///
/// Only the digit string and the exponent are inspected. Clients choose the
/// exponent, so the value is never expanded into a full integer.
fn validate_money(value: &BigDecimal) -> Result<(), ValidationError> {
    let (digits, scale) = value.as_bigint_and_exponent();
    let digits = digits.to_string();
    let unsigned = digits.trim_start_matches('-');

    if unsigned.len() != digits.len() {
        return Err(invalid(
            "min_value",
            "Ensure this value is greater than or equal to 0.",
        ));
    }

    // value = digits * 10^-scale, so trailing zeros do not change this count.
    let whole_digits = (unsigned.len() as i64).saturating_sub(scale);
    if whole_digits > (MAX_DIGITS as i64 - DECIMAL_PLACES) {
        return Err(invalid(
            "max_whole_digits",
            "Ensure that there are no more than 8 digits before the decimal point.",
        ));
    }

    let significant = unsigned.trim_end_matches('0');
    let decimal_places = scale - (unsigned.len() - significant.len()) as i64;
    if !significant.is_empty() && decimal_places > DECIMAL_PLACES {
        return Err(invalid(
            "max_decimal_places",
            "Ensure that there are no more than 2 decimal places.",
        ));
    }

    Ok(())
}

fn validate_coordinate(value: &Coordinate) -> Result<(), ValidationError> {
    if value.is_valid() {
        Ok(())
    } else {
        Err(invalid(
            "coordinate_range",
            "Latitude must be within [-90, 90] and longitude within [-180, 180].",
        ))
    }
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Locations
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 8))]
    pub postal_code: String,
    #[validate(length(min = 1, max = 2))]
    pub state: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub neighborhood: String,
    #[validate(length(min = 1, max = 100))]
    pub street: String,
    #[validate(length(min = 1, max = 10))]
    pub number: String,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub complement: Option<String>,
    /// Defaults to [`DEFAULT_COUNTRY`].
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub country: Option<String>,
    #[validate(custom(function = "validate_coordinate"))]
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
}

impl CreateLocationRequest {
    pub fn into_new_location(self) -> NewLocation {
        NewLocation {
            postal_code: self.postal_code,
            state: self.state,
            city: self.city,
            neighborhood: self.neighborhood,
            street: self.street,
            number: self.number,
            complement: self.complement,
            country: self
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            coordinate: self.coordinate,
        }
    }
}

// =============================================================================
// Guests
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGuestRequest {
    /// CPF, the guest's immutable key.
    #[validate(length(min = 1, max = 11))]
    pub national_id: String,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub phone: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    pub address: LocationId,
}

impl CreateGuestRequest {
    pub fn into_new_guest(self) -> NewGuest {
        NewGuest {
            national_id: NationalId::new(self.national_id),
            name: self.name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            birth_date: self.birth_date,
            address: self.address,
        }
    }
}

// =============================================================================
// Properties
// =============================================================================

/// Property fields supplied by the owner. The owner itself is the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_money"))]
    pub price: BigDecimal,
    #[validate(range(min = 1))]
    pub max_guests: i32,
    #[validate(range(min = 0))]
    pub bedrooms: i32,
    #[validate(range(min = 0))]
    pub bathrooms: i32,
    #[validate(custom(function = "validate_money"))]
    #[serde(default)]
    pub area: Option<BigDecimal>,
    pub location: LocationId,
    #[serde(default = "default_true")]
    pub availability: bool,
}

impl CreatePropertyRequest {
    pub fn into_new_property(self, owner: UserId) -> NewProperty {
        NewProperty {
            name: self.name,
            description: self.description,
            owner,
            price: self.price,
            max_guests: self.max_guests,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            location: self.location,
            availability: self.availability,
        }
    }
}

// =============================================================================
// Reservations
// =============================================================================

/// Reservation fields; the guest comes from the request path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReservationRequest {
    pub property: PropertyId,
    #[validate(custom(function = "validate_money"))]
    pub renting_price: BigDecimal,
    #[validate(range(min = 1))]
    pub number_of_guests: i32,
    #[serde(default)]
    pub description: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl CreateReservationRequest {
    pub fn into_new_reservation(self, guest: NationalId) -> NewReservation {
        NewReservation {
            property: self.property,
            renting_price: self.renting_price,
            number_of_guests: self.number_of_guests,
            description: self.description,
            guest,
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

/// Replacement values for the reservation named by `id`.
///
/// `property`, `check_in` and `check_out` are always required because they
/// drive the availability check. Omitted price, guest count and description
/// keep their stored values.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateReservationRequest {
    pub id: ReservationId,
    pub property: PropertyId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(custom(function = "validate_money"))]
    #[serde(default)]
    pub renting_price: Option<BigDecimal>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub number_of_guests: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateReservationRequest {
    pub fn into_update(self, current: &Reservation) -> ReservationUpdate {
        ReservationUpdate {
            property: self.property,
            renting_price: self
                .renting_price
                .unwrap_or_else(|| current.renting_price.clone()),
            number_of_guests: self.number_of_guests.unwrap_or(current.number_of_guests),
            description: self
                .description
                .unwrap_or_else(|| current.description.clone()),
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}
