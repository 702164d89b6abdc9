use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::guest::NationalId;
use super::property::PropertyId;
use super::stay::Stay;

crate::define_id_type!(i64, ReservationId);

/// A guest's booking of a property over a closed date range.
///
/// No two reservations of the same property may have overlapping stays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub property: PropertyId,
    pub renting_price: BigDecimal,
    pub number_of_guests: i32,
    pub description: String,
    pub guest: NationalId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn stay(&self) -> Stay {
        Stay::new(self.check_in, self.check_out)
    }
}

impl std::fmt::Display for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "property {} - {} - {} - {}",
            self.property, self.guest, self.check_in, self.check_out
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReservation {
    pub property: PropertyId,
    pub renting_price: BigDecimal,
    pub number_of_guests: i32,
    pub description: String,
    pub guest: NationalId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl NewReservation {
    pub fn stay(&self) -> Stay {
        Stay::new(self.check_in, self.check_out)
    }

    pub(crate) fn into_reservation(self, id: ReservationId, now: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            property: self.property,
            renting_price: self.renting_price,
            number_of_guests: self.number_of_guests,
            description: self.description,
            guest: self.guest,
            check_in: self.check_in,
            check_out: self.check_out,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Replacement values for a stored reservation. The guest never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub property: PropertyId,
    pub renting_price: BigDecimal,
    pub number_of_guests: i32,
    pub description: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl ReservationUpdate {
    pub fn stay(&self) -> Stay {
        Stay::new(self.check_in, self.check_out)
    }

    pub(crate) fn apply_to(self, reservation: &mut Reservation, now: DateTime<Utc>) {
        reservation.property = self.property;
        reservation.renting_price = self.renting_price;
        reservation.number_of_guests = self.number_of_guests;
        reservation.description = self.description;
        reservation.check_in = self.check_in;
        reservation.check_out = self.check_out;
        reservation.updated_at = now;
    }
}
