use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::location::LocationId;
use super::user::UserId;

crate::define_id_type!(i64, PropertyId);

/// Rentable unit owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub description: String,
    pub owner: UserId,
    pub price: BigDecimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    #[serde(default)]
    pub area: Option<BigDecimal>,
    pub location: LocationId,
    /// Owner-controlled listing flag. Booking decisions use reservation
    /// overlap, not this flag.
    pub availability: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - location {} - Max: {}",
            self.name, self.location, self.max_guests
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub name: String,
    pub description: String,
    pub owner: UserId,
    pub price: BigDecimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: Option<BigDecimal>,
    pub location: LocationId,
    pub availability: bool,
}

impl NewProperty {
    pub(crate) fn into_property(self, id: PropertyId, now: DateTime<Utc>) -> Property {
        Property {
            id,
            name: self.name,
            description: self.description,
            owner: self.owner,
            price: self.price,
            max_guests: self.max_guests,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            location: self.location,
            availability: self.availability,
            created_at: now,
            updated_at: now,
        }
    }
}
