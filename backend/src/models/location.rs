use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, LocationId);

/// Country assumed when an address omits one.
pub const DEFAULT_COUNTRY: &str = "Brazil";

/// Initial map center offered to clients picking a coordinate (São Paulo).
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate {
    latitude: -23.55,
    longitude: -46.63,
};

/// Map coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether latitude is in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Postal address with an optional map coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    pub country: String,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {} -  {}",
            self.street, self.city, self.state, self.country
        )
    }
}

/// Location fields supplied by the caller; id and timestamps are assigned on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub postal_code: String,
    pub state: String,
    pub city: String,
    pub neighborhood: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub country: String,
    pub coordinate: Option<Coordinate>,
}

impl NewLocation {
    pub(crate) fn into_location(self, id: LocationId, now: DateTime<Utc>) -> Location {
        Location {
            id,
            postal_code: self.postal_code,
            state: self.state,
            city: self.city,
            neighborhood: self.neighborhood,
            street: self.street,
            number: self.number,
            complement: self.complement,
            country: self.country,
            coordinate: self.coordinate,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewLocation {
        NewLocation {
            postal_code: "01310100".to_string(),
            state: "SP".to_string(),
            city: "São Paulo".to_string(),
            neighborhood: "Bela Vista".to_string(),
            street: "Avenida Paulista".to_string(),
            number: "1578".to_string(),
            complement: None,
            country: DEFAULT_COUNTRY.to_string(),
            coordinate: Some(DEFAULT_MAP_CENTER),
        }
    }

    #[test]
    fn test_display_format() {
        let location = sample().into_location(LocationId(1), Utc::now());
        assert_eq!(
            location.to_string(),
            "Avenida Paulista - São Paulo - SP -  Brazil"
        );
    }

    #[test]
    fn test_coordinate_bounds() {
        assert!(DEFAULT_MAP_CENTER.is_valid());
        assert!(Coordinate::new(90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
    }

    #[test]
    fn test_location_id_is_transparent_on_the_wire() {
        let json = serde_json::to_string(&LocationId(42)).unwrap();
        assert_eq!(json, "42");
        let parsed: LocationId = "42".parse().unwrap();
        assert_eq!(parsed, LocationId::new(42));
    }
}
