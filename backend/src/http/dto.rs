//! Response envelopes for the HTTP API.
//!
//! Request payloads live in [`crate::api`]; single records are returned as
//! the domain types from [`crate::models`].

use serde::{Deserialize, Serialize};

use crate::models::{Property, Reservation};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Repository status: "connected", "disconnected" or "error"
    pub database: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyListResponse {
    pub properties: Vec<Property>,
    pub total: usize,
}

impl From<Vec<Property>> for PropertyListResponse {
    fn from(properties: Vec<Property>) -> Self {
        let total = properties.len();
        Self { properties, total }
    }
}

/// A guest's reservations, ordered by check-in date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<Reservation>,
    pub total: usize,
}

impl From<Vec<Reservation>> for ReservationListResponse {
    fn from(reservations: Vec<Reservation>) -> Self {
        let total = reservations.len();
        Self {
            reservations,
            total,
        }
    }
}
