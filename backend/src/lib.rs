//! # Rental Manager Backend
//!
//! Property rental management: locations, guests, owners, properties and
//! reservations, with an availability check that refuses overlapping
//! bookings of the same property.
//!
//! ## Architecture
//!
//! - [`models`]: Domain records and typed identifiers
//! - [`api`]: Validated request payloads
//! - [`db`]: Repository traits and the in-memory / Postgres backends
//! - [`services`]: Validation, availability and use cases
//! - [`http`]: Axum router, token authentication and error mapping
//! - [`config`]: Server settings from the environment

// RepositoryError carries rich context for debugging.
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
