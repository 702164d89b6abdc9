//! Repository implementations.
//!
//! - `local`: in-memory maps behind a lock, for tests and local development
//! - `postgres`: PostgreSQL through Diesel (feature `postgres-repo`)
pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::{PostgresConfig, PostgresRepository};
