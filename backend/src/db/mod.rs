//! Persistence layer for rental data.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  HTTP handlers / services                    │
//! └───────────────────┬──────────────────────────┘
//!                     │  Arc<dyn FullRepository>
//! ┌───────────────────▼──────────────────────────┐
//! │  Repository traits (repository/)             │
//! └───────────────────┬──────────────────────────┘
//!          ┌──────────┴──────────┐
//!   LocalRepository       PostgresRepository
//!    (in-memory)        (Diesel, postgres-repo)
//! ```
//!
//! The server picks a backend once at startup through [`RepositoryFactory`]
//! and hands the resulting `Arc<dyn FullRepository>` to the router state.

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

#[cfg(feature = "postgres-repo")]
pub use repositories::postgres::PostgresConfig;
#[cfg(not(feature = "postgres-repo"))]
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    _private: (),
}

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    ErrorContext, FullRepository, GuestRepository, HealthRepository, LocationRepository,
    PropertyRepository, RepositoryError, RepositoryResult, ReservationRepository, UserRepository,
};
