//! Service layer for business logic.
//!
//! Services sit between the HTTP handlers and the repository traits. Each
//! function is generic over the narrowest set of repository traits it
//! needs, so tests can drive them with [`crate::db::LocalRepository`]
//! directly and handlers pass `state.repository.as_ref()`.
//!
//! - [`availability`]: the overlap-based availability check
//! - [`reservations`]: list/create/update reservations
//! - [`properties`]: list/create the caller's properties
//! - [`locations`], [`guests`]: record registration and lookup
//! - [`users`]: caller resolution and the bootstrap owner

pub mod availability;
pub mod error;
pub mod guests;
pub mod locations;
pub mod properties;
pub mod reservations;
pub mod users;
pub mod validation;

pub use availability::{is_available, is_available_excluding};
pub use error::{ServiceError, ServiceResult};
pub use validation::{FieldErrors, NON_FIELD_ERRORS};

use crate::db::repository::{HealthRepository, RepositoryResult};

/// Check repository connectivity.
pub async fn health_check<R: HealthRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}
