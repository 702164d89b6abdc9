//! Repository trait definitions for database operations.
//!
//! Persistence is split into one focused trait per record type so services
//! can state exactly what they touch.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`location`]: Postal addresses
//! - [`guest`]: Guests keyed by national id
//! - [`user`]: Property owners and their API tokens
//! - [`property`]: Rentable units
//! - [`reservation`]: Bookings and the overlap query behind availability
//!
//! # Convenience Trait Bound
//!
//! For code that needs every capability (the HTTP state, the factory), use
//! the [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn seed<R: FullRepository + ?Sized>(repo: &R, user: NewUser) -> RepositoryResult<()> {
//!     let user = repo.create_user(&user).await?;
//!     let props = repo.list_properties_for_owner(user.id).await?;
//!     assert!(props.is_empty());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod guest;
pub mod location;
pub mod property;
pub mod reservation;
pub mod user;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use guest::GuestRepository;
pub use location::LocationRepository;
pub use property::PropertyRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use async_trait::async_trait;

/// Connectivity check shared by every backend.
#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Check if the database connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;
}

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements every
/// repository trait.
pub trait FullRepository:
    HealthRepository
    + LocationRepository
    + GuestRepository
    + UserRepository
    + PropertyRepository
    + ReservationRepository
{
}

impl<T> FullRepository for T where
    T: HealthRepository
        + LocationRepository
        + GuestRepository
        + UserRepository
        + PropertyRepository
        + ReservationRepository
{
}
