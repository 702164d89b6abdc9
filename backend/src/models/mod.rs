//! Domain records for the rental backend.
//!
//! These are plain data types shared by the repository, service and HTTP
//! layers. Identifiers are newtypes so a `PropertyId` can never be passed
//! where a `ReservationId` is expected.

pub mod macros;

pub mod guest;
pub mod location;
pub mod property;
pub mod reservation;
pub mod stay;
pub mod user;

pub use guest::*;
pub use location::*;
pub use property::*;
pub use reservation::*;
pub use stay::*;
pub use user::*;
