//! HTTP handlers for the REST API.
//!
//! Handlers only extract the caller and payload, call the service layer,
//! and pick the success status. Every failure is an [`AppError`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::error;

use super::auth::AuthenticatedUser;
use super::dto::{HealthResponse, PropertyListResponse, ReservationListResponse};
use super::error::AppError;
use super::extract::JsonBody;
use super::state::AppState;
use crate::api::{
    CreateGuestRequest, CreateLocationRequest, CreatePropertyRequest, CreateReservationRequest,
    UpdateReservationRequest,
};
use crate::db::repository::RepositoryResult;
use crate::models::{Guest, Location, LocationId, NationalId, Property, Reservation};
use crate::services::{self, guests, locations, properties, reservations};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a record.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

fn created<T>(value: T) -> CreatedResult<T> {
    Ok((StatusCode::CREATED, Json(value)))
}

// =============================================================================
// Health Check
// =============================================================================

/// Repository status reported by `/health`. Fault details only go to the log.
fn database_status(outcome: RepositoryResult<bool>) -> &'static str {
    match outcome {
        Ok(true) => "connected",
        Ok(false) => "disconnected",
        Err(e) => {
            error!(error = %e, "Repository health check failed");
            "error"
        }
    }
}

/// GET /health
///
/// Liveness plus repository connectivity. Does not require authentication.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let outcome = services::health_check(state.repository.as_ref()).await;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status(outcome).to_string(),
    }))
}

// =============================================================================
// Properties
// =============================================================================

/// GET /properties
///
/// List the caller's properties.
pub async fn list_properties(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> HandlerResult<PropertyListResponse> {
    let properties = properties::list_for_owner(state.repository.as_ref(), &user).await?;
    Ok(Json(properties.into()))
}

/// POST /properties
///
/// Create a property owned by the caller.
pub async fn create_property(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    JsonBody(request): JsonBody<CreatePropertyRequest>,
) -> CreatedResult<Property> {
    let property =
        properties::create_property(state.repository.as_ref(), &user, request).await?;
    created(property)
}

// =============================================================================
// Reservations
// =============================================================================

/// GET /reservations/{guest_id}
///
/// List a guest's reservations ordered by check-in date.
pub async fn list_reservations(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    Path(guest_id): Path<String>,
) -> HandlerResult<ReservationListResponse> {
    let guest_id = NationalId::new(guest_id);
    let reservations = reservations::list_for_guest(state.repository.as_ref(), &guest_id).await?;
    Ok(Json(reservations.into()))
}

/// POST /reservations/{guest_id}
///
/// Book a property for the guest, rejecting stays that overlap an existing
/// reservation.
pub async fn create_reservation(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    Path(guest_id): Path<String>,
    JsonBody(request): JsonBody<CreateReservationRequest>,
) -> CreatedResult<Reservation> {
    let guest_id = NationalId::new(guest_id);
    let reservation =
        reservations::create_reservation(state.repository.as_ref(), &guest_id, request).await?;
    created(reservation)
}

/// PATCH /reservations
///
/// Update the reservation named by the payload's `id`.
pub async fn update_reservation(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    JsonBody(request): JsonBody<UpdateReservationRequest>,
) -> HandlerResult<Reservation> {
    let reservation = reservations::update_reservation(state.repository.as_ref(), request).await?;
    Ok(Json(reservation))
}

// =============================================================================
// Locations and guests
// =============================================================================

/// POST /locations
pub async fn create_location(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    JsonBody(request): JsonBody<CreateLocationRequest>,
) -> CreatedResult<Location> {
    created(locations::create_location(state.repository.as_ref(), request).await?)
}

/// GET /locations/{id}
pub async fn get_location(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    Path(location_id): Path<i64>,
) -> HandlerResult<Location> {
    let location =
        locations::get_location(state.repository.as_ref(), LocationId::new(location_id)).await?;
    Ok(Json(location))
}

/// POST /guests
pub async fn create_guest(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    JsonBody(request): JsonBody<CreateGuestRequest>,
) -> CreatedResult<Guest> {
    created(guests::create_guest(state.repository.as_ref(), request).await?)
}

/// GET /guests/{guest_id}
pub async fn get_guest(
    State(state): State<AppState>,
    _caller: AuthenticatedUser,
    Path(guest_id): Path<String>,
) -> HandlerResult<Guest> {
    let guest = guests::get_guest(state.repository.as_ref(), &NationalId::new(guest_id)).await?;
    Ok(Json(guest))
}
