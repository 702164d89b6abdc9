//! Postgres repository implementation using Diesel.
//!
//! Implements the repository traits against the schema embedded under
//! `migrations/`. Cascading deletes are declared on the foreign keys, so the
//! delete operations here only remove the root row.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Per-property row locks around reservation writes
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::str::FromStr;
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    ErrorContext, GuestRepository, HealthRepository, LocationRepository, PropertyRepository,
    RepositoryError, RepositoryResult, ReservationRepository, UserRepository,
};
use crate::models::{
    Guest, Location, LocationId, NationalId, NewGuest, NewLocation, NewProperty, NewReservation,
    NewUser, Property, PropertyId, Reservation, ReservationId, ReservationUpdate, Stay, User,
    UserId,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self { pool, config })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation on a pooled connection, retrying
    /// retryable failures with exponential backoff.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        return Err(err);
                    }
                };

                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        tracing::debug!(attempt, error = %e, "retrying database operation");
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

fn not_found(operation: &str, entity: &str, id: impl ToString) -> RepositoryError {
    let id = id.to_string();
    RepositoryError::not_found_with_context(
        format!("{} {} not found", entity, id),
        ErrorContext::new(operation)
            .with_entity(entity)
            .with_entity_id(id),
    )
}

/// Lock the property row for the rest of the transaction so concurrent
/// bookings of the same property serialize on it.
fn lock_property(
    tx: &mut PgConnection,
    operation: &str,
    property_id: PropertyId,
) -> RepositoryResult<()> {
    properties::table
        .filter(properties::property_id.eq(property_id.0))
        .select(properties::property_id)
        .for_update()
        .first::<i64>(tx)
        .optional()
        .map_err(map_diesel_error)?
        .map(|_| ())
        .ok_or_else(|| not_found(operation, "property", property_id))
}

fn overlapping_ids(
    conn: &mut PgConnection,
    property_id: PropertyId,
    stay: Stay,
    exclude: Option<ReservationId>,
) -> RepositoryResult<Vec<i64>> {
    let mut query = reservations::table
        .select(reservations::reservation_id)
        .filter(reservations::property_id.eq(property_id.0))
        .filter(reservations::check_in.le(stay.check_out))
        .filter(reservations::check_out.ge(stay.check_in))
        .into_boxed();
    if let Some(excluded) = exclude {
        query = query.filter(reservations::reservation_id.ne(excluded.0));
    }
    query.load::<i64>(conn).map_err(map_diesel_error)
}

fn ensure_free(
    conn: &mut PgConnection,
    property_id: PropertyId,
    stay: Stay,
    exclude: Option<ReservationId>,
) -> RepositoryResult<()> {
    let clashes = overlapping_ids(conn, property_id, stay, exclude)?;
    if clashes.is_empty() {
        return Ok(());
    }
    Err(RepositoryError::conflict_with_context(
        format!("Property {} is already reserved for {}", property_id, stay),
        ErrorContext::new("reserve")
            .with_entity("property")
            .with_entity_id(property_id)
            .with_details(format!("conflicting_reservations={:?}", clashes)),
    ))
}

#[async_trait]
impl HealthRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl LocationRepository for PostgresRepository {
    async fn create_location(&self, location: &NewLocation) -> RepositoryResult<Location> {
        let row = NewLocationRow::from(location);
        self.with_conn(move |conn| {
            diesel::insert_into(locations::table)
                .values(&row)
                .returning(LocationRow::as_returning())
                .get_result::<LocationRow>(conn)
                .map(Location::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn get_location(&self, location_id: LocationId) -> RepositoryResult<Location> {
        self.with_conn(move |conn| {
            locations::table
                .filter(locations::location_id.eq(location_id.0))
                .select(LocationRow::as_select())
                .first::<LocationRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(Location::from)
                .ok_or_else(|| not_found("get_location", "location", location_id))
        })
        .await
    }

    async fn delete_location(&self, location_id: LocationId) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            diesel::delete(locations::table.filter(locations::location_id.eq(location_id.0)))
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl GuestRepository for PostgresRepository {
    async fn create_guest(&self, guest: &NewGuest) -> RepositoryResult<Guest> {
        let row = NewGuestRow::from(guest);
        self.with_conn(move |conn| {
            diesel::insert_into(guests::table)
                .values(&row)
                .returning(GuestRow::as_returning())
                .get_result::<GuestRow>(conn)
                .map(Guest::from)
                .map_err(|e| map_diesel_error(e).with_operation("create_guest"))
        })
        .await
    }

    async fn get_guest(&self, national_id: &NationalId) -> RepositoryResult<Guest> {
        let national_id = national_id.clone();
        self.with_conn(move |conn| {
            guests::table
                .filter(guests::national_id.eq(national_id.as_str()))
                .select(GuestRow::as_select())
                .first::<GuestRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(Guest::from)
                .ok_or_else(|| not_found("get_guest", "guest", &national_id))
        })
        .await
    }

    async fn delete_guest(&self, national_id: &NationalId) -> RepositoryResult<usize> {
        let national_id = national_id.clone();
        self.with_conn(move |conn| {
            diesel::delete(guests::table.filter(guests::national_id.eq(national_id.as_str())))
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        let row = NewUserRow::from(user);
        self.with_conn(move |conn| {
            diesel::insert_into(users::table)
                .values(&row)
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(conn)
                .map(User::from)
                .map_err(|e| map_diesel_error(e).with_operation("create_user"))
        })
        .await
    }

    async fn get_user(&self, user_id: UserId) -> RepositoryResult<User> {
        self.with_conn(move |conn| {
            users::table
                .filter(users::user_id.eq(user_id.0))
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(User::from)
                .ok_or_else(|| not_found("get_user", "user", user_id))
        })
        .await
    }

    async fn find_user_by_token(&self, api_token: &str) -> RepositoryResult<Option<User>> {
        let api_token = api_token.to_string();
        self.with_conn(move |conn| {
            users::table
                .filter(users::api_token.eq(&api_token))
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map(|row| row.map(User::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn delete_user(&self, user_id: UserId) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            diesel::delete(users::table.filter(users::user_id.eq(user_id.0)))
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl PropertyRepository for PostgresRepository {
    async fn create_property(&self, property: &NewProperty) -> RepositoryResult<Property> {
        let row = NewPropertyRow::from(property);
        self.with_conn(move |conn| {
            diesel::insert_into(properties::table)
                .values(&row)
                .returning(PropertyRow::as_returning())
                .get_result::<PropertyRow>(conn)
                .map(Property::from)
                .map_err(|e| map_diesel_error(e).with_operation("create_property"))
        })
        .await
    }

    async fn get_property(&self, property_id: PropertyId) -> RepositoryResult<Property> {
        self.with_conn(move |conn| {
            properties::table
                .filter(properties::property_id.eq(property_id.0))
                .select(PropertyRow::as_select())
                .first::<PropertyRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(Property::from)
                .ok_or_else(|| not_found("get_property", "property", property_id))
        })
        .await
    }

    async fn list_properties_for_owner(&self, owner: UserId) -> RepositoryResult<Vec<Property>> {
        self.with_conn(move |conn| {
            let rows = properties::table
                .filter(properties::owner_id.eq(owner.0))
                .select(PropertyRow::as_select())
                .order(properties::property_id.asc())
                .load::<PropertyRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Property::from).collect())
        })
        .await
    }

    async fn delete_property(&self, property_id: PropertyId) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            diesel::delete(properties::table.filter(properties::property_id.eq(property_id.0)))
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await
    }
}

#[async_trait]
impl ReservationRepository for PostgresRepository {
    async fn get_reservation(
        &self,
        reservation_id: ReservationId,
    ) -> RepositoryResult<Reservation> {
        self.with_conn(move |conn| {
            reservations::table
                .filter(reservations::reservation_id.eq(reservation_id.0))
                .select(ReservationRow::as_select())
                .first::<ReservationRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(Reservation::from)
                .ok_or_else(|| not_found("get_reservation", "reservation", reservation_id))
        })
        .await
    }

    async fn list_reservations_for_guest(
        &self,
        national_id: &NationalId,
    ) -> RepositoryResult<Vec<Reservation>> {
        let national_id = national_id.clone();
        self.with_conn(move |conn| {
            let rows = reservations::table
                .filter(reservations::guest_id.eq(national_id.as_str()))
                .select(ReservationRow::as_select())
                .order((reservations::check_in.asc(), reservations::reservation_id.asc()))
                .load::<ReservationRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Reservation::from).collect())
        })
        .await
    }

    async fn list_reservations_for_property(
        &self,
        property_id: PropertyId,
    ) -> RepositoryResult<Vec<Reservation>> {
        self.with_conn(move |conn| {
            let rows = reservations::table
                .filter(reservations::property_id.eq(property_id.0))
                .select(ReservationRow::as_select())
                .order((reservations::check_in.asc(), reservations::reservation_id.asc()))
                .load::<ReservationRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(Reservation::from).collect())
        })
        .await
    }

    async fn count_overlapping_reservations(
        &self,
        property_id: PropertyId,
        stay: Stay,
        exclude: Option<ReservationId>,
    ) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            overlapping_ids(conn, property_id, stay, exclude).map(|ids| ids.len())
        })
        .await
    }

    async fn create_reservation(
        &self,
        reservation: &NewReservation,
    ) -> RepositoryResult<Reservation> {
        let row = NewReservationRow::from(reservation);
        let property_id = reservation.property;
        let stay = reservation.stay();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                lock_property(tx, "create_reservation", property_id)?;
                ensure_free(tx, property_id, stay, None)?;

                diesel::insert_into(reservations::table)
                    .values(&row)
                    .returning(ReservationRow::as_returning())
                    .get_result::<ReservationRow>(tx)
                    .map(Reservation::from)
                    .map_err(|e| map_diesel_error(e).with_operation("create_reservation"))
            })
        })
        .await
    }

    async fn update_reservation(
        &self,
        reservation_id: ReservationId,
        update: &ReservationUpdate,
    ) -> RepositoryResult<Reservation> {
        let property_id = update.property;
        let stay = update.stay();
        let changes = ReservationChangeset::new(update, Utc::now());
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                lock_property(tx, "update_reservation", property_id)?;
                ensure_free(tx, property_id, stay, Some(reservation_id))?;

                diesel::update(
                    reservations::table.filter(reservations::reservation_id.eq(reservation_id.0)),
                )
                .set(&changes)
                .returning(ReservationRow::as_returning())
                .get_result::<ReservationRow>(tx)
                .optional()
                .map_err(map_diesel_error)?
                .map(Reservation::from)
                .ok_or_else(|| not_found("update_reservation", "reservation", reservation_id))
            })
        })
        .await
    }

    async fn delete_reservation(&self, reservation_id: ReservationId) -> RepositoryResult<usize> {
        self.with_conn(move |conn| {
            diesel::delete(
                reservations::table.filter(reservations::reservation_id.eq(reservation_id.0)),
            )
            .execute(conn)
            .map_err(map_diesel_error)
        })
        .await
    }
}
