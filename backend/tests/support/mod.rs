//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Mutex;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use rental_manager::db::repository::{
    GuestRepository, LocationRepository, PropertyRepository, UserRepository,
};
use rental_manager::db::LocalRepository;
use rental_manager::models::{
    Guest, Location, NationalId, NewGuest, NewLocation, NewProperty, NewReservation, NewUser,
    Property, PropertyId, User, DEFAULT_COUNTRY,
};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process environment, since tests run in parallel.
///
/// `changes` is a list of `(key, value)` pairs: `Some(v)` sets the
/// variable, `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub const OWNER_TOKEN: &str = "owner-token";
pub const GUEST_CPF: &str = "12345678901";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn money(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

pub fn new_location(street: &str) -> NewLocation {
    NewLocation {
        postal_code: "01310100".to_string(),
        state: "SP".to_string(),
        city: "São Paulo".to_string(),
        neighborhood: "Bela Vista".to_string(),
        street: street.to_string(),
        number: "100".to_string(),
        complement: None,
        country: DEFAULT_COUNTRY.to_string(),
        coordinate: None,
    }
}

pub fn new_reservation(
    property: PropertyId,
    guest: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> NewReservation {
    NewReservation {
        property,
        renting_price: money("450.00"),
        number_of_guests: 2,
        description: String::new(),
        guest: NationalId::from(guest),
        check_in,
        check_out,
    }
}

/// A repository holding one owner, one location, one guest and one
/// property of that owner.
pub struct Seeded {
    pub repo: LocalRepository,
    pub owner: User,
    pub location: Location,
    pub guest: Guest,
    pub property: Property,
}

pub async fn seed_owner(repo: &LocalRepository, username: &str, token: &str) -> User {
    repo.create_user(&NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        api_token: token.to_string(),
    })
    .await
    .unwrap()
}

pub async fn seed_guest(repo: &LocalRepository, national_id: &str, location: &Location) -> Guest {
    repo.create_guest(&NewGuest {
        national_id: NationalId::from(national_id),
        name: "Maria".to_string(),
        last_name: "Silva".to_string(),
        email: "maria@example.com".to_string(),
        phone: "+55 11 99999-0000".to_string(),
        birth_date: Some(date(1990, 5, 17)),
        address: location.id,
    })
    .await
    .unwrap()
}

pub async fn seed_property(repo: &LocalRepository, owner: &User, location: &Location) -> Property {
    repo.create_property(&NewProperty {
        name: "Loft Paulista".to_string(),
        description: "Close to the subway".to_string(),
        owner: owner.id,
        price: money("350.00"),
        max_guests: 4,
        bedrooms: 2,
        bathrooms: 1,
        area: Some(money("54.5")),
        location: location.id,
        availability: true,
    })
    .await
    .unwrap()
}

pub async fn seeded() -> Seeded {
    let repo = LocalRepository::new();
    let owner = seed_owner(&repo, "owner", OWNER_TOKEN).await;
    let location = repo
        .create_location(&new_location("Avenida Paulista"))
        .await
        .unwrap();
    let guest = seed_guest(&repo, GUEST_CPF, &location).await;
    let property = seed_property(&repo, &owner, &location).await;
    Seeded {
        repo,
        owner,
        location,
        guest,
        property,
    }
}
