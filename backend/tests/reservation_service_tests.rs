//! Tests for the reservation, property and guest services.

mod support;

use std::sync::Arc;

use rental_manager::api::{
    CreateGuestRequest, CreatePropertyRequest, CreateReservationRequest, UpdateReservationRequest,
};
use rental_manager::db::repository::ReservationRepository;
use rental_manager::models::{LocationId, NationalId, PropertyId, ReservationId};
use rental_manager::services::reservations::{self, UNAVAILABLE_MESSAGE};
use rental_manager::services::{guests, properties, ServiceError, NON_FIELD_ERRORS};
use support::{date, money, new_reservation, seeded, GUEST_CPF};

fn request(
    property: PropertyId,
    check_in: (u32, u32),
    check_out: (u32, u32),
) -> CreateReservationRequest {
    CreateReservationRequest {
        property,
        renting_price: money("420.00"),
        number_of_guests: 2,
        description: "Weekend".to_string(),
        check_in: date(2024, check_in.0, check_in.1),
        check_out: date(2024, check_out.0, check_out.1),
    }
}

fn field_errors(err: ServiceError) -> rental_manager::services::FieldErrors {
    match err {
        ServiceError::ValidationFailed(fields) => fields,
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_reservation_attaches_guest() {
    let s = seeded().await;
    let guest = NationalId::from(GUEST_CPF);
    let created =
        reservations::create_reservation(&s.repo, &guest, request(s.property.id, (1, 1), (1, 5)))
            .await
            .unwrap();

    assert_eq!(created.guest, guest);
    assert_eq!(created.renting_price, money("420.00"));
    assert_eq!(s.repo.reservation_count(), 1);
}

#[tokio::test]
async fn test_create_reservation_unknown_guest_is_not_found() {
    let s = seeded().await;
    let err = reservations::create_reservation(
        &s.repo,
        &NationalId::from("00000000000"),
        request(s.property.id, (1, 1), (1, 5)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Guest", .. }));
}

#[tokio::test]
async fn test_create_reservation_unknown_property_is_field_error() {
    let s = seeded().await;
    let err = reservations::create_reservation(
        &s.repo,
        &NationalId::from(GUEST_CPF),
        request(PropertyId(77), (1, 1), (1, 5)),
    )
    .await
    .unwrap_err();
    let fields = field_errors(err);
    assert_eq!(
        fields.get("property"),
        Some(&["Invalid pk \"77\" - object does not exist.".to_string()][..])
    );
}

#[tokio::test]
async fn test_create_reservation_validates_payload() {
    let s = seeded().await;
    let mut bad = request(s.property.id, (1, 10), (1, 5));
    bad.number_of_guests = 0;
    bad.renting_price = money("-5");

    let fields = field_errors(
        reservations::create_reservation(&s.repo, &NationalId::from(GUEST_CPF), bad)
            .await
            .unwrap_err(),
    );
    let names: Vec<&str> = fields.fields().collect();
    assert_eq!(names, vec!["check_out", "number_of_guests", "renting_price"]);
    assert_eq!(s.repo.reservation_count(), 0);
}

#[tokio::test]
async fn test_create_reservation_rejects_overlap() {
    let s = seeded().await;
    let guest = NationalId::from(GUEST_CPF);
    reservations::create_reservation(&s.repo, &guest, request(s.property.id, (1, 1), (1, 10)))
        .await
        .unwrap();

    let fields = field_errors(
        reservations::create_reservation(&s.repo, &guest, request(s.property.id, (1, 10), (1, 15)))
            .await
            .unwrap_err(),
    );
    assert_eq!(
        fields.get(NON_FIELD_ERRORS),
        Some(&[UNAVAILABLE_MESSAGE.to_string()][..])
    );
}

#[tokio::test]
async fn test_create_reservation_storage_fault_rejects() {
    let s = seeded().await;
    s.repo.set_healthy(false);
    let err = reservations::create_reservation(
        &s.repo,
        &NationalId::from(GUEST_CPF),
        request(s.property.id, (1, 1), (1, 2)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Unexpected(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_service_creations_exactly_one_succeeds() {
    let s = seeded().await;
    let repo = Arc::new(s.repo.clone());
    let property = s.property.id;

    let spawn = |check_in: (u32, u32)| {
        let repo = Arc::clone(&repo);
        tokio::spawn(async move {
            reservations::create_reservation(
                repo.as_ref(),
                &NationalId::from(GUEST_CPF),
                request(property, check_in, (3, 10)),
            )
            .await
        })
    };

    let (a, b) = tokio::join!(spawn((3, 1)), spawn((3, 5)));
    let results = [a.unwrap(), b.unwrap()];
    let successes = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1);
    for result in results.into_iter().filter_map(Result::err) {
        assert!(matches!(result, ServiceError::ValidationFailed(_)));
    }
    assert_eq!(repo.reservation_count(), 1);
}

#[tokio::test]
async fn test_update_reservation_overlapping_only_itself() {
    let s = seeded().await;
    let booked = s
        .repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 1, 1),
            date(2024, 1, 10),
        ))
        .await
        .unwrap();

    let updated = reservations::update_reservation(
        &s.repo,
        UpdateReservationRequest {
            id: booked.id,
            property: s.property.id,
            check_in: date(2024, 1, 2),
            check_out: date(2024, 1, 11),
            renting_price: None,
            number_of_guests: Some(3),
            description: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.id, booked.id);
    assert_eq!(updated.check_in, date(2024, 1, 2));
    assert_eq!(updated.number_of_guests, 3);
    assert_eq!(updated.renting_price, booked.renting_price);
}

#[tokio::test]
async fn test_update_reservation_conflicting_with_another() {
    let s = seeded().await;
    s.repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 1, 1),
            date(2024, 1, 10),
        ))
        .await
        .unwrap();
    let later = s
        .repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 2, 1),
            date(2024, 2, 3),
        ))
        .await
        .unwrap();

    let err = reservations::update_reservation(
        &s.repo,
        UpdateReservationRequest {
            id: later.id,
            property: s.property.id,
            check_in: date(2024, 1, 10),
            check_out: date(2024, 1, 12),
            renting_price: None,
            number_of_guests: None,
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(field_errors(err).get(NON_FIELD_ERRORS).is_some());
}

#[tokio::test]
async fn test_update_unknown_reservation_is_not_found() {
    let s = seeded().await;
    let err = reservations::update_reservation(
        &s.repo,
        UpdateReservationRequest {
            id: ReservationId(404),
            property: s.property.id,
            check_in: date(2024, 1, 1),
            check_out: date(2024, 1, 2),
            renting_price: None,
            number_of_guests: None,
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { entity: "Reservation", .. }));
}

#[tokio::test]
async fn test_create_property_checks_location() {
    let s = seeded().await;
    let payload = |location: LocationId| CreatePropertyRequest {
        name: "Casa de Praia".to_string(),
        description: String::new(),
        price: money("900.00"),
        max_guests: 6,
        bedrooms: 3,
        bathrooms: 2,
        area: None,
        location,
        availability: true,
    };

    let fields = field_errors(
        properties::create_property(&s.repo, &s.owner, payload(LocationId(55)))
            .await
            .unwrap_err(),
    );
    assert!(fields.get("location").is_some());

    let created = properties::create_property(&s.repo, &s.owner, payload(s.location.id))
        .await
        .unwrap();
    assert_eq!(created.owner, s.owner.id);

    let listed = properties::list_for_owner(&s.repo, &s.owner).await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn test_register_guest_twice_is_field_error() {
    let s = seeded().await;
    let payload = CreateGuestRequest {
        national_id: GUEST_CPF.to_string(),
        name: "Maria".to_string(),
        last_name: "Souza".to_string(),
        email: "maria.souza@example.com".to_string(),
        phone: "11 3333-4444".to_string(),
        birth_date: None,
        address: s.location.id,
    };
    let fields = field_errors(guests::create_guest(&s.repo, payload).await.unwrap_err());
    assert!(fields.get("national_id").is_some());
}
