//! Integration tests for LocalRepository: record lifecycle, cascades and
//! the atomic reservation check-and-insert.

mod support;

use std::sync::Arc;

use rental_manager::db::repository::{
    GuestRepository, HealthRepository, LocationRepository, PropertyRepository,
    ReservationRepository, UserRepository,
};
use rental_manager::db::LocalRepository;
use rental_manager::models::{
    LocationId, NationalId, NewGuest, PropertyId, ReservationId, ReservationUpdate, Stay, UserId,
};
use support::{
    date, money, new_location, new_reservation, seed_guest, seed_owner, seeded, GUEST_CPF,
};

#[tokio::test]
async fn test_ids_are_sequential_per_entity() {
    let repo = LocalRepository::new();
    let first = repo.create_location(&new_location("Rua A")).await.unwrap();
    let second = repo.create_location(&new_location("Rua B")).await.unwrap();
    assert_eq!(first.id, LocationId(1));
    assert_eq!(second.id, LocationId(2));

    let owner = seed_owner(&repo, "owner", "t1").await;
    assert_eq!(owner.id, UserId(1));
}

#[tokio::test]
async fn test_lookups_raise_not_found() {
    let repo = LocalRepository::new();
    assert!(repo.get_location(LocationId(9)).await.unwrap_err().is_not_found());
    assert!(repo
        .get_guest(&NationalId::from("000"))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(repo.get_user(UserId(9)).await.unwrap_err().is_not_found());
    assert!(repo.get_property(PropertyId(9)).await.unwrap_err().is_not_found());
    assert!(repo
        .get_reservation(ReservationId(9))
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_guest_national_id_is_unique() {
    let s = seeded().await;
    let duplicate = NewGuest {
        national_id: NationalId::from(GUEST_CPF),
        name: "Other".to_string(),
        last_name: "Person".to_string(),
        email: "other@example.com".to_string(),
        phone: "1".to_string(),
        birth_date: None,
        address: s.location.id,
    };
    assert!(s.repo.create_guest(&duplicate).await.unwrap_err().is_conflict());
}

#[tokio::test]
async fn test_guest_requires_existing_address() {
    let repo = LocalRepository::new();
    let err = repo
        .create_guest(&NewGuest {
            national_id: NationalId::from("1"),
            name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.com".to_string(),
            phone: "1".to_string(),
            birth_date: None,
            address: LocationId(42),
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_find_user_by_token() {
    let repo = LocalRepository::new();
    let ana = seed_owner(&repo, "ana", "token-ana").await;
    seed_owner(&repo, "bia", "token-bia").await;

    let found = repo.find_user_by_token("token-ana").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(ana.id));
    assert!(repo.find_user_by_token("token-zed").await.unwrap().is_none());
}

#[tokio::test]
async fn test_properties_are_scoped_to_owner() {
    let s = seeded().await;
    let other = seed_owner(&s.repo, "other", "other-token").await;
    support::seed_property(&s.repo, &other, &s.location).await;

    let mine = s.repo.list_properties_for_owner(s.owner.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, s.property.id);
    assert_eq!(s.repo.property_count(), 2);
}

#[tokio::test]
async fn test_create_reservation_rejects_overlap() {
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

    // Touching endpoints overlap.
    let err = s
        .repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 1, 10),
            date(2024, 1, 15),
        ))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    s.repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 1, 11),
            date(2024, 1, 15),
        ))
        .await
        .unwrap();
    assert_eq!(s.repo.reservation_count(), 2);
}

#[tokio::test]
async fn test_create_reservation_requires_property_and_guest() {
    let s = seeded().await;
    let err = s
        .repo
        .create_reservation(&new_reservation(
            PropertyId(99),
            GUEST_CPF,
            date(2024, 1, 1),
            date(2024, 1, 2),
        ))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.context().entity.as_deref(), Some("property"));

    let err = s
        .repo
        .create_reservation(&new_reservation(
            s.property.id,
            "999",
            date(2024, 1, 1),
            date(2024, 1, 2),
        ))
        .await
        .unwrap_err();
    assert_eq!(err.context().entity.as_deref(), Some("guest"));
}

#[tokio::test]
async fn test_list_reservations_for_guest_is_ordered_by_check_in() {
    let s = seeded().await;
    for (start, end) in [(20, 22), (1, 3), (10, 12)] {
        s.repo
            .create_reservation(&new_reservation(
                s.property.id,
                GUEST_CPF,
                date(2024, 3, start),
                date(2024, 3, end),
            ))
            .await
            .unwrap();
    }

    let check_ins: Vec<_> = s
        .repo
        .list_reservations_for_guest(&NationalId::from(GUEST_CPF))
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.check_in)
        .collect();
    assert_eq!(check_ins, vec![date(2024, 3, 1), date(2024, 3, 10), date(2024, 3, 20)]);

    let unknown = s
        .repo
        .list_reservations_for_guest(&NationalId::from("nobody"))
        .await
        .unwrap();
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn test_count_overlapping_with_exclusion() {
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
    let stay = Stay::new(date(2024, 1, 5), date(2024, 1, 12));

    assert_eq!(
        s.repo.count_overlapping_reservations(s.property.id, stay, None).await.unwrap(),
        1
    );
    assert_eq!(
        s.repo
            .count_overlapping_reservations(s.property.id, stay, Some(booked.id))
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn test_update_reservation_may_overlap_itself() {
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

    let update = ReservationUpdate {
        property: s.property.id,
        renting_price: money("500.00"),
        number_of_guests: 3,
        description: "Extended".to_string(),
        check_in: date(2024, 1, 5),
        check_out: date(2024, 1, 14),
    };
    let updated = s.repo.update_reservation(booked.id, &update).await.unwrap();
    assert_eq!(updated.check_out, date(2024, 1, 14));
    assert_eq!(updated.guest, booked.guest);
    assert_eq!(updated.created_at, booked.created_at);
    assert!(updated.updated_at >= booked.updated_at);
}

#[tokio::test]
async fn test_update_reservation_rejects_overlap_with_other() {
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
    let second = s
        .repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 2, 1),
            date(2024, 2, 5),
        ))
        .await
        .unwrap();

    let update = ReservationUpdate {
        property: s.property.id,
        renting_price: second.renting_price.clone(),
        number_of_guests: second.number_of_guests,
        description: second.description.clone(),
        check_in: date(2024, 1, 9),
        check_out: date(2024, 2, 5),
    };
    let err = s.repo.update_reservation(second.id, &update).await.unwrap_err();
    assert!(err.is_conflict());

    let unchanged = s.repo.get_reservation(second.id).await.unwrap();
    assert_eq!(unchanged.check_in, date(2024, 2, 1));
}

#[tokio::test]
async fn test_delete_location_cascades() {
    let s = seeded().await;
    s.repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 1, 1),
            date(2024, 1, 3),
        ))
        .await
        .unwrap();

    assert_eq!(s.repo.delete_location(s.location.id).await.unwrap(), 1);
    assert!(s.repo.get_guest(&s.guest.national_id).await.unwrap_err().is_not_found());
    assert!(s.repo.get_property(s.property.id).await.unwrap_err().is_not_found());
    assert_eq!(s.repo.reservation_count(), 0);
    assert_eq!(s.repo.delete_location(s.location.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_user_and_guest_cascade() {
    let s = seeded().await;
    let second_guest = seed_guest(&s.repo, "98765432100", &s.location).await;
    s.repo
        .create_reservation(&new_reservation(
            s.property.id,
            GUEST_CPF,
            date(2024, 1, 1),
            date(2024, 1, 3),
        ))
        .await
        .unwrap();
    s.repo
        .create_reservation(&new_reservation(
            s.property.id,
            second_guest.national_id.as_str(),
            date(2024, 1, 4),
            date(2024, 1, 6),
        ))
        .await
        .unwrap();

    assert_eq!(s.repo.delete_guest(&second_guest.national_id).await.unwrap(), 1);
    assert_eq!(s.repo.reservation_count(), 1);

    assert_eq!(s.repo.delete_user(s.owner.id).await.unwrap(), 1);
    assert_eq!(s.repo.property_count(), 0);
    assert_eq!(s.repo.reservation_count(), 0);
    // The guest does not depend on the owner.
    assert!(s.repo.get_guest(&s.guest.national_id).await.is_ok());
}

#[tokio::test]
async fn test_unhealthy_repository_fails_operations() {
    let s = seeded().await;
    s.repo.set_healthy(false);
    assert!(!s.repo.health_check().await.unwrap());

    let err = s.repo.get_property(s.property.id).await.unwrap_err();
    assert!(err.is_retryable());

    s.repo.set_healthy(true);
    assert!(s.repo.get_property(s.property.id).await.is_ok());
}

#[tokio::test]
async fn test_clear_keeps_health_flag() {
    let s = seeded().await;
    s.repo.set_healthy(false);
    s.repo.clear();
    assert!(!s.repo.health_check().await.unwrap());
    s.repo.set_healthy(true);
    assert_eq!(s.repo.property_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_overlapping_creations_exactly_one_wins() {
    let s = seeded().await;
    let repo = Arc::new(s.repo.clone());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = Arc::clone(&repo);
            let property = s.property.id;
            tokio::spawn(async move {
                repo.create_reservation(&new_reservation(
                    property,
                    GUEST_CPF,
                    date(2024, 6, 1 + i),
                    date(2024, 6, 10),
                ))
                .await
            })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(e) => assert!(e.is_conflict()),
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(repo.reservation_count(), 1);
}
