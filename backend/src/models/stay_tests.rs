use super::Stay;
use chrono::NaiveDate;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stay(a: (i32, u32, u32), b: (i32, u32, u32)) -> Stay {
    Stay::new(day(a.0, a.1, a.2), day(b.0, b.1, b.2))
}

#[test]
fn test_overlap_when_check_in_equals_existing_check_out() {
    let existing = stay((2024, 1, 1), (2024, 1, 10));
    let requested = stay((2024, 1, 10), (2024, 1, 15));
    assert!(existing.overlaps(&requested));
    assert!(requested.overlaps(&existing));
}

#[test]
fn test_no_overlap_on_following_day() {
    let existing = stay((2024, 1, 1), (2024, 1, 10));
    let requested = stay((2024, 1, 11), (2024, 1, 15));
    assert!(!existing.overlaps(&requested));
    assert!(!requested.overlaps(&existing));
}

#[test]
fn test_overlap_when_contained() {
    let existing = stay((2024, 3, 1), (2024, 3, 31));
    let requested = stay((2024, 3, 10), (2024, 3, 12));
    assert!(existing.overlaps(&requested));
    assert!(requested.overlaps(&existing));
}

#[test]
fn test_no_overlap_when_entirely_before() {
    let existing = stay((2024, 5, 10), (2024, 5, 20));
    let requested = stay((2024, 5, 1), (2024, 5, 9));
    assert!(!existing.overlaps(&requested));
}

#[test]
fn test_same_day_stays_overlap() {
    let a = stay((2024, 6, 1), (2024, 6, 1));
    assert!(a.overlaps(&a));
}

#[test]
fn test_is_ordered() {
    assert!(stay((2024, 1, 1), (2024, 1, 1)).is_ordered());
    assert!(stay((2024, 1, 1), (2024, 1, 2)).is_ordered());
    assert!(!stay((2024, 1, 2), (2024, 1, 1)).is_ordered());
}

#[test]
fn test_display() {
    assert_eq!(
        stay((2024, 1, 1), (2024, 1, 10)).to_string(),
        "2024-01-01 - 2024-01-10"
    );
}
