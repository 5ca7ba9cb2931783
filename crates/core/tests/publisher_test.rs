use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use slotbook_core::{errors::ValidationError, publisher::SlotPublisher};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[test]
fn test_pending_stays_sorted_and_unique_for_any_sequence() {
    // Deterministic pseudo-random offsets with plenty of repeats.
    let offsets: Vec<i64> = (0..200u64)
        .map(|i| ((i * 7919 + 13) % 48) as i64)
        .collect();

    let mut publisher = SlotPublisher::new();
    let mut rejected = 0;
    for offset in &offsets {
        publisher
            .select_time(now() + Duration::minutes(15 * (offset + 1)), now())
            .unwrap();
        match publisher.confirm_time() {
            Ok(()) => {}
            Err(ValidationError::DuplicateTime) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }

        let pending = publisher.pending();
        assert!(pending.windows(2).all(|w| w[0] < w[1]));
    }

    assert_eq!(publisher.pending().len() + rejected, offsets.len());
}

#[test]
fn test_duplicate_confirm_keeps_length() {
    let time = now() + Duration::hours(2);
    let mut publisher = SlotPublisher::new();

    publisher.select_time(time, now()).unwrap();
    publisher.confirm_time().unwrap();
    publisher.select_time(time, now()).unwrap();

    assert_eq!(publisher.confirm_time(), Err(ValidationError::DuplicateTime));
    assert_eq!(publisher.pending().len(), 1);
    assert!(
        publisher
            .notice()
            .is_some_and(|n| n.text.contains("already been added"))
    );
}

#[test]
fn test_default_duration() {
    assert_eq!(SlotPublisher::new().duration(), 60);
}
