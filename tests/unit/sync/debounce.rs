use super::*;

const MS: Duration = Duration::from_millis(1);

#[test]
fn fires_once_after_the_quiet_period() {
    let t0 = Instant::now();
    let mut d = Debouncer::from_millis(500);
    assert_eq!(d.poll(t0), None);

    d.schedule("a", t0);
    assert!(d.is_pending());
    assert_eq!(d.poll(t0 + 499 * MS), None);
    assert_eq!(d.poll(t0 + 500 * MS), Some("a"));
    assert_eq!(d.poll(t0 + 900 * MS), None);
    assert!(!d.is_pending());
}

#[test]
fn only_the_last_value_survives_a_burst() {
    let t0 = Instant::now();
    let mut d = Debouncer::from_millis(500);
    d.schedule(String::from("x"), t0);
    d.schedule(String::from("xy"), t0 + 200 * MS);
    d.schedule(String::from("xyz"), t0 + 400 * MS);
    assert_eq!(d.poll(t0 + 600 * MS), None);
    assert_eq!(d.remaining(t0 + 600 * MS), Some(300 * MS));
    assert_eq!(d.poll(t0 + 900 * MS).as_deref(), Some("xyz"));
}

#[test]
fn cancel_drops_pending_work() {
    let t0 = Instant::now();
    let mut d = Debouncer::new(Duration::from_millis(10));
    assert_eq!(d.cancel(), None::<u8>);
    d.schedule(7u8, t0);
    assert_eq!(d.cancel(), Some(7));
    assert_eq!(d.poll(t0 + Duration::from_secs(1)), None);
    assert_eq!(d.remaining(t0), None);
}
