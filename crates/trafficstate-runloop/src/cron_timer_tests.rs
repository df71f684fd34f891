use super::*;
use chrono::{FixedOffset, TimeZone, Timelike};

#[test]
fn test_normalize_five_field_expression() {
    assert_eq!(normalize_expression("*/5 * * * *"), "0 */5 * * * *");
    assert_eq!(normalize_expression("  0  7 * * MON-FRI "), "0 0 7 * * MON-FRI");
}

#[test]
fn test_normalize_keeps_six_and_seven_fields() {
    assert_eq!(normalize_expression("0 */5 * * * *"), "0 */5 * * * *");
    assert_eq!(normalize_expression("0 0 12 * * * 2030"), "0 0 12 * * * 2030");
}

#[test]
fn test_parse_schedule_errors() {
    let err = parse_schedule("every tuesday").unwrap_err();
    assert!(matches!(
        err,
        SchedulerError::InvalidSchedule { ref expression, .. } if expression == "every tuesday"
    ));

    assert!(matches!(
        parse_schedule("   ").unwrap_err(),
        SchedulerError::InvalidSchedule { .. }
    ));
}

#[test]
fn test_next_fire_after_respects_timezone() {
    // Daily at 07:00 wall-clock time.
    let schedule = parse_schedule("0 7 * * *").unwrap();
    let after = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

    let utc = next_fire_after(&schedule, ScheduleTimezone::Utc, after).unwrap();
    assert_eq!(utc, Utc.with_ymd_and_hms(2030, 1, 1, 7, 0, 0).unwrap());

    let plus_one = ScheduleTimezone::Fixed(FixedOffset::east_opt(3600).unwrap());
    let shifted = next_fire_after(&schedule, plus_one, after).unwrap();
    assert_eq!(shifted, Utc.with_ymd_and_hms(2030, 1, 1, 6, 0, 0).unwrap());
}

#[test]
fn test_next_fire_after_is_strictly_later() {
    let schedule = parse_schedule("0 * * * * *").unwrap();
    let on_point = Utc.with_ymd_and_hms(2030, 1, 1, 8, 30, 0).unwrap();

    let next = next_fire_after(&schedule, ScheduleTimezone::Utc, on_point).unwrap();
    assert_eq!(next.minute(), 31);
}

#[tokio::test]
async fn test_cron_timer_creation() {
    let timer = CronTimer::start("test-cron", "0 * * * * *", ScheduleTimezone::Utc, || {})
        .expect("Valid cron expression");

    assert_eq!(timer.id(), "test-cron");
    assert_eq!(timer.cron_expr(), "0 * * * * *");
    assert_eq!(timer.timezone(), ScheduleTimezone::Utc);
    assert!(timer.is_valid());
    assert_eq!(timer.fire_count(), 0);

    timer.cancel();
    timer.join().await;
}

#[tokio::test]
async fn test_cron_timer_invalid_expr() {
    let result = CronTimer::start("bad-cron", "invalid cron expression", ScheduleTimezone::Utc, || {});
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cron_timer_next_fire_time() {
    let timer = CronTimer::start("next-fire", "0 * * * * *", ScheduleTimezone::Utc, || {}).unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    let next = timer.next_fire_time();
    assert!(next.is_some());
    assert!(next.unwrap() > Utc::now());

    timer.cancel();
    assert!(timer.next_fire_time().is_none());
    timer.join().await;
}

#[tokio::test]
async fn test_cron_timer_fires_and_stops_after_cancel() {
    let fired = Arc::new(AtomicU64::new(0));
    let counter = fired.clone();
    let timer = CronTimer::start("every-second", "* * * * * *", ScheduleTimezone::Utc, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    tokio::time::sleep(Duration::from_millis(2_200)).await;
    let seen = fired.load(Ordering::SeqCst);
    assert!(seen >= 1, "expected at least one fire, saw {}", seen);
    assert!(timer.fire_count() >= seen);

    timer.cancel();
    timer.join().await;
    let after_cancel = fired.load(Ordering::SeqCst);

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(fired.load(Ordering::SeqCst), after_cancel);
    assert!(!timer.is_valid());
}

#[tokio::test]
async fn test_cron_timer_join_twice() {
    let timer = CronTimer::start("join-twice", "0 0 * * * *", ScheduleTimezone::Local, || {}).unwrap();
    timer.cancel();
    timer.join().await;
    timer.join().await;
}
