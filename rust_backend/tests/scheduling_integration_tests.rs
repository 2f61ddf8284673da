//! End-to-end tests of the admin and booking flows over the service layer.

#![cfg(feature = "file-repo")]

use std::sync::Arc;

use barber_booking::config::WeeklyScheduleConfig;
use barber_booking::core::domain::{
    AppointmentDetails, BookingStatus, RecurrenceRequest, RecurrenceUnit, SkipReason, SlotStatus,
    Weekday,
};
use barber_booking::db::{
    services, BookingRepository, EngineSettings, FileConfigStore, LocalRepository,
    RepositoryFactory, RepositoryType,
};
use barber_booking::services::{AvailabilityService, SeriesBookingService};
use barber_booking::time::{Clock, FixedClock};
use barber_booking::SchedulingError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(NaiveDateTime::new(d(2026, 10, 19), t(10, 0))))
}

fn customer() -> AppointmentDetails {
    AppointmentDetails {
        service: Some("Beard trim".to_string()),
        barber: Some("Alex".to_string()),
        customer: Some("Jordan".to_string()),
        notes: Some("first visit".to_string()),
    }
}

#[tokio::test]
async fn test_admin_edit_flows_into_availability() {
    let dir = TempDir::new().unwrap();
    let store = FileConfigStore::new(dir.path().join("schedule_config.json"));

    // Monday on a 30 minute grid without a break.
    let mut config = WeeklyScheduleConfig::default();
    if let Some(rule) = config.rule_for_mut(Weekday::Monday) {
        rule.slot_duration_minutes = 30;
    }
    config.break_time.enabled = false;

    let saved = services::save_schedule_config(&store, &config, clock().as_ref())
        .await
        .unwrap();
    assert!(saved.written);

    let bookings: Arc<dyn BookingRepository> = Arc::new(LocalRepository::new());
    let svc = AvailabilityService::from_store(&store, bookings, clock())
        .await
        .unwrap();

    let counts = svc.slot_counts();
    assert_eq!(counts[1], (Weekday::Monday, 24));

    let token = svc.begin(d(2026, 10, 26));
    let day = svc.day_availability(&token).await.unwrap().unwrap();
    assert_eq!(day.slots.len(), 24);
    assert_eq!(day.slots[6].time, t(12, 0));
}

#[tokio::test]
async fn test_invalid_edit_leaves_stored_config() {
    let dir = TempDir::new().unwrap();
    let store = FileConfigStore::new(dir.path().join("schedule_config.json"));
    services::save_schedule_config(&store, &WeeklyScheduleConfig::default(), clock().as_ref())
        .await
        .unwrap();

    let mut config = WeeklyScheduleConfig::default();
    config.break_time.start_time = t(14, 0);
    config.break_time.end_time = t(13, 0);

    let err = services::save_schedule_config(&store, &config, clock().as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulingError::InvalidConfig(_)));

    let stored = services::load_schedule_config(&store).await.unwrap();
    assert_eq!(stored.break_time.start_time, t(12, 0));
}

#[tokio::test]
async fn test_series_booking_then_availability() {
    let repos = RepositoryFactory::create(RepositoryType::Local, &EngineSettings::default())
        .unwrap();
    let config = services::load_schedule_config(repos.config_store.as_ref())
        .await
        .unwrap();

    let booking = SeriesBookingService::new(config.clone(), repos.bookings.clone(), clock());
    let request = RecurrenceRequest {
        base_date: d(2026, 10, 25),
        base_time: t(13, 0),
        interval_count: 1,
        unit: RecurrenceUnit::Week,
        occurrence_count: 4,
    };
    let first = booking.book_series(&request, &customer()).await.unwrap();
    assert_eq!(first.created.len(), 4);

    // Same slot again: every week is now taken.
    let second = booking.book_series(&request, &customer()).await.unwrap();
    assert!(second.created.is_empty());
    assert!(second
        .series
        .skipped()
        .all(|(_, reason)| reason == SkipReason::Booked));

    let svc = AvailabilityService::new(config, repos.bookings.clone(), clock());
    let token = svc.begin(d(2026, 11, 1));
    let day = svc.day_availability(&token).await.unwrap().unwrap();
    let slot = day.slots.iter().find(|s| s.time == t(13, 0)).unwrap();
    assert_eq!(slot.status, SlotStatus::Booked);

    // Cancelling frees the slot again.
    let (_, id) = &first.created[1];
    services::update_booking_status(repos.bookings.as_ref(), id, BookingStatus::Cancelled)
        .await
        .unwrap();
    let token = svc.begin(d(2026, 11, 1));
    let day = svc.day_availability(&token).await.unwrap().unwrap();
    let slot = day.slots.iter().find(|s| s.time == t(13, 0)).unwrap();
    assert_eq!(slot.status, SlotStatus::Available);
}

#[tokio::test]
async fn test_monthly_series_clamps_to_month_end() {
    let repo: Arc<dyn BookingRepository> = Arc::new(LocalRepository::new());
    let mut config = WeeklyScheduleConfig::default();
    for weekday in Weekday::ALL {
        if let Some(rule) = config.rule_for_mut(weekday) {
            rule.enabled = true;
        }
    }

    let svc = SeriesBookingService::new(config, repo, clock());
    let request = RecurrenceRequest {
        base_date: d(2026, 10, 31),
        base_time: t(13, 0),
        interval_count: 1,
        unit: RecurrenceUnit::Month,
        occurrence_count: 3,
    };
    let booked = svc.book_series(&request, &customer()).await.unwrap();
    let dates: Vec<_> = booked.series.iter().map(|o| o.date).collect();
    assert_eq!(dates, vec![d(2026, 10, 31), d(2026, 11, 30), d(2026, 12, 31)]);
    assert_eq!(booked.created.len(), 3);
}

#[tokio::test]
async fn test_fetch_failure_surfaces_to_booking_flow() {
    let local = Arc::new(LocalRepository::new());
    local.set_healthy(false);
    let svc = AvailabilityService::new(WeeklyScheduleConfig::default(), local.clone(), clock());

    let token = svc.begin(d(2026, 10, 25));
    let err = svc.day_availability(&token).await.unwrap_err();
    assert!(err.is_retryable());

    local.set_healthy(true);
    let day = svc.day_availability(&token).await.unwrap().unwrap();
    assert!(day.has_availability());
}
