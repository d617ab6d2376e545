//! DoraStore: recording, windowed Four Key Metrics, classification,
//! incident lookups and persistence across reopen.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use sdf_core::config::DoraConfig;
use sdf_core::errors::SdfErrorCode;
use sdf_storage::dora::{DoraStore, PerformanceClass};
use tempfile::TempDir;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn store() -> DoraStore {
    DoraStore::open_in_memory(&DoraConfig::default()).unwrap()
}

/// 20 successful deployments 36h apart ending at `now()`: even ones at parity
/// 0.90, odd ones at 0.60. The first five low-parity deployments each cause
/// an incident resolved 30 minutes later.
fn seed_thirty_day_window(store: &DoraStore) -> Vec<i64> {
    let mut ids = Vec::new();
    let mut incidents = 0;
    for i in 0..20 {
        let at = now() - Duration::hours(36 * i);
        let parity = if i % 2 == 0 { 0.90 } else { 0.60 };
        let id = store
            .record_deployment_at(at, &format!("v1.{i}"), "abc123", Some(parity), true, 120)
            .unwrap();
        if parity < 0.85 && incidents < 5 {
            store
                .record_incident(id, at + Duration::minutes(30), true)
                .unwrap();
            incidents += 1;
        }
        ids.push(id);
    }
    ids
}

#[test]
fn thirty_day_window_metrics() {
    let store = store();
    seed_thirty_day_window(&store);

    let metrics = store.calculate_dora_metrics_at(now(), 30).unwrap();
    assert!((metrics.deployment_frequency - 20.0 / 30.0).abs() < 1e-9);
    assert!((metrics.change_failure_rate - 0.25).abs() < 1e-9);
    assert!((metrics.mttr_minutes - 30.0).abs() < 1e-9);
    assert!((metrics.lead_time_minutes - 120.0).abs() < 1e-9);
    assert_eq!(metrics.classification, PerformanceClass::High);
    assert_eq!(metrics.period_days, 30);
}

#[test]
fn unknown_deployment_incident_is_not_found_and_writes_nothing() {
    let store = store();
    store
        .record_deployment_at(now(), "v1", "sha", Some(0.9), true, 10)
        .unwrap();

    let err = store.record_incident(999, now(), true).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.error_code(), "NOT_FOUND");
    assert_eq!(err.coded_string(), "[NOT_FOUND] deployment 999 not found");

    assert_eq!(store.incident_count().unwrap(), 0);
    assert_eq!(store.deployment_count().unwrap(), 1);
}

#[test]
fn empty_store_is_neutral_low() {
    let metrics = store().calculate_dora_metrics_at(now(), 30).unwrap();
    assert_eq!(metrics.deployment_frequency, 0.0);
    assert_eq!(metrics.lead_time_minutes, 0.0);
    assert_eq!(metrics.change_failure_rate, 0.0);
    assert_eq!(metrics.mttr_minutes, 0.0);
    assert_eq!(metrics.classification, PerformanceClass::Low);
}

#[test]
fn zero_day_window_is_neutral() {
    let store = store();
    seed_thirty_day_window(&store);
    let metrics = store.calculate_dora_metrics_at(now(), 0).unwrap();
    assert_eq!(metrics.deployment_frequency, 0.0);
    assert_eq!(metrics.classification, PerformanceClass::Low);
    assert_eq!(metrics.period_days, 0);
}

#[test]
fn deployments_outside_window_are_ignored() {
    let store = store();
    store
        .record_deployment_at(now() - Duration::days(40), "old", "sha", Some(0.2), true, 9_999)
        .unwrap();
    store
        .record_deployment_at(now() - Duration::days(1), "new", "sha", Some(0.9), true, 30)
        .unwrap();

    let metrics = store.calculate_dora_metrics_at(now(), 30).unwrap();
    assert!((metrics.deployment_frequency - 1.0 / 30.0).abs() < 1e-9);
    assert_eq!(metrics.lead_time_minutes, 30.0);
}

#[test]
fn window_start_is_exclusive() {
    let store = store();
    store
        .record_deployment_at(now() - Duration::days(30), "edge", "sha", None, true, 5)
        .unwrap();
    let metrics = store.calculate_dora_metrics_at(now(), 30).unwrap();
    assert_eq!(metrics.deployment_frequency, 0.0);
}

#[test]
fn failed_deployments_count_in_rate_but_not_frequency() {
    let store = store();
    let bad = store
        .record_deployment_at(now() - Duration::hours(2), "v2", "sha", Some(0.4), false, 50)
        .unwrap();
    store
        .record_deployment_at(now() - Duration::hours(1), "v3", "sha", Some(0.9), true, 10)
        .unwrap();
    store
        .record_incident(bad, now() - Duration::minutes(30), true)
        .unwrap();

    let metrics = store.calculate_dora_metrics_at(now(), 1).unwrap();
    assert_eq!(metrics.deployment_frequency, 1.0);
    assert_eq!(metrics.lead_time_minutes, 10.0);
    assert_eq!(metrics.change_failure_rate, 0.5);
    assert_eq!(metrics.mttr_minutes, 90.0);
}

#[test]
fn incidents_not_caused_by_deployment_are_not_failures() {
    let store = store();
    let id = store
        .record_deployment_at(now() - Duration::hours(3), "v1", "sha", Some(0.9), true, 10)
        .unwrap();
    store
        .record_incident(id, now() - Duration::hours(2), false)
        .unwrap();

    let metrics = store.calculate_dora_metrics_at(now(), 7).unwrap();
    assert_eq!(metrics.change_failure_rate, 0.0);
    assert_eq!(metrics.mttr_minutes, 60.0);
}

#[test]
fn several_incidents_on_one_deployment_count_once() {
    let store = store();
    let id = store
        .record_deployment_at(now() - Duration::hours(5), "v1", "sha", Some(0.7), true, 10)
        .unwrap();
    store
        .record_deployment_at(now() - Duration::hours(4), "v2", "sha", Some(0.9), true, 10)
        .unwrap();
    for minutes in [10, 20, 30] {
        store
            .record_incident(id, now() - Duration::hours(5) + Duration::minutes(minutes), true)
            .unwrap();
    }

    let metrics = store.calculate_dora_metrics_at(now(), 1).unwrap();
    assert_eq!(metrics.change_failure_rate, 0.5);
    assert_eq!(metrics.mttr_minutes, 20.0);
}

#[test]
fn elite_team() {
    let store = store();
    for i in 0..60 {
        store
            .record_deployment_at(now() - Duration::hours(i * 11), "v", "sha", Some(0.95), true, 30)
            .unwrap();
    }
    let metrics = store.calculate_dora_metrics_at(now(), 30).unwrap();
    assert!(metrics.deployment_frequency >= 1.0);
    assert_eq!(metrics.classification, PerformanceClass::Elite);
}

#[test]
fn custom_bands_change_classification() {
    let mut config = DoraConfig::default();
    config.classification.high_max_failure_rate = 0.20;
    let store = DoraStore::open_in_memory(&config).unwrap();
    seed_thirty_day_window(&store);

    let metrics = store.calculate_dora_metrics_at(now(), 30).unwrap();
    assert_eq!(metrics.classification, PerformanceClass::Medium);
}

#[test]
fn incident_mttr_and_lookup() {
    let store = store();
    let at = now() - Duration::days(2);
    let id = store
        .record_deployment_at(at, "v9", "deadbeef", Some(0.88), true, 45)
        .unwrap();
    let incident = store
        .record_incident(id, at + Duration::seconds(61 * 60 + 59), true)
        .unwrap();

    let deployment = store.get_deployment(id).unwrap();
    assert_eq!(deployment.version, "v9");
    assert_eq!(deployment.commit_sha, "deadbeef");
    assert_eq!(deployment.parity_score, Some(0.88));
    assert_eq!(deployment.timestamp, at);

    let incidents = store.list_incidents_for(id).unwrap();
    assert_eq!(incidents.len(), 1);
    assert_eq!(incidents[0].id, incident);
    assert_eq!(incidents[0].mttr_minutes, 61);
    assert_eq!(incidents[0].timestamp, at);
    assert!(incidents[0].caused_by_deployment);
}

#[test]
fn resolution_before_deployment_records_zero_mttr() {
    let store = store();
    let id = store
        .record_deployment_at(now(), "v1", "sha", None, true, 1)
        .unwrap();
    store
        .record_incident(id, now() - Duration::hours(1), true)
        .unwrap();
    assert_eq!(store.list_incidents_for(id).unwrap()[0].mttr_minutes, 0);
}

#[test]
fn get_unknown_deployment_is_not_found() {
    assert!(store().get_deployment(42).unwrap_err().is_not_found());
}

#[test]
fn ids_are_monotonic() {
    let store = store();
    let a = store.record_deployment("v1", "a", Some(0.5), true, 1).unwrap();
    let b = store.record_deployment("v2", "b", Some(0.5), true, 1).unwrap();
    let c = store.record_deployment("v3", "c", None, false, 1).unwrap();
    assert!(a < b && b < c);
}

#[test]
fn file_store_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metrics").join("dora.db");
    let config = DoraConfig::default();

    let first = {
        let store = DoraStore::open(&path, &config).unwrap();
        let id = store.record_deployment("v1", "sha1", Some(0.9), true, 12).unwrap();
        store.record_incident(id, Utc::now(), true).unwrap();
        assert_eq!(store.get_deployment(id).unwrap().version, "v1");
        id
    };

    let store = DoraStore::open(&path, &config).unwrap();
    assert_eq!(store.deployment_count().unwrap(), 1);
    assert_eq!(store.list_incidents_for(first).unwrap().len(), 1);
    let second = store.record_deployment("v2", "sha2", None, true, 3).unwrap();
    assert!(second > first);
}

#[test]
fn metrics_serialize_to_json() {
    let store = store();
    seed_thirty_day_window(&store);
    let metrics = store.calculate_dora_metrics_at(now(), 30).unwrap();
    let json = serde_json::to_value(&metrics).unwrap();
    assert_eq!(json["classification"], "HIGH");
    assert_eq!(json["period_days"], 30);
    assert_eq!(json["change_failure_rate"], 0.25);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn change_failure_rate_is_a_fraction(
        deployments in prop::collection::vec(
            (0i64..1_000, any::<bool>(), prop::option::of(any::<bool>())),
            1..25,
        )
    ) {
        let store = store();
        for (hours_ago, success, incident) in &deployments {
            let at = now() - Duration::hours(*hours_ago);
            let id = store
                .record_deployment_at(at, "v", "sha", Some(0.5), *success, 10)
                .unwrap();
            if let Some(caused) = incident {
                store.record_incident(id, at + Duration::minutes(5), *caused).unwrap();
            }
        }

        let metrics = store.calculate_dora_metrics_at(now(), 30).unwrap();
        prop_assert!((0.0..=1.0).contains(&metrics.change_failure_rate));
    }

    #[test]
    fn clean_successful_deployments_never_count_as_failures(count in 1usize..15) {
        let store = store();
        for i in 0..count {
            let at = now() - Duration::hours(i as i64);
            let id = store
                .record_deployment_at(at, "v", "sha", Some(0.9), true, 10)
                .unwrap();
            if i % 2 == 0 {
                store.record_incident(id, at + Duration::minutes(1), false).unwrap();
            }
        }
        let metrics = store.calculate_dora_metrics_at(now(), 2).unwrap();
        prop_assert_eq!(metrics.change_failure_rate, 0.0);
    }
}
