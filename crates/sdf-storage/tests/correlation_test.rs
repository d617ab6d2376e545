//! Parity/outcome correlation, parity impact, and the rendered report.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sdf_core::config::DoraConfig;
use sdf_storage::dora::{render_report, DoraReport, DoraStore};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 8, 30, 0).unwrap()
}

fn store() -> DoraStore {
    DoraStore::open_in_memory(&DoraConfig::default()).unwrap()
}

fn deploy(store: &DoraStore, days_ago: i64, parity: Option<f64>, success: bool) -> i64 {
    store
        .record_deployment_at(now() - Duration::days(days_ago), "v", "sha", parity, success, 60)
        .unwrap()
}

#[test]
fn fewer_than_ten_scored_deployments_is_insufficient() {
    let store = store();
    for day in 0..9 {
        deploy(&store, day, Some(0.9), true);
    }
    // Unscored deployments do not count toward the sample.
    for day in 0..5 {
        deploy(&store, day, None, false);
    }

    let analysis = store.analyze_correlation_at(now(), 90).unwrap();
    assert!(analysis.insufficient_data);
    assert_eq!(analysis.sample_count, 9);
    assert!(analysis.correlation_coefficient.is_none());
    assert!(analysis.insight.contains("at least 10"));

    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json.get("correlation_coefficient").is_none());
}

#[test]
fn aligned_parity_and_success_is_strong_positive() {
    let store = store();
    for day in 0..6 {
        deploy(&store, day, Some(0.95), true);
        deploy(&store, day, Some(0.40), false);
    }

    let analysis = store.analyze_correlation_at(now(), 90).unwrap();
    assert!(!analysis.insufficient_data);
    assert_eq!(analysis.high_parity_deployments, 6);
    assert_eq!(analysis.low_parity_deployments, 6);
    assert_eq!(analysis.high_parity_failure_rate, 0.0);
    assert_eq!(analysis.low_parity_failure_rate, 1.0);
    let r = analysis.correlation_coefficient.unwrap();
    assert!((r - 1.0).abs() < 1e-9);
    assert!(analysis.insight.starts_with("Strong positive correlation"));
}

#[test]
fn inverted_relationship_is_flagged() {
    let store = store();
    for day in 0..6 {
        deploy(&store, day, Some(0.95), false);
        deploy(&store, day, Some(0.40), true);
    }
    let analysis = store.analyze_correlation_at(now(), 90).unwrap();
    assert!(analysis.correlation_coefficient.unwrap() < -0.1);
    assert!(analysis.insight.starts_with("Negative correlation detected"));
}

#[test]
fn uniform_outcome_gives_zero_coefficient() {
    let store = store();
    for day in 0..12 {
        let parity = if day % 2 == 0 { 0.9 } else { 0.6 };
        deploy(&store, day, Some(parity), true);
    }
    let analysis = store.analyze_correlation_at(now(), 90).unwrap();
    assert_eq!(analysis.correlation_coefficient, Some(0.0));
    assert!(analysis.insight.starts_with("Weak correlation"));
}

#[test]
fn correlation_respects_window() {
    let store = store();
    for day in 100..120 {
        deploy(&store, day, Some(0.9), true);
    }
    let analysis = store.analyze_correlation_at(now(), 90).unwrap();
    assert!(analysis.insufficient_data);
    assert_eq!(analysis.sample_count, 0);
}

#[test]
fn configured_cutoff_and_sample_floor() {
    let config = DoraConfig {
        high_parity_cutoff: Some(0.5),
        min_correlation_samples: Some(4),
        ..DoraConfig::default()
    };
    let store = DoraStore::open_in_memory(&config).unwrap();
    for parity in [0.6, 0.7, 0.3, 0.2] {
        deploy(&store, 1, Some(parity), parity > 0.5);
    }
    let analysis = store.analyze_correlation_at(now(), 30).unwrap();
    assert!(!analysis.insufficient_data);
    assert_eq!(analysis.high_parity_deployments, 2);
    assert_eq!(analysis.high_parity_cutoff, 0.5);
}

#[test]
fn parity_impact_compares_cohorts_over_all_history() {
    let store = store();
    // 4 high (3 ok), 4 low (1 ok), one at the threshold counts as high.
    for (parity, success) in [
        (0.95, true),
        (0.90, true),
        (0.85, true),
        (0.99, false),
        (0.50, true),
        (0.40, false),
        (0.30, false),
        (0.20, false),
    ] {
        deploy(&store, 400, Some(parity), success);
    }
    deploy(&store, 1, None, false);

    let impact = store.get_parity_impact(0.85).unwrap();
    assert_eq!(impact.high_count, 4);
    assert_eq!(impact.low_count, 4);
    assert!((impact.high_success_rate - 0.75).abs() < 1e-9);
    assert!((impact.low_success_rate - 0.25).abs() < 1e-9);
    assert!((impact.improvement - 0.5).abs() < 1e-9);
    assert_eq!(
        impact.insight.as_deref(),
        Some("High parity (≥0.85) improves success rate by 50.0%")
    );
    assert!(impact.note.is_none());
}

#[test]
fn parity_impact_without_low_cohort_is_insufficient() {
    let store = store();
    deploy(&store, 1, Some(0.9), true);
    let impact = store.get_parity_impact(0.85).unwrap();
    assert_eq!(impact.note.as_deref(), Some("Insufficient data"));
    assert_eq!(impact.improvement, 0.0);
    assert_eq!(impact.high_success_rate, 1.0);
}

#[test]
fn report_block_without_correlation() {
    let store = store();
    deploy(&store, 1, Some(0.9), true);

    let report = DoraReport::collect_at(&store, now(), 30).unwrap();
    let text = render_report(&report);
    assert_eq!(
        text,
        "=== DORA Metrics (30 days) ===\n\
         Classification: MEDIUM\n\
         \n\
         1. Deployment Frequency: 0.03 per day\n\
         2. Lead Time for Changes: 60 minutes\n\
         3. Change Failure Rate: 0.0%\n\
         4. Mean Time to Recovery: 0 minutes\n"
    );
}

#[test]
fn report_block_with_correlation() {
    let store = store();
    for day in 0..6 {
        deploy(&store, day, Some(0.95), true);
        deploy(&store, day, Some(0.40), false);
    }

    let text = render_report(&DoraReport::collect_at(&store, now(), 30).unwrap());
    assert!(text.contains("=== Parity Correlation ===\n"));
    assert!(text.contains("High parity (>0.85): 6 deployments, 0.0% failures\n"));
    assert!(text.contains("Low parity (≤0.85): 6 deployments, 100.0% failures\n"));
    assert!(text.contains("Correlation coefficient: 1.000\n"));
    assert!(text.contains("Insight: Strong positive correlation"));
}

#[test]
fn report_correlates_over_configured_window() {
    let store = store();
    // 60 days old: outside the 30-day metrics window, inside the 90-day
    // correlation window.
    deploy(&store, 60, Some(0.9), false);
    deploy(&store, 1, Some(0.9), true);

    let report = DoraReport::collect_at(&store, now(), 30).unwrap();
    assert_eq!(report.metrics.period_days, 30);
    // Only the recent deployment counts toward frequency.
    assert!((report.metrics.deployment_frequency - 1.0 / 30.0).abs() < 1e-9);
    assert_eq!(report.correlation.sample_count, 2);

    let config = DoraConfig {
        correlation_window_days: Some(30),
        ..Default::default()
    };
    let narrow = DoraStore::open_in_memory(&config).unwrap();
    narrow
        .record_deployment_at(now() - Duration::days(60), "v", "sha", Some(0.9), false, 60)
        .unwrap();
    let report = DoraReport::collect_at(&narrow, now(), 30).unwrap();
    assert_eq!(report.correlation.sample_count, 0);
}
