//! Performance band classification. Bands are checked best first; the first
//! band whose every bound holds wins.

use sdf_core::config::ClassificationThresholds;

use super::types::PerformanceClass;

pub fn classify_performance(
    deploy_freq: f64,
    lead_time: f64,
    cfr: f64,
    mttr: f64,
    t: &ClassificationThresholds,
) -> PerformanceClass {
    if deploy_freq >= t.elite_min_frequency
        && lead_time <= t.elite_max_lead_time
        && cfr <= t.elite_max_failure_rate
        && mttr <= t.elite_max_mttr
    {
        PerformanceClass::Elite
    } else if deploy_freq >= t.high_min_frequency
        && lead_time <= t.high_max_lead_time
        && cfr <= t.high_max_failure_rate
        && mttr <= t.high_max_mttr
    {
        PerformanceClass::High
    } else if deploy_freq >= t.medium_min_frequency
        && lead_time <= t.medium_max_lead_time
        && cfr <= t.medium_max_failure_rate
    {
        PerformanceClass::Medium
    } else {
        PerformanceClass::Low
    }
}
