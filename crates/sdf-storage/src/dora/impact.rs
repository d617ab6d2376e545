//! Success-rate difference between parity cohorts.

use crate::queries::deployments::CohortOutcome;

use super::types::ParityImpact;

pub fn parity_impact(min_parity: f64, high: CohortOutcome, low: CohortOutcome) -> ParityImpact {
    let high_success_rate = high.success_rate.unwrap_or(0.0);
    let low_success_rate = low.success_rate.unwrap_or(0.0);

    if high.count == 0 || low.count == 0 {
        return ParityImpact {
            min_parity,
            high_count: high.count,
            low_count: low.count,
            high_success_rate,
            low_success_rate,
            improvement: 0.0,
            insight: None,
            note: Some("Insufficient data".to_string()),
        };
    }

    let improvement = high_success_rate - low_success_rate;
    ParityImpact {
        min_parity,
        high_count: high.count,
        low_count: low.count,
        high_success_rate,
        low_success_rate,
        improvement,
        insight: Some(format!(
            "High parity (≥{min_parity}) improves success rate by {:.1}%",
            improvement * 100.0
        )),
        note: None,
    }
}
