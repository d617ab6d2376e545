//! Parity/outcome correlation over (parity_score, success) samples.

use statrs::statistics::Statistics;

use super::types::CorrelationAnalysis;

/// Split at `cutoff` (strictly above is high), compute per-cohort failure
/// rates and the Pearson coefficient between parity and success as 0/1.
pub fn correlate(samples: &[(f64, bool)], cutoff: f64, min_samples: usize) -> CorrelationAnalysis {
    if samples.len() < min_samples {
        return CorrelationAnalysis {
            insufficient_data: true,
            sample_count: samples.len(),
            high_parity_cutoff: cutoff,
            high_parity_deployments: 0,
            low_parity_deployments: 0,
            high_parity_failure_rate: 0.0,
            low_parity_failure_rate: 0.0,
            correlation_coefficient: None,
            insight: format!(
                "Need at least {min_samples} deployments with parity scores for meaningful analysis"
            ),
        };
    }

    let (high, low): (Vec<_>, Vec<_>) = samples.iter().partition(|(score, _)| *score > cutoff);
    let r = pearson(samples);

    CorrelationAnalysis {
        insufficient_data: false,
        sample_count: samples.len(),
        high_parity_cutoff: cutoff,
        high_parity_deployments: high.len(),
        low_parity_deployments: low.len(),
        high_parity_failure_rate: failure_rate(&high),
        low_parity_failure_rate: failure_rate(&low),
        correlation_coefficient: Some(r),
        insight: insight_for(r),
    }
}

fn failure_rate(cohort: &[&(f64, bool)]) -> f64 {
    if cohort.is_empty() {
        return 0.0;
    }
    let failures = cohort.iter().filter(|(_, success)| !*success).count();
    failures as f64 / cohort.len() as f64
}

/// Pearson r. Zero variance on either side, or any undefined value, gives 0.
pub fn pearson(samples: &[(f64, bool)]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let parity: Vec<f64> = samples.iter().map(|(score, _)| *score).collect();
    let success: Vec<f64> = samples
        .iter()
        .map(|(_, ok)| if *ok { 1.0 } else { 0.0 })
        .collect();

    let denom = (&parity).std_dev() * (&success).std_dev();
    if !denom.is_finite() || denom == 0.0 {
        return 0.0;
    }
    let r = (&parity).covariance(&success) / denom;
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

pub fn insight_for(r: f64) -> String {
    if r > 0.3 {
        format!("Strong positive correlation: Higher parity → higher success rate ({r:.2})")
    } else if r > 0.1 {
        format!("Moderate correlation: Higher parity somewhat improves success ({r:.2})")
    } else if r <= -0.1 {
        format!("Negative correlation detected: Investigate parity calculation ({r:.2})")
    } else {
        format!("Weak correlation: Parity may not strongly predict success ({r:.2})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfectly_aligned_samples_give_one() {
        let samples = [(0.2, false), (0.2, false), (0.9, true), (0.9, true)];
        assert!((pearson(&samples) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn constant_outcome_gives_zero() {
        let samples = [(0.2, true), (0.5, true), (0.9, true)];
        assert_eq!(pearson(&samples), 0.0);
    }

    #[test]
    fn insight_bands() {
        assert!(insight_for(0.5).starts_with("Strong positive"));
        assert!(insight_for(0.2).starts_with("Moderate"));
        assert!(insight_for(0.3).starts_with("Moderate"));
        assert!(insight_for(0.0).starts_with("Weak"));
        assert!(insight_for(0.1).starts_with("Weak"));
        assert!(insight_for(-0.1).starts_with("Negative"));
    }

    #[test]
    fn below_minimum_is_insufficient() {
        let samples = vec![(0.9, true); 9];
        let analysis = correlate(&samples, 0.85, 10);
        assert!(analysis.insufficient_data);
        assert!(analysis.correlation_coefficient.is_none());
        assert_eq!(analysis.sample_count, 9);
    }

    #[test]
    fn cutoff_value_itself_is_low() {
        let mut samples = vec![(0.85, false); 5];
        samples.extend(vec![(0.9, true); 5]);
        let analysis = correlate(&samples, 0.85, 10);
        assert_eq!(analysis.low_parity_deployments, 5);
        assert_eq!(analysis.high_parity_deployments, 5);
        assert_eq!(analysis.low_parity_failure_rate, 1.0);
        assert_eq!(analysis.high_parity_failure_rate, 0.0);
    }
}
