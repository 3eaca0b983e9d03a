//! Sample statistics with Student's t confidence intervals.

use std::collections::BTreeMap;

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Mean, sample standard deviation and a two-tailed confidence interval
/// over one keyed sample (cluster number → value).
///
/// Fields stay `None` when the sample cannot support them: everything at
/// n == 0, all but the mean at n == 1. Absent statistics are reported as
/// absent rather than as zeros.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SampleStats {
    pub n: usize,
    pub confidence: f64,
    pub mean: Option<f64>,
    pub stdev: Option<f64>,
    pub ci: Option<f64>,
    pub upper_ci: Option<f64>,
    pub lower_ci: Option<f64>,
}

impl SampleStats {
    /// Stats for an empty sample.
    pub fn insufficient_sample(confidence: f64) -> Self {
        Self {
            n: 0,
            confidence,
            mean: None,
            stdev: None,
            ci: None,
            upper_ci: None,
            lower_ci: None,
        }
    }

    /// Whether the sample was too small for interval statistics.
    pub fn is_insufficient(&self) -> bool {
        self.n < 2
    }
}

/// Computes mean, sample stdev (n−1) and the two-tailed Student's t
/// confidence interval half-width `t(α/2, n−1) · s/√n` over the values.
/// All outputs are rounded to 4 decimals.
pub fn mean_std_ci(values: &BTreeMap<String, f64>, confidence: f64) -> SampleStats {
    let n = values.len();
    if n == 0 {
        return SampleStats::insufficient_sample(confidence);
    }

    let sum: f64 = values.values().sum();
    let mean = sum / n as f64;
    if n == 1 {
        return SampleStats {
            n,
            confidence,
            mean: Some(round4(mean)),
            stdev: None,
            ci: None,
            upper_ci: None,
            lower_ci: None,
        };
    }

    let ss: f64 = values.values().map(|v| (v - mean) * (v - mean)).sum();
    let stdev = (ss / (n as f64 - 1.0)).sqrt();

    let ci = t_critical(confidence, n as f64 - 1.0).map(|t| t * stdev / (n as f64).sqrt());
    SampleStats {
        n,
        confidence,
        mean: Some(round4(mean)),
        stdev: Some(round4(stdev)),
        ci: ci.map(round4),
        upper_ci: ci.map(|c| round4(mean + c)),
        lower_ci: ci.map(|c| round4(mean - c)),
    }
}

/// Two-tailed critical t value for the given confidence level and degrees
/// of freedom. Returns `None` when the distribution cannot be built
/// (df < 1 or a non-finite confidence slipping past config validation).
pub fn t_critical(confidence: f64, df: f64) -> Option<f64> {
    if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 || df < 1.0 {
        return None;
    }
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => {
            let p = 1.0 - (1.0 - confidence) / 2.0;
            Some(dist.inverse_cdf(p))
        }
        Err(_) => None,
    }
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub(crate) fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[(&str, f64)]) -> BTreeMap<String, f64> {
        values
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect()
    }

    #[test]
    fn empty_sample_has_no_stats() {
        let stats = mean_std_ci(&BTreeMap::new(), 0.95);
        assert_eq!(stats.n, 0);
        assert!(stats.is_insufficient());
        assert_eq!(stats.mean, None);
    }

    #[test]
    fn single_value_gives_mean_only() {
        let stats = mean_std_ci(&sample(&[("101", 625.0)]), 0.95);
        assert_eq!(stats.n, 1);
        assert!(stats.is_insufficient());
        assert_eq!(stats.mean, Some(625.0));
        assert_eq!(stats.stdev, None);
        assert_eq!(stats.ci, None);
    }

    #[test]
    fn two_values_match_t_distribution() {
        // mean 2, sample stdev sqrt(2), t(0.975, df=1) = 12.7062,
        // ci = 12.7062 * sqrt(2)/sqrt(2) = 12.7062
        let stats = mean_std_ci(&sample(&[("1", 1.0), ("2", 3.0)]), 0.95);
        assert_eq!(stats.n, 2);
        assert_eq!(stats.mean, Some(2.0));
        assert_eq!(stats.stdev, Some(round4(2.0_f64.sqrt())));
        let ci = stats.ci.unwrap();
        assert!((ci - 12.7062).abs() < 1e-3, "ci = {ci}");
        assert_eq!(stats.upper_ci, Some(round4(2.0 + ci)));
        assert_eq!(stats.lower_ci, Some(round4(2.0 - ci)));
    }

    #[test]
    fn t_critical_matches_reference_values() {
        // t(0.975, 7) from standard tables
        let t = t_critical(0.95, 7.0).unwrap();
        assert!((t - 2.364624).abs() < 1e-4, "t = {t}");
        // t(0.95, 10)
        let t = t_critical(0.90, 10.0).unwrap();
        assert!((t - 1.812461).abs() < 1e-4, "t = {t}");
    }

    #[test]
    fn t_critical_guards_degenerate_inputs() {
        assert_eq!(t_critical(0.95, 0.0), None);
        assert_eq!(t_critical(1.5, 5.0), None);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(round1(33.3333), 33.3);
        assert_eq!(round2(1.005_001), 1.01);
        assert_eq!(round4(0.123_456), 0.1235);
    }
}
