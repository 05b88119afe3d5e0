//! Chart-ready view models.
//!
//! A view model is rebuilt from scratch for every dashboard pass and is only
//! ever read by the chart builders. Series are positional: `labels[i]` is
//! the caption of `data[i]`, and the order of the raw payload is kept.
mod analysis;
mod overview;

pub use analysis::{transform_analysis, AnalysisView};
pub use overview::{transform_overview, OverviewView};

use serde::Serialize;

/// Labelled values of one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl Series {
    pub fn new() -> Series {
        Series::default()
    }

    /// Series with fixed captions, e.g. the three project statuses.
    pub fn fixed(labels: &[&str], data: Vec<f64>) -> Series {
        Series {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            data,
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.labels.push(label.into());
        self.data.push(value);
    }

    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

/// Series whose `data` holds each entry's share of the total, in percent,
/// with the underlying amounts kept alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShareSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub amounts: Vec<f64>,
}

impl ShareSeries {
    pub fn from_amounts(labels: Vec<String>, amounts: Vec<f64>) -> ShareSeries {
        ShareSeries {
            data: percentages(&amounts),
            labels,
            amounts,
        }
    }
}

/// Share of each amount in the total, in percent. A zero total gives 0 for
/// every entry instead of NaN.
pub fn percentages(amounts: &[f64]) -> Vec<f64> {
    let total: f64 = amounts.iter().sum();
    amounts.iter().map(|amount| share(*amount, total)).collect()
}

/// `part / total * 100`, or 0 when `total` is 0.
pub fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        part / total * 100.0
    }
}

#[cfg(test)]
mod test {
    use super::{percentages, share, Series, ShareSeries};

    #[test]
    fn test_percentages_sum_to_hundred() {
        let cases: Vec<Vec<f64>> = vec![
            vec![1.0, 1.0, 1.0],
            vec![300.0, 100.0],
            vec![0.1, 0.2, 0.3, 1e9],
            vec![7.0],
            vec![0.0, 5.0, 0.0],
        ];
        for amounts in cases {
            let sum: f64 = percentages(&amounts).iter().sum();
            assert!((sum - 100.0).abs() < 1e-6, "{:?} sums to {}", amounts, sum);
        }
    }

    #[test]
    fn test_zero_total_is_zero_not_nan() {
        assert_eq!(percentages(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
        assert!(percentages(&[]).is_empty());
        assert_eq!(share(5.0, 0.0), 0.0);
    }

    #[test]
    fn test_share_series() {
        let s = ShareSeries::from_amounts(
            vec!["a".to_string(), "b".to_string()],
            vec![3.0, 1.0],
        );
        assert_eq!(s.data, vec![75.0, 25.0]);
        assert_eq!(s.amounts, vec![3.0, 1.0]);
    }

    #[test]
    fn test_series_push_keeps_pairs() {
        let mut s = Series::new();
        s.push("x", 1.0);
        s.push(String::from("y"), 2.5);
        assert_eq!(s.data.len(), 2);
        assert_eq!(s.labels, vec!["x", "y"]);
        assert_eq!(s.total(), 3.5);
    }
}
