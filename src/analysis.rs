//! Outlier detection, volatility and summary statistics

use crate::series::DailySeries;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Tukey fence multiplier for outlier detection
pub const TUKEY_MULTIPLIER: f64 = 1.5;

/// Outlier and volatility summary of a daily series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesAnalysis {
    /// Dates whose quantity falls outside the Tukey fences
    pub outliers: Vec<NaiveDate>,
    /// Coefficient of variation (sample std-dev / mean), 0 when the mean is 0
    pub volatility_ratio: f64,
}

/// Per-year production summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySummary {
    pub year: i32,
    pub total: f64,
    pub daily_mean: f64,
    pub std_dev: f64,
    pub records: usize,
}

/// Flag statistical outliers and compute the volatility ratio
///
/// Outliers use the standard Tukey fences: Q1 and Q3 via
/// linear-interpolation percentiles, a point is atypical iff its quantity
/// is below `Q1 - 1.5*IQR` or above `Q3 + 1.5*IQR`.
pub fn analyze(series: &DailySeries) -> SeriesAnalysis {
    if series.is_empty() {
        return SeriesAnalysis {
            outliers: Vec::new(),
            volatility_ratio: 0.0,
        };
    }

    let values: Vec<f64> = series.iter().map(|p| p.quantity).collect();

    let mut sorted = values.clone();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let q1 = percentile(&sorted, 0.25);
    let q3 = percentile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - TUKEY_MULTIPLIER * iqr;
    let upper_fence = q3 + TUKEY_MULTIPLIER * iqr;

    let outliers = series
        .iter()
        .filter(|p| p.quantity < lower_fence || p.quantity > upper_fence)
        .map(|p| p.date)
        .collect();

    let mean = values.iter().mean();
    let volatility_ratio = if values.len() < 2 || mean == 0.0 {
        0.0
    } else {
        values.iter().std_dev() / mean
    };

    SeriesAnalysis {
        outliers,
        volatility_ratio,
    }
}

/// Summarize a daily series per calendar year
pub fn yearly_summary(series: &DailySeries) -> Vec<YearlySummary> {
    let mut by_year: BTreeMap<i32, Vec<f64>> = BTreeMap::new();

    for point in series {
        by_year
            .entry(point.date.year())
            .or_default()
            .push(point.quantity);
    }

    by_year
        .into_iter()
        .map(|(year, values)| {
            let records = values.len();
            let total: f64 = values.iter().sum();
            let daily_mean = total / records as f64;
            let std_dev = if records < 2 {
                0.0
            } else {
                values.iter().std_dev()
            };
            YearlySummary {
                year,
                total,
                daily_mean,
                std_dev,
                records,
            }
        })
        .collect()
}

/// Linear-interpolation percentile of pre-sorted values, q in [0, 1]
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = q * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
