//! Rule-based insight composition

use crate::analysis::SeriesAnalysis;
use crate::trend::TrendDirection;
use serde::Serialize;
use std::fmt;

/// Volatility ratio above which the variability insight fires
pub const HIGH_VOLATILITY_THRESHOLD: f64 = 0.5;

/// Fixed catalog of automated insights
///
/// An empty insight list means no concerning pattern was found; the
/// presentation layer chooses its own fallback message for that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Insight {
    RecentGrowth,
    RecentFall,
    AtypicalDays(usize),
    HighVariability,
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Insight::RecentGrowth => {
                write!(f, "Recent growth in production detected in the last months.")
            }
            Insight::RecentFall => {
                write!(f, "Recent drop in production detected in the last months.")
            }
            Insight::AtypicalDays(num) => {
                write!(f, "{} atypical production days found (possible outliers).", num)
            }
            Insight::HighVariability => {
                write!(
                    f,
                    "High daily variability. Suggest to investigate fluctuation causes."
                )
            }
        }
    }
}

/// Combine trend and analysis signals into an ordered insight list
///
/// The trend insight (if any) always precedes the outlier and volatility
/// insights.
pub fn compose_insights(trend: TrendDirection, analysis: &SeriesAnalysis) -> Vec<Insight> {
    let mut insights = Vec::new();

    match trend {
        TrendDirection::Growth => insights.push(Insight::RecentGrowth),
        TrendDirection::Fall => insights.push(Insight::RecentFall),
        TrendDirection::Flat => {}
    }

    if !analysis.outliers.is_empty() {
        insights.push(Insight::AtypicalDays(analysis.outliers.len()));
    }

    if analysis.volatility_ratio > HIGH_VOLATILITY_THRESHOLD {
        insights.push(Insight::HighVariability);
    }

    insights
}
