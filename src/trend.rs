//! Monthly trend classification

use crate::series::MonthlySeries;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Months in the recent comparison window
pub const RECENT_WINDOW: usize = 3;

/// Margin required before a shift counts as growth or fall
pub const TREND_MARGIN: f64 = 0.1;

/// Minimum history (exclusive) before a trend signal is trusted
pub const MIN_HISTORY_MONTHS: usize = 6;

/// Direction of the recent production trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Growth,
    Fall,
    Flat,
}

/// Compare the last [`RECENT_WINDOW`] months against all prior months
///
/// Returns [`TrendDirection::Flat`] when the series has 6 or fewer months.
/// Growth requires the recent average to exceed the prior average by
/// strictly more than 10%; fall is the symmetric case.
pub fn compare_trend(monthly: &MonthlySeries) -> TrendDirection {
    if monthly.len() <= MIN_HISTORY_MONTHS {
        return TrendDirection::Flat;
    }

    let split = monthly.len() - RECENT_WINDOW;
    let recent_avg = monthly[split..].iter().map(|p| p.quantity).mean();
    let previous_avg = monthly[..split].iter().map(|p| p.quantity).mean();

    if recent_avg > previous_avg * (1.0 + TREND_MARGIN) {
        TrendDirection::Growth
    } else if recent_avg < previous_avg * (1.0 - TREND_MARGIN) {
        TrendDirection::Fall
    } else {
        TrendDirection::Flat
    }
}
