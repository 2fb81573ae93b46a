//! Stateless orchestration of the full analysis run
//!
//! Every call recomputes from scratch; filter selections and results are
//! explicit parameters and return values, never ambient state. Callers
//! that need memoization wrap [`run`] with their own cache.

use crate::analysis::{analyze, SeriesAnalysis};
use crate::data::RawRecord;
use crate::error::Result;
use crate::insights::{compose_insights, Insight};
use crate::models::{forecast_daily, ForecastPoint};
use crate::series::{aggregate, resample_monthly, DailySeries, DateFilter, MonthlySeries};
use crate::trend::{compare_trend, TrendDirection};
use serde::Serialize;

/// Default forecast horizon, roughly six months
pub const DEFAULT_HORIZON_DAYS: u32 = 180;

/// Full result of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub daily: DailySeries,
    pub monthly: MonthlySeries,
    pub analysis: SeriesAnalysis,
    pub trend: TrendDirection,
    pub insights: Vec<Insight>,
    /// `None` when no forecast is available for the filtered series
    pub forecast: Option<Vec<ForecastPoint>>,
}

impl AnalysisReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Aggregate, analyze, classify and forecast one category
///
/// An empty filter match is not an error: the report carries empty series,
/// no insights and no forecast.
pub fn run(
    records: &[RawRecord],
    category: &str,
    filter: &DateFilter,
    horizon_days: u32,
) -> Result<AnalysisReport> {
    let daily = aggregate(records, category, filter);
    let monthly = resample_monthly(&daily);
    let analysis = analyze(&daily);
    let trend = compare_trend(&monthly);
    let insights = compose_insights(trend, &analysis);
    let forecast = forecast_daily(&daily, horizon_days)?;

    Ok(AnalysisReport {
        daily,
        monthly,
        analysis,
        trend,
        insights,
        forecast,
    })
}
