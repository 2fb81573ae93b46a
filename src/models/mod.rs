//! Forecasting models for daily production series

use crate::error::{EngineError, Result};
use crate::series::DailySeries;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;

pub mod seasonal_trend;

/// One forecasted day: point estimate with an uncertainty band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Emit one fitted point per historical date, then one point per
    /// calendar day up to exactly `horizon_days` past the last date
    fn forecast(&self, horizon_days: u32) -> Result<Vec<ForecastPoint>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a daily series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on a daily series
    fn train(&self, series: &DailySeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Forecast a daily series with the default seasonal-trend model
///
/// Returns `Ok(None)` ("forecast unavailable") when the series has fewer
/// than 2 distinct dates or the fit is degenerate; those conditions are
/// recovered here and never surface as errors.
pub fn forecast_daily(
    series: &DailySeries,
    horizon_days: u32,
) -> Result<Option<Vec<ForecastPoint>>> {
    let model = seasonal_trend::SeasonalTrendModel::default();

    match model
        .train(series)
        .and_then(|trained| trained.forecast(horizon_days))
    {
        Ok(points) => Ok(Some(points)),
        Err(EngineError::InsufficientData) | Err(EngineError::DegenerateFit(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
