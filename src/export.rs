//! Merge-by-date export table for the serialization collaborator

use crate::error::Result;
use crate::models::ForecastPoint;
use crate::series::DailySeries;
use chrono::NaiveDate;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// One export row: historical quantity joined with forecast fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    /// Observed quantity, `None` on forecast-only dates
    pub produced_quantity: Option<f64>,
    pub forecast: f64,
    pub forecast_min: f64,
    pub forecast_max: f64,
}

/// Outer join of history and forecast, keyed to the forecast timeline
///
/// Every forecast date yields a row; historical quantity is present where
/// a daily point exists for that date.
pub fn merge_for_export(daily: &DailySeries, forecast: &[ForecastPoint]) -> Vec<ExportRow> {
    let observed: BTreeMap<NaiveDate, f64> =
        daily.iter().map(|p| (p.date, p.quantity)).collect();

    forecast
        .iter()
        .map(|point| ExportRow {
            date: point.date,
            produced_quantity: observed.get(&point.date).copied(),
            forecast: point.point_estimate,
            forecast_min: point.lower_bound,
            forecast_max: point.upper_bound,
        })
        .collect()
}

/// Render export rows as a DataFrame with presentation labels
pub fn export_dataframe(rows: &[ExportRow]) -> Result<DataFrame> {
    let dates = Series::new(
        "date",
        rows.iter().map(|r| r.date.to_string()).collect::<Vec<String>>(),
    );
    let produced = Series::new(
        "produced_quantity",
        rows.iter()
            .map(|r| r.produced_quantity)
            .collect::<Vec<Option<f64>>>(),
    );
    let forecast = Series::new(
        "forecast",
        rows.iter().map(|r| r.forecast).collect::<Vec<f64>>(),
    );
    let forecast_min = Series::new(
        "forecast_min",
        rows.iter().map(|r| r.forecast_min).collect::<Vec<f64>>(),
    );
    let forecast_max = Series::new(
        "forecast_max",
        rows.iter().map(|r| r.forecast_max).collect::<Vec<f64>>(),
    );

    Ok(DataFrame::new(vec![
        dates,
        produced,
        forecast,
        forecast_min,
        forecast_max,
    ])?)
}
