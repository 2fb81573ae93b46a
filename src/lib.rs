//! # Production Forecast
//!
//! A Rust library for aggregating event-level production records into
//! time series, forecasting future output and deriving automated insights.
//!
//! ## Features
//!
//! - Record cleaning and loading (CSV files or polars `DataFrame`s)
//! - Daily aggregation with category and date filtering
//! - Monthly resampling, percent change and trend classification
//! - Outlier detection (Tukey fences) and volatility analysis
//! - Additive trend + yearly seasonality forecasting with uncertainty bounds
//! - Rule-based insight composition
//! - Merge-by-date export table for spreadsheet writers
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use production_forecast::data::RawRecord;
//! use production_forecast::pipeline::run;
//! use production_forecast::series::DateFilter;
//!
//! # fn main() -> production_forecast::Result<()> {
//! let records = vec![
//!     RawRecord {
//!         category: "juice".to_string(),
//!         date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         quantity: 120,
//!     },
//!     RawRecord {
//!         category: "juice".to_string(),
//!         date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
//!         quantity: 140,
//!     },
//! ];
//!
//! let filter = DateFilter::Range {
//!     start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//! };
//!
//! let report = run(&records, "juice", &filter, 30)?;
//! assert_eq!(report.daily.len(), 2);
//! assert!(report.forecast.is_some());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod pipeline;
pub mod series;
pub mod trend;

// Re-export commonly used types
pub use crate::analysis::{analyze, yearly_summary, SeriesAnalysis, YearlySummary};
pub use crate::data::{DataLoader, RawRecord};
pub use crate::error::{EngineError, Result};
pub use crate::export::{export_dataframe, merge_for_export, ExportRow};
pub use crate::insights::{compose_insights, Insight};
pub use crate::models::{forecast_daily, ForecastModel, ForecastPoint, TrainedForecastModel};
pub use crate::pipeline::{run, AnalysisReport, DEFAULT_HORIZON_DAYS};
pub use crate::series::{
    aggregate, monthly_percent_change, resample_monthly, DailyPoint, DailySeries, DateFilter,
    MonthlyPoint, MonthlySeries,
};
pub use crate::trend::{compare_trend, TrendDirection};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
