//! Input boundary: tabular production data to clean typed records

use crate::error::{EngineError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Days between 0001-01-01 (CE) and the Unix epoch
const EPOCH_CE_DAYS: i32 = 719_163;

/// A single cleaned production record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    /// Product category, matched by exact equality downstream
    pub category: String,
    /// Calendar date of the record, no time-of-day component
    pub date: NaiveDate,
    /// Produced quantity, non-negative after cleaning
    pub quantity: i64,
}

/// Loader for event-level production data
///
/// Cleaning rules match the ingestion contract: column names are
/// normalized (trimmed, lowercased, spaces to underscores), rows with a
/// missing category, date or quantity are dropped, negative quantities
/// are dropped, and repeated (category, date) keys keep the first row.
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load production records from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRecord>> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Extract production records from an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Result<Vec<RawRecord>> {
        let df = Self::normalize_column_names(df)?;

        let category_column =
            Self::detect_column(&df, &["categoria", "category", "produto", "product"])?;
        let date_column = Self::detect_column(&df, &["data", "date", "timestamp", "dia"])?;
        let quantity_column = Self::detect_column(
            &df,
            &[
                "caixas_produzidas",
                "quantity",
                "production",
                "quantidade",
                "qty",
            ],
        )?;

        let categories = Self::column_as_strings(&df, &category_column)?;
        let dates = Self::column_as_dates(&df, &date_column)?;
        let quantities = Self::column_as_i64(&df, &quantity_column)?;

        let mut seen: HashSet<(String, NaiveDate)> = HashSet::new();
        let mut records = Vec::with_capacity(df.height());
        for ((category, date), quantity) in categories.into_iter().zip(dates).zip(quantities) {
            let (Some(category), Some(date), Some(quantity)) = (category, date, quantity) else {
                continue;
            };
            if quantity < 0 {
                continue;
            }
            if seen.insert((category.clone(), date)) {
                records.push(RawRecord {
                    category,
                    date,
                    quantity,
                });
            }
        }

        Ok(records)
    }

    /// Normalize column names: trim, lowercase, spaces to underscores
    fn normalize_column_names(mut df: DataFrame) -> Result<DataFrame> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        for name in names {
            let normalized = name.trim().to_lowercase().replace(' ', "_");
            if normalized != name {
                df.rename(&name, &normalized)?;
            }
        }

        Ok(df)
    }

    /// Find a column by exact name first, then by substring match
    fn detect_column(df: &DataFrame, candidates: &[&str]) -> Result<String> {
        let names = df.get_column_names();

        for &candidate in candidates {
            if let Some(&name) = names.iter().find(|&&name| name == candidate) {
                return Ok(name.to_string());
            }
        }

        for &candidate in candidates {
            if let Some(&name) = names.iter().find(|&&name| name.contains(candidate)) {
                return Ok(name.to_string());
            }
        }

        Err(EngineError::Data(format!(
            "No column matching one of {:?} found in data",
            candidates
        )))
    }

    /// Read a column as trimmed strings
    fn column_as_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
        let col = df.column(name)?;

        match col.dtype() {
            DataType::Utf8 => Ok(col
                .utf8()?
                .into_iter()
                .map(|opt| opt.map(|s| s.trim().to_string()))
                .collect()),
            _ => Err(EngineError::Data(format!(
                "Column '{}' cannot be read as text",
                name
            ))),
        }
    }

    /// Read a column as calendar dates
    fn column_as_dates(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let col = df.column(name)?;

        match col.dtype() {
            DataType::Utf8 => Ok(col
                .utf8()?
                .into_iter()
                .map(|opt| opt.and_then(parse_date))
                .collect()),
            DataType::Date => Ok(col
                .date()?
                .into_iter()
                .map(|opt| {
                    opt.and_then(|days| NaiveDate::from_num_days_from_ce_opt(days + EPOCH_CE_DAYS))
                })
                .collect()),
            DataType::Datetime(unit, _) => {
                let seconds_factor = match unit {
                    TimeUnit::Nanoseconds => 1_000_000_000,
                    TimeUnit::Microseconds => 1_000_000,
                    TimeUnit::Milliseconds => 1_000,
                };
                Ok(col
                    .datetime()?
                    .into_iter()
                    .map(|opt| {
                        opt.and_then(|ts| NaiveDateTime::from_timestamp_opt(ts / seconds_factor, 0))
                            .map(|dt| dt.date())
                    })
                    .collect())
            }
            _ => Err(EngineError::Data(format!(
                "Column '{}' cannot be read as dates",
                name
            ))),
        }
    }

    /// Read a column as integer quantities
    ///
    /// Text columns are coerced, with unparseable entries treated as 0.
    fn column_as_i64(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
        let col = df.column(name)?;

        match col.dtype() {
            DataType::Int64 => Ok(col.i64()?.into_iter().collect()),
            DataType::Int32 => Ok(col
                .i32()?
                .into_iter()
                .map(|opt| opt.map(i64::from))
                .collect()),
            DataType::UInt64 => Ok(col
                .u64()?
                .into_iter()
                .map(|opt| opt.map(|v| v as i64))
                .collect()),
            DataType::UInt32 => Ok(col
                .u32()?
                .into_iter()
                .map(|opt| opt.map(i64::from))
                .collect()),
            DataType::Float64 => Ok(col
                .f64()?
                .into_iter()
                .map(|opt| opt.map(|v| v as i64))
                .collect()),
            DataType::Float32 => Ok(col
                .f32()?
                .into_iter()
                .map(|opt| opt.map(|v| v as i64))
                .collect()),
            DataType::Utf8 => Ok(col
                .utf8()?
                .into_iter()
                .map(|opt| opt.map(|s| s.trim().parse::<i64>().unwrap_or(0)))
                .collect()),
            _ => Err(EngineError::Data(format!(
                "Column '{}' cannot be read as quantities",
                name
            ))),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}
