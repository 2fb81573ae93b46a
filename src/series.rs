//! Daily and monthly series aggregation

use crate::data::RawRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// One day of aggregated production
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub quantity: f64,
}

/// Daily aggregate series, sorted ascending with one entry per date.
/// Days without data are absent, not zero-filled.
pub type DailySeries = Vec<DailyPoint>;

/// One calendar month of aggregated production
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub quantity: f64,
}

/// Monthly aggregate series, sorted ascending by (year, month)
pub type MonthlySeries = Vec<MonthlyPoint>;

/// Date predicate applied while aggregating
///
/// The two modes are mutually exclusive per call: an active range filter
/// replaces any year/month selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFilter {
    /// Inclusive [start, end] range
    Range { start: NaiveDate, end: NaiveDate },
    /// Set membership over selected years x selected months (1-12)
    Calendar { years: Vec<i32>, months: Vec<u32> },
}

impl DateFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            DateFilter::Range { start, end } => date >= *start && date <= *end,
            DateFilter::Calendar { years, months } => {
                years.contains(&date.year()) && months.contains(&date.month())
            }
        }
    }
}

/// Reduce event-level records to a daily series for one category
///
/// Records are kept when the category matches exactly and the date filter
/// holds; quantities are summed per calendar date. An empty match yields
/// an empty series, which downstream components treat as "no data".
pub fn aggregate(records: &[RawRecord], category: &str, filter: &DateFilter) -> DailySeries {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in records {
        if record.category == category && filter.matches(record.date) {
            *totals.entry(record.date).or_insert(0.0) += record.quantity as f64;
        }
    }

    totals
        .into_iter()
        .map(|(date, quantity)| DailyPoint { date, quantity })
        .collect()
}

/// Group a daily series by calendar month
pub fn resample_monthly(series: &DailySeries) -> MonthlySeries {
    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for point in series {
        *totals
            .entry((point.date.year(), point.date.month()))
            .or_insert(0.0) += point.quantity;
    }

    totals
        .into_iter()
        .map(|((year, month), quantity)| MonthlyPoint {
            year,
            month,
            quantity,
        })
        .collect()
}

/// Month-over-month percent change
///
/// The first entry is `None`; so is any entry following a zero month.
pub fn monthly_percent_change(series: &MonthlySeries) -> Vec<Option<f64>> {
    let mut changes = Vec::with_capacity(series.len());

    for (i, point) in series.iter().enumerate() {
        if i == 0 {
            changes.push(None);
            continue;
        }
        let previous = series[i - 1].quantity;
        if previous == 0.0 {
            changes.push(None);
        } else {
            changes.push(Some((point.quantity / previous - 1.0) * 100.0));
        }
    }

    changes
}
