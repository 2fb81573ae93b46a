//! Additive trend + yearly seasonality model fitted by least squares
//!
//! The point estimate is `trend(t) + yearly(t)` where the trend is linear
//! in days since the first observation and the yearly component is a
//! Fourier series over a 365.25-day period. Coefficients come from a
//! normal-equations solve, so repeated fits on the same series are
//! bit-identical.

use crate::error::{EngineError, Result};
use crate::models::{ForecastModel, ForecastPoint, TrainedForecastModel};
use crate::series::DailySeries;
use chrono::NaiveDate;

const YEAR_DAYS: f64 = 365.25;

/// Seasonal-trend forecasting model
#[derive(Debug, Clone)]
pub struct SeasonalTrendModel {
    /// Name of the model
    name: String,
    /// Number of yearly Fourier pairs
    fourier_order: usize,
    /// Confidence level for the uncertainty band
    confidence_level: f64,
}

/// Trained seasonal-trend model
#[derive(Debug, Clone)]
pub struct TrainedSeasonalTrend {
    /// Name of the model
    name: String,
    /// Fitted coefficients: intercept, slope, then sin/cos pairs
    coefficients: Vec<f64>,
    /// Fourier pairs actually fitted (0 when history is too short)
    fourier_order: usize,
    /// First historical date, origin of the time axis
    origin: NaiveDate,
    /// Distinct historical dates, ascending
    history_dates: Vec<NaiveDate>,
    /// Residual sample standard deviation
    sigma: f64,
    /// Z-score matching the configured confidence level
    z_score: f64,
}

impl SeasonalTrendModel {
    /// Create a new seasonal-trend model
    pub fn new(fourier_order: usize, confidence_level: f64) -> Result<Self> {
        if fourier_order == 0 {
            return Err(EngineError::InvalidParameter(
                "Fourier order must be at least 1".to_string(),
            ));
        }
        if confidence_level <= 0.0 || confidence_level >= 1.0 {
            return Err(EngineError::InvalidParameter(
                "Confidence level must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Seasonal Trend (order={}, confidence={})",
                fourier_order, confidence_level
            ),
            fourier_order,
            confidence_level,
        })
    }
}

impl Default for SeasonalTrendModel {
    fn default() -> Self {
        Self {
            name: "Seasonal Trend (order=3, confidence=0.95)".to_string(),
            fourier_order: 3,
            confidence_level: 0.95,
        }
    }
}

impl ForecastModel for SeasonalTrendModel {
    type Trained = TrainedSeasonalTrend;

    fn train(&self, series: &DailySeries) -> Result<TrainedSeasonalTrend> {
        let mut history_dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        history_dates.sort_unstable();
        history_dates.dedup();
        if history_dates.len() < 2 {
            return Err(EngineError::InsufficientData);
        }

        let origin = history_dates[0];
        let t: Vec<f64> = series
            .iter()
            .map(|p| (p.date - origin).num_days() as f64)
            .collect();
        let y: Vec<f64> = series.iter().map(|p| p.quantity).collect();

        // Yearly seasonality needs enough observations for the coefficients
        // and at least a full year of span; shorter histories get a plain
        // linear trend
        let span_days =
            (history_dates[history_dates.len() - 1] - origin).num_days() as f64;
        let fourier_order =
            if series.len() >= 2 * self.fourier_order + 2 && span_days >= YEAR_DAYS {
                self.fourier_order
            } else {
                0
            };

        let design: Vec<Vec<f64>> = t.iter().map(|&ti| design_row(ti, fourier_order)).collect();
        let coefficients = solve_least_squares(&design, &y).ok_or_else(|| {
            EngineError::DegenerateFit("normal equations are singular".to_string())
        })?;
        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(EngineError::DegenerateFit(
                "fit produced non-finite coefficients".to_string(),
            ));
        }

        // Residual sample std-dev; zero when the model has no spare
        // degrees of freedom
        let dof = y.len().saturating_sub(coefficients.len());
        let sigma = if dof == 0 {
            0.0
        } else {
            let sse: f64 = design
                .iter()
                .zip(&y)
                .map(|(row, &yi)| (yi - dot(row, &coefficients)).powi(2))
                .sum();
            (sse / dof as f64).sqrt()
        };

        Ok(TrainedSeasonalTrend {
            name: self.name.clone(),
            coefficients,
            fourier_order,
            origin,
            history_dates,
            sigma,
            z_score: z_for_confidence(self.confidence_level),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedSeasonalTrend {
    fn forecast(&self, horizon_days: u32) -> Result<Vec<ForecastPoint>> {
        let margin = self.z_score * self.sigma;
        let mut points = Vec::with_capacity(self.history_dates.len() + horizon_days as usize);

        for &date in &self.history_dates {
            points.push(self.point_for(date, margin));
        }

        let mut date = *self
            .history_dates
            .last()
            .ok_or_else(|| EngineError::Data("trained model has no history".to_string()))?;
        for _ in 0..horizon_days {
            date = date
                .succ_opt()
                .ok_or_else(|| EngineError::Data("forecast date out of range".to_string()))?;
            points.push(self.point_for(date, margin));
        }

        Ok(points)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedSeasonalTrend {
    fn point_for(&self, date: NaiveDate, margin: f64) -> ForecastPoint {
        let t = (date - self.origin).num_days() as f64;
        let estimate = dot(&design_row(t, self.fourier_order), &self.coefficients);

        ForecastPoint {
            date,
            point_estimate: estimate,
            lower_bound: estimate - margin,
            upper_bound: estimate + margin,
        }
    }
}

/// Design matrix row: intercept, trend, then yearly Fourier pairs
fn design_row(t: f64, fourier_order: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(2 + 2 * fourier_order);
    row.push(1.0);
    row.push(t);
    for k in 1..=fourier_order {
        let angle = 2.0 * std::f64::consts::PI * k as f64 * t / YEAR_DAYS;
        row.push(angle.sin());
        row.push(angle.cos());
    }
    row
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Solve `X'X b = X'y` for the least-squares coefficients
fn solve_least_squares(design: &[Vec<f64>], y: &[f64]) -> Option<Vec<f64>> {
    let p = design.first()?.len();

    let mut xtx = vec![vec![0.0; p]; p];
    let mut xty = vec![0.0; p];
    for (row, &yi) in design.iter().zip(y) {
        for i in 0..p {
            xty[i] += row[i] * yi;
            for j in 0..p {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }

    solve_linear(xtx, xty)
}

/// Gaussian elimination with partial pivoting
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot_row][col].abs() < 1e-10 {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in row + 1..n {
            sum -= a[row][k] * x[k];
        }
        x[row] = sum / a[row][row];
    }

    Some(x)
}

/// Z-score for a two-sided confidence level
fn z_for_confidence(confidence_level: f64) -> f64 {
    match confidence_level {
        c if c >= 0.99 => 2.576,
        c if c >= 0.95 => 1.96,
        c if c >= 0.90 => 1.645,
        c if c >= 0.80 => 1.282,
        _ => 1.0,
    }
}
