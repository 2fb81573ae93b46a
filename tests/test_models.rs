use assert_approx_eq::assert_approx_eq;
use chrono::{Days, NaiveDate};
use production_forecast::models::seasonal_trend::SeasonalTrendModel;
use production_forecast::models::{forecast_daily, ForecastModel, TrainedForecastModel};
use production_forecast::series::{DailyPoint, DailySeries};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn linear_series(start: NaiveDate, days: usize, intercept: f64, slope: f64) -> DailySeries {
    (0..days)
        .map(|i| DailyPoint {
            date: start + Days::new(i as u64),
            quantity: intercept + slope * i as f64,
        })
        .collect()
}

#[test]
fn test_horizon_boundary_is_exact() {
    let series = linear_series(date(2024, 1, 1), 10, 100.0, 1.0);
    let last_historical = series.last().unwrap().date;

    let points = forecast_daily(&series, 30).unwrap().unwrap();

    // One fitted point per historical date plus exactly 30 future days
    assert_eq!(points.len(), 40);
    assert_eq!(points.last().unwrap().date, last_historical + Days::new(30));

    // Historical dates are all covered, in order
    for (point, historical) in points.iter().zip(&series) {
        assert_eq!(point.date, historical.date);
    }

    // The horizon is contiguous daily past the last historical date
    for pair in points[9..].windows(2) {
        assert_eq!(pair[1].date, pair[0].date + Days::new(1));
    }
}

#[test]
fn test_forecast_unavailable_below_two_distinct_dates() {
    let empty: DailySeries = Vec::new();
    assert!(forecast_daily(&empty, 180).unwrap().is_none());

    let single = vec![DailyPoint {
        date: date(2024, 1, 1),
        quantity: 42.0,
    }];
    assert!(forecast_daily(&single, 180).unwrap().is_none());
    assert!(forecast_daily(&single, 1).unwrap().is_none());
}

#[test]
fn test_two_points_are_enough() {
    let series = vec![
        DailyPoint {
            date: date(2024, 1, 1),
            quantity: 100.0,
        },
        DailyPoint {
            date: date(2024, 1, 5),
            quantity: 120.0,
        },
    ];

    let points = forecast_daily(&series, 10).unwrap().unwrap();

    assert_eq!(points.len(), 12);
    assert_eq!(points.last().unwrap().date, date(2024, 1, 15));
    // A two-point fit is an exact line through both observations
    assert_approx_eq!(points[0].point_estimate, 100.0, 1e-9);
    assert_approx_eq!(points[1].point_estimate, 120.0, 1e-9);
}

#[test]
fn test_exact_linear_data_recovers_the_line() {
    // y = 100 + 2t fits with zero residual, so bounds collapse onto the
    // point estimate
    let series = linear_series(date(2024, 1, 1), 10, 100.0, 2.0);

    let points = forecast_daily(&series, 5).unwrap().unwrap();

    for (i, point) in points.iter().enumerate() {
        assert_approx_eq!(point.point_estimate, 100.0 + 2.0 * i as f64, 1e-6);
        assert_approx_eq!(point.lower_bound, point.point_estimate, 1e-6);
        assert_approx_eq!(point.upper_bound, point.point_estimate, 1e-6);
    }
}

#[test]
fn test_bounds_bracket_the_estimate() {
    let series: DailySeries = (0..120)
        .map(|i| DailyPoint {
            date: date(2023, 1, 1) + Days::new(i as u64),
            quantity: 200.0 + (i % 7) as f64 * 13.0,
        })
        .collect();

    let points = forecast_daily(&series, 60).unwrap().unwrap();

    for point in &points {
        assert!(point.lower_bound <= point.point_estimate);
        assert!(point.point_estimate <= point.upper_bound);
    }
}

#[test]
fn test_constant_series_forecasts_the_constant() {
    // Zero variance is a valid fit here: flat trend, no crash
    let series = linear_series(date(2024, 1, 1), 30, 500.0, 0.0);

    let points = forecast_daily(&series, 15).unwrap().unwrap();

    for point in &points {
        assert_approx_eq!(point.point_estimate, 500.0, 1e-6);
    }
}

#[test]
fn test_forecast_is_deterministic() {
    let series: DailySeries = (0..400)
        .map(|i| DailyPoint {
            date: date(2023, 1, 1) + Days::new(i as u64),
            quantity: 300.0
                + 0.5 * i as f64
                + 40.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.25).sin(),
        })
        .collect();

    let first = forecast_daily(&series, 180).unwrap().unwrap();
    let second = forecast_daily(&series, 180).unwrap().unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.date, b.date);
        assert_eq!(a.point_estimate, b.point_estimate);
        assert_eq!(a.lower_bound, b.lower_bound);
        assert_eq!(a.upper_bound, b.upper_bound);
    }
}

#[test]
fn test_yearly_seasonality_is_recovered() {
    // Two full years of a clean yearly cycle: the fitted values should
    // track the signal closely
    let series: DailySeries = (0..730)
        .map(|i| DailyPoint {
            date: date(2022, 1, 1) + Days::new(i as u64),
            quantity: 1000.0
                + 100.0 * (2.0 * std::f64::consts::PI * i as f64 / 365.25).sin(),
        })
        .collect();

    let model = SeasonalTrendModel::default();
    let trained = model.train(&series).unwrap();
    let points = trained.forecast(0).unwrap();

    assert_eq!(points.len(), 730);
    for (point, observed) in points.iter().zip(&series) {
        assert_approx_eq!(point.point_estimate, observed.quantity, 5.0);
    }
}

#[test]
fn test_model_parameter_validation() {
    assert!(SeasonalTrendModel::new(0, 0.95).is_err());
    assert!(SeasonalTrendModel::new(3, 0.0).is_err());
    assert!(SeasonalTrendModel::new(3, 1.0).is_err());
    assert!(SeasonalTrendModel::new(3, 0.8).is_ok());
}
