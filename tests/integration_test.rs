use chrono::{Days, NaiveDate};
use production_forecast::data::RawRecord;
use production_forecast::export::{export_dataframe, merge_for_export};
use production_forecast::insights::Insight;
use production_forecast::pipeline::{run, DEFAULT_HORIZON_DAYS};
use production_forecast::series::DateFilter;
use production_forecast::trend::TrendDirection;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 400 daily records for category "A": quantity rising linearly from 100,
/// with a single spike to 5000 on day 200
fn spiked_production() -> Vec<RawRecord> {
    let start = date(2023, 1, 1);
    (0..400)
        .map(|i| RawRecord {
            category: "A".to_string(),
            date: start + Days::new(i as u64),
            quantity: if i == 200 { 5000 } else { 100 + i as i64 },
        })
        .collect()
}

fn all_time() -> DateFilter {
    DateFilter::Range {
        start: date(2023, 1, 1),
        end: date(2024, 12, 31),
    }
}

#[test]
fn test_end_to_end_scenario() {
    let records = spiked_production();
    let spike_date = date(2023, 1, 1) + Days::new(200);
    let last_historical = date(2023, 1, 1) + Days::new(399);

    let report = run(&records, "A", &all_time(), 30).unwrap();

    assert_eq!(report.daily.len(), 400);

    // The spike day is the only outlier
    assert_eq!(report.analysis.outliers, vec![spike_date]);

    // Linearly rising output over 13+ months classifies as growth
    assert_eq!(report.trend, TrendDirection::Growth);

    // Trend insight first, then outlier count, then variability
    assert_eq!(
        report.insights,
        vec![
            Insight::RecentGrowth,
            Insight::AtypicalDays(1),
            Insight::HighVariability,
        ]
    );

    // Exactly 30 future points beyond the last historical date, each with
    // an ordered uncertainty band
    let forecast = report.forecast.as_ref().unwrap();
    assert_eq!(forecast.len(), 430);

    let future = &forecast[400..];
    assert_eq!(future.len(), 30);
    assert_eq!(future.first().unwrap().date, last_historical + Days::new(1));
    assert_eq!(future.last().unwrap().date, last_historical + Days::new(30));
    for point in forecast {
        assert!(point.lower_bound <= point.point_estimate);
        assert!(point.point_estimate <= point.upper_bound);
    }
}

#[test]
fn test_export_merge_covers_the_forecast_timeline() {
    let records = spiked_production();
    let report = run(&records, "A", &all_time(), 30).unwrap();
    let forecast = report.forecast.as_ref().unwrap();

    let rows = merge_for_export(&report.daily, forecast);

    assert_eq!(rows.len(), forecast.len());

    // Historical dates carry the observed quantity, future dates do not
    assert_eq!(rows[0].produced_quantity, Some(100.0));
    assert_eq!(rows[200].produced_quantity, Some(5000.0));
    assert!(rows[400].produced_quantity.is_none());
    assert!(rows.last().unwrap().produced_quantity.is_none());

    let df = export_dataframe(&rows).unwrap();
    assert_eq!(df.shape(), (430, 5));
    assert_eq!(
        df.get_column_names(),
        &[
            "date",
            "produced_quantity",
            "forecast",
            "forecast_min",
            "forecast_max"
        ]
    );
}

#[test]
fn test_empty_filter_match_is_not_an_error() {
    let records = spiked_production();

    let filter = DateFilter::Calendar {
        years: vec![1990],
        months: vec![1],
    };
    let report = run(&records, "A", &filter, DEFAULT_HORIZON_DAYS).unwrap();

    assert!(report.daily.is_empty());
    assert!(report.monthly.is_empty());
    assert!(report.insights.is_empty());
    assert!(report.forecast.is_none());
    assert_eq!(report.trend, TrendDirection::Flat);
}

#[test]
fn test_unknown_category_yields_empty_report() {
    let records = spiked_production();

    let report = run(&records, "B", &all_time(), 180).unwrap();

    assert!(report.daily.is_empty());
    assert!(report.forecast.is_none());
}

#[test]
fn test_report_serializes_to_json() {
    let records = spiked_production();
    let report = run(&records, "A", &all_time(), 7).unwrap();

    let json = report.to_json().unwrap();

    assert!(json.contains("\"daily\""));
    assert!(json.contains("\"insights\""));
    assert!(json.contains("\"forecast\""));
}
