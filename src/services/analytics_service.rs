use std::collections::HashSet;

use chrono::NaiveDate;

use crate::errors::AnalyticsError;
use crate::models::{
    DifferenceSeries, IndexedPoint, NormalizedSeries, PricePoint, PriceSeries, SeriesMetrics,
};

/// Index value every series is rebased to.
pub const BASE_INDEX: f64 = 100.0;

/// Calendar-day year length used for CAGR, matching the 5 * 365 day
/// comparison window. Trading-day counts are deliberately not used.
const DAYS_PER_YEAR: f64 = 365.0;

/// Shortest span, in years, for which a CAGR is considered meaningful.
/// Anything under one calendar day would blow up the exponent.
const MIN_CAGR_YEARS: f64 = 1.0 / DAYS_PER_YEAR;

/// Rebase a series so its first observation equals exactly [`BASE_INDEX`].
///
/// `out[i] = s[i] / s[0] * 100`, same date index as the input.
pub fn normalize(series: &PriceSeries) -> Result<NormalizedSeries, AnalyticsError> {
    let base = series.first().close;
    if base <= 0.0 {
        return Err(AnalyticsError::InvalidInput(format!(
            "cannot normalize {}: first price is {}",
            series.ticker(),
            base
        )));
    }

    let points = series
        .points()
        .iter()
        .map(|p| IndexedPoint {
            date: p.date,
            value: p.close / base * BASE_INDEX,
        })
        .collect();

    Ok(NormalizedSeries {
        ticker: series.ticker().to_string(),
        points,
    })
}

/// Compound annual growth rate over the span of `series`.
///
/// Elapsed time is `(last date - first date) in days / 365`; the result is
/// `(last / first)^(1 / years) - 1`, an unrounded ratio.
pub fn cagr(series: &PriceSeries) -> Result<f64, AnalyticsError> {
    if series.len() < 2 {
        return Err(AnalyticsError::InsufficientData(format!(
            "need at least two points to compute CAGR for {}",
            series.ticker()
        )));
    }

    let first = series.first();
    let last = series.last();

    if first.close <= 0.0 {
        return Err(AnalyticsError::InvalidInput(format!(
            "cannot compute CAGR for {}: first price is {}",
            series.ticker(),
            first.close
        )));
    }

    let years = (last.date - first.date).num_days() as f64 / DAYS_PER_YEAR;
    if years < MIN_CAGR_YEARS {
        return Err(AnalyticsError::InsufficientData(format!(
            "span of {} is too short ({} to {}) to compute CAGR",
            series.ticker(),
            first.date,
            last.date
        )));
    }

    Ok((last.close / first.close).powf(1.0 / years) - 1.0)
}

/// Worst peak-to-trough decline across the series, as a negative fraction.
///
/// The running peak at index i includes price[i] itself, so a new all-time
/// high has zero drawdown. Flat, strictly increasing and single-point
/// series all yield 0.
pub fn max_drawdown(series: &PriceSeries) -> f64 {
    let mut peak = series.first().close;
    let mut max_dd: f64 = 0.0;

    for p in series.points() {
        if p.close > peak {
            peak = p.close;
        }
        if peak > 0.0 {
            let dd = (p.close - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

/// Pointwise `a - b` over a shared date index.
///
/// Both inputs must have identical date indices; any length or date
/// mismatch fails with `MisalignedSeries` rather than truncating silently.
/// Callers are expected to run the series through [`align`] first.
pub fn difference(
    a: &NormalizedSeries,
    b: &NormalizedSeries,
) -> Result<DifferenceSeries, AnalyticsError> {
    if a.points.len() != b.points.len() {
        return Err(AnalyticsError::MisalignedSeries(format!(
            "{} has {} points but {} has {}",
            a.ticker,
            a.points.len(),
            b.ticker,
            b.points.len()
        )));
    }

    let mut points = Vec::with_capacity(a.points.len());
    for (pa, pb) in a.points.iter().zip(b.points.iter()) {
        if pa.date != pb.date {
            return Err(AnalyticsError::MisalignedSeries(format!(
                "{} has {} where {} has {}",
                a.ticker, pa.date, b.ticker, pb.date
            )));
        }
        points.push(IndexedPoint {
            date: pa.date,
            value: pa.value - pb.value,
        });
    }

    Ok(DifferenceSeries { points })
}

/// Restrict two price series to the dates present in both.
///
/// Independently fetched tickers can cover different ranges (one newly
/// listed, one with gaps); the comparison is defined over the intersection
/// of their date indices. Zero overlap fails with `MisalignedSeries`.
pub fn align(
    a: &PriceSeries,
    b: &PriceSeries,
) -> Result<(PriceSeries, PriceSeries), AnalyticsError> {
    let dates_a: HashSet<NaiveDate> = a.points().iter().map(|p| p.date).collect();
    let dates_b: HashSet<NaiveDate> = b.points().iter().map(|p| p.date).collect();

    let keep = |s: &PriceSeries, other: &HashSet<NaiveDate>| -> Vec<PricePoint> {
        s.points()
            .iter()
            .filter(|p| other.contains(&p.date))
            .copied()
            .collect()
    };

    let kept_a = keep(a, &dates_b);
    let kept_b = keep(b, &dates_a);

    if kept_a.is_empty() {
        return Err(AnalyticsError::MisalignedSeries(format!(
            "{} and {} have no overlapping dates",
            a.ticker(),
            b.ticker()
        )));
    }

    // Filtering preserves order and prices, so reconstruction cannot fail.
    let a = PriceSeries::new(a.ticker(), kept_a)?;
    let b = PriceSeries::new(b.ticker(), kept_b)?;
    Ok((a, b))
}

/// CAGR and max drawdown for one series, bundled for the response payload.
pub fn metrics(series: &PriceSeries) -> Result<SeriesMetrics, AnalyticsError> {
    Ok(SeriesMetrics {
        cagr: cagr(series)?,
        max_drawdown: max_drawdown(series),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn series(points: &[(&str, f64)]) -> PriceSeries {
        let points = points
            .iter()
            .map(|(d, close)| PricePoint { date: date(d), close: *close })
            .collect();
        PriceSeries::new("TEST", points).unwrap()
    }

    #[test]
    fn test_normalize_first_value_is_exactly_100() {
        let s = series(&[("2024-01-01", 412.37), ("2024-02-01", 430.11)]);
        let n = normalize(&s).unwrap();
        assert_eq!(n.points[0].value, 100.0);
    }

    #[test]
    fn test_normalize_matches_ratio_to_base() {
        let s = series(&[
            ("2024-01-01", 80.0),
            ("2024-02-01", 100.0),
            ("2024-03-01", 40.0),
        ]);
        let n = normalize(&s).unwrap();
        assert_eq!(n.points[1].value, 125.0);
        assert_eq!(n.points[2].value, 50.0);
        assert_eq!(n.points.len(), s.len());
        assert_eq!(n.points[2].date, date("2024-03-01"));
    }

    #[test]
    fn test_normalize_rejects_zero_base_price() {
        let s = series(&[("2024-01-01", 0.0), ("2024-02-01", 10.0)]);
        let err = normalize(&s).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn test_cagr_flat_series_is_zero() {
        let s = series(&[("2020-01-01", 50.0), ("2023-01-01", 50.0)]);
        assert_eq!(cagr(&s).unwrap(), 0.0);
    }

    #[test]
    fn test_cagr_one_year_21_percent() {
        // 100 -> 121 over exactly 365 days
        let s = series(&[("2023-01-01", 100.0), ("2024-01-01", 121.0)]);
        let c = cagr(&s).unwrap();
        assert!((c - 0.21).abs() < 1e-10);
    }

    #[test]
    fn test_cagr_two_years_compounds() {
        // 100 -> 121 over 730 days is 10% a year
        let s = series(&[("2022-01-01", 100.0), ("2024-01-01", 121.0)]);
        let c = cagr(&s).unwrap();
        assert!((c - 0.10).abs() < 1e-10);
    }

    #[test]
    fn test_cagr_single_point_is_insufficient() {
        let s = series(&[("2024-01-01", 100.0)]);
        let err = cagr(&s).unwrap_err();
        assert!(matches!(err, AnalyticsError::InsufficientData(_)));
    }

    #[test]
    fn test_cagr_rejects_zero_first_price() {
        let s = series(&[("2023-01-01", 0.0), ("2024-01-01", 10.0)]);
        let err = cagr(&s).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn test_max_drawdown_flat_series_is_zero() {
        let s = series(&[
            ("2024-01-01", 100.0),
            ("2024-02-01", 100.0),
            ("2024-03-01", 100.0),
        ]);
        assert_eq!(max_drawdown(&s), 0.0);
    }

    #[test]
    fn test_max_drawdown_strictly_increasing_is_zero() {
        let s = series(&[
            ("2024-01-01", 100.0),
            ("2024-02-01", 110.0),
            ("2024-03-01", 125.0),
        ]);
        assert_eq!(max_drawdown(&s), 0.0);
    }

    #[test]
    fn test_max_drawdown_single_point_is_zero() {
        let s = series(&[("2024-01-01", 100.0)]);
        assert_eq!(max_drawdown(&s), 0.0);
    }

    #[test]
    fn test_max_drawdown_peak_trough_recovery() {
        // Peak 100, trough 50, then a new high: the new high carries zero
        // drawdown, and the result stays at the earlier -50%.
        let s = series(&[
            ("2024-01-01", 100.0),
            ("2024-02-01", 50.0),
            ("2024-03-01", 150.0),
        ]);
        assert_eq!(max_drawdown(&s), -0.5);
    }

    #[test]
    fn test_max_drawdown_uses_running_peak_not_first_price() {
        let s = series(&[
            ("2024-01-01", 100.0),
            ("2024-02-01", 200.0),
            ("2024-03-01", 150.0),
        ]);
        assert_eq!(max_drawdown(&s), -0.25);
    }

    #[test]
    fn test_difference_matches_pointwise_subtraction() {
        let a = normalize(&series(&[
            ("2024-01-01", 100.0),
            ("2024-02-01", 120.0),
        ]))
        .unwrap();
        let b = normalize(&series(&[
            ("2024-01-01", 50.0),
            ("2024-02-01", 25.0),
        ]))
        .unwrap();

        let d = difference(&a, &b).unwrap();
        assert_eq!(d.points.len(), 2);
        for i in 0..d.points.len() {
            assert_eq!(d.points[i].value, a.points[i].value - b.points[i].value);
        }
        assert_eq!(d.points[0].value, 0.0);
        assert_eq!(d.points[1].value, 70.0);
    }

    #[test]
    fn test_difference_rejects_length_mismatch() {
        let a = normalize(&series(&[("2024-01-01", 1.0), ("2024-02-01", 2.0)])).unwrap();
        let b = normalize(&series(&[("2024-01-01", 1.0)])).unwrap();
        let err = difference(&a, &b).unwrap_err();
        assert!(matches!(err, AnalyticsError::MisalignedSeries(_)));
    }

    #[test]
    fn test_difference_rejects_date_mismatch() {
        let a = normalize(&series(&[("2024-01-01", 1.0), ("2024-02-01", 2.0)])).unwrap();
        let b = normalize(&series(&[("2024-01-01", 1.0), ("2024-02-15", 2.0)])).unwrap();
        let err = difference(&a, &b).unwrap_err();
        assert!(matches!(err, AnalyticsError::MisalignedSeries(_)));
    }

    #[test]
    fn test_align_keeps_only_shared_dates() {
        let a = series(&[
            ("2024-01-01", 10.0),
            ("2024-02-01", 11.0),
            ("2024-03-01", 12.0),
        ]);
        let b = series(&[
            ("2024-02-01", 20.0),
            ("2024-03-01", 21.0),
            ("2024-04-01", 22.0),
        ]);

        let (a, b) = align(&a, &b).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 2);
        assert_eq!(a.first().date, date("2024-02-01"));
        assert_eq!(b.last().date, date("2024-03-01"));
    }

    #[test]
    fn test_align_disjoint_ranges_fail() {
        let a = series(&[("2024-01-01", 10.0)]);
        let b = series(&[("2024-02-01", 20.0)]);
        let err = align(&a, &b).unwrap_err();
        assert!(matches!(err, AnalyticsError::MisalignedSeries(_)));
    }

    #[test]
    fn test_metrics_bundles_cagr_and_drawdown() {
        let s = series(&[
            ("2023-01-01", 100.0),
            ("2023-07-01", 80.0),
            ("2024-01-01", 121.0),
        ]);
        let m = metrics(&s).unwrap();
        assert!((m.cagr - 0.21).abs() < 1e-10);
        assert_eq!(m.max_drawdown, -0.2);
        assert!(m.cagr.is_finite() && m.max_drawdown.is_finite());
    }
}
