// Revenue Aggregator - monthly bucketing + trend fit
// Buckets transaction amounts by calendar month for one target year, fits a
// line over the twelve totals, and emits the chart payload.

use anyhow::Result;
use std::path::Path;

use crate::chart::{
    self, AxisTitle, ChartPayload, Layout, Legend, LineStyle, Margin, Marker, Series,
};
use crate::records::{self, Transaction};
use crate::regression::LinearFit;

/// Month labels in calendar order, as they appear on the chart's x-axis.
pub const MONTH_LABELS: [&str; 12] = [
    "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12",
];

/// Sum transaction amounts into one bucket per calendar month of `year`.
///
/// Always returns exactly 12 totals in month order; months with no matching
/// transactions stay at zero. Records with malformed dates or a different
/// year contribute to no bucket - that is the filtering policy, not an error.
/// Accumulation is order-independent (up to floating-point rounding).
pub fn monthly_totals(records: &[Transaction], year: i32) -> [f64; 12] {
    let mut totals = [0.0; 12];

    for record in records {
        if let Some((_day, month, record_year)) = record.date_parts() {
            if record_year == year {
                totals[(month - 1) as usize] += record.amount;
            }
        }
    }

    totals
}

/// Build the chart payload: monthly bars plus a least-squares trend line.
///
/// The trend is fit against the numeric month labels 1..=12 (leading zero
/// stripped), so the line series holds one predicted value per month.
pub fn build_chart_payload(records: &[Transaction], year: i32) -> ChartPayload {
    let totals = monthly_totals(records, year);

    let months: Vec<f64> = (1..=12).map(|m| m as f64).collect();
    let fit = LinearFit::fit(&months, &totals);
    let predicted = fit.predict_all(&months);

    let labels: Vec<String> = MONTH_LABELS.iter().map(|m| m.to_string()).collect();

    ChartPayload {
        data: vec![
            Series {
                kind: "bar".to_string(),
                x: labels.clone(),
                y: totals.to_vec(),
                marker: Some(Marker {
                    color: chart::BAR_COLOR.to_string(),
                }),
                mode: None,
                line: None,
                name: "Monthly Revenue".to_string(),
            },
            Series {
                kind: "scatter".to_string(),
                x: labels,
                y: predicted,
                marker: None,
                mode: Some("lines".to_string()),
                line: Some(LineStyle {
                    width: 3,
                    color: chart::LINE_COLOR.to_string(),
                }),
                name: "Trend Line".to_string(),
            },
        ],
        layout: Layout {
            title: "Monthly Revenue Trend".to_string(),
            xaxis: AxisTitle {
                title: "Month".to_string(),
            },
            yaxis: AxisTitle {
                title: "Revenue ($)".to_string(),
            },
            template: "plotly_white".to_string(),
            showlegend: true,
            legend: Legend {
                yanchor: "top".to_string(),
                y: 0.99,
                xanchor: "right".to_string(),
                x: 0.99,
            },
            margin: Margin {
                t: 50,
                l: 50,
                r: 50,
                b: 50,
            },
        },
    }
}

/// Get the chart payload, preferring the cache over a full recompute.
///
/// Cache hit: return the cached payload as-is. Cache miss (absent or
/// unreadable file): load the CSV, aggregate, write the cache back, return
/// the fresh payload. A missing CSV on a cache miss is fatal.
pub fn load_or_build(csv_path: &Path, cache_path: &Path, year: i32) -> Result<ChartPayload> {
    if let Some(cached) = chart::load_cache(cache_path) {
        return Ok(cached);
    }

    let records = records::load_csv(csv_path)?;
    let payload = build_chart_payload(&records, year);
    chart::save_cache(cache_path, &payload)?;
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn tx(date: &str, amount: f64) -> Transaction {
        Transaction {
            date: date.to_string(),
            subject: "Session".to_string(),
            amount,
        }
    }

    #[test]
    fn test_always_twelve_buckets_in_month_order() {
        let totals = monthly_totals(&[], 2024);
        assert_eq!(totals.len(), 12);
        assert!(totals.iter().all(|&t| t == 0.0));

        let payload = build_chart_payload(&[], 2024);
        assert_eq!(payload.data[0].x, MONTH_LABELS.to_vec());
        assert_eq!(payload.bar_values().len(), 12);
        assert_eq!(payload.trend_values().len(), 12);
    }

    #[test]
    fn test_amounts_land_in_their_month() {
        let records = vec![
            tx("05/01/2024", 100.0),
            tx("10/01/2024", 50.0),
            tx("28/12/2024", 75.0),
        ];
        let totals = monthly_totals(&records, 2024);
        assert_eq!(totals[0], 150.0);
        assert_eq!(totals[11], 75.0);
        assert_eq!(totals[5], 0.0);
    }

    #[test]
    fn test_other_years_are_excluded() {
        let records = vec![
            tx("05/03/2023", 999.0),
            tx("05/03/2025", 999.0),
            tx("05/03/2024", 40.0),
        ];
        let totals = monthly_totals(&records, 2024);
        assert_eq!(totals[2], 40.0);
        assert_eq!(totals.iter().sum::<f64>(), 40.0);
    }

    #[test]
    fn test_malformed_dates_are_excluded() {
        let records = vec![
            tx("garbage", 500.0),
            tx("31/02/2024", 500.0),
            tx("05/03/2024", 10.0),
        ];
        let totals = monthly_totals(&records, 2024);
        assert_eq!(totals.iter().sum::<f64>(), 10.0);
    }

    #[test]
    fn test_totals_invariant_under_reordering() {
        let mut records = vec![
            tx("05/01/2024", 10.0),
            tx("06/01/2024", 20.0),
            tx("07/02/2024", 30.0),
            tx("08/11/2024", 40.0),
        ];
        let forward = monthly_totals(&records, 2024);
        records.reverse();
        let reversed = monthly_totals(&records, 2024);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_negative_amounts_reduce_the_bucket() {
        let records = vec![tx("05/04/2024", 100.0), tx("20/04/2024", -25.0)];
        let totals = monthly_totals(&records, 2024);
        assert_eq!(totals[3], 75.0);
    }

    #[test]
    fn test_trend_exact_on_collinear_totals() {
        // One transaction per month with amounts on the line y = 100*m
        let records: Vec<Transaction> = (1..=12)
            .map(|m| tx(&format!("15/{:02}/2024", m), 100.0 * m as f64))
            .collect();

        let payload = build_chart_payload(&records, 2024);
        for (bar, trend) in payload.bar_values().iter().zip(payload.trend_values()) {
            assert!((bar - trend).abs() < TOL);
        }
    }

    #[test]
    fn test_load_or_build_round_trip() {
        let dir = std::env::temp_dir();
        let csv_path = dir.join("business_valuation_agg_test.csv");
        let cache_path = dir.join("business_valuation_agg_test_cache.json");
        std::fs::remove_file(&cache_path).ok();

        std::fs::write(
            &csv_path,
            "Date,Subject,Amount\n05/06/2024,Session,300.0\n",
        )
        .unwrap();

        // First run: builds from CSV and writes the cache
        let built = load_or_build(&csv_path, &cache_path, 2024).unwrap();
        assert_eq!(built.bar_values()[5], 300.0);
        assert!(cache_path.exists());

        // Second run: served from cache even though the CSV is gone
        std::fs::remove_file(&csv_path).unwrap();
        let cached = load_or_build(&csv_path, &cache_path, 2024).unwrap();
        assert_eq!(cached.bar_values(), built.bar_values());

        std::fs::remove_file(&cache_path).ok();
    }

    #[test]
    fn test_load_or_build_missing_csv_without_cache_is_fatal() {
        let dir = std::env::temp_dir();
        let cache_path = dir.join("business_valuation_agg_no_cache_test.json");
        std::fs::remove_file(&cache_path).ok();

        let result = load_or_build(
            Path::new("/nonexistent/revenue.csv"),
            &cache_path,
            2024,
        );
        assert!(result.is_err());
    }
}
