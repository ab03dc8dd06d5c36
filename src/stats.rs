// Supplementary Revenue Stats - growth %, highest and lowest month
// Derived directly from the chart payload's bar series for the dashboard's
// secondary cards.

use serde::Serialize;

use crate::chart::ChartPayload;
use crate::valuation::format_currency;

/// Secondary revenue figures rendered under the chart.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueStats {
    /// Percent change from the first to the last month, e.g. `12.5%`.
    /// `N/A` when the first month had no revenue.
    #[serde(rename = "Revenue Growth")]
    pub revenue_growth: String,

    #[serde(rename = "Highest Month")]
    pub highest_month: String,

    #[serde(rename = "Lowest Month")]
    pub lowest_month: String,
}

impl RevenueStats {
    pub fn from_payload(payload: &ChartPayload) -> Self {
        let values = payload.bar_values();

        let revenue_growth = match (values.first(), values.last()) {
            (Some(&first), Some(&last)) if first != 0.0 => {
                format!("{:.1}%", (last - first) / first * 100.0)
            }
            _ => "N/A".to_string(),
        };

        let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);

        let (highest_month, lowest_month) = if values.is_empty() {
            ("N/A".to_string(), "N/A".to_string())
        } else {
            (format_currency(highest), format_currency(lowest))
        };

        RevenueStats {
            revenue_growth,
            highest_month,
            lowest_month,
        }
    }

    /// Label/value pairs in display order.
    pub fn labeled(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Revenue Growth", self.revenue_growth.as_str()),
            ("Highest Month", self.highest_month.as_str()),
            ("Lowest Month", self.lowest_month.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::build_chart_payload;
    use crate::records::Transaction;

    fn payload_from_totals(totals: &[f64; 12]) -> ChartPayload {
        let records: Vec<Transaction> = totals
            .iter()
            .enumerate()
            .map(|(i, &amount)| Transaction {
                date: format!("10/{:02}/2024", i + 1),
                subject: "Session".to_string(),
                amount,
            })
            .collect();
        build_chart_payload(&records, 2024)
    }

    #[test]
    fn test_growth_first_to_last() {
        let mut totals = [100.0; 12];
        totals[11] = 150.0;
        let stats = RevenueStats::from_payload(&payload_from_totals(&totals));
        assert_eq!(stats.revenue_growth, "50.0%");
    }

    #[test]
    fn test_negative_growth() {
        let mut totals = [200.0; 12];
        totals[11] = 150.0;
        let stats = RevenueStats::from_payload(&payload_from_totals(&totals));
        assert_eq!(stats.revenue_growth, "-25.0%");
    }

    #[test]
    fn test_zero_first_month_yields_na() {
        let mut totals = [100.0; 12];
        totals[0] = 0.0;
        let stats = RevenueStats::from_payload(&payload_from_totals(&totals));
        assert_eq!(stats.revenue_growth, "N/A");
    }

    #[test]
    fn test_highest_and_lowest_month() {
        let mut totals = [100.0; 12];
        totals[3] = 875.25;
        totals[8] = 12.0;
        let stats = RevenueStats::from_payload(&payload_from_totals(&totals));
        assert_eq!(stats.highest_month, "$875.25");
        assert_eq!(stats.lowest_month, "$12.00");
    }

    #[test]
    fn test_empty_payload() {
        let payload = ChartPayload {
            data: vec![],
            layout: payload_from_totals(&[0.0; 12]).layout,
        };
        let stats = RevenueStats::from_payload(&payload);
        assert_eq!(stats.revenue_growth, "N/A");
        assert_eq!(stats.highest_month, "N/A");
        assert_eq!(stats.lowest_month, "N/A");
    }
}
