// Valuation Calculator - headline business value + supporting metrics
// Revenue-based valuation: (annual revenue + one year of projected growth)
// scaled by a fixed conservative multiple.

use serde::Serialize;

use crate::chart::ChartPayload;
use crate::regression::LinearFit;

/// Fixed revenue multiple applied on top of revenue + growth.
///
/// A policy constant (conservative for a small services business), not
/// derived from the data.
pub const REVENUE_MULTIPLE: f64 = 1.1;

/// Display-formatted valuation metrics.
///
/// Every value is pre-formatted for the UI; the raw numbers live in
/// [`ValuationComponents`]. Serialized field names are the exact labels the
/// presentation layer renders.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationMetrics {
    #[serde(rename = "Business Value")]
    pub business_value: String,

    #[serde(rename = "Base Annual Revenue")]
    pub base_annual_revenue: String,

    #[serde(rename = "Projected Annual Growth")]
    pub projected_annual_growth: String,

    #[serde(rename = "Monthly Growth Rate")]
    pub monthly_growth_rate: String,

    #[serde(rename = "Revenue Multiple")]
    pub revenue_multiple: String,

    #[serde(rename = "Monthly Revenue (Avg)")]
    pub avg_monthly_revenue: String,
}

impl ValuationMetrics {
    /// The metrics shown as supporting cards, in display order.
    ///
    /// Business Value is left out: the presentation layer features it
    /// separately above the grid.
    pub fn supporting(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Base Annual Revenue", self.base_annual_revenue.as_str()),
            ("Projected Annual Growth", self.projected_annual_growth.as_str()),
            ("Monthly Growth Rate", self.monthly_growth_rate.as_str()),
            ("Revenue Multiple", self.revenue_multiple.as_str()),
            ("Monthly Revenue (Avg)", self.avg_monthly_revenue.as_str()),
        ]
    }
}

/// How the headline number was produced: formula text plus raw components.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationExplanation {
    pub method: String,
    pub formula: String,
    pub components: ValuationComponents,
}

/// Raw (unformatted) numeric inputs to the valuation, kept alongside the
/// display strings so downstream code can recompute or re-render them.
#[derive(Debug, Clone, Serialize)]
pub struct ValuationComponents {
    pub annual_revenue: f64,
    pub growth_projection: f64,
    pub multiple: f64,
    pub reasoning: String,
}

const REASONING: &str = "1. Uses current annual revenue as base value\n\
    2. Adds one year of projected growth based on current trend\n\
    3. Applies 1.1x multiple (conservative for education business)\n\
    4. Growth projection uses linear regression of monthly revenue";

/// Compute valuation metrics from the chart payload's bar series.
///
/// The monthly totals are regressed against their zero-based index 0..=11;
/// the slope is the monthly growth in currency units per month. With fewer
/// than 2 points the slope degenerates to 0 (flat projection) rather than
/// failing - upstream always supplies 12 points, so this path is never hit
/// in practice.
pub fn calculate_valuation(payload: &ChartPayload) -> (ValuationMetrics, ValuationExplanation) {
    let monthly_revenue = payload.bar_values();

    let annual_revenue: f64 = monthly_revenue.iter().sum();
    let avg_monthly_revenue = if monthly_revenue.is_empty() {
        0.0
    } else {
        annual_revenue / monthly_revenue.len() as f64
    };

    // Growth trend over sequential indices (not calendar month numbers)
    let indices: Vec<f64> = (0..monthly_revenue.len()).map(|i| i as f64).collect();
    let fit = LinearFit::fit(&indices, monthly_revenue);

    let monthly_growth = fit.slope;
    let projected_annual_growth = monthly_growth * 12.0;
    let business_value = (annual_revenue + projected_annual_growth) * REVENUE_MULTIPLE;

    let metrics = ValuationMetrics {
        business_value: format_currency(business_value),
        base_annual_revenue: format_currency(annual_revenue),
        projected_annual_growth: format_currency(projected_annual_growth),
        monthly_growth_rate: format!("{}/month", format_currency(monthly_growth)),
        revenue_multiple: format!("{}x", REVENUE_MULTIPLE),
        avg_monthly_revenue: format_currency(avg_monthly_revenue),
    };

    let explanation = ValuationExplanation {
        method: "Revenue-based valuation with growth projection".to_string(),
        formula: "(Annual Revenue + 12-month Growth) × Multiple".to_string(),
        components: ValuationComponents {
            annual_revenue,
            growth_projection: projected_annual_growth,
            multiple: REVENUE_MULTIPLE,
            reasoning: REASONING.to_string(),
        },
    };

    (metrics, explanation)
}

/// Format an amount as `$1,234.56`: two decimals, comma-grouped thousands,
/// sign between the `$` and the digits.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };

    // Two decimal places are always present after {:.2}
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${}{}.{}", sign, grouped, frac_part)
}
