// Business Valuation Core - Library
// Exposes the aggregation and valuation pipeline for the CLI, API server, and tests

pub mod aggregator;
pub mod chart;
pub mod records;
pub mod regression;
pub mod stats;
pub mod valuation;

// Re-export commonly used types
pub use aggregator::{build_chart_payload, load_or_build, monthly_totals, MONTH_LABELS};
pub use chart::{load_cache, save_cache, ChartPayload, Layout, Series};
pub use records::{load_csv, Transaction};
pub use regression::LinearFit;
pub use stats::RevenueStats;
pub use valuation::{
    calculate_valuation, format_currency, ValuationComponents, ValuationExplanation,
    ValuationMetrics, REVENUE_MULTIPLE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calendar year the dashboard reports on
pub const TARGET_YEAR: i32 = 2024;

/// Default transaction source next to the binary
pub const DEFAULT_CSV_PATH: &str = "revenue.csv";

/// Default chart payload cache next to the binary
pub const DEFAULT_CACHE_PATH: &str = "monthly_earnings.json";
