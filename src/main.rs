use anyhow::Result;
use std::env;
use std::path::Path;

use business_valuation::{
    build_chart_payload, calculate_valuation, load_csv, load_or_build, save_cache, RevenueStats,
    DEFAULT_CACHE_PATH, DEFAULT_CSV_PATH, TARGET_YEAR,
};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "aggregate" {
        // Aggregate mode: CSV -> cache, no report
        let csv_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_CSV_PATH);
        let cache_path = args.get(3).map(String::as_str).unwrap_or(DEFAULT_CACHE_PATH);
        run_aggregate(Path::new(csv_path), Path::new(cache_path))?;
    } else {
        // Report mode (default)
        let csv_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CSV_PATH);
        let cache_path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_CACHE_PATH);
        run_report(Path::new(csv_path), Path::new(cache_path))?;
    }

    Ok(())
}

fn run_aggregate(csv_path: &Path, cache_path: &Path) -> Result<()> {
    println!("📊 Revenue Aggregation - CSV → chart cache");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n📂 Loading transactions...");
    let records = load_csv(csv_path)?;
    println!("✓ Loaded {} transactions from {:?}", records.len(), csv_path);

    let payload = build_chart_payload(&records, TARGET_YEAR);
    save_cache(cache_path, &payload)?;
    println!("✓ Chart payload written to {:?}", cache_path);

    Ok(())
}

fn run_report(csv_path: &Path, cache_path: &Path) -> Result<()> {
    let payload = load_or_build(csv_path, cache_path, TARGET_YEAR)?;
    let (metrics, explanation) = calculate_valuation(&payload);
    let stats = RevenueStats::from_payload(&payload);

    println!("💼 Business Valuation Dashboard ({})", TARGET_YEAR);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\nEstimated Business Value: {}", metrics.business_value);
    println!("Formula: {}", explanation.formula);

    println!("\nSupporting metrics:");
    for (label, value) in metrics.supporting() {
        println!("  {:<26} {}", label, value);
    }

    println!("\nRevenue stats:");
    for (label, value) in stats.labeled() {
        println!("  {:<26} {}", label, value);
    }

    println!("\nCalculation method:");
    for line in explanation.components.reasoning.lines() {
        println!("  {}", line.trim());
    }

    Ok(())
}
