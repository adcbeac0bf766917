//! Usufruct Valuation CLI
//!
//! Runs a single valuation: loads the life tables and comparable
//! transactions, resolves the occupant's age and gender, and prints the
//! usufruct/bare split with the reconciled desagio range.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use usufruct_valuation::request::{age_at, AppraisalResponse, Gender, ValuationInput};
use usufruct_valuation::tables::loader;
use usufruct_valuation::valuation::{DesagioEngine, LogObserver, DEFAULT_DISCOUNT_RATE};
use usufruct_valuation::ComparableTransactionSet;

#[derive(Debug, Parser)]
#[command(name = "usufruct_valuation", about = "Usufruct / bare-property valuation")]
struct Args {
    /// Directory containing mort_male.csv, mort_female.csv, mort_other.csv
    #[arg(long, default_value = loader::DEFAULT_TABLES_PATH)]
    tables_dir: PathBuf,

    /// Comparable-transaction CSV
    #[arg(long, default_value = usufruct_valuation::comparables::DEFAULT_COMPARABLES_PATH)]
    comparables: PathBuf,

    /// Postal code of the property
    #[arg(long)]
    postal_code: u32,

    /// Built area in square meters
    #[arg(long)]
    area: u32,

    /// Occupant gender (free text; unknown values fall back to the Other table)
    #[arg(long)]
    gender: String,

    /// Occupant birth date (YYYY-MM-DD)
    #[arg(long)]
    birth_date: NaiveDate,

    /// Market estimate; if omitted, read from --appraisal-json
    #[arg(long)]
    market_estimate: Option<f64>,

    /// Appraisal API response JSON file (used when --market-estimate is absent)
    #[arg(long)]
    appraisal_json: Option<PathBuf>,

    /// Annual discount rate
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_RATE)]
    discount_rate: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let market_estimate = match (args.market_estimate, &args.appraisal_json) {
        (Some(estimate), _) => estimate,
        (None, Some(path)) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading appraisal response {}", path.display()))?;
            let response: AppraisalResponse =
                serde_json::from_str(&raw).context("parsing appraisal response")?;
            response.market_estimate()
        }
        (None, None) => {
            anyhow::bail!("either --market-estimate or --appraisal-json is required")
        }
    };

    let tables = loader::load_store(&args.tables_dir)
        .map_err(|e| anyhow::anyhow!("loading life tables: {e}"))?;
    let comparables = ComparableTransactionSet::from_csv(&args.comparables)
        .map_err(|e| anyhow::anyhow!("loading comparables: {e}"))?;

    let today = chrono::Local::now().date_naive();
    let input = ValuationInput {
        market_estimate,
        comparable_stats: comparables.lookup(args.postal_code, args.area),
        gender: Gender::from_input(&args.gender),
        age: age_at(args.birth_date, today),
        discount_rate: args.discount_rate,
    };

    let engine = DesagioEngine::new(Arc::new(tables)).with_observer(Box::new(LogObserver));
    let result = engine.reconcile(&input)?;

    println!("Usufruct Valuation v0.1.0");
    println!("=========================\n");
    println!("Input:");
    println!("  Postal Code: {}", args.postal_code);
    println!("  Built Area: {} sqm", args.area);
    println!("  Gender: {:?}", input.gender);
    println!("  Age: {}", input.age);
    println!("  Market Estimate: {:.2}", market_estimate);
    println!(
        "  Comparables: avg={:.2} min={:.2} max={:.2}",
        input.comparable_stats.avg, input.comparable_stats.min, input.comparable_stats.max
    );
    println!();
    println!("Result:");
    println!("  Usufruct Value: {:.2}", result.usufruct_value);
    println!("  Bare Property Value: {:.2}", result.bare_value);
    println!("  Desagio Min: {:.4}%", result.desagio_min);
    match result.desagio_max {
        Some(max) => println!("  Desagio Max: {:.4}%", max),
        None => println!("  Desagio Max: n/a (estimate within comparable variance)"),
    }

    println!("\n{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
