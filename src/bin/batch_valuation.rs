//! Run valuations for a whole block of requests from a CSV file
//!
//! Outputs one result row per request for downstream reporting. Requests are
//! independent, so the block is valuated in parallel.

use clap::Parser;
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use usufruct_valuation::request::{load_requests, BatchRequest};
use usufruct_valuation::tables::loader;
use usufruct_valuation::valuation::DesagioEngine;
use usufruct_valuation::{ComparableTransactionSet, ValuationError, ValuationResult};

#[derive(Debug, Parser)]
#[command(name = "batch_valuation", about = "Batch usufruct valuation over a request CSV")]
struct Args {
    /// Request CSV (postal_code,built_area_sqm,gender,birth_date,market_estimate)
    requests: PathBuf,

    /// Directory containing the per-gender life tables
    #[arg(long, default_value = loader::DEFAULT_TABLES_PATH)]
    tables_dir: PathBuf,

    /// Comparable-transaction CSV
    #[arg(long, default_value = usufruct_valuation::comparables::DEFAULT_COMPARABLES_PATH)]
    comparables: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "valuation_output.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading life tables from {}...", args.tables_dir.display());
    let tables = loader::load_store(&args.tables_dir)
        .map_err(|e| anyhow::anyhow!("loading life tables: {e}"))?;

    println!("Loading comparables from {}...", args.comparables.display());
    let comparables = ComparableTransactionSet::from_csv(&args.comparables)
        .map_err(|e| anyhow::anyhow!("loading comparables: {e}"))?;
    println!("Loaded {} comparable records", comparables.len());

    let requests = load_requests(&args.requests)
        .map_err(|e| anyhow::anyhow!("loading requests: {e}"))?;
    println!("Loaded {} requests in {:?}", requests.len(), start.elapsed());

    let engine = DesagioEngine::new(Arc::new(tables));
    let today = chrono::Local::now().date_naive();

    println!("Running valuations...");
    let run_start = Instant::now();

    // Requests are independent; results are position-stable under par_iter
    let results: Vec<(&BatchRequest, Result<ValuationResult, ValuationError>)> = requests
        .par_iter()
        .map(|request| {
            let input = request.to_input(&comparables, today);
            (request, engine.reconcile(&input))
        })
        .collect();

    println!("Valuations complete in {:?}", run_start.elapsed());

    let mut file = File::create(&args.output)?;
    writeln!(
        file,
        "postal_code,built_area_sqm,gender,market_estimate,usufruct_value,bare_value,desagio_min,desagio_max,error"
    )?;

    let mut failures = 0usize;
    for (request, outcome) in &results {
        match outcome {
            Ok(result) => {
                let desagio_max = result
                    .desagio_max
                    .map(|v| format!("{:.8}", v))
                    .unwrap_or_default();
                writeln!(
                    file,
                    "{},{},{},{:.2},{:.8},{:.8},{:.8},{},",
                    request.postal_code,
                    request.built_area_sqm,
                    request.gender,
                    request.market_estimate,
                    result.usufruct_value,
                    result.bare_value,
                    result.desagio_min,
                    desagio_max,
                )?;
            }
            Err(err) => {
                failures += 1;
                writeln!(
                    file,
                    "{},{},{},{:.2},,,,,{}",
                    request.postal_code,
                    request.built_area_sqm,
                    request.gender,
                    request.market_estimate,
                    err,
                )?;
            }
        }
    }

    println!("\nResults written to: {}", args.output.display());
    println!("  Valuated: {}", results.len() - failures);
    println!("  Failed: {}", failures);

    Ok(())
}
