//! Example: classify a tabular data file and list the charts it supports.
//!
//! Usage:
//!   cargo run --example plan_charts -- <file_path> [chart_type]
//!
//! Example:
//!   RUST_LOG=plotsense=debug cargo run --example plan_charts -- sales.csv Bar

use std::env;

use plotsense::validation::arity;
use plotsense::{ChartType, Plotsense};
use tracing_subscriber::EnvFilter;

fn main() -> plotsense::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run --example plan_charts -- <file_path> [chart_type]");
        std::process::exit(1);
    }

    let charts: Vec<ChartType> = match args.get(2) {
        Some(name) => match name.parse() {
            Ok(chart) => vec![chart],
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => ChartType::ALL.to_vec(),
    };

    let plotsense = Plotsense::new();
    let Some(dataset) = plotsense.load(&args[1])? else {
        eprintln!("Error: no table could be loaded from {}", args[1]);
        std::process::exit(1);
    };

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Plotsense: {} ({})", dataset.source.file, dataset.source.format);
    println!("{}", separator);
    println!();

    println!("## Columns");
    for column in dataset.overview.summary().columns {
        println!(
            "  {:20} {:10} {:15} unique={:<5} nulls={}",
            column.name, column.raw_type, column.category, column.unique_count, column.null_count
        );
    }
    for split in dataset.overview.splits() {
        println!(
            "  split '{}' into {} and {}{}",
            split.source,
            split.date_column,
            split.time_column,
            if split.time_is_empty { " (no time of day)" } else { "" }
        );
    }
    println!();

    println!("## Charts");
    for chart in charts {
        let values = vec![None; arity(chart)];
        match plotsense.plan(&dataset.overview, chart, values) {
            Some(plan) => {
                println!("  {} ({} combinations)", chart, plan.charts.len());
                for planned in &plan.charts {
                    println!("    {}", planned.title);
                }
                for layout in plan.facet_layouts() {
                    println!(
                        "    facets of '{}': {} groups on a {}x{} grid",
                        layout.variable,
                        layout.labels.len(),
                        layout.rows,
                        layout.columns
                    );
                }
                if !plan.high_cardinal.is_empty() {
                    println!("    too varied to plot directly: {}", plan.high_cardinal.join(", "));
                }
            }
            None => println!("  {} (not eligible)", chart),
        }
    }

    Ok(())
}
